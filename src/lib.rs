//! Retriever Core Library
//!
//! This library retrieves digitized map images from the Library of Congress
//! tile service: it enumerates the index ranges configured for a named
//! collection, fetches each image over HTTP, and writes it under a
//! deterministic local filename, recording the whole run in a plain-text log.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Typed YAML configuration with load-time validation
//! - [`naming`] - Filename derivation and output path resolution
//! - [`resource`] - Resource URL construction (raw and tiled schemes)
//! - [`retrieve`] - HTTP client and the sequential retrieval loop
//! - [`runlog`] - The per-run log file mirrored to standard output

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod naming;
pub mod options;
pub mod resource;
pub mod retrieve;
pub mod runlog;

// Re-export commonly used types
pub use config::{CollectionConfig, ConfigError, RetrieverConfig, RunConfig};
pub use options::RequestOptions;
pub use retrieve::{HttpClient, RetrievalStats, RetrieveError, retrieve_collection};
pub use runlog::RunLog;

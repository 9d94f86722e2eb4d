//! Strongly typed configuration loaded from the companion YAML file.
//!
//! The document carries the image-service address (protocol, subdomain,
//! domain), the per-format service-path mapping, and one entry per map
//! collection under `maps`. Everything is read once at startup, validated
//! eagerly, and never mutated afterwards. Unknown keys and empty index
//! ranges fail here, before any network activity.
//!
//! # Example document
//!
//! ```yaml
//! protocol: https
//! subdomain: tile
//! domain: loc.gov
//! service_path:
//!   jpg: image-services/iiif/service
//!   tif: storage-services/service/gmd
//! maps:
//!   ann_arbor_1925:
//!     digital_id: sanborn04006_008
//!     manifest: https://www.loc.gov/item/sanborn04006_008/manifest.json
//!     filename_segments:
//!       name: [sanborn, ann_arbor]
//!       year: 1925
//!       vol: null
//!     path_segments:
//!       - gmd: g4114m:g4114am
//!         id_prefix: ct0008
//!         part: null
//!         index:
//!           start: 1
//!           stop: 26
//!           zfill_width: 3
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or consulting the configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read from disk.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not a valid document of the expected shape.
    #[error("malformed config file {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The requested collection key has no entry under `maps`.
    #[error("no collection named {key:?} in config (available: {available})")]
    UnknownCollection {
        /// The key that was requested.
        key: String,
        /// Comma-separated list of configured collection keys.
        available: String,
    },

    /// The requested image format has no entry in the `service_path` mapping.
    #[error("no service path configured for format {format:?}")]
    UnknownFormat {
        /// The format that was requested.
        format: String,
    },

    /// An index range enumerates nothing (start must be below stop).
    #[error(
        "collection {key:?} path segment {segment}: index start {start} must be below stop {stop}"
    )]
    InvalidRange {
        /// Collection key owning the offending segment.
        key: String,
        /// Zero-based position of the segment within `path_segments`.
        segment: usize,
        /// Configured range start.
        start: u32,
        /// Configured range stop (exclusive).
        stop: u32,
    },
}

impl ConfigError {
    /// Creates a read error for the given path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error for the given path.
    pub fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates an unknown-collection error listing the configured keys.
    pub fn unknown_collection<'a>(
        key: impl Into<String>,
        available: impl Iterator<Item = &'a String>,
    ) -> Self {
        Self::UnknownCollection {
            key: key.into(),
            available: available
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Creates an unknown-format error.
    pub fn unknown_format(format: impl Into<String>) -> Self {
        Self::UnknownFormat {
            format: format.into(),
        }
    }
}

/// Global image-service settings shared by every collection.
///
/// These fields sit at the top level of the YAML document, next to `maps`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// URL scheme, e.g. `https`.
    pub protocol: String,
    /// Host label prepended to the domain, e.g. `tile`.
    pub subdomain: String,
    /// Service domain, e.g. `loc.gov`.
    pub domain: String,
    /// Image format → service path segment used in resource URLs.
    pub service_path: BTreeMap<String, String>,
}

impl RunConfig {
    /// Returns the service path configured for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownFormat`] when the mapping has no entry
    /// for `format`.
    pub fn service_path_for(&self, format: &str) -> Result<&str, ConfigError> {
        self.service_path
            .get(format)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::unknown_format(format))
    }
}

/// The whole configuration document: service settings plus named collections.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieverConfig {
    /// Image-service address and path mapping (top-level document fields).
    #[serde(flatten)]
    pub run: RunConfig,
    /// Collection key → collection description.
    pub maps: BTreeMap<String, CollectionConfig>,
}

/// One named map collection: identity metadata, filename material, and the
/// path segments whose index ranges drive retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Library digital identifier, recorded in the run log.
    pub digital_id: String,
    /// Reference to the collection manifest, recorded in the run log.
    pub manifest: String,
    /// Material for deriving local filenames.
    pub filename_segments: FilenameSegments,
    /// Independent enumerations, processed in order.
    pub path_segments: Vec<PathSegment>,
}

/// Ordered literal name parts plus the optional year and volume tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct FilenameSegments {
    /// Literal name parts, joined in order. Must not contain `-` themselves;
    /// the document author is trusted on this.
    pub name: Vec<String>,
    /// Publication year, appended in string form when present.
    pub year: Option<u32>,
    /// Volume designator, appended as `vol_{vol}` when present.
    /// Quote numeric volumes in YAML (`vol: "2"`).
    pub vol: Option<String>,
}

/// One enumerable slice of a collection on the image service.
#[derive(Debug, Clone, Deserialize)]
pub struct PathSegment {
    /// General material designation string used in the service URL namespace.
    pub gmd: String,
    /// Alphanumeric prefix combined with the index to form the image id.
    pub id_prefix: String,
    /// Optional part label carried into filenames verbatim.
    pub part: Option<String>,
    /// The index range to enumerate.
    pub index: IndexRange,
}

/// Half-open index range with a zero-fill width for URL tokens.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IndexRange {
    /// First index, inclusive.
    pub start: u32,
    /// Last index, exclusive.
    pub stop: u32,
    /// Minimum digit count for index tokens used in URLs; `0` disables
    /// padding. Filenames re-pad independently of this width.
    pub zfill_width: usize,
}

impl IndexRange {
    /// Ascending iteration over the configured indices, stop exclusive.
    #[must_use]
    pub fn values(&self) -> Range<u32> {
        self.start..self.stop
    }

    /// The index token for `value`: left-padded with `0` to at least
    /// `zfill_width` digits.
    #[must_use]
    pub fn token(&self, value: u32) -> String {
        format!("{value:0width$}", width = self.zfill_width)
    }
}

impl RetrieverConfig {
    /// Loads and validates the configuration document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it is not a valid document, and
    /// [`ConfigError::InvalidRange`] when any segment's index range is empty.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config: Self =
            serde_yaml::from_str(&data).map_err(|e| ConfigError::parse(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the collection configured under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCollection`] (listing the configured
    /// keys) when no such entry exists.
    pub fn collection(&self, key: &str) -> Result<&CollectionConfig, ConfigError> {
        self.maps
            .get(key)
            .ok_or_else(|| ConfigError::unknown_collection(key, self.maps.keys()))
    }

    /// Checks every statically verifiable invariant of the document.
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, collection) in &self.maps {
            for (position, segment) in collection.path_segments.iter().enumerate() {
                if segment.index.start >= segment.index.stop {
                    return Err(ConfigError::InvalidRange {
                        key: key.clone(),
                        segment: position,
                        start: segment.index.start,
                        stop: segment.index.stop,
                    });
                }
            }
        }
        Ok(())
    }
}

//! Retrieval engine: walks a collection's index ranges and streams each
//! image to disk.
//!
//! Requests run strictly in configured order, one at a time. The image
//! service assigns meaning to index positions, so a failed index aborts the
//! whole run rather than leaving a silent gap in the sequence.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use retriever_core::config::RetrieverConfig;
//! use retriever_core::options::RequestOptions;
//! use retriever_core::retrieve::{HttpClient, retrieve_collection};
//! use retriever_core::runlog::RunLog;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RetrieverConfig::load(Path::new("./config.yml"))?;
//! let collection = config.collection("ann_arbor_1925")?;
//! let options = RequestOptions {
//!     output: "./output".into(),
//!     format: "jpg".to_string(),
//!     region: "full".to_string(),
//!     size: 25,
//!     rotation_degrees: 0,
//!     quality: "default".to_string(),
//! };
//!
//! let mut log = RunLog::open(Path::new("./output/run.log"))?;
//! let client = HttpClient::new();
//! let stats = retrieve_collection(collection, &config.run, &options, &client, &mut log).await?;
//! println!("retrieved {} images ({} bytes)", stats.images, stats.bytes);
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;

pub use client::{HttpClient, save_response};
pub use error::RetrieveError;

use tracing::{debug, instrument};

use crate::config::{CollectionConfig, RunConfig};
use crate::naming::{build_filename, resolve_path};
use crate::options::RequestOptions;
use crate::resource::build_url;
use crate::runlog::RunLog;

/// Totals from one collection run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RetrievalStats {
    /// Number of images written.
    pub images: usize,
    /// Total body bytes written.
    pub bytes: u64,
}

/// Retrieves every image of `collection`, writing files under the output
/// directory and recording each step in the run log.
///
/// Path segments are processed in configured order; within a segment the
/// index range is walked ascending. Each index is logged as
/// `Target URL: {url}` before its fetch, so an aborted run's log still
/// names the request that failed. A fetched image is then named, logged as
/// `Image renamed to {filename}`, and streamed to disk. The first failure
/// of any kind stops the run.
///
/// # Errors
///
/// Returns [`RetrieveError`] on the first configuration lookup failure,
/// transport failure (including non-success HTTP statuses), or filesystem
/// write failure.
#[instrument(skip_all)]
pub async fn retrieve_collection(
    collection: &CollectionConfig,
    run: &RunConfig,
    options: &RequestOptions,
    client: &HttpClient,
    log: &mut RunLog,
) -> Result<RetrievalStats, RetrieveError> {
    let mut stats = RetrievalStats::default();

    for segment in &collection.path_segments {
        debug!(
            gmd = %segment.gmd,
            id_prefix = %segment.id_prefix,
            start = segment.index.start,
            stop = segment.index.stop,
            "processing path segment"
        );
        let part = segment.part.as_deref();

        for value in segment.index.values() {
            let token = segment.index.token(value);
            let url = build_url(options, run, &segment.gmd, &segment.id_prefix, &token)?;
            log.info(format!("Target URL: {url}"))
                .map_err(|e| RetrieveError::io(log.path(), e))?;
            let response = client.fetch(&url).await?;

            let filename = build_filename(
                &collection.filename_segments,
                part,
                Some(&token),
                &options.format,
            );
            let path = resolve_path(&options.output, &filename)
                .map_err(|e| RetrieveError::io(options.output.clone(), e))?;
            log.info(format!("Image renamed to {}", filename.display()))
                .map_err(|e| RetrieveError::io(log.path(), e))?;

            let bytes = save_response(response, &path).await?;
            debug!(path = %path.display(), bytes, "image written");
            stats.images += 1;
            stats.bytes += bytes;
        }
    }

    Ok(stats)
}

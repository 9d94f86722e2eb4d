//! Per-run request options, resolved from the command line.

use std::path::PathBuf;

/// Everything about a run that is not part of the configuration document:
/// the requested format, the IIIF rendering parameters, and where to write.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Directory for retrieved files, relative paths resolved against the
    /// working directory.
    pub output: PathBuf,
    /// Image format extension, e.g. `jpg` or `tif`.
    pub format: String,
    /// IIIF region parameter, e.g. `full`.
    pub region: String,
    /// Scaling percentage for tiled requests.
    pub size: u32,
    /// Clockwise rotation in degrees for tiled requests.
    pub rotation_degrees: u32,
    /// IIIF quality parameter, e.g. `default` or `gray`.
    pub quality: String,
}

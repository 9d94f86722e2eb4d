//! Filename derivation and output path resolution for retrieved images.
//!
//! Local filenames are derived entirely from configured metadata, never from
//! anything the server sends back, so a run writes the same names every time.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::FilenameSegments;

/// Format string that selects the run-log filename pattern.
pub const LOG_FORMAT: &str = "log";

/// Builds the local filename for one retrieved image, or for the run log.
///
/// Image pattern with full metadata: `name1-name2-year-vol_V-vol_V-part-IIII.ext`
/// Log pattern (`format == "log"`): `name1-name2-year-vol_V.log`
///
/// The volume token appears twice in image names. Empty or absent optional
/// values contribute no token at all. The index token is left-padded with `0`
/// to at least four digits regardless of how wide its URL form was.
#[must_use]
pub fn build_filename(
    segments: &FilenameSegments,
    part: Option<&str>,
    index: Option<&str>,
    format: &str,
) -> PathBuf {
    let mut parts = segments.name.clone();
    if let Some(year) = segments.year {
        parts.push(year.to_string());
    }
    let vol = segments.vol.as_deref().filter(|v| !v.is_empty());
    if let Some(vol) = vol {
        parts.push(format!("vol_{vol}"));
    }

    // Log names stop here: part and index never apply to the run log.
    if format == LOG_FORMAT {
        return PathBuf::from(parts.join("-")).with_extension(format);
    }

    if let Some(vol) = vol {
        parts.push(format!("vol_{vol}"));
    }
    if let Some(part) = part.filter(|p| !p.is_empty()) {
        parts.push(part.to_string());
    }
    if let Some(index) = index.filter(|i| !i.is_empty()) {
        parts.push(format!("{index:0>4}"));
    }
    PathBuf::from(parts.join("-")).with_extension(format)
}

/// Resolves `filename` inside `output_dir`, anchoring relative directories
/// at the current working directory. An absolute `output_dir` is used as is.
///
/// # Errors
///
/// Returns an error when the working directory cannot be determined.
pub fn resolve_path(output_dir: &Path, filename: &Path) -> io::Result<PathBuf> {
    Ok(env::current_dir()?.join(output_dir).join(filename))
}

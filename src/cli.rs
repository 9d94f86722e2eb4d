//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use retriever_core::RequestOptions;

/// Retrieve a single volume of map images from the Library of Congress.
///
/// Collections are described in a companion YAML file; a map key selects
/// which one to retrieve. Retrieved images are renamed deterministically,
/// stored under the output directory, and the whole run is logged both to
/// the terminal and to a log file alongside the images.
#[derive(Parser, Debug)]
#[command(name = "loc-retriever")]
#[command(author, version, about)]
pub struct Args {
    /// Map key matching a collection in the companion config file
    #[arg(short, long)]
    pub key: String,

    /// Image format extension (jpg, gif, jp2, tif)
    #[arg(short, long, default_value = "jpg")]
    pub format: String,

    /// Directory for retrieved images and the run log (must exist)
    #[arg(short, long, default_value = "./output")]
    pub output: PathBuf,

    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "./config.yml")]
    pub config: PathBuf,

    /// Image quality (color, gray, bitonal, default)
    #[arg(short, long, default_value = "default")]
    pub quality: String,

    /// Rectangular portion of the full image to return: pixel coordinates,
    /// a percentage, or "full" for the entire image
    #[arg(short, long, default_value = "full")]
    pub region: String,

    /// Image rotation in degrees (0-360)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=360))]
    pub rotation_degrees: u32,

    /// Scale the extracted region to n percent of its width and height
    #[arg(short, long, default_value_t = 25)]
    pub size: u32,

    /// Increase diagnostic verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The per-run request options these arguments resolve to.
    #[must_use]
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            output: self.output.clone(),
            format: self.format.clone(),
            region: self.region.clone(),
            size: self.size,
            rotation_degrees: self.rotation_degrees,
            quality: self.quality.clone(),
        }
    }
}

//! CLI entry point for the Library of Congress image retriever.

use anyhow::{Context, Result};
use clap::Parser;
use retriever_core::naming::{LOG_FORMAT, build_filename, resolve_path};
use retriever_core::runlog::{RunLog, local_timestamp};
use retriever_core::{HttpClient, RetrieverConfig, retrieve_collection};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine diagnostic level based on the verbose flag
    // Priority: RUST_LOG env var > verbose flag > default (info)
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Diagnostics go to stderr; stdout belongs to the run log mirror
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    info!("Retriever starting");

    let config = RetrieverConfig::load(&args.config)?;
    let collection = config.collection(&args.key)?;

    // An unconfigured format would otherwise only surface mid-run.
    config.run.service_path_for(&args.format)?;

    let options = args.request_options();

    let log_name = build_filename(&collection.filename_segments, None, None, LOG_FORMAT);
    let log_path = resolve_path(&options.output, &log_name)?;
    let mut log = RunLog::open(&log_path)
        .with_context(|| format!("Cannot open run log at '{}'", log_path.display()))?;

    log.info(format!("Start run: {}", local_timestamp()))?;
    log.info(format!("Digital Id: {}", collection.digital_id))?;
    log.info(format!("Manifest: {}", collection.manifest))?;

    let client = HttpClient::new();
    let stats =
        retrieve_collection(collection, &config.run, &options, &client, &mut log).await?;

    log.info(format!("End run: {}", local_timestamp()))?;

    info!(
        images = stats.images,
        bytes = stats.bytes,
        "Retrieval complete"
    );

    Ok(())
}

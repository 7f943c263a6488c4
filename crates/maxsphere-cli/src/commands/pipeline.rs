use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use maxsphere_core::pipeline::config::BatchConfig;
use maxsphere_core::pipeline::{prepare_batch, run_batch};

use super::load_config;
use crate::progress::BarReporter;
use crate::summary::{print_batch_summary, print_run_header};

#[derive(Args)]
pub struct RunArgs {
    /// Frame filename pattern with two %d fields: track (0 or 5), then frame
    /// number, e.g. track%d/frame%04d.jpg
    pub pattern: Option<String>,

    /// Batch config file (TOML); command line options override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output image width (rounded down to a multiple of 4)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Antialiasing level (supersamples per pixel axis)
    #[arg(short = 'a', long)]
    pub antialias: Option<usize>,

    /// Output filename pattern with one %d field for the frame number
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Start index of the sequence
    #[arg(short = 'n', long)]
    pub start: Option<usize>,

    /// End index of the sequence (inclusive)
    #[arg(short = 'm', long)]
    pub stop: Option<usize>,

    /// Number of worker threads
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Overwrite existing output images
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Directory for projection table caches
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;
    print_run_header(&config);

    let reporter = Arc::new(BarReporter::new());
    let batch = prepare_batch(&config, reporter.as_ref()).context("Failed to set up batch")?;
    let summary = run_batch(&batch, reporter.as_ref())?;
    reporter.finish();

    print_batch_summary(&batch, &summary);
    Ok(())
}

fn build_config(args: &RunArgs) -> Result<BatchConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        load_config(config_path)?
    } else {
        let pattern = args
            .pattern
            .clone()
            .context("A frame filename pattern is required (or pass --config)")?;
        BatchConfig::new(pattern)
    };

    if let Some(ref pattern) = args.pattern {
        config.input = pattern.clone();
    }
    if let Some(width) = args.width {
        config.width = Some(width.max(1));
    }
    if let Some(antialias) = args.antialias {
        config.antialias = antialias.max(1);
    }
    if let Some(ref output) = args.output {
        config.output = Some(output.clone());
    }
    if let Some(start) = args.start {
        config.start = start;
    }
    if let Some(stop) = args.stop {
        config.stop = stop;
    }
    if let Some(threads) = args.threads {
        config.threads = threads.max(1);
    }
    if args.force {
        config.skip_existing = false;
    }
    if let Some(ref dir) = args.cache_dir {
        config.cache_dir = dir.clone();
    }
    Ok(config)
}

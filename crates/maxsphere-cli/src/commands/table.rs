use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use maxsphere_core::lut::{build_or_load_table, TableKey};
use maxsphere_core::pipeline::config::BatchConfig;

use super::load_config;

#[derive(Args)]
pub struct TableArgs {
    /// Frame template id (0 = MAX 5.6K, 1 = MAX 3K)
    #[arg(long, default_value = "0")]
    pub template: u32,

    /// Output image width (rounded down to a multiple of 4)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Antialiasing level
    #[arg(short = 'a', long, default_value = "2")]
    pub antialias: usize,

    /// Directory for projection table caches
    #[arg(long, default_value = ".")]
    pub cache_dir: PathBuf,

    /// Batch config file (TOML) declaring extra frame templates
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &TableArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => BatchConfig::new(String::new()),
    };
    let registry = config.registry()?;
    let template = registry.by_id(args.template).with_context(|| {
        let known: Vec<String> = registry
            .templates()
            .iter()
            .map(|t| format!("{} ({})", t.id, t.name))
            .collect();
        format!(
            "Unknown template id {}, known: {}",
            args.template,
            known.join(", ")
        )
    })?;

    config.width = args.width;
    config.antialias = args.antialias.max(1);
    let (width, height) = config.output_size(template);
    let key = TableKey::new(template, width, height, config.antialias);

    println!(
        "Preparing table for {} at {}x{} (antialias {})",
        template.name, width, height, key.antialias
    );
    let table = build_or_load_table(key, &args.cache_dir)?;
    println!(
        "{} entries in {}",
        table.len(),
        args.cache_dir.join(key.file_name()).display()
    );
    Ok(())
}

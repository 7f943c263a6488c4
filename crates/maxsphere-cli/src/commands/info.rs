use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use maxsphere_core::io::image_io::check_frames;
use maxsphere_core::io::naming::FrameNaming;
use maxsphere_core::lut::cache::read_header;
use maxsphere_core::lut::TableKey;
use maxsphere_core::pipeline::config::BatchConfig;

use super::load_config;

#[derive(Args)]
pub struct InfoArgs {
    /// Frame filename pattern with two %d fields: track, then frame number
    pub pattern: String,

    /// Frame index to inspect
    #[arg(short = 'n', long, default_value = "0")]
    pub index: usize,

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

pub fn run(args: &InfoArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => BatchConfig::new(args.pattern.clone()),
    };
    let naming = FrameNaming::new(&args.pattern, None)?;
    let (path1, path2) = naming.source_paths(args.index);
    let registry = config.registry()?;
    let template = check_frames(&path1, &path2, &registry)?;

    config.width = args.width;
    config.antialias = args.antialias.max(1);
    let (width, height) = config.output_size(template);
    let key = TableKey::new(template, width, height, config.antialias);

    println!("Frame 1:     {}", path1.display());
    println!("Frame 2:     {}", path2.display());
    println!("Output:      {}", naming.output_path(args.index).display());
    println!("Template:    {} (id {})", template.name, template.id);
    println!("Frame size:  {}x{}", template.width, template.height);
    println!(
        "Regions:     side {} / center {} / blend {}",
        template.side_width, template.center_width, template.blend_width
    );
    println!("Equirect:    {}x{} (antialias {})", width, height, key.antialias);

    let cache_path = args.cache_dir.join(key.file_name());
    let status = match read_header(&cache_path) {
        Ok(header) if header.key == key && header.entry_count == key.entry_count() as u64 => {
            "cached"
        }
        Ok(_) => "stale",
        Err(_) => "not built",
    };
    println!("Table:       {} ({})", cache_path.display(), status);

    let table_mb = (key.entry_count() * std::mem::size_of::<maxsphere_core::lut::LutEntry>()) as f64
        / (1024.0 * 1024.0);
    println!("Table size:  {:.1} MB in memory", table_mb);

    Ok(())
}

use console::Style;
use maxsphere_core::pipeline::config::BatchConfig;
use maxsphere_core::pipeline::{BatchSummary, PreparedBatch};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    warn: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_header(config: &BatchConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("MAX to Sphere"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(&config.input)
    );
    match config.output {
        Some(ref output) => println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(output)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.disabled.apply_to("next to track 0 frames")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(format!("{} ..= {}", config.start, config.stop))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Threads"),
        s.value.apply_to(config.worker_count())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Antialias"),
        s.value.apply_to(config.antialias)
    );
    if !config.skip_existing {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Existing"),
            s.warn.apply_to("overwrite")
        );
    }
    println!();
}

pub fn print_batch_summary(batch: &PreparedBatch, summary: &BatchSummary) {
    let s = Styles::new();
    let template = batch.template();
    let table = batch.table();
    let (start, stop) = batch.range();

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Template"),
        s.value.apply_to(format!(
            "{} ({}x{})",
            template.name, template.width, template.height
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Equirect"),
        s.value.apply_to(format!("{}x{}", table.width(), table.height()))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Range"),
        s.value.apply_to(format!("{start} ..= {stop} on {} workers", batch.workers()))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Written"),
        s.value.apply_to(summary.written)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Skipped"),
        s.value.apply_to(summary.skipped)
    );
    if summary.missing > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Missing"),
            s.disabled.apply_to(summary.missing)
        );
    }
    if !summary.failed.is_empty() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Failed"),
            s.warn.apply_to(summary.failed.len())
        );
        for (index, reason) in &summary.failed {
            println!("      {} {}", s.label.apply_to(index), s.warn.apply_to(reason));
        }
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Time"),
        s.value.apply_to(format!("{:.1}s", summary.elapsed.as_secs_f64()))
    );
    println!();
}

use anyhow::{Context, Result};
use clap::Parser;
use enclosurekit::{default_render_options, generate_svg, init_logging, EnclosureConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "enclosurekit", version, about, long_about = None)]
struct Cli {
    /// Design configuration (JSON or TOML); the reference design when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SVG file to write
    #[arg(short, long, value_name = "FILE", default_value = "enclosure.svg")]
    output: PathBuf,

    /// Leave reference geometry out, for submitting to the cutter
    #[arg(long)]
    no_reference: bool,

    /// Write the effective configuration (JSON or TOML) and continue
    #[arg(long, value_name = "FILE")]
    dump_config: Option<PathBuf>,

    /// Write the layout report as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EnclosureConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EnclosureConfig::default(),
    };

    if let Some(path) = &cli.dump_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        tracing::info!("Wrote effective config to {}", path.display());
    }

    let units = config.layout.report_units;
    let generated = generate_svg(config, &default_render_options(cli.no_reference))?;
    let report = &generated.report;
    tracing::info!("Dimensions: {}", report.dimensions.summary(units));
    if let Some(sensor) = report.sensor {
        tracing::info!(
            "Sensor opening centred at ({:.2}, {:.2}) on the project PCB",
            sensor.centre.x,
            sensor.centre.y
        );
    }

    std::fs::write(&cli.output, &generated.svg)
        .with_context(|| format!("Failed to write SVG: {}", cli.output.display()))?;
    tracing::info!("Wrote {}", cli.output.display());

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }

    Ok(())
}

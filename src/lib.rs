//! # EnclosureKit
//!
//! Generates the laser-cutting job for a finger-jointed enclosure around a
//! weather-station e-paper display.
//!
//! ## Architecture
//!
//! EnclosureKit is organized as a workspace with multiple crates:
//!
//! 1. **enclosurekit-core** - Geometry, paths, transforms, drawing-document contract
//! 2. **enclosurekit-settings** - Design configuration and derived dimensions
//! 3. **enclosurekit-camtools** - Finger joints, panel composition, enclosure layout
//! 4. **enclosurekit-designer** - Sheet document and SVG output
//! 5. **enclosurekit** - This crate: one-call generation and the command-line binary
//!
//! ## Features
//!
//! - **Verified Joints**: every mating edge pair is cross-checked before drawing
//! - **Layouts**: exploded (parts separated) or nested (shared cuts)
//! - **Revisions**: original and v2 hardware tweaks
//! - **Output Modes**: final cut or print with drill-check markers

pub use enclosurekit_camtools as camtools;
pub use enclosurekit_designer as designer;
pub use enclosurekit_settings as settings;

pub use enclosurekit_camtools::{DesignReport, EnclosureDesign, PanelKind};
pub use enclosurekit_designer::{RenderOptions, SheetDocument};
pub use enclosurekit_settings::EnclosureConfig;

use anyhow::Context;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// A rendered laser-cutter job.
#[derive(Debug, Clone)]
pub struct GeneratedSheet {
    pub svg: String,
    pub report: DesignReport,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, so stdout stays free for piping
/// - RUST_LOG environment variable support, `info` by default
///
/// Calling it again once a subscriber is installed is a no-op.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

/// Build the whole enclosure and render it to SVG.
///
/// Nothing is returned unless every panel composed, every joint verified and
/// the sheet rendered.
pub fn generate_svg(
    config: EnclosureConfig,
    options: &RenderOptions,
) -> anyhow::Result<GeneratedSheet> {
    let sheet = config.layout.sheet;
    let design = EnclosureDesign::new(config).context("Invalid enclosure configuration")?;

    let mut doc = SheetDocument::new(sheet.width, sheet.height);
    let report = design
        .build(&mut doc)
        .context("Failed to lay out the enclosure")?;
    let svg = designer::render_svg(&doc, options).context("Failed to render SVG")?;

    tracing::info!(
        "Generated {} panels ({} joints verified), {} bytes of SVG",
        report.panels.len(),
        report.joints_verified,
        svg.len()
    );
    Ok(GeneratedSheet { svg, report })
}

/// Render options stamped with this build's date.
pub fn default_render_options(omit_reference: bool) -> RenderOptions {
    RenderOptions {
        omit_reference,
        build_date: Some(BUILD_DATE.to_string()),
    }
}

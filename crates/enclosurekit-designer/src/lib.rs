//! # EnclosureKit Designer
//!
//! The drawing surface the enclosure generator emits into, and the SVG writer
//! that turns it into a laser-cutter job.
//!
//! ## Core Components
//!
//! - **SheetDocument**: group tree with per-group transforms, implementing
//!   [`enclosurekit_core::DrawingDocument`]
//! - **SVG Renderer**: millimetre-sized output, y-up sheet coordinates,
//!   per-style strokes and optional reference geometry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use enclosurekit_designer::{render_svg, RenderOptions, SheetDocument};
//!
//! let mut sheet = SheetDocument::new(210.0, 297.0);
//! design.build(&mut sheet)?;
//! let svg = render_svg(&sheet, &RenderOptions::default())?;
//! ```

pub mod canvas;
pub mod svg_renderer;

pub use canvas::{GroupItem, PlacedHole, ShapeKind, SheetDocument, SheetGroup, SheetShape};
pub use svg_renderer::{escape_xml, render_svg, save_svg, RenderOptions};

//! # EnclosureKit Core
//!
//! Core types shared by every EnclosureKit crate: 2D geometry, relative path
//! building, group transforms, unit formatting and the drawing-document
//! contract the generator emits into.

pub mod document;
pub mod error;
pub mod geometry;
pub mod path;
pub mod transform;
pub mod units;

pub use document::{DrawingDocument, EdgeMask, GroupId, Style, TextAlign, TextFormat};
pub use error::{DocumentError, Error, GeometryError, Result};
pub use geometry::{Direction, Point, Rect, Vector, EPSILON};
pub use path::{ArcSegment, ArcSweep, Path, PathOp};
pub use transform::{Transform, TransformOp};
pub use units::{format_coord, format_length, MeasurementSystem, PERF_BOARD_PITCH};

//! Drawing-document contract
//!
//! The enclosure generator never writes output itself. It emits paths and
//! primitives into groups of a [`DrawingDocument`], which owns the group tree
//! and decides how each [`Style`] is rendered.

use crate::error::{DocumentError, Result};
use crate::geometry::{Point, Rect};
use crate::path::Path;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the laser cutter does with an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Through-cut.
    #[default]
    Cut,
    /// Surface mark.
    Etch,
    /// Reference geometry only, never sent to the cutter.
    Ignore,
}

impl Style {
    pub fn is_reference(self) -> bool {
        self == Style::Ignore
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Cut => write!(f, "cut"),
            Style::Etch => write!(f, "etch"),
            Style::Ignore => write!(f, "ignore"),
        }
    }
}

/// Opaque handle to a group inside one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// Which sides of a rectangle are drawn.
///
/// Written as a string of side letters, e.g. `"LRB"` draws left, right and
/// bottom, leaving the top open onto an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMask {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl EdgeMask {
    pub const ALL: EdgeMask = EdgeMask {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    /// `"LRB"`: a cut-out opening onto the edge above it.
    pub const OPEN_TOP: EdgeMask = EdgeMask {
        left: true,
        right: true,
        top: false,
        bottom: true,
    };

    /// `"TLR"`: a cut-out opening onto the edge below it.
    pub const OPEN_BOTTOM: EdgeMask = EdgeMask {
        left: true,
        right: true,
        top: true,
        bottom: false,
    };

    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }
}

impl Default for EdgeMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromStr for EdgeMask {
    type Err = DocumentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut mask = EdgeMask {
            left: false,
            right: false,
            top: false,
            bottom: false,
        };
        for side in s.chars() {
            match side.to_ascii_uppercase() {
                'L' => mask.left = true,
                'R' => mask.right = true,
                'T' => mask.top = true,
                'B' => mask.bottom = true,
                _ => {
                    return Err(DocumentError::InvalidEdgeMask {
                        mask: s.to_string(),
                        side,
                    })
                }
            }
        }
        Ok(mask)
    }
}

impl fmt::Display for EdgeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, c) in [
            (self.top, 'T'),
            (self.left, 'L'),
            (self.right, 'R'),
            (self.bottom, 'B'),
        ] {
            if on {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Horizontal anchoring of annotation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Centre,
    Right,
}

/// Text size (mm cap height), style and alignment for an annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFormat {
    pub size: f64,
    pub style: Style,
    pub align: TextAlign,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            size: 2.5,
            style: Style::Ignore,
            align: TextAlign::Left,
        }
    }
}

impl TextFormat {
    pub fn etched(size: f64, align: TextAlign) -> Self {
        Self {
            size,
            style: Style::Etch,
            align,
        }
    }
}

/// The host drawing document the generator emits into.
///
/// Coordinates are millimetres, y up, in the local frame of the target group.
pub trait DrawingDocument {
    /// The top-level group.
    fn root(&self) -> GroupId;

    /// Create a child of `parent` placed by `transform`.
    fn create_group(&mut self, parent: GroupId, transform: Transform) -> Result<GroupId>;

    fn add_path(&mut self, group: GroupId, path: &Path, style: Style) -> Result<()>;

    fn add_rect(&mut self, group: GroupId, rect: Rect, style: Style, edges: EdgeMask)
        -> Result<()>;

    fn add_round_rect(&mut self, group: GroupId, rect: Rect, radius: f64, style: Style)
        -> Result<()>;

    /// A drilled or cut hole. Distinct from a circle so hosts can list holes.
    fn add_hole(&mut self, group: GroupId, centre: Point, radius: f64, style: Style)
        -> Result<()>;

    fn add_circle(&mut self, group: GroupId, centre: Point, radius: f64, style: Style)
        -> Result<()>;

    /// Clockwise arc from `start_deg` to `end_deg` (clock convention).
    fn add_arc(
        &mut self,
        group: GroupId,
        centre: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        style: Style,
    ) -> Result<()>;

    fn add_annotation(
        &mut self,
        group: GroupId,
        at: Point,
        text: &str,
        format: TextFormat,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_mask_parse() {
        let mask: EdgeMask = "LRB".parse().unwrap();
        assert!(mask.left && mask.right && mask.bottom && !mask.top);
        assert_eq!(mask.to_string(), "LRB");
        assert_eq!(mask, EdgeMask::OPEN_TOP);
        assert_eq!("TLR".parse::<EdgeMask>().unwrap(), EdgeMask::OPEN_BOTTOM);

        let mask: EdgeMask = "tlr".parse().unwrap();
        assert!(mask.top && !mask.bottom);

        assert!(EdgeMask::default().is_all());
        assert_eq!(
            "LXR".parse::<EdgeMask>(),
            Err(DocumentError::InvalidEdgeMask {
                mask: "LXR".to_string(),
                side: 'X'
            })
        );
    }

    #[test]
    fn test_style_serde_names() {
        assert_eq!(Style::Ignore.to_string(), "ignore");
        assert!(Style::Ignore.is_reference());
        assert!(!Style::Etch.is_reference());
    }
}

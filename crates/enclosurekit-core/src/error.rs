//! Error handling for EnclosureKit
//!
//! Provides the error types shared by every layer of the generator:
//! - Geometry errors (invalid coordinates, radii, transforms)
//! - Document errors (failures inside the drawing-document collaborator)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a primitive is asked to carry a value that cannot describe
/// physical geometry on the sheet.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate or length is NaN or infinite
    #[error("Non-finite value for {what}: {value}")]
    NonFinite {
        /// What the value describes.
        what: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A radius is zero or negative
    #[error("Radius must be positive, got {radius}")]
    NonPositiveRadius {
        /// The offending radius.
        radius: f64,
    },

    /// A rectangle has a zero or negative side
    #[error("Rectangle must have positive size, got {width}x{height}")]
    EmptyRect {
        /// Rectangle width.
        width: f64,
        /// Rectangle height.
        height: f64,
    },
}

/// Document error type
///
/// Represents failures reported by the drawing-document collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// The group handle does not belong to this document
    #[error("Unknown group: {id}")]
    UnknownGroup {
        /// The raw group index.
        id: usize,
    },

    /// An edge mask string contained an unknown side
    #[error("Invalid edge mask '{mask}': unknown side '{side}'")]
    InvalidEdgeMask {
        /// The mask as written.
        mask: String,
        /// The unrecognised character.
        side: char,
    },

    /// The document could not be serialized
    #[error("Render failed: {reason}")]
    RenderFailed {
        /// Why rendering failed.
        reason: String,
    },
}

/// Main error type for EnclosureKit core
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinite values before they reach a path or document.
pub fn ensure_finite(what: &'static str, value: f64) -> std::result::Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::NonPositiveRadius { radius: -1.5 };
        assert_eq!(err.to_string(), "Radius must be positive, got -1.5");

        let err = GeometryError::EmptyRect {
            width: 0.0,
            height: 4.0,
        };
        assert_eq!(err.to_string(), "Rectangle must have positive size, got 0x4");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = DocumentError::UnknownGroup { id: 7 }.into();
        assert!(matches!(err, Error::Document(_)));
        assert_eq!(err.to_string(), "Unknown group: 7");

        let err: Error = GeometryError::NonFinite {
            what: "x",
            value: f64::NAN,
        }
        .into();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 2.0), Ok(2.0));
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }
}

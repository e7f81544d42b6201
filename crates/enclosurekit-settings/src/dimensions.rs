//! Box dimensions derived from a configuration.

use crate::config::{EnclosureConfig, LayoutVariant};
use enclosurekit_core::units::{format_length, MeasurementSystem};
use serde::Serialize;
use std::fmt;

/// Inner and outer box sizes plus the joint constants every panel shares.
///
/// The front of the box is the PCB itself, so only the back wall adds to the
/// outer depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub thickness: f64,
    pub finger_length: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub inner_depth: f64,
    pub outer_width: f64,
    pub outer_height: f64,
    pub outer_depth: f64,
    /// Spacing between neighbouring panels on the sheet: one thickness apart
    /// when exploded, overlapping by one thickness when nested.
    pub exploded_gap: f64,
}

impl Dimensions {
    pub fn from_config(config: &EnclosureConfig) -> Self {
        let t = config.material.thickness;
        let kerf = config.material.kerf;
        // the joints lose a little to kerf, so the inside is grown to compensate
        let inner_width = config.front_plate.width + 2.0 * kerf;
        let inner_height = config.front_plate.height + 2.0 * kerf;
        let inner_depth: f64 = config.depth_stack.iter().map(|l| l.thickness).sum();
        Self {
            thickness: t,
            finger_length: config.material.finger_length,
            inner_width,
            inner_height,
            inner_depth,
            outer_width: inner_width + 2.0 * t,
            outer_height: inner_height + 2.0 * t,
            outer_depth: inner_depth + t,
            exploded_gap: match config.layout.variant {
                LayoutVariant::Exploded => t,
                LayoutVariant::Nested => -t,
            },
        }
    }

    /// One-line summary in the given units.
    pub fn summary(&self, units: MeasurementSystem) -> String {
        format!(
            "outer {} x {} x {}, inner {} x {} x {}",
            format_length(self.outer_width, units),
            format_length(self.outer_height, units),
            format_length(self.outer_depth, units),
            format_length(self.inner_width, units),
            format_length(self.inner_height, units),
            format_length(self.inner_depth, units),
        )
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary(MeasurementSystem::Metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_reference_dimensions() {
        let dims = EnclosureConfig::default().dimensions();
        assert!((dims.inner_width - 45.92).abs() < TOL);
        assert!((dims.outer_width - 51.92).abs() < TOL);
        assert!((dims.inner_height - 62.43).abs() < TOL);
        assert!((dims.outer_height - 68.43).abs() < TOL);
        assert!((dims.inner_depth - 61.5).abs() < TOL);
        assert!((dims.outer_depth - 64.5).abs() < TOL);
        assert_eq!(dims.exploded_gap, 3.0);
    }

    #[test]
    fn test_nested_gap_is_negative() {
        let mut config = EnclosureConfig::default();
        config.layout.variant = LayoutVariant::Nested;
        assert_eq!(config.dimensions().exploded_gap, -3.0);
    }

    #[test]
    fn test_summary() {
        let dims = EnclosureConfig::default().dimensions();
        assert_eq!(
            dims.to_string(),
            "outer 51.92 mm x 68.43 mm x 64.50 mm, inner 45.92 mm x 62.43 mm x 61.50 mm"
        );
    }
}

//! Unit conversion utilities
//!
//! All geometry is carried in millimetres. This module handles display in
//! Metric (mm) or Imperial (inch) and the compact number formatting used when
//! coordinates are written into a vector document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Standard perf-board / header pitch (0.1in) in millimetres
pub const PERF_BOARD_PITCH: f64 = 2.54;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "mm"),
            Self::Imperial => write!(f, "in"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2} mm", value_mm),
        MeasurementSystem::Imperial => format!("{:.3} in", value_mm / MM_PER_INCH),
    }
}

/// Format a coordinate for a vector document.
///
/// Rounds to 4 decimals (0.1µm, far below any kerf) and strips trailing
/// zeros so that `12.5000` becomes `12.5` and `-0.0000` becomes `0`.
pub fn format_coord(value: f64) -> String {
    let mut s = format!("{:.4}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_system_parse() {
        assert_eq!("mm".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Metric));
        assert_eq!("Inch".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Imperial));
        assert!("furlong".parse::<MeasurementSystem>().is_err());
    }

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(51.92, MeasurementSystem::Metric), "51.92 mm");
        assert_eq!(format_length(25.4, MeasurementSystem::Imperial), "1.000 in");
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(12.5), "12.5");
        assert_eq!(format_coord(3.0), "3");
        assert_eq!(format_coord(-0.00001), "0");
        assert_eq!(format_coord(45.92), "45.92");
        assert_eq!(format_coord(-11.25), "-11.25");
    }
}

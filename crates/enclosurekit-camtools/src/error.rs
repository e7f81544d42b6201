//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for joint generation,
//! parameter validation and cross-panel composition checks.

use crate::joint_check::{JointId, JointRole};
use crate::panel::PanelKind;
use enclosurekit_core::geometry::Direction;
use enclosurekit_core::GeometryError;
use enclosurekit_settings::{ConfigError, SettingsError};
use thiserror::Error;

/// Errors that can occur while generating an enclosure.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A single panel edge could not be generated.
    #[error("{panel} panel, {edge} edge: {source}")]
    Edge {
        panel: PanelKind,
        edge: &'static str,
        #[source]
        source: ParameterError,
    },

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Panels do not fit together.
    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    /// The drawing document rejected an element.
    #[error("Document error: {0}")]
    Document(#[from] enclosurekit_core::Error),

    /// The configuration is unusable.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl From<GeometryError> for CamToolError {
    fn from(err: GeometryError) -> Self {
        CamToolError::Document(err.into())
    }
}

impl From<ConfigError> for CamToolError {
    fn from(err: ConfigError) -> Self {
        CamToolError::Settings(err.into())
    }
}

/// Errors related to joint and decoration parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// The runs between fingers would have zero or negative length.
    #[error("{count} fingers of {finger_length} do not fit a {span} span (gap {gap})")]
    NonPositiveGap {
        count: u32,
        finger_length: f64,
        span: f64,
        gap: f64,
    },

    /// The first/last run vanishes once the mating thickness is removed.
    #[error("end run {run} is not positive (gap {gap}, thickness adjustment {delta})")]
    NonPositiveEndRun { run: f64, gap: f64, delta: f64 },

    /// Fingers were requested without a direction to protrude in.
    #[error("{count} fingers requested without a tab direction")]
    MissingTabDirection { count: u32 },

    /// Tabs must protrude perpendicular to the edge.
    #[error("tab direction {tab} is not perpendicular to edge direction {main}")]
    ParallelTabDirection { main: Direction, tab: Direction },

    /// Dimensions are invalid (zero or negative).
    #[error("'{name}' must be positive, got {value}")]
    NonPositiveLength { name: &'static str, value: f64 },

    /// An etched figure would spill past the edge of its panel.
    #[error("{figure} figure reaches ({x:.3}, {y:.3}), outside its {width:.3} x {height:.3} panel")]
    FigureOutsidePanel {
        figure: &'static str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// Two arcs cannot meet for the given radii and offsets.
    #[error("arcs r1={r1}, r2={r2} offset ({t}, {d}) cannot meet: {reason}")]
    InfeasibleArc {
        r1: f64,
        r2: f64,
        t: f64,
        d: f64,
        reason: &'static str,
    },
}

/// Errors raised when mating edges or outlines disagree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionError {
    /// A joint does not have exactly one edge on each of two panels.
    #[error("joint {joint} has {edges} edge(s), expected 2")]
    Unmatched { joint: JointId, edges: usize },

    /// Both edges of a joint were recorded by the same panel.
    #[error("joint {joint} is recorded twice by the {panel} panel")]
    SamePanel { joint: JointId, panel: PanelKind },

    /// Mating edges disagree on a joint parameter.
    #[error("joint {joint} mismatch in {field}: {first} vs {second}")]
    Mismatch {
        joint: JointId,
        field: &'static str,
        first: f64,
        second: f64,
    },

    /// Both edges of a joint protrude (or both recess).
    #[error("joint {joint}: both edges are {role}s")]
    SameRole { joint: JointId, role: JointRole },

    /// Sampled profiles do not interlock.
    #[error("joint {joint}: profiles do not interlock at {position:.3} mm along the edge")]
    NotComplementary { joint: JointId, position: f64 },

    /// A panel outline does not return to its start point.
    #[error("{panel} outline is not closed")]
    OpenOutline { panel: PanelKind },

    /// Only shell panels have jointed outlines.
    #[error("{panel} has no jointed outline")]
    NoOutlinePlan { panel: PanelKind },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Result type alias for composition checks.
pub type CompositionResult<T> = Result<T, CompositionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::NonPositiveGap {
            count: 6,
            finger_length: 5.0,
            span: 20.0,
            gap: -1.4285714285714286,
        };
        assert!(err.to_string().starts_with("6 fingers of 5 do not fit a 20 span"));

        let err = ParameterError::ParallelTabDirection {
            main: Direction::PosX,
            tab: Direction::NegX,
        };
        assert_eq!(
            err.to_string(),
            "tab direction -x is not perpendicular to edge direction +x"
        );

        let err = ParameterError::FigureOutsidePanel {
            figure: "wind",
            x: 27.0,
            y: 12.5,
            width: 24.0,
            height: 64.5,
        };
        assert_eq!(
            err.to_string(),
            "wind figure reaches (27.000, 12.500), outside its 24.000 x 64.500 panel"
        );
    }

    #[test]
    fn test_edge_error_names_panel_and_edge() {
        let err = CamToolError::Edge {
            panel: PanelKind::Back,
            edge: "top to bottom",
            source: ParameterError::MissingTabDirection { count: 3 },
        };
        assert_eq!(
            err.to_string(),
            "BACK panel, top to bottom edge: 3 fingers requested without a tab direction"
        );
    }

    #[test]
    fn test_composition_error_display() {
        let err = CompositionError::Mismatch {
            joint: JointId::TopBack,
            field: "finger count",
            first: 3.0,
            second: 4.0,
        };
        assert_eq!(
            err.to_string(),
            "joint top/back mismatch in finger count: 3 vs 4"
        );
    }

    #[test]
    fn test_error_conversion() {
        let cam_err: CamToolError = ParameterError::NonPositiveLength {
            name: "finger length",
            value: 0.0,
        }
        .into();
        assert!(matches!(cam_err, CamToolError::Parameter(_)));

        let cam_err: CamToolError = CompositionError::OpenOutline {
            panel: PanelKind::Left,
        }
        .into();
        assert!(matches!(cam_err, CamToolError::Composition(_)));

        let cam_err: CamToolError = GeometryError::NonPositiveRadius { radius: 0.0 }.into();
        assert!(matches!(cam_err, CamToolError::Document(_)));
    }
}

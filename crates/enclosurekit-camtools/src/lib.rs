//! # EnclosureKit CAM Tools
//!
//! Generates the cut geometry of a finger-jointed laser-cut enclosure.
//!
//! ## Components
//!
//! - **Finger Joint**: one jointed edge as a relative path fragment, plus its sampled profile
//! - **Panel Composer**: shell panel outlines walked edge by edge
//! - **Joint Check**: verifies that every pair of mating edges interlocks
//! - **Decoration**: etched sun, wind and rain artwork
//! - **Enclosure**: sheet layout and the holes, cut-outs and lettering of every panel

pub mod decoration;
pub mod enclosure;
pub mod error;
pub mod finger_joint;
pub mod joint_check;
pub mod panel;

pub use decoration::arc_intersection_angle;
pub use enclosure::{
    DesignReport, EnclosureDesign, FeatureWriter, PanelSummary, RevisionTweaks, SensorPlacement,
};
pub use error::{
    CamToolError, CamToolResult, CompositionError, CompositionResult, ParameterError,
    ParameterResult,
};
pub use finger_joint::{EdgeLayout, EdgeProfile, EdgeSpec, FingerJoint, GeneratedEdge};
pub use joint_check::{JointEdge, JointId, JointLedger, JointRole};
pub use panel::{
    Closing, OutlinePlan, PanelComposer, PanelKind, PanelOutline, PlannedEdge, ReferenceRects,
    ShellOutlines,
};

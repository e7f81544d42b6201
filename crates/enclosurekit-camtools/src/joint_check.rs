//! Cross-panel joint verification
//!
//! Every jointed edge a panel generates is recorded against the joint it
//! belongs to. Once all shell panels are composed, [`JointLedger::verify`]
//! checks that each joint pairs exactly two edges from different panels with
//! the same finger count, finger length and span, one protruding and one
//! recessed, and that their sampled profiles interlock.

use crate::error::{CompositionError, CompositionResult};
use crate::finger_joint::EdgeProfile;
use crate::panel::PanelKind;
use std::collections::BTreeMap;
use std::fmt;

const SPAN_TOLERANCE: f64 = 1e-6;

/// A shared edge between two shell panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointId {
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
    LeftBack,
    RightBack,
    TopBack,
    BottomBack,
}

impl JointId {
    pub const ALL: [JointId; 8] = [
        JointId::LeftTop,
        JointId::LeftBottom,
        JointId::RightTop,
        JointId::RightBottom,
        JointId::LeftBack,
        JointId::RightBack,
        JointId::TopBack,
        JointId::BottomBack,
    ];
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JointId::LeftTop => "left/top",
            JointId::LeftBottom => "left/bottom",
            JointId::RightTop => "right/top",
            JointId::RightBottom => "right/bottom",
            JointId::LeftBack => "left/back",
            JointId::RightBack => "right/back",
            JointId::TopBack => "top/back",
            JointId::BottomBack => "bottom/back",
        };
        write!(f, "{name}")
    }
}

/// Whether an edge's fingers stick out of the panel or are cut into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointRole {
    Tab,
    Notch,
}

impl JointRole {
    /// +1 when the tab direction points away from the panel body.
    pub fn outward_sign(self) -> f64 {
        match self {
            JointRole::Tab => 1.0,
            JointRole::Notch => -1.0,
        }
    }
}

impl fmt::Display for JointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointRole::Tab => write!(f, "tab"),
            JointRole::Notch => write!(f, "notch"),
        }
    }
}

/// One recorded edge.
#[derive(Debug, Clone, PartialEq)]
pub struct JointEdge {
    pub panel: PanelKind,
    pub edge: &'static str,
    pub role: JointRole,
    pub count: u32,
    pub finger_length: f64,
    pub profile: EdgeProfile,
}

impl JointEdge {
    pub fn span(&self) -> f64 {
        self.profile.span()
    }
}

/// Edges recorded per joint during composition.
#[derive(Debug, Clone, Default)]
pub struct JointLedger {
    entries: BTreeMap<JointId, Vec<JointEdge>>,
}

impl JointLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, joint: JointId, edge: JointEdge) {
        tracing::debug!(
            "Recorded {} edge of {} as {} for joint {}",
            edge.edge,
            edge.panel,
            edge.role,
            joint
        );
        self.entries.entry(joint).or_default().push(edge);
    }

    pub fn edges(&self, joint: JointId) -> &[JointEdge] {
        self.entries.get(&joint).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check every recorded joint.
    pub fn verify(&self) -> CompositionResult<()> {
        for (&joint, edges) in &self.entries {
            verify_joint(joint, edges)?;
        }
        Ok(())
    }

    /// Check every recorded joint and require all eight shell joints.
    pub fn verify_complete(&self) -> CompositionResult<usize> {
        for joint in JointId::ALL {
            if !self.entries.contains_key(&joint) {
                return Err(CompositionError::Unmatched { joint, edges: 0 });
            }
        }
        self.verify()?;
        Ok(self.entries.len())
    }
}

fn verify_joint(joint: JointId, edges: &[JointEdge]) -> CompositionResult<()> {
    let [a, b] = edges else {
        return Err(CompositionError::Unmatched {
            joint,
            edges: edges.len(),
        });
    };

    if a.panel == b.panel {
        return Err(CompositionError::SamePanel {
            joint,
            panel: a.panel,
        });
    }

    let mismatch = |field, first: f64, second: f64| CompositionError::Mismatch {
        joint,
        field,
        first,
        second,
    };
    if a.count != b.count {
        return Err(mismatch("finger count", a.count as f64, b.count as f64));
    }
    if (a.finger_length - b.finger_length).abs() > SPAN_TOLERANCE {
        return Err(mismatch("finger length", a.finger_length, b.finger_length));
    }
    if (a.span() - b.span()).abs() > SPAN_TOLERANCE {
        return Err(mismatch("span", a.span(), b.span()));
    }

    if a.role == b.role {
        return Err(CompositionError::SameRole {
            joint,
            role: a.role,
        });
    }

    if let Some(position) = a.profile.first_mismatch(a.role, &b.profile, b.role) {
        return Err(CompositionError::NotComplementary { joint, position });
    }

    Ok(())
}

//! Panel Composer
//!
//! Builds the cut outline of each shell panel by walking its edges in a fixed
//! order and appending one finger-jointed fragment per edge. Each panel type
//! has an [`OutlinePlan`]; the layout variant selects between plans rather
//! than branching inside the walk.
//!
//! Panels are drawn in their own frame with the front edge on `y = 0`:
//! - Sides: x runs bottom to top (`outer_height`), y runs front to back.
//! - Top/bottom: x runs left to right (`outer_width`), y runs front to back.
//! - Back: x runs left to right, y runs bottom to top.

use crate::error::{CamToolError, CamToolResult, CompositionError};
use crate::finger_joint::{EdgeSpec, FingerJoint};
use crate::joint_check::{JointEdge, JointId, JointLedger, JointRole};
use enclosurekit_core::geometry::{Direction, Point, Rect, Vector};
use enclosurekit_core::Path;
use enclosurekit_settings::{Dimensions, EnclosureConfig, JointSettings, LayoutVariant};
use serde::Serialize;
use std::fmt;

/// Every plate the enclosure is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Left,
    Top,
    Right,
    Back,
    Bottom,
    InnerBase,
    InnerTop,
    InsideFront,
    InsideBack,
}

impl PanelKind {
    pub const ALL: [PanelKind; 9] = [
        PanelKind::Left,
        PanelKind::Top,
        PanelKind::Right,
        PanelKind::Back,
        PanelKind::Bottom,
        PanelKind::InnerBase,
        PanelKind::InnerTop,
        PanelKind::InsideFront,
        PanelKind::InsideBack,
    ];

    /// Panels with finger-jointed outlines.
    pub const SHELL: [PanelKind; 5] = [
        PanelKind::Left,
        PanelKind::Top,
        PanelKind::Right,
        PanelKind::Back,
        PanelKind::Bottom,
    ];

    pub fn is_shell(self) -> bool {
        Self::SHELL.contains(&self)
    }

    /// Label etched next to the panel.
    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Left => "LEFT",
            PanelKind::Top => "TOP",
            PanelKind::Right => "RIGHT",
            PanelKind::Back => "BACK",
            PanelKind::Bottom => "BOTTOM",
            PanelKind::InnerBase => "INNER BASE",
            PanelKind::InnerTop => "INNER TOP",
            PanelKind::InsideFront => "INSIDE FRONT",
            PanelKind::InsideBack => "INSIDE BACK",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One edge of a plan, tied to the joint it forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedEdge {
    pub name: &'static str,
    pub spec: EdgeSpec,
    pub joint: JointId,
}

/// How a jointed outline returns to its start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Closing {
    /// Close back to the start point.
    Close,
    /// A final straight line.
    Line(Vector),
    /// The last edge already ends on the start point.
    Implicit,
}

/// Recipe for one shell panel outline.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlinePlan {
    Jointed {
        start: Point,
        edges: Vec<PlannedEdge>,
        closing: Closing,
    },
    /// A single cut shared with the neighbouring panels. The logical plan
    /// still describes the joints so they can be checked.
    SharedCut {
        start: Point,
        run: Vector,
        logical: Box<OutlinePlan>,
    },
}

/// Outer and inner bounding rectangles, drawn as reference only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRects {
    pub outer: Rect,
    pub inner: Rect,
}

/// A composed shell panel outline in the panel's own frame.
#[derive(Debug, Clone)]
pub struct PanelOutline {
    pub kind: PanelKind,
    pub path: Path,
    pub reference: ReferenceRects,
    pub shared_cut: bool,
}

/// Composes shell panel outlines for one design.
#[derive(Debug, Clone)]
pub struct PanelComposer {
    dims: Dimensions,
    joints: JointSettings,
    variant: LayoutVariant,
    finger: FingerJoint,
}

impl PanelComposer {
    pub fn new(config: &EnclosureConfig) -> CamToolResult<Self> {
        let dims = config.dimensions();
        Ok(Self {
            finger: FingerJoint::from_dimensions(&dims)?,
            dims,
            joints: config.joints.clone(),
            variant: config.layout.variant,
        })
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    pub fn finger_joint(&self) -> &FingerJoint {
        &self.finger
    }

    /// Outline recipe for a shell panel; `None` for the inner plates.
    pub fn plan(&self, kind: PanelKind) -> Option<OutlinePlan> {
        let d = &self.dims;
        let t = d.thickness;
        let j = &self.joints;

        let plan = match kind {
            PanelKind::Left | PanelKind::Right => {
                let (front, back, height) = if kind == PanelKind::Left {
                    (JointId::LeftBottom, JointId::LeftTop, JointId::LeftBack)
                } else {
                    (JointId::RightTop, JointId::RightBottom, JointId::RightBack)
                };
                OutlinePlan::Jointed {
                    start: Point::ORIGIN,
                    edges: vec![
                        PlannedEdge {
                            name: "front to back",
                            spec: EdgeSpec::jointed(
                                d.outer_depth,
                                j.fingers_depth,
                                Direction::PosY,
                                Direction::PosX,
                            ),
                            joint: front,
                        },
                        PlannedEdge {
                            name: "bottom to top",
                            spec: EdgeSpec::jointed(
                                d.outer_height,
                                j.fingers_height,
                                Direction::PosX,
                                Direction::NegY,
                            ),
                            joint: height,
                        },
                        PlannedEdge {
                            name: "back to front",
                            spec: EdgeSpec::jointed(
                                d.outer_depth,
                                j.fingers_depth,
                                Direction::NegY,
                                Direction::NegX,
                            ),
                            joint: back,
                        },
                    ],
                    closing: Closing::Close,
                }
            }
            PanelKind::Top | PanelKind::Bottom => {
                let jointed = self.top_bottom_plan(kind);
                // nested layout: the lid is one shared cut, the bottom stays jointed
                if kind == PanelKind::Top && self.variant == LayoutVariant::Nested {
                    OutlinePlan::SharedCut {
                        start: Point::new(t, 0.0),
                        run: Vector::new(d.outer_width - 2.0 * t, 0.0),
                        logical: Box::new(jointed),
                    }
                } else {
                    jointed
                }
            }
            PanelKind::Back => {
                let height = d.outer_height - 2.0 * t;
                let width = d.outer_width - 2.0 * t;
                OutlinePlan::Jointed {
                    start: Point::new(t, t),
                    edges: vec![
                        PlannedEdge {
                            name: "left side",
                            spec: EdgeSpec::jointed(
                                height,
                                j.fingers_height,
                                Direction::PosY,
                                Direction::NegX,
                            )
                            .adjusted(),
                            joint: JointId::LeftBack,
                        },
                        PlannedEdge {
                            name: "top",
                            spec: EdgeSpec::jointed(
                                width,
                                j.fingers_width,
                                Direction::PosX,
                                Direction::PosY,
                            ),
                            joint: JointId::TopBack,
                        },
                        PlannedEdge {
                            name: "right side",
                            spec: EdgeSpec::jointed(
                                height,
                                j.fingers_height,
                                Direction::NegY,
                                Direction::PosX,
                            )
                            .adjusted(),
                            joint: JointId::RightBack,
                        },
                        PlannedEdge {
                            name: "bottom",
                            spec: EdgeSpec::jointed(
                                width,
                                j.fingers_width,
                                Direction::NegX,
                                Direction::NegY,
                            ),
                            joint: JointId::BottomBack,
                        },
                    ],
                    closing: Closing::Implicit,
                }
            }
            PanelKind::InnerBase
            | PanelKind::InnerTop
            | PanelKind::InsideFront
            | PanelKind::InsideBack => return None,
        };
        Some(plan)
    }

    fn top_bottom_plan(&self, kind: PanelKind) -> OutlinePlan {
        let d = &self.dims;
        let t = d.thickness;
        let j = &self.joints;
        let width = d.outer_width - 2.0 * t;
        let (left, right, back) = if kind == PanelKind::Top {
            (JointId::LeftTop, JointId::RightTop, JointId::TopBack)
        } else {
            (JointId::LeftBottom, JointId::RightBottom, JointId::BottomBack)
        };
        OutlinePlan::Jointed {
            start: Point::new(t, 0.0),
            edges: vec![
                PlannedEdge {
                    name: "front to back",
                    spec: EdgeSpec::jointed(
                        d.outer_depth,
                        j.fingers_depth,
                        Direction::PosY,
                        Direction::NegX,
                    ),
                    joint: left,
                },
                PlannedEdge {
                    name: "left to right",
                    spec: EdgeSpec::jointed(width, j.fingers_width, Direction::PosX, Direction::NegY),
                    joint: back,
                },
                PlannedEdge {
                    name: "back to front",
                    spec: EdgeSpec::jointed(
                        d.outer_depth,
                        j.fingers_depth,
                        Direction::NegY,
                        Direction::PosX,
                    ),
                    joint: right,
                },
            ],
            closing: Closing::Line(Vector::new(-width, 0.0)),
        }
    }

    /// Reference rectangles for a shell panel.
    pub fn reference_rects(&self, kind: PanelKind) -> Option<ReferenceRects> {
        let d = &self.dims;
        let t = d.thickness;
        let rects = match kind {
            PanelKind::Left | PanelKind::Right => ReferenceRects {
                outer: Rect::new(0.0, 0.0, d.outer_height, d.outer_depth),
                inner: Rect::new(t, 0.0, d.inner_height, d.inner_depth),
            },
            PanelKind::Top | PanelKind::Bottom => ReferenceRects {
                outer: Rect::new(0.0, 0.0, d.outer_width, d.outer_depth),
                inner: Rect::new(t, 0.0, d.inner_width, d.inner_depth),
            },
            PanelKind::Back => ReferenceRects {
                outer: Rect::new(0.0, 0.0, d.outer_width, d.outer_height),
                inner: Rect::new(t, t, d.inner_width, d.inner_height),
            },
            _ => return None,
        };
        Some(rects)
    }

    /// Compose one shell panel, recording its jointed edges in `ledger`.
    pub fn compose(
        &self,
        kind: PanelKind,
        ledger: &mut JointLedger,
    ) -> CamToolResult<PanelOutline> {
        let (Some(plan), Some(reference)) = (self.plan(kind), self.reference_rects(kind)) else {
            return Err(CompositionError::NoOutlinePlan { panel: kind }.into());
        };
        let centre = reference.outer.centre();

        let (path, shared_cut) = match &plan {
            OutlinePlan::Jointed { .. } => (self.walk(kind, &plan, centre, ledger)?, false),
            OutlinePlan::SharedCut {
                start,
                run,
                logical,
            } => {
                // only the joints are kept from the logical outline
                self.walk(kind, logical, centre, ledger)?;
                let mut path = Path::starting_at(*start);
                path.line_by(*run);
                (path, true)
            }
        };

        tracing::debug!(
            "Composed {} outline: {} ops, {:.2} mm of cut{}",
            kind,
            path.ops().len(),
            path.length(),
            if shared_cut { " (shared)" } else { "" }
        );

        Ok(PanelOutline {
            kind,
            path,
            reference,
            shared_cut,
        })
    }

    fn walk(
        &self,
        kind: PanelKind,
        plan: &OutlinePlan,
        centre: Point,
        ledger: &mut JointLedger,
    ) -> CamToolResult<Path> {
        let OutlinePlan::Jointed {
            start,
            edges,
            closing,
        } = plan
        else {
            return Err(CompositionError::NoOutlinePlan { panel: kind }.into());
        };

        let mut path = Path::starting_at(*start);
        for planned in edges {
            let generated = self
                .finger
                .edge(&planned.spec)
                .map_err(|source| CamToolError::Edge {
                    panel: kind,
                    edge: planned.name,
                    source,
                })?;

            let midpoint = path.pen() + planned.spec.main.unit() * (planned.spec.length / 2.0);
            let role = role_for(planned.spec.tab, centre - midpoint);
            ledger.record(
                planned.joint,
                JointEdge {
                    panel: kind,
                    edge: planned.name,
                    role,
                    count: planned.spec.count,
                    finger_length: self.finger.finger_length(),
                    profile: generated.profile,
                },
            );
            path.append(&generated.path);
        }

        match closing {
            Closing::Close => {
                path.close();
            }
            Closing::Line(v) => {
                path.line_by(*v);
            }
            Closing::Implicit => {}
        }

        if !path.is_closed() {
            return Err(CompositionError::OpenOutline { panel: kind }.into());
        }
        Ok(path)
    }

    /// Compose all five shell panels and verify every joint between them.
    pub fn compose_shell(&self) -> CamToolResult<ShellOutlines> {
        let mut ledger = JointLedger::new();
        let mut outlines = Vec::with_capacity(PanelKind::SHELL.len());
        for kind in PanelKind::SHELL {
            outlines.push(self.compose(kind, &mut ledger)?);
        }
        let joints_verified = ledger.verify_complete()?;
        tracing::debug!("Verified {} joints", joints_verified);
        Ok(ShellOutlines {
            outlines,
            ledger,
            joints_verified,
        })
    }
}

/// Tabs pointing away from the panel body protrude; tabs pointing into it are
/// cut as notches.
fn role_for(tab: Option<Direction>, to_centre: Vector) -> JointRole {
    match tab {
        Some(dir) if dir.unit().dot(to_centre) > 0.0 => JointRole::Notch,
        _ => JointRole::Tab,
    }
}

/// The verified shell of one design.
#[derive(Debug, Clone)]
pub struct ShellOutlines {
    pub outlines: Vec<PanelOutline>,
    pub ledger: JointLedger,
    pub joints_verified: usize,
}

impl ShellOutlines {
    pub fn get(&self, kind: PanelKind) -> Option<&PanelOutline> {
        self.outlines.iter().find(|o| o.kind == kind)
    }
}

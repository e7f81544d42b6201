//! Finger Joint Edge Generator
//!
//! Produces one edge of a box-joint outline: `n` fingers of equal length,
//! separated and surrounded by `n + 1` equal runs, protruding by the material
//! thickness in the tab direction.
//!
//! An edge may be *adjusted* when its mating edge has outward fingers that
//! shorten the usable length by one thickness at each end. The runs are then
//! laid out over `length + 2·thickness` and the two end runs are trimmed by one
//! thickness, so the finger positions line up with the mating edge.

use crate::error::{ParameterError, ParameterResult};
use crate::joint_check::JointRole;
use enclosurekit_core::geometry::{Direction, Point, EPSILON};
use enclosurekit_core::Path;
use enclosurekit_settings::Dimensions;
use serde::{Deserialize, Serialize};

/// Description of one panel edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Nominal length before fingers (mm)
    pub length: f64,
    /// Number of fingers; zero gives a plain straight edge
    pub count: u32,
    /// Direction the edge is walked in
    pub main: Direction,
    /// Direction fingers protrude in
    pub tab: Option<Direction>,
    /// Lay out over `length + 2·thickness` to line up with outward mating fingers
    pub adjust: bool,
}

impl EdgeSpec {
    pub fn jointed(length: f64, count: u32, main: Direction, tab: Direction) -> Self {
        Self {
            length,
            count,
            main,
            tab: Some(tab),
            adjust: false,
        }
    }

    pub fn straight(length: f64, main: Direction) -> Self {
        Self {
            length,
            count: 0,
            main,
            tab: None,
            adjust: false,
        }
    }

    pub fn adjusted(mut self) -> Self {
        self.adjust = true;
        self
    }
}

/// Computed run and finger lengths for an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLayout {
    pub count: u32,
    pub finger_length: f64,
    /// Thickness adjustment (`thickness` when adjusted, else 0)
    pub delta: f64,
    /// Run between two fingers
    pub gap: f64,
    /// First and last run
    pub end_run: f64,
}

impl EdgeLayout {
    /// Length the fingers are distributed over: `length + 2·delta`.
    pub fn span(&self) -> f64 {
        (self.count + 1) as f64 * self.gap + self.count as f64 * self.finger_length
    }

    /// Net distance travelled along the main direction.
    pub fn main_displacement(&self) -> f64 {
        self.span() - 2.0 * self.delta
    }

    /// Flat runs in drawing order.
    pub fn runs(&self) -> Vec<f64> {
        if self.count == 0 {
            return vec![self.main_displacement()];
        }
        let mut runs = Vec::with_capacity(self.count as usize + 1);
        runs.push(self.end_run);
        runs.extend(std::iter::repeat_n(self.gap, self.count as usize - 1));
        runs.push(self.end_run);
        runs
    }
}

/// Finger joint generator for one material and finger size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerJoint {
    thickness: f64,
    finger_length: f64,
}

impl FingerJoint {
    pub fn new(thickness: f64, finger_length: f64) -> ParameterResult<Self> {
        positive("material thickness", thickness)?;
        positive("finger length", finger_length)?;
        Ok(Self {
            thickness,
            finger_length,
        })
    }

    pub fn from_dimensions(dims: &Dimensions) -> ParameterResult<Self> {
        Self::new(dims.thickness, dims.finger_length)
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn finger_length(&self) -> f64 {
        self.finger_length
    }

    /// Validate an edge and compute its runs.
    pub fn layout(&self, spec: &EdgeSpec) -> ParameterResult<EdgeLayout> {
        positive("edge length", spec.length)?;

        if spec.count > 0 {
            let tab = spec
                .tab
                .ok_or(ParameterError::MissingTabDirection { count: spec.count })?;
            if !spec.main.is_perpendicular_to(tab) {
                return Err(ParameterError::ParallelTabDirection {
                    main: spec.main,
                    tab,
                });
            }
        }

        let delta = if spec.adjust { self.thickness } else { 0.0 };
        let n = spec.count as f64;
        let span = spec.length + 2.0 * delta;

        if spec.count == 0 {
            return Ok(EdgeLayout {
                count: 0,
                finger_length: self.finger_length,
                delta,
                gap: span,
                end_run: spec.length,
            });
        }

        let gap = (span - n * self.finger_length) / (n + 1.0);
        if gap <= EPSILON {
            return Err(ParameterError::NonPositiveGap {
                count: spec.count,
                finger_length: self.finger_length,
                span,
                gap,
            });
        }

        let end_run = gap - delta;
        if end_run <= EPSILON {
            return Err(ParameterError::NonPositiveEndRun {
                run: end_run,
                gap,
                delta,
            });
        }

        if gap < self.thickness {
            tracing::warn!(
                "Joint gap {:.3} mm is narrower than the material thickness {:.3} mm",
                gap,
                self.thickness
            );
        }

        Ok(EdgeLayout {
            count: spec.count,
            finger_length: self.finger_length,
            delta,
            gap,
            end_run,
        })
    }

    /// Relative path fragment for one edge, starting at the current pen.
    pub fn edge_path(&self, spec: &EdgeSpec) -> ParameterResult<Path> {
        let layout = self.layout(spec)?;
        Ok(self.trace(spec, &layout))
    }

    /// Path, layout and profile of one edge in a single pass.
    pub fn edge(&self, spec: &EdgeSpec) -> ParameterResult<GeneratedEdge> {
        let layout = self.layout(spec)?;
        let path = self.trace(spec, &layout);
        let profile = EdgeProfile::from_path(&path, spec, &layout);
        Ok(GeneratedEdge {
            path,
            layout,
            profile,
        })
    }

    fn trace(&self, spec: &EdgeSpec, layout: &EdgeLayout) -> Path {
        let main = spec.main.unit();
        let mut path = Path::new();
        let runs = layout.runs();

        path.line_by(main * runs[0]);
        if let Some(tab) = spec.tab.map(Direction::unit) {
            for run in runs.iter().skip(1) {
                path.line_by(tab * self.thickness)
                    .line_by(main * self.finger_length)
                    .line_by(tab * -self.thickness)
                    .line_by(main * *run);
            }
        }

        tracing::trace!(
            "Edge {} x{} along {}: gap {:.3}, end run {:.3}",
            spec.length,
            spec.count,
            spec.main,
            layout.gap,
            layout.end_run
        );
        path
    }

    /// Depth profile of the generated edge, in span coordinates.
    pub fn profile(&self, spec: &EdgeSpec) -> ParameterResult<EdgeProfile> {
        Ok(self.edge(spec)?.profile)
    }
}

/// Output of [`FingerJoint::edge`].
#[derive(Debug, Clone)]
pub struct GeneratedEdge {
    pub path: Path,
    pub layout: EdgeLayout,
    pub profile: EdgeProfile,
}

fn positive(name: &'static str, value: f64) -> ParameterResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::NonPositiveLength { name, value })
    }
}

/// A flat stretch of an edge at constant depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSegment {
    pub from: f64,
    pub to: f64,
    /// Offset in the tab direction (0 on runs, thickness on fingers)
    pub depth: f64,
}

/// Edge shape sampled from a generated path.
///
/// Positions are measured along the main direction from the start of the
/// span, so an adjusted edge starts at `delta`. Outside the segments the
/// depth is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeProfile {
    span: f64,
    segments: Vec<ProfileSegment>,
}

impl EdgeProfile {
    pub fn from_path(path: &Path, spec: &EdgeSpec, layout: &EdgeLayout) -> Self {
        let main = spec.main.unit();
        let tab = spec.tab.map(Direction::unit);
        let start = path.start();
        let project = |p: Point| {
            let v = p - start;
            let s = v.dot(main) + layout.delta;
            let h = tab.map_or(0.0, |t| v.dot(t));
            (s, h)
        };

        let vertices = path.vertices();
        let mut segments = Vec::new();
        for pair in vertices.windows(2) {
            let (s0, h0) = project(pair[0]);
            let (s1, h1) = project(pair[1]);
            if (h0 - h1).abs() < EPSILON && (s1 - s0).abs() > EPSILON {
                segments.push(ProfileSegment {
                    from: s0.min(s1),
                    to: s0.max(s1),
                    depth: h0,
                });
            }
        }

        Self {
            span: layout.span(),
            segments,
        }
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn segments(&self) -> &[ProfileSegment] {
        &self.segments
    }

    /// Depth in the tab direction at `position`, zero where the edge has no
    /// material.
    pub fn depth_at(&self, position: f64) -> f64 {
        self.segments
            .iter()
            .find(|seg| position >= seg.from - EPSILON && position <= seg.to + EPSILON)
            .map_or(0.0, |seg| seg.depth)
    }

    /// Positions where the depth may change.
    pub fn breakpoints(&self) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .segments
            .iter()
            .flat_map(|seg| [seg.from, seg.to])
            .collect();
        points.push(0.0);
        points.push(self.span);
        points
    }

    /// First position where the two edges do not interlock, if any.
    ///
    /// Samples the midpoint of every interval between the combined
    /// breakpoints; at each the outward protrusions must cancel.
    pub fn first_mismatch(
        &self,
        role: JointRole,
        other: &EdgeProfile,
        other_role: JointRole,
    ) -> Option<f64> {
        let mut points = self.breakpoints();
        points.extend(other.breakpoints());
        points.sort_by(f64::total_cmp);
        points.dedup_by(|a, b| (*a - *b).abs() < 1e-6);

        points.windows(2).map(|w| (w[0] + w[1]) / 2.0).find(|&s| {
            let outward = role.outward_sign() * self.depth_at(s)
                + other_role.outward_sign() * other.depth_at(s);
            outward.abs() > 1e-6
        })
    }

    pub fn is_complement_of(
        &self,
        role: JointRole,
        other: &EdgeProfile,
        other_role: JointRole,
    ) -> bool {
        self.first_mismatch(role, other, other_role).is_none()
    }
}

//! Path construction
//!
//! A [`Path`] is an ordered list of drawing operations built from an implicit
//! pen position. Almost everything is relative (`line_by`, `move_by`), so a
//! fragment such as one finger-jointed edge can be generated in isolation and
//! appended to any outline.

use crate::error::{ensure_finite, GeometryError};
use crate::geometry::{Point, Vector, EPSILON};
use crate::units::format_coord;
use std::ops::AddAssign;

/// Direction an arc is swept in, as seen on the finished sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcSweep {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Circular arc with an absolute centre. Angles use the clock convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub centre: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub end_deg: f64,
    pub sweep: ArcSweep,
}

impl ArcSegment {
    pub fn start_point(&self) -> Point {
        self.centre.polar(self.radius, self.start_deg)
    }

    pub fn end_point(&self) -> Point {
        self.centre.polar(self.radius, self.end_deg)
    }

    /// Swept angle in degrees, in `(0, 360]`.
    pub fn sweep_degrees(&self) -> f64 {
        let raw = match self.sweep {
            ArcSweep::Clockwise => self.end_deg - self.start_deg,
            ArcSweep::CounterClockwise => self.start_deg - self.end_deg,
        };
        let span = raw.rem_euclid(360.0);
        if span < EPSILON {
            360.0
        } else {
            span
        }
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep_degrees().to_radians()
    }

    /// Clock angle at fraction `t` of the sweep.
    fn angle_at(&self, t: f64) -> f64 {
        let span = self.sweep_degrees() * t;
        match self.sweep {
            ArcSweep::Clockwise => self.start_deg + span,
            ArcSweep::CounterClockwise => self.start_deg - span,
        }
    }
}

/// A single drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    MoveBy(Vector),
    LineBy(Vector),
    Arc(ArcSegment),
    Close,
}

/// Ordered drawing operations plus the pen state needed to keep building.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    ops: Vec<PathOp>,
    origin: Option<Point>,
    subpath_start: Point,
    pen: Point,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a path with an absolute move.
    pub fn starting_at(point: Point) -> Self {
        let mut path = Self::new();
        path.move_to(point);
        path
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.push(PathOp::MoveTo(point))
    }

    pub fn move_by(&mut self, delta: Vector) -> &mut Self {
        self.push(PathOp::MoveBy(delta))
    }

    pub fn line_by(&mut self, delta: Vector) -> &mut Self {
        self.push(PathOp::LineBy(delta))
    }

    pub fn horz_by(&mut self, dx: f64) -> &mut Self {
        self.line_by(Vector::new(dx, 0.0))
    }

    pub fn vert_by(&mut self, dy: f64) -> &mut Self {
        self.line_by(Vector::new(0.0, dy))
    }

    /// Arc around `centre`. If the pen is not already on the arc start, a
    /// connecting line is drawn when rendered.
    pub fn arc(
        &mut self,
        centre: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        sweep: ArcSweep,
    ) -> &mut Self {
        self.push(PathOp::Arc(ArcSegment {
            centre,
            radius,
            start_deg,
            end_deg,
            sweep,
        }))
    }

    /// Line to `target` finished with a two-barb arrow head of `head_length`.
    ///
    /// The pen ends on the arrow tip.
    pub fn arrow_to(&mut self, target: Point, head_length: f64) -> &mut Self {
        let shaft = target - self.pen;
        self.line_by(shaft);
        let len = shaft.length();
        if len < EPSILON {
            return self;
        }
        let back = shaft * (-head_length / len);
        for barb_deg in [30.0_f64, -30.0] {
            let (s, c) = barb_deg.to_radians().sin_cos();
            let barb = Vector::new(back.dx * c - back.dy * s, back.dx * s + back.dy * c);
            self.line_by(barb);
            self.move_by(-barb);
        }
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.push(PathOp::Close)
    }

    /// Replay another path's operations from the current pen.
    pub fn append(&mut self, other: &Path) -> &mut Self {
        for op in &other.ops {
            self.push(*op);
        }
        self
    }

    fn push(&mut self, op: PathOp) -> &mut Self {
        match op {
            PathOp::MoveTo(p) => {
                if self.origin.is_none() && self.ops.is_empty() {
                    self.origin = Some(p);
                }
                self.subpath_start = p;
                self.pen = p;
            }
            PathOp::MoveBy(v) => {
                self.pen += v;
                self.subpath_start = self.pen;
            }
            PathOp::LineBy(v) => self.pen += v,
            PathOp::Arc(arc) => self.pen = arc.end_point(),
            PathOp::Close => self.pen = self.subpath_start,
        }
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    /// First point of the path (the initial absolute move, or the origin for
    /// relative fragments).
    pub fn start(&self) -> Point {
        self.origin.unwrap_or(Point::ORIGIN)
    }

    /// Current pen position.
    pub fn pen(&self) -> Point {
        self.pen
    }

    /// Net pen displacement from [`Path::start`].
    pub fn displacement(&self) -> Vector {
        self.pen - self.start()
    }

    /// Whether the final operation returns to the first point.
    pub fn is_closed(&self) -> bool {
        match self.ops.last() {
            Some(PathOp::Close) => self.subpath_start.approx_eq(self.start(), EPSILON),
            Some(_) => self.ops.len() > 1 && self.pen.approx_eq(self.start(), EPSILON),
            None => false,
        }
    }

    /// Pen positions after every drawing operation, starting with
    /// [`Path::start`].
    pub fn vertices(&self) -> Vec<Point> {
        let mut replay = Path::new();
        let mut points = vec![self.start()];
        for op in &self.ops {
            replay.push(*op);
            points.push(replay.pen);
        }
        points.dedup_by(|a, b| a.approx_eq(*b, EPSILON));
        points
    }

    /// Total drawn length, including the implicit segment of a close.
    pub fn length(&self) -> f64 {
        let mut replay = Path::new();
        let mut total = 0.0;
        for op in &self.ops {
            let before = replay.pen;
            match op {
                PathOp::LineBy(v) => total += v.length(),
                PathOp::Arc(arc) => {
                    total += before.distance_to(arc.start_point()) + arc.length();
                }
                PathOp::Close => total += before.distance_to(replay.subpath_start),
                PathOp::MoveTo(_) | PathOp::MoveBy(_) => {}
            }
            replay.push(*op);
        }
        total
    }

    /// Point reached after drawing `distance` along the path, or `None` past
    /// its end. Moves contribute no length.
    pub fn point_at_length(&self, distance: f64) -> Option<Point> {
        let mut replay = Path::new();
        let mut walked = 0.0;
        for op in &self.ops {
            let before = replay.pen;
            replay.push(*op);
            let seg = match op {
                PathOp::LineBy(v) => v.length(),
                PathOp::Arc(arc) => arc.length(),
                PathOp::Close => before.distance_to(replay.pen),
                PathOp::MoveTo(_) | PathOp::MoveBy(_) => 0.0,
            };
            if seg > 0.0 && walked + seg >= distance {
                let t = (distance - walked) / seg;
                return Some(match op {
                    PathOp::Arc(arc) => arc.centre.polar(arc.radius, arc.angle_at(t)),
                    _ => before + (replay.pen - before) * t,
                });
            }
            walked += seg;
        }
        None
    }

    /// Reject NaN/infinite values and non-positive arc radii.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for op in &self.ops {
            match op {
                PathOp::MoveTo(p) => {
                    ensure_finite("move_to x", p.x)?;
                    ensure_finite("move_to y", p.y)?;
                }
                PathOp::MoveBy(v) | PathOp::LineBy(v) => {
                    ensure_finite("dx", v.dx)?;
                    ensure_finite("dy", v.dy)?;
                }
                PathOp::Arc(arc) => {
                    ensure_finite("arc centre x", arc.centre.x)?;
                    ensure_finite("arc centre y", arc.centre.y)?;
                    ensure_finite("arc start angle", arc.start_deg)?;
                    ensure_finite("arc end angle", arc.end_deg)?;
                    if arc.radius <= 0.0 || !arc.radius.is_finite() {
                        return Err(GeometryError::NonPositiveRadius { radius: arc.radius });
                    }
                }
                PathOp::Close => {}
            }
        }
        Ok(())
    }

    /// SVG path data in the path's own (y-up) coordinates.
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        let mut replay = Path::new();
        if !matches!(self.ops.first(), Some(PathOp::MoveTo(_))) {
            out.push_str("M0 0");
        }
        for op in &self.ops {
            let before = replay.pen;
            if !out.is_empty() {
                out.push(' ');
            }
            match op {
                PathOp::MoveTo(p) => {
                    out.push_str(&format!("M{} {}", format_coord(p.x), format_coord(p.y)))
                }
                PathOp::MoveBy(v) => {
                    out.push_str(&format!("m{} {}", format_coord(v.dx), format_coord(v.dy)))
                }
                PathOp::LineBy(v) => {
                    out.push_str(&format!("l{} {}", format_coord(v.dx), format_coord(v.dy)))
                }
                PathOp::Arc(arc) => {
                    let start = arc.start_point();
                    if !before.approx_eq(start, 1e-6) {
                        out.push_str(&format!(
                            "L{} {} ",
                            format_coord(start.x),
                            format_coord(start.y)
                        ));
                    }
                    out.push_str(&svg_arc_commands(arc));
                }
                PathOp::Close => out.push('Z'),
            }
            replay.push(*op);
        }
        out
    }
}

impl AddAssign<&Path> for Path {
    fn add_assign(&mut self, rhs: &Path) {
        self.append(rhs);
    }
}

/// `A` commands for an arc whose start point is already the current point.
///
/// Full circles are split in two, since a single SVG arc cannot close on
/// itself. In a y-up frame a clockwise sweep is the negative-angle direction,
/// which SVG encodes as sweep-flag 0.
pub fn svg_arc_commands(arc: &ArcSegment) -> String {
    let sweep = arc.sweep_degrees();
    let sweep_flag = match arc.sweep {
        ArcSweep::Clockwise => 0,
        ArcSweep::CounterClockwise => 1,
    };
    let r = format_coord(arc.radius);
    let pieces = if sweep > 359.999 { 2 } else { 1 };
    let mut cmds = Vec::with_capacity(pieces);
    for i in 1..=pieces {
        let end = arc
            .centre
            .polar(arc.radius, arc.angle_at(i as f64 / pieces as f64));
        let large = if sweep / pieces as f64 > 180.0 { 1 } else { 0 };
        cmds.push(format!(
            "A{} {} 0 {} {} {} {}",
            r,
            r,
            large,
            sweep_flag,
            format_coord(end.x),
            format_coord(end.y)
        ));
    }
    cmds.join(" ")
}

//! Group transforms
//!
//! A [`Transform`] is an ordered list of translate/rotate steps written the
//! way an SVG `transform` attribute is: `translate(a) rotate(b)` rotates the
//! content first, then translates it. Steps are kept so the renderer can emit
//! them verbatim; [`Transform::matrix`] folds them into a homogeneous matrix
//! for placement queries.

use crate::geometry::Point;
use crate::units::format_coord;
use nalgebra::{Matrix3, Rotation2, Vector2, Vector3};

/// One step of a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate { dx: f64, dy: f64 },
    /// Clockwise rotation in degrees (clock convention).
    Rotate { degrees: f64 },
}

impl TransformOp {
    fn matrix(&self) -> Matrix3<f64> {
        match *self {
            TransformOp::Translate { dx, dy } => Matrix3::new_translation(&Vector2::new(dx, dy)),
            TransformOp::Rotate { degrees } => {
                // clockwise in a y-up frame is the negative mathematical angle
                Rotation2::new(-degrees.to_radians()).to_homogeneous()
            }
        }
    }
}

/// Composable placement of a group relative to its parent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform {
    ops: Vec<TransformOp>,
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self {
            ops: vec![TransformOp::Translate { dx, dy }],
        }
    }

    /// Clockwise rotation about the local origin.
    pub fn rotate(degrees: f64) -> Self {
        Self {
            ops: vec![TransformOp::Rotate { degrees }],
        }
    }

    /// Append `next` after `self` in declaration order.
    pub fn then(mut self, next: Transform) -> Self {
        self.ops.extend(next.ops);
        self
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| match *op {
            TransformOp::Translate { dx, dy } => dx == 0.0 && dy == 0.0,
            TransformOp::Rotate { degrees } => degrees.rem_euclid(360.0) == 0.0,
        })
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        self.ops
            .iter()
            .fold(Matrix3::identity(), |acc, op| acc * op.matrix())
    }

    /// Map a point from the local frame into the parent frame.
    pub fn apply(&self, point: Point) -> Point {
        apply_matrix(&self.matrix(), point)
    }

    /// SVG `transform` attribute value; `None` for the identity.
    ///
    /// Rotations are negated because SVG's positive angle is counter-clockwise
    /// in the y-up frame the document is drawn in.
    pub fn to_svg(&self) -> Option<String> {
        if self.is_identity() {
            return None;
        }
        let parts: Vec<String> = self
            .ops
            .iter()
            .map(|op| match *op {
                TransformOp::Translate { dx, dy } => {
                    format!("translate({} {})", format_coord(dx), format_coord(dy))
                }
                TransformOp::Rotate { degrees } => format!("rotate({})", format_coord(-degrees)),
            })
            .collect();
        Some(parts.join(" "))
    }
}

/// Apply a homogeneous 2D matrix to a point.
pub fn apply_matrix(matrix: &Matrix3<f64>, point: Point) -> Point {
    let v = matrix * Vector3::new(point.x, point.y, 1.0);
    Point::new(v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;

    #[test]
    fn test_translate_then_rotate() {
        let t = Transform::translate(10.0, 0.0).then(Transform::rotate(-90.0));
        // (1, 0) rotates anticlockwise onto (0, 1), then shifts right
        let p = t.apply(Point::new(1.0, 0.0));
        assert!(p.approx_eq(Point::new(10.0, 1.0), EPSILON), "{p}");
    }

    #[test]
    fn test_order_matters() {
        let a = Transform::translate(10.0, 0.0).then(Transform::rotate(90.0));
        let b = Transform::rotate(90.0).then(Transform::translate(10.0, 0.0));
        let pa = a.apply(Point::ORIGIN);
        let pb = b.apply(Point::ORIGIN);
        assert!(pa.approx_eq(Point::new(10.0, 0.0), EPSILON));
        assert!(pb.approx_eq(Point::new(0.0, -10.0), EPSILON), "{pb}");
    }

    #[test]
    fn test_svg_attribute() {
        assert_eq!(Transform::identity().to_svg(), None);
        assert_eq!(Transform::translate(0.0, 0.0).to_svg(), None);
        let t = Transform::translate(72.555, 0.0).then(Transform::rotate(-90.0));
        assert_eq!(t.to_svg().as_deref(), Some("translate(72.555 0) rotate(90)"));
    }
}

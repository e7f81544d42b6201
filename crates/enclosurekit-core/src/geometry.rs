//! Plain 2D geometry values.
//!
//! Sheet space is millimetres with the y axis pointing up. Angles follow the
//! clock convention used by every decoration: degrees, zero at 12 o'clock,
//! increasing clockwise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Tolerance for coincidence tests on millimetre geometry.
pub const EPSILON: f64 = 1e-9;

/// A position in a local or global frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other - *self).length()
    }

    /// True when both coordinates agree within `tolerance`.
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    /// The point at `radius` from `self` in clock direction `degrees`.
    pub fn polar(&self, radius: f64, degrees: f64) -> Point {
        *self + Vector::polar(radius, degrees)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A relative displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Polar to rectangular, clock convention (0° = +y, 90° = +x).
    pub fn polar(radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self {
            dx: radius * rad.sin(),
            dy: radius * rad.cos(),
        }
    }

    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    pub fn is_zero(&self) -> bool {
        self.dx.abs() <= EPSILON && self.dy.abs() <= EPSILON
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.dx * rhs, self.dy * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

/// Axis-aligned unit direction used for edge walking and tab protrusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
}

impl Direction {
    pub fn unit(self) -> Vector {
        match self {
            Direction::PosX => Vector::new(1.0, 0.0),
            Direction::NegX => Vector::new(-1.0, 0.0),
            Direction::PosY => Vector::new(0.0, 1.0),
            Direction::NegY => Vector::new(0.0, -1.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
        }
    }

    pub fn is_perpendicular_to(self, other: Direction) -> bool {
        self.unit().dot(other.unit()).abs() < EPSILON
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::PosX => write!(f, "+x"),
            Direction::NegX => write!(f, "-x"),
            Direction::PosY => write!(f, "+y"),
            Direction::NegY => write!(f, "-y"),
        }
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `centre`.
    pub fn centred(centre: Point, width: f64, height: f64) -> Self {
        Self::new(
            centre.x - width / 2.0,
            centre.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x - EPSILON
            && p.x <= self.x + self.width + EPSILON
            && p.y >= self.y - EPSILON
            && p.y <= self.y + self.height + EPSILON
    }
}

//! Two-component double-precision vector for page-plane coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::vec3::Vec3;

/// Immutable 2D vector value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const UP: Vec2 = Vec2::new(0.0, 1.0);
    pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
    pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
    pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn normalized(self) -> Vec2 {
        self * (1.0 / self.length())
    }

    /// Unsigned angle in `[0, π]`; NaN for a zero vector.
    pub fn angle(self, other: Vec2) -> f64 {
        let cos = self.dot(other) / (self.length() * other.length());
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Counterclockwise rotation by `theta` radians.
    pub fn rotate(self, theta: f64) -> Vec2 {
        let (sin, cos) = theta.sin_cos();
        Vec2::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Projection onto the page plane (depth dropped).
impl From<Vec3> for Vec2 {
    fn from(v: Vec3) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {:.3}", self.x, self.y)
    }
}

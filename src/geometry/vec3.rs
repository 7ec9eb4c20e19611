//! Three-component double-precision vector.
//!
//! The canonical frame used throughout the crate: `FRONT` (+z) is the normal of
//! the page plane and `DOWN` (-y) is the direction an aligned polygon's first
//! edge points to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Immutable 3D vector value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const DOWN: Vec3 = Vec3::new(0.0, -1.0, 0.0);
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
    pub const FRONT: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    pub const BACK: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. NaN components for a zero vector.
    #[inline]
    pub fn normalized(self) -> Vec3 {
        self * (1.0 / self.length())
    }

    /// Angle between `self` and `other` in `[0, π]`.
    ///
    /// The cosine is clamped so nearly parallel vectors do not round outside
    /// the domain of `acos`. Returns NaN if either vector has zero length.
    pub fn angle(self, other: Vec3) -> f64 {
        let cos = self.dot(other) / (self.length() * other.length());
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Rotates `self` about `axis` by `theta` radians (Rodrigues' formula,
    /// counterclockwise when looking against the axis).
    ///
    /// `axis` is normalized internally; a zero axis yields NaN components.
    pub fn rotate(self, axis: Vec3, theta: f64) -> Vec3 {
        let (sin, cos) = theta.sin_cos();
        let k = axis.normalized();
        let c = 1.0 - cos;
        Vec3::new(
            (cos + c * k.x * k.x) * self.x
                + (c * k.x * k.y - k.z * sin) * self.y
                + (c * k.x * k.z + k.y * sin) * self.z,
            (c * k.x * k.y + k.z * sin) * self.x
                + (cos + c * k.y * k.y) * self.y
                + (c * k.y * k.z - k.x * sin) * self.z,
            (c * k.x * k.z - k.y * sin) * self.x
                + (c * k.y * k.z + k.x * sin) * self.y
                + (cos + c * k.z * k.z) * self.z,
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, scalar: f64) -> Vec3 {
        Vec3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {:.3} {:.3}", self.x, self.y, self.z)
    }
}

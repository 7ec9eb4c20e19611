//! Axis-aligned extent of a vertex set or a set of child extents.

use serde::{Deserialize, Serialize};

use super::vec3::Vec3;

/// Axis-aligned bounding box with y pointing up.
///
/// Always recomputed wholesale by its owner; there is no incremental update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Boundaries {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub max_depth: f64,
    pub min_depth: f64,
}

impl Boundaries {
    /// Per-axis min/max of `vertices`. An empty slice yields the zero box.
    pub fn from_vertices(vertices: &[Vec3]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::default();
        };
        let seed = Self {
            top: first.y,
            bottom: first.y,
            left: first.x,
            right: first.x,
            max_depth: first.z,
            min_depth: first.z,
        };
        vertices[1..].iter().fold(seed, |b, v| Self {
            top: b.top.max(v.y),
            bottom: b.bottom.min(v.y),
            left: b.left.min(v.x),
            right: b.right.max(v.x),
            max_depth: b.max_depth.max(v.z),
            min_depth: b.min_depth.min(v.z),
        })
    }

    /// Aggregate of child boxes.
    ///
    /// `bottom` and `left` take the maximum over the children, like `top` and
    /// `right`; only the depth range uses a true min/max. Callers that need the
    /// enclosing box should build it from the vertices instead.
    pub fn from_children<'a, I>(children: I) -> Self
    where
        I: IntoIterator<Item = &'a Boundaries>,
    {
        let mut iter = children.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        iter.fold(*first, |b, c| Self {
            top: b.top.max(c.top),
            bottom: b.bottom.max(c.bottom),
            left: b.left.max(c.left),
            right: b.right.max(c.right),
            max_depth: b.max_depth.max(c.max_depth),
            min_depth: b.min_depth.min(c.min_depth),
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.max_depth - self.min_depth
    }

    /// Centre of the box.
    pub fn middle(&self) -> Vec3 {
        (Vec3::new(self.left, self.top, self.min_depth)
            + Vec3::new(self.right, self.bottom, self.max_depth))
            * 0.5
    }
}

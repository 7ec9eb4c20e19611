//! A single face: an ordered vertex loop with derived metrics.
//!
//! Every public mutator recomputes all metrics before returning, so reads never
//! observe stale values. The loop is implicitly closed; the first vertex is not
//! repeated at the end.

use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::geometry::{Boundaries, Vec3};
use crate::unwrap_error::UnwrapError;

/// Fan triangles whose normal deviates from `FRONT` by less than this (as the
/// length of `normal × FRONT`) do not contribute to the normal-angle error.
const NORMAL_DEVIATION_THRESHOLD: f64 = 0.001;

/// Metrics derived from a polygon's vertex loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolygonMetrics {
    pub boundaries: Boundaries,
    /// Longest edge of the closed loop as a vector (first one wins on ties).
    pub longest_edge: Vec3,
    /// Sum of `|angle(fan normal, FRONT)|` over fan triangles that are not
    /// facing `FRONT`.
    pub normal_angle_error: f64,
    /// Sum of fan-triangle areas anchored at vertex 0.
    pub area: f64,
    pub perimeter: f64,
}

impl PolygonMetrics {
    pub fn compute(vertices: &[Vec3]) -> Self {
        let mut metrics = PolygonMetrics {
            boundaries: Boundaries::from_vertices(vertices),
            ..Default::default()
        };
        let Some(&origin) = vertices.first() else {
            return metrics;
        };

        let mut max_length = 0.0;
        for (&vertex, &next) in vertices.iter().circular_tuple_windows() {
            let edge = next - vertex;
            let length = edge.length();
            if length > max_length {
                metrics.longest_edge = edge;
                max_length = length;
            }
            metrics.perimeter += length;

            let fan_normal = (vertex - origin).cross(next - origin);
            metrics.area += 0.5 * fan_normal.length();

            if fan_normal.cross(Vec3::FRONT).length() > NORMAL_DEVIATION_THRESHOLD {
                metrics.normal_angle_error += fan_normal.angle(Vec3::FRONT).abs();
            }
        }
        metrics
    }

    /// Field-wise equality where NaN matches NaN.
    fn matches(&self, other: &PolygonMetrics) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        let (a, b) = (&self.boundaries, &other.boundaries);
        same(a.top, b.top)
            && same(a.bottom, b.bottom)
            && same(a.left, b.left)
            && same(a.right, b.right)
            && same(a.max_depth, b.max_depth)
            && same(a.min_depth, b.min_depth)
            && same(self.longest_edge.x, other.longest_edge.x)
            && same(self.longest_edge.y, other.longest_edge.y)
            && same(self.longest_edge.z, other.longest_edge.z)
            && same(self.normal_angle_error, other.normal_angle_error)
            && same(self.area, other.area)
            && same(self.perimeter, other.perimeter)
    }
}

/// Ordered vertex loop with a display name and an optional page assignment.
#[derive(Debug, Default)]
pub struct Polygon {
    name: Option<String>,
    page: Option<usize>,
    vertices: Vec<Vec3>,
    metrics: PolygonMetrics,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices<I: IntoIterator<Item = Vec3>>(vertices: I) -> Self {
        let mut polygon = Self::new();
        polygon.add_vertices(vertices);
        polygon
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_vertex(&mut self, vertex: Vec3) -> &mut Self {
        self.vertices.push(vertex);
        self.calc_metrics();
        self
    }

    pub fn add_vertices<I: IntoIterator<Item = Vec3>>(&mut self, vertices: I) -> &mut Self {
        self.vertices.extend(vertices);
        self.calc_metrics();
        self
    }

    /// Maps every vertex through `transform`, then recomputes metrics.
    pub fn apply<F: FnMut(Vec3) -> Vec3>(&mut self, mut transform: F) -> &mut Self {
        for vertex in &mut self.vertices {
            *vertex = transform(*vertex);
        }
        self.calc_metrics();
        self
    }

    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.apply(|v| v + offset)
    }

    pub fn rotate(&mut self, axis: Vec3, angle: f64) -> &mut Self {
        self.apply(|v| v.rotate(axis, angle))
    }

    /// Rotates the polygon flat onto the page plane with its first edge
    /// pointing `DOWN`.
    ///
    /// The plane normal is taken from the first three vertices. A normal
    /// already parallel (or antiparallel) to `FRONT` skips the tilt step. The
    /// in-plane turn direction is the sign of the triple product
    /// `(first × DOWN) · FRONT`; when it is zero the in-plane turn is skipped,
    /// so an edge pointing straight up stays up. Polygons with fewer than three
    /// vertices are left as is.
    pub fn align(&mut self) -> &mut Self {
        if self.vertices.len() < 3 {
            log::warn!(
                "align: polygon {:?} has {} vertices, leaving it unchanged",
                self.name,
                self.vertices.len()
            );
            return self;
        }

        let normal = self.normal();
        let tilt_axis = normal.cross(Vec3::FRONT);
        if tilt_axis.length() != 0.0 {
            let tilt = normal.angle(Vec3::FRONT);
            self.rotate(tilt_axis, tilt);
        }

        let first = self.vertices[1] - self.vertices[0];
        let turn = first.angle(Vec3::DOWN);
        let triple = first.cross(Vec3::DOWN).dot(Vec3::FRONT);
        let sign = f64::from((triple > 0.0) as i8 - (triple < 0.0) as i8);
        if sign != 0.0 {
            self.rotate(Vec3::FRONT, sign * turn);
        }

        if !self.vertices.iter().all(|v| v.is_finite()) {
            log::warn!(
                "align: polygon {:?} is degenerate, vertices are no longer finite",
                self.name
            );
        }
        self
    }

    /// Fan triangulation from vertex 0. A polygon with at most three vertices
    /// yields a single copy of itself.
    pub fn sub_triangles(&self) -> Vec<Polygon> {
        if self.vertices.len() <= 3 {
            return vec![self.clone()];
        }
        let apex = self.vertices[0];
        self.vertices[1..]
            .iter()
            .tuple_windows()
            .map(|(&b, &c)| Polygon::from_vertices([apex, b, c]))
            .collect()
    }

    /// Like [`sub_triangles`](Self::sub_triangles), but a polygon with at most
    /// three vertices is returned as is, keeping its name and page.
    pub fn into_sub_triangles(self) -> Vec<Polygon> {
        if self.vertices.len() <= 3 {
            vec![self]
        } else {
            self.sub_triangles()
        }
    }

    /// `(v1 - v0) × (v2 - v0)`, or zero with fewer than three vertices.
    pub fn normal(&self) -> Vec3 {
        match self.vertices.as_slice() {
            [v0, v1, v2, ..] => (*v1 - *v0).cross(*v2 - *v0),
            _ => Vec3::ZERO,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// 1-based page number assigned by packing.
    #[inline]
    pub fn page(&self) -> Option<usize> {
        self.page
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = Some(page);
    }

    #[inline]
    pub fn metrics(&self) -> &PolygonMetrics {
        &self.metrics
    }

    #[inline]
    pub fn boundaries(&self) -> &Boundaries {
        &self.metrics.boundaries
    }

    #[inline]
    pub fn longest_edge(&self) -> Vec3 {
        self.metrics.longest_edge
    }

    #[inline]
    pub fn normal_angle_error(&self) -> f64 {
        self.metrics.normal_angle_error
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.metrics.area
    }

    #[inline]
    pub fn perimeter(&self) -> f64 {
        self.metrics.perimeter
    }

    fn calc_metrics(&mut self) {
        self.metrics = PolygonMetrics::compute(&self.vertices);
    }
}

/// Copies vertices and name. The page assignment is not carried over.
impl Clone for Polygon {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            page: None,
            vertices: self.vertices.clone(),
            metrics: self.metrics,
        }
    }
}

impl FromIterator<Vec3> for Polygon {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        Polygon::from_vertices(iter)
    }
}

impl DebugInvariants for Polygon {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Polygon");
    }

    fn validate_invariants(&self) -> Result<(), UnwrapError> {
        let fresh = PolygonMetrics::compute(&self.vertices);
        if !self.metrics.matches(&fresh) {
            return Err(UnwrapError::InvariantViolation(format!(
                "polygon {:?} has stale metrics: stored {:?}, recomputed {:?}",
                self.name, self.metrics, fresh
            )));
        }
        Ok(())
    }
}

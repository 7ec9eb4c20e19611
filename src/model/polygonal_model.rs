//! Ordered collection of polygons with aggregate metrics.
//!
//! Mutators return `&mut Self` so a pipeline reads as a chain:
//!
//! ```
//! use mesh_unwrap::prelude::*;
//!
//! let mut model: PolygonalModel = (0..3)
//!     .map(|i| {
//!         let s = f64::from(i + 1);
//!         Polygon::from_vertices([
//!             Vec3::new(0.0, 0.0, 0.0),
//!             Vec3::new(s, 0.0, 0.0),
//!             Vec3::new(0.0, s, 0.0),
//!         ])
//!     })
//!     .collect();
//! model.sort(SortOrder::Descending).limit(1, 2).renumber_polygons();
//! assert_eq!(model.len(), 2);
//! assert_eq!(model.polygons()[0].name(), Some("1"));
//! ```

use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::geometry::Boundaries;
use crate::io::{Face, MeshData};
use crate::layout::{PageLayout, shelf};
use crate::model::polygon::Polygon;
use crate::unwrap_error::UnwrapError;

/// Ordering for [`PolygonalModel::sort`], by longest-edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Aggregate statistics of a model.
///
/// The packing fields are written by
/// [`spread_to_pages`](PolygonalModel::spread_to_pages) and keep their values
/// until the next packing run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonalModelInfo {
    pub max_polygon_width: f64,
    pub max_polygon_height: f64,
    pub normal_angle_error_sum: f64,
    pub area_sum: f64,
    pub perimeter_sum: f64,
    pub pages_area_sum: f64,
    pub density: f64,
    pub pages_count: usize,
    pub min_polygons_on_page: usize,
    pub max_polygons_on_page: usize,
}

#[derive(Debug, Default)]
pub struct PolygonalModel {
    polygons: Vec<Polygon>,
    boundaries: Boundaries,
    info: PolygonalModelInfo,
}

impl PolygonalModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut model = Self {
            polygons,
            ..Default::default()
        };
        model.calc_metrics();
        model
    }

    /// Builds one polygon per face; the face group becomes the polygon name.
    pub fn from_mesh_data(mesh: &MeshData) -> Result<Self, UnwrapError> {
        let polygons = (0..mesh.faces.len())
            .map(|i| {
                let points = mesh.face_points(i)?;
                if points.len() < 3 {
                    return Err(UnwrapError::TooFewVertices {
                        face: i + 1,
                        count: points.len(),
                    });
                }
                let mut polygon = Polygon::from_vertices(points);
                polygon.set_name(mesh.faces[i].group.clone());
                Ok(polygon)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_polygons(polygons))
    }

    /// Emits every polygon's vertices as fresh points and one face per polygon,
    /// grouped by polygon name.
    pub fn to_mesh_data(&self) -> MeshData {
        let mut mesh = MeshData::default();
        for polygon in &self.polygons {
            let first = mesh.points.len() + 1;
            mesh.points.extend_from_slice(polygon.vertices());
            mesh.faces.push(Face {
                group: polygon.name().map(str::to_owned),
                indices: (first..first + polygon.vertices().len()).collect(),
            });
        }
        mesh
    }

    pub fn add_polygon(&mut self, polygon: Polygon) -> &mut Self {
        self.polygons.push(polygon);
        self.calc_metrics();
        self
    }

    pub fn add_polygons<I: IntoIterator<Item = Polygon>>(&mut self, polygons: I) -> &mut Self {
        self.polygons.extend(polygons);
        self.calc_metrics();
        self
    }

    /// Keeps polygons `start..=finish` (1-based). `0` leaves that end open.
    ///
    /// Bounds are not validated: an inverted or out-of-range slice simply
    /// yields fewer (possibly zero) polygons.
    pub fn limit(&mut self, start: usize, finish: usize) -> &mut Self {
        let start = start.max(1);
        let finish = if finish == 0 { self.polygons.len() } else { finish };
        let take = (finish + 1).saturating_sub(start);
        self.polygons = std::mem::take(&mut self.polygons)
            .into_iter()
            .skip(start - 1)
            .take(take)
            .collect();
        self.calc_metrics();
        self
    }

    /// Stable sort by longest-edge length.
    pub fn sort(&mut self, order: SortOrder) -> &mut Self {
        let key = |p: &Polygon| p.longest_edge().length();
        match order {
            SortOrder::Ascending => self.polygons.sort_by(|a, b| key(a).total_cmp(&key(b))),
            SortOrder::Descending => self.polygons.sort_by(|a, b| key(b).total_cmp(&key(a))),
        }
        self.calc_metrics();
        self
    }

    /// Replaces every polygon by its fan triangulation, keeping relative order.
    /// New triangles are unnamed.
    pub fn reduce_to_triangles(&mut self) -> &mut Self {
        let mut triangles = Vec::with_capacity(self.polygons.len() + self.polygons.len() / 10);
        for polygon in std::mem::take(&mut self.polygons) {
            triangles.extend(polygon.into_sub_triangles());
        }
        self.polygons = triangles;
        self.calc_metrics();
        self
    }

    /// Names every polygon by its 1-based position.
    pub fn renumber_polygons(&mut self) -> &mut Self {
        for (i, polygon) in self.polygons.iter_mut().enumerate() {
            polygon.set_name(Some((i + 1).to_string()));
        }
        self
    }

    /// Runs `transform` on every polygon in place, then recomputes aggregates.
    pub fn apply<F: FnMut(&mut Polygon)>(&mut self, mut transform: F) -> &mut Self {
        for polygon in &mut self.polygons {
            transform(polygon);
        }
        self.calc_metrics();
        self
    }

    pub fn align(&mut self) -> &mut Self {
        self.apply(|p| {
            p.align();
        })
    }

    /// Shelf-packs the polygons onto pages in their current order.
    ///
    /// Fails with [`UnwrapError::UnpackableItem`] before moving anything if a
    /// polygon cannot fit an empty page. On success every polygon carries its
    /// page number and the packing fields of [`info`](Self::info) are updated.
    pub fn spread_to_pages(&mut self, layout: &PageLayout) -> Result<&mut Self, UnwrapError> {
        let stats = shelf::pack(&mut self.polygons, layout)?;
        self.info.pages_area_sum = stats.pages_area_sum;
        self.info.density = stats.density;
        self.info.pages_count = stats.pages_count;
        self.info.min_polygons_on_page = stats.min_polygons_on_page;
        self.info.max_polygons_on_page = stats.max_polygons_on_page;
        self.calc_metrics();
        self.debug_assert_invariants();
        Ok(self)
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    #[inline]
    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    #[inline]
    pub fn info(&self) -> &PolygonalModelInfo {
        &self.info
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    fn calc_metrics(&mut self) {
        let (boundaries, info) = Self::aggregate(&self.polygons, &self.info);
        self.boundaries = boundaries;
        self.info = info;
    }

    fn aggregate(
        polygons: &[Polygon],
        previous: &PolygonalModelInfo,
    ) -> (Boundaries, PolygonalModelInfo) {
        let boundaries = Boundaries::from_children(polygons.iter().map(Polygon::boundaries));
        let mut info = PolygonalModelInfo {
            max_polygon_width: 0.0,
            max_polygon_height: 0.0,
            normal_angle_error_sum: 0.0,
            area_sum: 0.0,
            perimeter_sum: 0.0,
            ..*previous
        };
        for polygon in polygons {
            info.max_polygon_width = info.max_polygon_width.max(polygon.boundaries().width());
            info.max_polygon_height = info.max_polygon_height.max(polygon.boundaries().height());
            info.normal_angle_error_sum += polygon.normal_angle_error();
            info.area_sum += polygon.area();
            info.perimeter_sum += polygon.perimeter();
        }
        (boundaries, info)
    }
}

/// Deep copy of the polygons with fresh aggregates; page assignments and
/// packing statistics are not carried over.
impl Clone for PolygonalModel {
    fn clone(&self) -> Self {
        Self::from_polygons(self.polygons.clone())
    }
}

impl FromIterator<Polygon> for PolygonalModel {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::from_polygons(iter.into_iter().collect())
    }
}

impl DebugInvariants for PolygonalModel {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PolygonalModel");
    }

    fn validate_invariants(&self) -> Result<(), UnwrapError> {
        for polygon in &self.polygons {
            polygon.validate_invariants()?;
        }
        let (boundaries, info) = Self::aggregate(&self.polygons, &self.info);
        let same = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        let fresh = same(boundaries.top, self.boundaries.top)
            && same(boundaries.bottom, self.boundaries.bottom)
            && same(boundaries.left, self.boundaries.left)
            && same(boundaries.right, self.boundaries.right)
            && same(boundaries.min_depth, self.boundaries.min_depth)
            && same(boundaries.max_depth, self.boundaries.max_depth)
            && same(info.max_polygon_width, self.info.max_polygon_width)
            && same(info.max_polygon_height, self.info.max_polygon_height)
            && same(info.normal_angle_error_sum, self.info.normal_angle_error_sum)
            && same(info.area_sum, self.info.area_sum)
            && same(info.perimeter_sum, self.info.perimeter_sum);
        if !fresh {
            return Err(UnwrapError::InvariantViolation(format!(
                "model aggregates are stale: stored {:?}, recomputed {:?}",
                self.info, info
            )));
        }
        Ok(())
    }
}

//! Polygons and polygonal models.

pub mod polygon;
pub mod polygonal_model;

pub use polygon::{Polygon, PolygonMetrics};
pub use polygonal_model::{PolygonalModel, PolygonalModelInfo, SortOrder};

#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-unwrap
//!
//! mesh-unwrap turns a polygonal mesh into flat pieces laid out on fixed-size
//! pages, ready to be printed or cut. Each face is rotated onto the page plane
//! and the flattened faces are shelf-packed row by row, page by page.
//!
//! ## Features
//! - `Vec2`/`Vec3` value types with axis-angle rotation
//! - Per-polygon metrics: bounding box, longest edge, perimeter, area and a
//!   facing-deviation measure
//! - Fan triangulation and plane alignment of polygons
//! - Deterministic greedy multi-page packing with page density statistics
//! - `.obj` reading and writing
//!
//! ## Pipeline
//!
//! ```
//! use mesh_unwrap::prelude::*;
//!
//! let obj = "v 0 0 0\nv 4 0 0\nv 4 0 3\nv 0 0 3\nf 1 2 3 4\n";
//! let config = UnwrapConfig {
//!     layout: PageLayout::new(20.0, 20.0, 1.0),
//!     ..Default::default()
//! };
//! let out = unwrap_obj(obj.as_bytes(), &config).unwrap();
//! assert_eq!(out.layout.info().pages_count, 1);
//! assert_eq!(out.layout.polygons()[0].page(), Some(1));
//! ```
//!
//! ## Degenerate geometry
//! Zero-length vectors are not rejected: normalizing or measuring angles with
//! them yields NaN, which then flows through to the affected polygon. Only
//! packing, configuration and I/O return errors.

pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod unwrap_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{Boundaries, Vec2, Vec3};
    pub use crate::io::obj::{ObjReader, ObjWriter};
    pub use crate::io::{Face, MeshData, MeshReader, MeshWriter};
    pub use crate::layout::{LayoutEntry, PackingStats, PageLayout, PageSummary};
    pub use crate::model::{Polygon, PolygonalModel, PolygonalModelInfo, SortOrder};
    pub use crate::pipeline::{UnwrapConfig, Unwrapped, unwrap_model, unwrap_obj};
    pub use crate::unwrap_error::{Axis2, UnwrapError};
}

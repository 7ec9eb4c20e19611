//! End-to-end unwrapping: select and order polygons, flatten copies of them and
//! pack the copies onto pages.

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::io::MeshReader;
use crate::io::obj::ObjReader;
use crate::layout::PageLayout;
use crate::model::{PolygonalModel, SortOrder};
use crate::unwrap_error::UnwrapError;

/// Options for [`unwrap_model`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnwrapConfig {
    pub layout: PageLayout,
    /// First polygon to keep (1-based, after sorting); 0 keeps from the start.
    pub start: usize,
    /// Last polygon to keep (1-based, inclusive); 0 keeps to the end.
    pub finish: usize,
    pub order: SortOrder,
    /// Fan-triangulate every polygon before numbering and packing.
    pub triangulate: bool,
}

impl UnwrapConfig {
    pub fn validate(&self) -> Result<(), UnwrapError> {
        self.layout.validate()?;
        if self.start != 0 && self.finish != 0 && self.start > self.finish {
            return Err(UnwrapError::InvalidConfig(format!(
                "start ({}) must not exceed finish ({})",
                self.start, self.finish
            )));
        }
        Ok(())
    }
}

/// The selected model as loaded, and its flattened, packed copy.
#[derive(Debug)]
pub struct Unwrapped {
    /// Selected, ordered and numbered polygons in their original position.
    pub model: PolygonalModel,
    /// The same polygons aligned to the page plane and placed on pages.
    pub layout: PolygonalModel,
}

pub fn unwrap_model(
    mut model: PolygonalModel,
    config: &UnwrapConfig,
) -> Result<Unwrapped, UnwrapError> {
    config.validate()?;

    model.sort(config.order).limit(config.start, config.finish);
    if config.triangulate {
        model.reduce_to_triangles();
    }
    model.renumber_polygons();
    log::debug!(
        "pipeline: {} polygons selected, total area {}",
        model.len(),
        model.info().area_sum
    );

    let mut layout = model.clone();
    layout.align().spread_to_pages(&config.layout)?;
    Ok(Unwrapped { model, layout })
}

/// Reads an `.obj` mesh and runs [`unwrap_model`] on it.
pub fn unwrap_obj<R: Read>(reader: R, config: &UnwrapConfig) -> Result<Unwrapped, UnwrapError> {
    let mesh = ObjReader.read(reader)?;
    let model = PolygonalModel::from_mesh_data(&mesh)?;
    unwrap_model(model, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_partially() {
        let config: UnwrapConfig = serde_json::from_str(
            r#"{
                "layout": { "page_width": 50, "page_height": 40 },
                "finish": 3,
                "order": "ascending"
            }"#,
        )
        .unwrap();
        assert_eq!(config.layout.page_width, 50.0);
        assert_eq!(config.layout.spacing, 3.0);
        assert_eq!(config.start, 0);
        assert_eq!(config.finish, 3);
        assert_eq!(config.order, SortOrder::Ascending);
        assert!(!config.triangulate);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = UnwrapConfig {
            start: 4,
            finish: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(UnwrapError::InvalidConfig(_))));
        let open = UnwrapConfig {
            start: 4,
            ..Default::default()
        };
        assert!(open.validate().is_ok());
    }
}

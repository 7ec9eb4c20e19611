//! Per-polygon and per-page views of a packed model for drawing exporters.

use serde::Serialize;

use crate::geometry::{Vec2, Vec3};
use crate::model::{Polygon, PolygonalModel};

/// What an exporter needs to draw and label one placed polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEntry<'a> {
    pub name: Option<&'a str>,
    pub page: Option<usize>,
    pub vertices: &'a [Vec3],
    pub longest_edge: Vec3,
}

impl<'a> LayoutEntry<'a> {
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            name: polygon.name(),
            page: polygon.page(),
            vertices: polygon.vertices(),
            longest_edge: polygon.longest_edge(),
        }
    }

    /// Vertices projected onto the page plane.
    pub fn outline(&self) -> Vec<Vec2> {
        self.vertices.iter().copied().map(Vec2::from).collect()
    }

    pub fn longest_edge_2d(&self) -> Vec2 {
        self.longest_edge.into()
    }
}

/// Occupancy of one page after packing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSummary {
    pub page: usize,
    pub polygons: usize,
    pub polygons_area: f64,
}

impl PolygonalModel {
    pub fn layout_entries(&self) -> impl Iterator<Item = LayoutEntry<'_>> {
        self.polygons().iter().map(LayoutEntry::new)
    }

    /// One summary per page number in use, ascending. Unplaced polygons are
    /// not counted.
    pub fn page_summaries(&self) -> Vec<PageSummary> {
        let pages = self
            .polygons()
            .iter()
            .filter_map(Polygon::page)
            .max()
            .unwrap_or(0);
        let mut summaries: Vec<PageSummary> = (1..=pages)
            .map(|page| PageSummary {
                page,
                polygons: 0,
                polygons_area: 0.0,
            })
            .collect();
        for polygon in self.polygons() {
            if let Some(page) = polygon.page() {
                let summary = &mut summaries[page - 1];
                summary.polygons += 1;
                summary.polygons_area += polygon.area();
            }
        }
        summaries.retain(|s| s.polygons > 0);
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageLayout;

    fn square(name: &str) -> Polygon {
        Polygon::from_vertices([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ])
        .with_name(name)
    }

    #[test]
    fn entries_and_summaries_after_packing() {
        let mut model: PolygonalModel = ["a", "b", "c", "d", "e"].into_iter().map(square).collect();
        model.spread_to_pages(&PageLayout::new(2.0, 2.0, 0.0)).unwrap();

        let entries: Vec<_> = model.layout_entries().collect();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[4].name, Some("e"));
        assert_eq!(entries[4].page, Some(2));
        assert_eq!(entries[1].outline()[0], Vec2::new(1.0, -1.0));
        assert_eq!(entries[0].longest_edge_2d(), Vec2::RIGHT);

        let pages = model.page_summaries();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].polygons, 4);
        assert_eq!(pages[1].polygons, 1);
        assert!((pages[0].polygons_area - 4.0).abs() < 1e-12);
    }

    #[test]
    fn unpacked_model_has_no_pages() {
        let model: PolygonalModel = ["a"].into_iter().map(square).collect();
        assert!(model.page_summaries().is_empty());
        assert_eq!(model.layout_entries().next().unwrap().page, None);
    }
}

//! Greedy single-pass shelf packing onto fixed-size pages.
//!
//! Polygons are placed left to right in rows; a polygon that would overrun the
//! page width starts a new row, and one that would overrun the page height
//! starts a new page. There is no backtracking beyond retrying the polygon that
//! triggered the break.
//!
//! Pages are stacked downward in one coordinate system: page 1 has its top edge
//! at `y = 0` and each next page starts `page_height + 11 * spacing` lower.
//! Inside a page the first row starts `spacing` below the top edge and the
//! first column `spacing` right of `x = 0`.

use crate::geometry::Vec3;
use crate::layout::PageLayout;
use crate::model::Polygon;
use crate::unwrap_error::{Axis2, UnwrapError};

/// Vertical gap between stacked pages, in multiples of the spacing.
const PAGE_MARGIN_FACTOR: f64 = 10.0;

/// Aggregate result of one packing run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PackingStats {
    /// Sum over pages of the rectangle spanned by the placed polygons.
    pub pages_area_sum: f64,
    /// Total polygon area divided by `pages_area_sum`.
    pub density: f64,
    pub pages_count: usize,
    pub min_polygons_on_page: usize,
    pub max_polygons_on_page: usize,
    pub polygons_area_sum: f64,
}

/// Placement state of the page being filled.
#[derive(Debug)]
struct PageCursor {
    number: usize,
    top: f64,
    /// Left edge of the next polygon in the current row.
    x: f64,
    /// Distance from the page top to the current row's top.
    row_offset: f64,
    row_height: f64,
    polygons: usize,
    max_right: f64,
    max_bottom_offset: f64,
}

impl PageCursor {
    fn new(number: usize, top: f64, spacing: f64) -> Self {
        Self {
            number,
            top,
            x: spacing,
            row_offset: spacing,
            row_height: 0.0,
            polygons: 0,
            max_right: 0.0,
            max_bottom_offset: 0.0,
        }
    }

    fn footprint(&self, spacing: f64) -> f64 {
        if self.polygons == 0 {
            return 0.0;
        }
        (self.max_right - spacing) * (self.max_bottom_offset - spacing)
    }
}

#[inline]
fn fits(offset: f64, extent: f64, spacing: f64, limit: f64) -> bool {
    offset + extent + spacing <= limit
}

/// Every polygon must fit on an empty page, margins included.
fn check_packable(polygons: &[Polygon], layout: &PageLayout) -> Result<(), UnwrapError> {
    let s = layout.spacing;
    for polygon in polygons {
        let b = polygon.boundaries();
        if !fits(s, b.width(), s, layout.page_width) {
            return Err(UnwrapError::UnpackableItem {
                dimension: Axis2::Width,
                extent: b.width(),
                limit: layout.page_width,
            });
        }
        if !fits(s, b.height(), s, layout.page_height) {
            return Err(UnwrapError::UnpackableItem {
                dimension: Axis2::Height,
                extent: b.height(),
                limit: layout.page_height,
            });
        }
    }
    Ok(())
}

/// Packs `polygons` in slice order, translating each into place and recording
/// its page number.
pub fn pack(polygons: &mut [Polygon], layout: &PageLayout) -> Result<PackingStats, UnwrapError> {
    layout.validate()?;
    check_packable(polygons, layout)?;
    if polygons.is_empty() {
        return Ok(PackingStats::default());
    }

    let spacing = layout.spacing;
    let page_step = layout.page_height + PAGE_MARGIN_FACTOR * spacing + spacing;

    let mut stats = PackingStats {
        min_polygons_on_page: polygons.len(),
        ..Default::default()
    };
    let mut cursor = PageCursor::new(1, 0.0, spacing);
    let close_page = |cursor: &PageCursor, stats: &mut PackingStats| {
        stats.pages_area_sum += cursor.footprint(spacing);
        stats.pages_count += 1;
        stats.min_polygons_on_page = stats.min_polygons_on_page.min(cursor.polygons);
        stats.max_polygons_on_page = stats.max_polygons_on_page.max(cursor.polygons);
    };

    let mut stack: Vec<usize> = (0..polygons.len()).rev().collect();
    while let Some(index) = stack.pop() {
        let polygon = &mut polygons[index];
        let b = *polygon.boundaries();
        let (width, height) = (b.width(), b.height());

        if !fits(cursor.row_offset, height, spacing, layout.page_height) {
            log::debug!(
                "shelf: page {} full after {} polygons",
                cursor.number,
                cursor.polygons
            );
            close_page(&cursor, &mut stats);
            cursor = PageCursor::new(cursor.number + 1, cursor.top - page_step, spacing);
            stack.push(index);
            continue;
        }

        if !fits(cursor.x, width, spacing, layout.page_width) {
            log::debug!(
                "shelf: page {} new row at offset {}",
                cursor.number,
                cursor.row_offset + cursor.row_height + spacing
            );
            cursor.row_offset += cursor.row_height + spacing;
            cursor.x = spacing;
            cursor.row_height = 0.0;
            stack.push(index);
            continue;
        }

        let depth = polygon.vertices().first().map_or(0.0, |v| v.z);
        let target = Vec3::new(cursor.x, cursor.top - cursor.row_offset, 0.0);
        polygon.translate(target - Vec3::new(b.left, b.top, depth));
        polygon.set_page(cursor.number);
        log::trace!(
            "shelf: polygon {:?} on page {} at ({}, {})",
            polygon.name(),
            cursor.number,
            target.x,
            target.y
        );

        let placed = *polygon.boundaries();
        cursor.x += width + spacing;
        cursor.row_height = cursor.row_height.max(height);
        cursor.polygons += 1;
        cursor.max_right = cursor.max_right.max(placed.right);
        cursor.max_bottom_offset = cursor.max_bottom_offset.max(cursor.top - placed.bottom);
        stats.polygons_area_sum += polygon.area();
    }
    close_page(&cursor, &mut stats);

    stats.density = if stats.pages_area_sum > 0.0 {
        stats.polygons_area_sum / stats.pages_area_sum
    } else {
        0.0
    };
    log::info!(
        "shelf: {} polygons on {} pages, density {:.3}, {}..{} polygons per page",
        polygons.len(),
        stats.pages_count,
        stats.density,
        stats.min_polygons_on_page,
        stats.max_polygons_on_page
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn rect(w: f64, h: f64) -> Polygon {
        Polygon::from_vertices([
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(w, 0.0, 2.0),
            Vec3::new(w, h, 2.0),
            Vec3::new(0.0, h, 2.0),
        ])
    }

    #[test]
    fn four_unit_squares_fill_one_page() {
        let mut squares: Vec<_> = (0..4).map(|_| rect(1.0, 1.0)).collect();
        let stats = pack(&mut squares, &PageLayout::new(2.0, 2.0, 0.0)).unwrap();
        assert_eq!(stats.pages_count, 1);
        assert_eq!(stats.min_polygons_on_page, 4);
        assert_eq!(stats.max_polygons_on_page, 4);
        assert!(approx(stats.density, 1.0));

        let lefts: Vec<_> = squares.iter().map(|p| p.boundaries().left).collect();
        let tops: Vec<_> = squares.iter().map(|p| p.boundaries().top).collect();
        assert_eq!(lefts, vec![0.0, 1.0, 0.0, 1.0]);
        assert_eq!(tops, vec![0.0, 0.0, -1.0, -1.0]);
        assert!(squares.iter().all(|p| p.page() == Some(1)));
        assert!(squares.iter().all(|p| p.vertices()[0].z == 0.0));
    }

    #[test]
    fn overflow_starts_second_page() {
        let mut squares: Vec<_> = (0..5).map(|_| rect(1.0, 1.0)).collect();
        let stats = pack(&mut squares, &PageLayout::new(2.0, 2.0, 0.0)).unwrap();
        assert_eq!(stats.pages_count, 2);
        assert_eq!(stats.min_polygons_on_page, 1);
        assert_eq!(stats.max_polygons_on_page, 4);
        assert_eq!(squares[4].page(), Some(2));
        // Second page top sits one page height below the first with no spacing.
        assert_eq!(squares[4].boundaries().top, -2.0);
        assert!(approx(stats.pages_area_sum, 5.0));
    }

    #[test]
    fn spacing_offsets_rows_and_pages() {
        let mut polys = vec![rect(2.0, 1.0), rect(2.0, 3.0), rect(2.0, 1.0)];
        let layout = PageLayout::new(6.0, 8.0, 1.0);
        let stats = pack(&mut polys, &layout).unwrap();

        assert_eq!(polys[0].boundaries().left, 1.0);
        assert_eq!(polys[0].boundaries().top, -1.0);
        assert_eq!(polys[0].page(), Some(1));
        // 4 + 2 + 1 > 6: wraps to a row one spacing below the first.
        assert_eq!(polys[1].boundaries().left, 1.0);
        assert_eq!(polys[1].boundaries().top, -3.0);
        assert_eq!(polys[1].page(), Some(1));
        // The third row would start at offset 7; 7 + 1 + 1 > 8.
        assert_eq!(polys[2].page(), Some(2));
        assert_eq!(polys[2].boundaries().top, -(8.0 + 11.0) - 1.0);

        assert_eq!(stats.pages_count, 2);
        assert_eq!((stats.min_polygons_on_page, stats.max_polygons_on_page), (1, 2));
        assert!(approx(stats.pages_area_sum, 2.0 * 5.0 + 2.0 * 1.0));
        assert!(approx(stats.density, 10.0 / 12.0));
    }

    #[test]
    fn later_pages_keep_the_top_margin() {
        // Tallest packable height is H - 2s on every page, page 2 included.
        let layout = PageLayout::new(10.0, 10.0, 1.0);
        let mut tall = vec![rect(8.0, 8.0), rect(8.0, 8.0)];
        let stats = pack(&mut tall, &layout).unwrap();
        assert_eq!(stats.pages_count, 2);
        let page_top = -(10.0 + 11.0);
        assert_eq!(tall[1].page(), Some(2));
        assert_eq!(tall[1].boundaries().top, page_top - 1.0);
        assert_eq!(tall[1].boundaries().bottom, page_top - 10.0 + 1.0);
        assert!(approx(stats.pages_area_sum, 2.0 * 64.0));

        // H - s would touch the next page's margin and is rejected outright.
        let mut too_tall = vec![rect(8.0, 8.0), rect(2.0, 9.0)];
        let err = pack(&mut too_tall, &layout).unwrap_err();
        assert!(matches!(
            err,
            UnwrapError::UnpackableItem { dimension: Axis2::Height, extent, .. } if extent == 9.0
        ));
        assert!(too_tall.iter().all(|p| p.page().is_none()));
    }

    #[test]
    fn too_wide_polygon_is_rejected_before_placement() {
        let mut polys = vec![rect(1.0, 1.0), rect(5.0, 1.0)];
        let err = pack(&mut polys, &PageLayout::new(3.0, 3.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            UnwrapError::UnpackableItem {
                dimension: Axis2::Width,
                extent,
                limit,
            } if extent == 5.0 && limit == 3.0
        ));
        assert!(polys.iter().all(|p| p.page().is_none()));
        assert_eq!(polys[0].boundaries().left, 0.0);
    }

    #[test]
    fn too_tall_polygon_reports_height() {
        let mut polys = vec![rect(1.0, 3.0)];
        let err = pack(&mut polys, &PageLayout::new(10.0, 4.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            UnwrapError::UnpackableItem { dimension: Axis2::Height, .. }
        ));
    }

    #[test]
    fn empty_input_packs_to_nothing() {
        let stats = pack(&mut [], &PageLayout::new(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(stats, PackingStats::default());
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let mut polys = vec![rect(1.0, 1.0)];
        assert!(matches!(
            pack(&mut polys, &PageLayout::new(-1.0, 1.0, 0.0)),
            Err(UnwrapError::InvalidConfig(_))
        ));
    }
}

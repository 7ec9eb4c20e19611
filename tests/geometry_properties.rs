use mesh_unwrap::prelude::*;
use proptest::prelude::*;
use std::f64::consts::TAU;

fn vec3() -> impl Strategy<Value = Vec3> {
    (-10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// Convex polygon: `n` points on a circle, tilted out of the xy-plane.
fn convex_polygon(n: usize, radius: f64, phase: f64, tilt: f64, offset: Vec3) -> Polygon {
    (0..n)
        .map(|i| {
            let t = phase + TAU * i as f64 / n as f64;
            Vec3::new(radius * t.cos(), radius * t.sin(), 0.0).rotate(Vec3::RIGHT, tilt) + offset
        })
        .collect()
}

proptest! {
    #[test]
    fn normalized_vectors_have_unit_length(v in vec3()) {
        prop_assume!(v.length() > 1e-6);
        prop_assert!((v.normalized().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perimeter_is_sum_of_closed_edges(points in prop::collection::vec(vec3(), 3..9)) {
        let polygon = Polygon::from_vertices(points.clone());
        let expected: f64 = (0..points.len())
            .map(|i| (points[(i + 1) % points.len()] - points[i]).length())
            .sum();
        prop_assert!((polygon.perimeter() - expected).abs() < 1e-9);
        prop_assert!(polygon.area() >= 0.0);
        prop_assert!(polygon.longest_edge().length() <= polygon.perimeter());
        prop_assert!(polygon.validate_invariants().is_ok());
    }

    #[test]
    fn fan_triangulation_preserves_area(
        n in 4usize..12,
        radius in 0.5..20.0f64,
        phase in 0.0..TAU,
        tilt in 0.0..TAU,
        offset in vec3(),
    ) {
        let polygon = convex_polygon(n, radius, phase, tilt, offset);
        let triangles = polygon.sub_triangles();
        prop_assert_eq!(triangles.len(), n - 2);
        let sum: f64 = triangles.iter().map(Polygon::area).sum();
        prop_assert!((sum - polygon.area()).abs() < 1e-9 * polygon.area().max(1.0));
        for tri in &triangles {
            prop_assert_eq!(tri.vertices().len(), 3);
            prop_assert_eq!(tri.vertices()[0], polygon.vertices()[0]);
        }
    }

    #[test]
    fn align_is_idempotent(a in vec3(), b in vec3(), c in vec3()) {
        let mut polygon = Polygon::from_vertices([a, b, c]);
        prop_assume!(polygon.normal().length() > 1e-2);
        prop_assume!((b - a).length() > 1e-2);
        let area = polygon.area();

        for _ in 0..2 {
            polygon.align();
            let n = polygon.normal().normalized();
            prop_assert!((n.z - 1.0).abs() < 1e-6, "normal {:?}", n);
            let first = (polygon.vertices()[1] - polygon.vertices()[0]).normalized();
            prop_assert!((first.y + 1.0).abs() < 1e-6, "first edge {:?}", first);
            prop_assert!((polygon.area() - area).abs() < 1e-6 * area.max(1.0));
            let b = polygon.boundaries();
            prop_assert!(b.depth() < 1e-6 * (1.0 + b.max_depth.abs()));
        }
    }
}

#[test]
fn triangle_triangulation_is_a_no_op() {
    let tri = Polygon::from_vertices([
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ]);
    let out = tri.sub_triangles();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].vertices(), tri.vertices());
}

#[test]
fn aligned_square_faces_front_with_no_angle_error() {
    let mut square: Polygon = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 0.0),
    ]
    .into_iter()
    .collect();
    // Lies in the xz-plane: every fan triangle is a quarter turn off FRONT.
    assert!(square.normal_angle_error() > 1.0);
    square.align();
    assert!(square.normal_angle_error() < 1e-9);
    assert!((square.boundaries().width() - 1.0).abs() < 1e-9);
    assert!((square.boundaries().height() - 1.0).abs() < 1e-9);
}

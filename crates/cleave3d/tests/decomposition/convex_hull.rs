use cleave3d::math::{Point, Real};
use cleave3d::shape::Plane;
use cleave3d::transformation::{check_convex_hull, convex_hull, try_convex_hull, ConvexHullError};
use cleave3d::utils;

fn random_cloud(seed: u64, n: usize) -> Vec<Point<Real>> {
    let mut rng = oorandom::Rand32::new(seed);
    (0..n)
        .map(|_| {
            Point::new(
                rng.rand_float() as Real * 4.0 - 2.0,
                rng.rand_float() as Real * 2.0 - 1.0,
                rng.rand_float() as Real,
            )
        })
        .collect()
}

fn assert_contains(vertices: &[Point<Real>], indices: &[[u32; 3]], points: &[Point<Real>]) {
    for idx in indices {
        let [a, b, c] = idx.map(|i| vertices[i as usize]);
        let Some(plane) = Plane::from_triangle(&a, &b, &c) else {
            continue;
        };

        for pt in points {
            assert!(plane.signed_distance(pt) <= 1.0e-3, "{pt:?} is outside the hull");
        }
    }
}

#[test]
fn random_hulls_are_closed_and_contain_their_input() {
    for seed in 0..10 {
        let points = random_cloud(seed, 200);
        let (vertices, indices) = try_convex_hull(&points, 1000, 0.0).unwrap();

        assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));
        assert_contains(&vertices, &indices, &points);
        assert!(utils::mesh_volume(&vertices, &indices) <= 8.0 + 1.0e-3);
    }
}

#[test]
fn vertex_budget_is_honored() {
    let points = random_cloud(42, 500);
    let (vertices, indices) = convex_hull(&points, 16, 0.0);

    assert!(vertices.len() <= 16);
    assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));
}

#[test]
fn inflated_hulls_contain_the_tight_hull() {
    let points = random_cloud(7, 100);
    let (tight_vertices, tight_indices) = convex_hull(&points, 64, 0.0);
    let (vertices, indices) = convex_hull(&points, 64, 0.05);

    assert!(!indices.is_empty());
    assert_contains(&vertices, &indices, &tight_vertices);
    assert!(
        utils::mesh_volume(&vertices, &indices)
            > utils::mesh_volume(&tight_vertices, &tight_indices)
    );
}

#[test]
fn degenerate_inputs() {
    assert_eq!(
        try_convex_hull(&[], 64, 0.0),
        Err(ConvexHullError::IncompleteInput)
    );
    assert!(convex_hull(&[], 64, 0.0).1.is_empty());

    // A single point is thickened into a tiny cube around it.
    let center = Point::new(1.0, 2.0, 3.0);
    let (vertices, indices) = convex_hull(&[center], 64, 0.0);
    assert_eq!(vertices.len(), 8);
    assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));
    assert!(vertices.iter().all(|pt| (*pt - center).amax() <= 0.01));
}

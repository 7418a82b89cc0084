use cleave3d::math::{Point, Real};
use cleave3d::utils::VertexWelder;

#[test]
fn jittered_points_are_welded() {
    let granularity = 1.0e-3;
    let mut welder = VertexWelder::new(granularity);
    let mut rng = oorandom::Rand32::new(1234);
    let mut points = Vec::new();

    // Points on a coarse lattice are never welded together.
    for _ in 0..500 {
        let pt = Point::new(
            rng.rand_range(0..100) as Real * 0.1,
            rng.rand_range(0..100) as Real * 0.1,
            rng.rand_range(0..100) as Real * 0.1,
        );
        let (id, _) = welder.get_index(pt);
        points.push((pt, id));
    }

    let num_vertices = welder.len();

    for (pt, id) in points {
        let jitter = (rng.rand_float() as Real - 0.5) * granularity;
        let jittered = Point::new(pt.x + jitter, pt.y - jitter, pt.z);
        assert_eq!(welder.get_index(jittered), (id, false));
    }

    assert_eq!(welder.len(), num_vertices);
    assert!(welder.vertices().len() <= 500);
}

#[test]
fn cleared_welder_starts_over() {
    let mut welder = VertexWelder::default();
    assert_eq!(welder.get_index(Point::new(1.0, 1.0, 1.0)), (0, true));
    assert_eq!(welder.get_index(Point::new(2.0, 1.0, 1.0)), (1, true));

    welder.clear();
    assert!(welder.is_empty());
    assert_eq!(welder.get_index(Point::new(2.0, 1.0, 1.0)), (0, true));
}

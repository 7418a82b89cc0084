use crate::common::{cuboid, l_prism};
use cleave3d::math::{Point, Real, UnitVector, Vector};
use cleave3d::query::{split_mesh, SplitResult};
use cleave3d::shape::{Plane, TriangleMesh};

fn area(mesh: &TriangleMesh) -> Real {
    mesh.triangles().map(|tri| tri.area()).sum()
}

#[test]
fn tilted_split_preserves_area_and_ids() {
    let (vertices, indices) = cuboid([0.0; 3], [1.0, 2.0, 3.0]);
    let ids = (0..indices.len() as u32).map(|i| 100 + i).collect();
    let mesh = TriangleMesh::with_ids(vertices, indices, ids).unwrap();

    let normal = UnitVector::new_normalize(Vector::new(1.0, 1.0, 0.5));
    let plane = Plane::from_point_and_normal(&Point::new(0.5, 1.0, 1.5), normal);
    let precision = 1.0e-5;

    let SplitResult::Pair(front, back) = split_mesh(&mesh, &plane, precision) else {
        panic!("the plane crosses the box");
    };

    assert!((area(&front) + area(&back) - area(&mesh)).abs() < 1.0e-3);
    assert!(front
        .vertices()
        .iter()
        .all(|pt| plane.signed_distance(pt) >= -precision * 10.0));
    assert!(back
        .vertices()
        .iter()
        .all(|pt| plane.signed_distance(pt) <= precision * 10.0));

    for part in [&front, &back] {
        let ids = part.ids().unwrap();
        assert_eq!(ids.len(), part.num_triangles());
        assert!(ids.iter().all(|id| (100..112).contains(id)));
    }
}

#[test]
fn planes_missing_the_mesh() {
    let (vertices, indices) = l_prism();
    let mesh = TriangleMesh::new(vertices, indices).unwrap();

    let above = Plane::from_point_and_normal(&Point::new(0.0, 0.0, 2.0), Vector::z_axis());
    assert_eq!(split_mesh(&mesh, &above, 1.0e-6), SplitResult::Negative);

    let below = Plane::from_point_and_normal(&Point::new(0.0, 0.0, -1.0), Vector::z_axis());
    assert_eq!(split_mesh(&mesh, &below, 1.0e-6), SplitResult::Positive);

    // The bottom face lies on the plane, and goes to the front.
    let bottom = Plane::from_point_and_normal(&Point::origin(), Vector::z_axis());
    assert_eq!(split_mesh(&mesh, &bottom, 1.0e-6), SplitResult::Positive);
}

use crate::common::{append, cuboid, l_prism};
use cleave3d::shape::TriangleMesh;
use cleave3d::transformation::IslandGenerator;

#[test]
fn islands_partition_the_triangles() {
    let mut mesh = l_prism();
    append(&mut mesh, cuboid([5.0, 0.0, 0.0], [6.0, 1.0, 1.0]));
    append(&mut mesh, cuboid([5.0, 5.0, 5.0], [6.0, 6.0, 6.0]));
    let (vertices, indices) = mesh;

    let mut generator = IslandGenerator::new();
    let islands = generator.generate(&indices);
    assert_eq!(islands.len(), 3);
    assert_eq!(islands[0].len(), 20);

    let mut all: Vec<u32> = islands
        .iter()
        .flat_map(|island| island.triangles().iter().copied())
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..indices.len() as u32).collect::<Vec<_>>());

    // None of the islands is flat.
    assert_eq!(generator.merge_coplanar_islands(&vertices, &indices), 0);

    let mesh = TriangleMesh::new(vertices, indices).unwrap();
    let last = generator.island(2).unwrap().to_mesh(&mesh);
    assert_eq!(last.vertices().len(), 8);
    assert!(last.vertices().iter().all(|pt| pt.x >= 5.0 && pt.y >= 5.0));
}

#[test]
fn generation_replaces_previous_islands() {
    let (_, indices) = l_prism();
    let mut generator = IslandGenerator::new();
    assert_eq!(generator.generate(&indices).len(), 1);
    assert_eq!(generator.generate(&[]).len(), 0);
    assert_eq!(generator.num_islands(), 0);
}

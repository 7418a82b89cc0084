use cleave3d::bounding_volume::Aabb;
use cleave3d::math::{Point, Real};
use cleave3d::transformation::decomposition::ConvexDecomposition;

pub type Mesh = (Vec<Point<Real>>, Vec<[u32; 3]>);

/// An L-shaped prism of height 1, made of two 2x1 slabs overlapping on a unit square.
pub fn l_prism() -> Mesh {
    let outline = [
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let mut vertices: Vec<_> = outline.iter().map(|(x, y)| Point::new(*x, *y, 0.0)).collect();
    vertices.extend(outline.iter().map(|(x, y)| Point::new(*x, *y, 1.0)));

    let mut indices = vec![
        [0, 3, 1],
        [1, 3, 2],
        [0, 5, 3],
        [3, 5, 4],
        [6, 7, 9],
        [7, 8, 9],
        [6, 9, 11],
        [9, 10, 11],
    ];

    for i in 0..6 {
        let j = (i + 1) % 6;
        indices.push([i, j, j + 6]);
        indices.push([i, j + 6, i + 6]);
    }

    (vertices, indices)
}

/// A closed unit sphere made of `stacks` rings of `slices` quads, with outward triangles.
pub fn uv_sphere(stacks: u32, slices: u32) -> Mesh {
    let pi = std::f64::consts::PI as Real;
    let mut vertices = vec![Point::new(0.0, 0.0, 1.0)];

    for i in 1..stacks {
        let theta = i as Real * pi / stacks as Real;
        for j in 0..slices {
            let phi = j as Real * 2.0 * pi / slices as Real;
            vertices.push(Point::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ));
        }
    }

    let south = vertices.len() as u32;
    vertices.push(Point::new(0.0, 0.0, -1.0));

    let ring = |i: u32, j: u32| 1 + (i - 1) * slices + j % slices;
    let mut indices = Vec::new();

    for j in 0..slices {
        indices.push([0, ring(1, j), ring(1, j + 1)]);
        indices.push([south, ring(stacks - 1, j + 1), ring(stacks - 1, j)]);

        for i in 1..stacks - 1 {
            let (a, b) = (ring(i, j), ring(i + 1, j));
            let (c, d) = (ring(i + 1, j + 1), ring(i, j + 1));
            indices.push([a, b, c]);
            indices.push([a, c, d]);
        }
    }

    (vertices, indices)
}

pub fn cuboid(mins: [Real; 3], maxs: [Real; 3]) -> Mesh {
    Aabb::new(mins.into(), maxs.into()).to_trimesh()
}

pub fn append(mesh: &mut Mesh, other: Mesh) {
    let base = mesh.0.len() as u32;
    mesh.0.extend(other.0);
    mesh.1.extend(other.1.iter().map(|idx| idx.map(|i| i + base)));
}

pub fn feed(decomposition: &mut ConvexDecomposition, (vertices, indices): &Mesh) {
    for idx in indices {
        let [a, b, c] = idx.map(|i| vertices[i as usize]);
        assert!(decomposition.add_triangle(a, b, c));
    }
}

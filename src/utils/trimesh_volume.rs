use crate::math::{Point, Real};

/// The signed volume of the tetrahedron `(origin, a, b, c)`, multiplied by 6.
#[inline]
fn scaled_origin_tetrahedron_volume(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Real {
    a.coords.dot(&b.coords.cross(&c.coords))
}

/// Computes the signed volume of the tetrahedron `(a, b, c, d)`.
///
/// The volume is positive if `d` lies on the side of the triangle `(a, b, c)` pointed by its
/// counter-clockwise normal.
#[inline]
pub fn tetrahedron_volume(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, d: &Point<Real>) -> Real {
    let ab = *b - *a;
    let ac = *c - *a;
    let ad = *d - *a;
    ab.cross(&ac).dot(&ad) / 6.0
}

/// Computes the volume enclosed by a closed triangle mesh with the divergence theorem.
///
/// Triangles must be counter-clockwise when seen from the outside for the result to be
/// positive. Open meshes yield a meaningless value.
pub fn mesh_volume(vertices: &[Point<Real>], indices: &[[u32; 3]]) -> Real {
    let mut volume = 0.0;

    for idx in indices {
        volume += scaled_origin_tetrahedron_volume(
            &vertices[idx[0] as usize],
            &vertices[idx[1] as usize],
            &vertices[idx[2] as usize],
        );
    }

    volume / 6.0
}

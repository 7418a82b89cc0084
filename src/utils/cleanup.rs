use crate::math::{Point, Real};

/// Given an index buffer, remove from `points` every point that is not indexed.
///
/// The remaining points keep their relative order so that the output does not depend on the
/// order in which the triangles reference them.
pub fn remove_unused_points(points: &mut Vec<Point<Real>>, idx: &mut [[u32; 3]]) {
    let mut used = vec![false; points.len()];

    for tri in idx.iter() {
        for id in tri {
            used[*id as usize] = true;
        }
    }

    let mut remap = vec![u32::MAX; points.len()];
    let mut num_kept = 0;

    for i in 0..points.len() {
        if used[i] {
            points[num_kept] = points[i];
            remap[i] = num_kept as u32;
            num_kept += 1;
        }
    }

    points.truncate(num_kept);

    for tri in idx.iter_mut() {
        for id in tri.iter_mut() {
            *id = remap[*id as usize];
        }
    }
}

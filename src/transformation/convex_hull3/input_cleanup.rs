use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::utils::VertexWelder;

/// Points closer than this fraction of the extents of the input, along every axis, are merged.
const DUPLICATE_TOLERANCE: Real = 0.001;
/// The extent given to a flat axis, as a fraction of the smallest non-flat extent.
const FLAT_AXIS_EXTENT_RATIO: Real = 0.05;
/// The extent given to every axis when the input is a single point.
const POINT_EXTENT: Real = 0.01;
/// The hull tolerance, as a fraction of the diagonal of the input bounding box.
const EPSILON_RATIO: Real = 0.001;

/// A point cloud ready to be given to the hull construction.
pub struct CleanedInput {
    /// Points without near-duplicates, spanning a non-degenerate box.
    pub points: Vec<Point<Real>>,
    /// The distance under which a point is considered to lie on a hull face.
    pub epsilon: Real,
}

/// Removes near-duplicate points and replaces flat inputs with a synthetic box.
///
/// If the bounding box of the input is flat along some axis, or if fewer than 3 distinct points
/// remain, the 8 corners of the (thickened) bounding box are returned instead so the hull
/// construction never sees a degenerate point set.
pub fn cleanup_input(points: &[Point<Real>]) -> CleanedInput {
    let aabb = Aabb::from_points(points);
    let extents = aabb.extents();
    let max_extent = extents.max();
    let is_flat = |extent: Real| extent <= max_extent * 1.0e-6 || extent <= 0.0;

    let cleaned = if (0..3).any(|i| is_flat(extents[i])) {
        synthetic_box(&aabb, &is_flat)
    } else {
        let scale = Vector::new(1.0 / extents.x, 1.0 / extents.y, 1.0 / extents.z);
        let mut welder = VertexWelder::new(DUPLICATE_TOLERANCE);
        let mut cleaned = Vec::with_capacity(points.len());

        for pt in points {
            let normalized = Point::from((*pt - aabb.mins).component_mul(&scale));

            if welder.get_index(normalized).1 {
                cleaned.push(*pt);
            }
        }

        if cleaned.len() < 3 {
            aabb.vertices().to_vec()
        } else {
            cleaned
        }
    };

    let epsilon = Aabb::from_points(&cleaned).diagonal_length() * EPSILON_RATIO;

    CleanedInput {
        points: cleaned,
        epsilon,
    }
}

fn synthetic_box(aabb: &Aabb, is_flat: &impl Fn(Real) -> bool) -> Vec<Point<Real>> {
    let extents = aabb.extents();
    let smallest_extent = extents
        .iter()
        .copied()
        .filter(|e| !is_flat(*e))
        .fold(Real::MAX, Real::min);
    let flat_extent = if smallest_extent == Real::MAX {
        POINT_EXTENT
    } else {
        smallest_extent * FLAT_AXIS_EXTENT_RATIO
    };

    let half_extents = extents.map(|e| (if is_flat(e) { flat_extent } else { e }) * 0.5);

    log::debug!(
        "Flat hull input with extents {:?}, replaced by a box with half-extents {:?}.",
        extents,
        half_extents
    );

    Aabb::from_half_extents(aabb.center(), half_extents)
        .vertices()
        .to_vec()
}

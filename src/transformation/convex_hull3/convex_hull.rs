use super::initial_simplex::find_initial_simplex;
use super::input_cleanup::cleanup_input;
use super::triangle_facet::{link_facets, TriangleFacet};
use super::ConvexHullError;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::transformation::inflated_hull::inflated_hull;
use crate::utils;

/// The fraction of the hull tolerance a point must rise above a facet for the facet to be
/// considered visible from it.
const VISIBILITY_RATIO: Real = 0.01;
/// The relative growth under which a hull is not rescaled to enclose its input.
const ENCLOSING_TOLERANCE: Real = 1.0e-5;

/// Computes the convex hull of a set of 3d points.
///
/// At most `max_vertices` points (but never less than 4) are used as hull vertices: the hull is
/// grown by always adding the point furthest from the current hull. When the budget stops the
/// growth before every point is reached, the hull is scaled about its centroid until it encloses
/// all of them, so the result always contains its input. If `skin_width` is positive, the hull
/// is then inflated by that distance, with its sharp edges beveled.
///
/// This never fails: if the input is degenerate, the bounding box of the points is returned.
/// An empty input yields an empty mesh.
pub fn convex_hull(
    points: &[Point<Real>],
    max_vertices: usize,
    skin_width: Real,
) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    match try_convex_hull(points, max_vertices, skin_width) {
        Ok(hull) => hull,
        Err(ConvexHullError::IncompleteInput) => (Vec::new(), Vec::new()),
        Err(err) => {
            log::warn!("Convex hull failed ({err}); falling back to the bounding box of its input.");
            Aabb::from_points(points).loosened(skin_width.max(0.0)).to_trimesh()
        }
    }
}

/// Computes the convex hull of a set of 3d points, reporting degenerate inputs.
///
/// See [`convex_hull`] for the meaning of the parameters.
pub fn try_convex_hull(
    points: &[Point<Real>],
    max_vertices: usize,
    skin_width: Real,
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    let (mut vertices, indices) = plain_convex_hull(points, max_vertices)?;
    enclose_points(&mut vertices, &indices, points);

    if skin_width > 0.0 {
        if let Some(inflated) = inflated_hull(&vertices, &indices, skin_width, max_vertices) {
            return Ok(inflated);
        }

        log::debug!("Hull inflation failed, keeping the plain hull.");
    }

    Ok((vertices, indices))
}

fn plain_convex_hull(
    points: &[Point<Real>],
    max_vertices: usize,
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    if points.is_empty() {
        return Err(ConvexHullError::IncompleteInput);
    }

    let cleaned = cleanup_input(points);
    let points = &cleaned.points[..];
    let epsilon = cleaned.epsilon;
    let visibility_margin = epsilon * VISIBILITY_RATIO;

    let simplex = find_initial_simplex(points, visibility_margin)
        .ok_or(ConvexHullError::DegenerateInput)?;
    let interior = utils::center(&simplex.map(|i| points[i]));
    let mut triangles = initial_facets(simplex, points, epsilon);

    let max_vertices = max_vertices.max(4);
    let mut num_vertices = 4;
    let mut silhouette_loop_facets_and_idx = Vec::new();
    let mut removed_facets = Vec::new();

    while num_vertices < max_vertices {
        // Extrude the facet with the largest rise.
        let mut best = None;
        let mut best_rise = epsilon;

        for (i, facet) in triangles.iter().enumerate() {
            if facet.valid && !facet.outside_points.is_empty() && facet.furthest_distance > best_rise
            {
                best = Some(i);
                best_rise = facet.furthest_distance;
            }
        }

        let Some(i) = best else {
            break;
        };

        let point = triangles[i].furthest_point;

        silhouette_loop_facets_and_idx.clear();
        removed_facets.clear();
        removed_facets.push(i);
        triangles[i].valid = false;

        for j in 0usize..3 {
            compute_silhouette(
                triangles[i].adj[j],
                triangles[i].indirect_adj_id[j],
                point,
                visibility_margin,
                &mut silhouette_loop_facets_and_idx,
                points,
                &mut removed_facets,
                &mut triangles[..],
            );
        }

        let extrusion_is_valid = is_valid_extrusion(
            &silhouette_loop_facets_and_idx,
            point,
            points,
            &triangles,
            &interior,
            visibility_margin,
        );

        if !extrusion_is_valid {
            // Roll back and never consider that point again.
            for facet in &removed_facets {
                triangles[*facet].valid = true;
            }

            triangles[i].discard_outside_point(point, points);
            log::debug!("Rolled back the extrusion of the hull toward point {point}.");
            continue;
        }

        attach_and_push_facets(
            &silhouette_loop_facets_and_idx,
            point,
            points,
            epsilon,
            &mut triangles,
            &removed_facets,
        );
        num_vertices += 1;
    }

    let mut idx = Vec::new();

    for facet in triangles.iter() {
        if facet.valid {
            idx.push([
                facet.pts[0] as u32,
                facet.pts[1] as u32,
                facet.pts[2] as u32,
            ]);
        }
    }

    let mut points = points.to_vec();
    utils::remove_unused_points(&mut points, &mut idx[..]);

    Ok((points, idx))
}

/// Scales the hull `(vertices, indices)` about its centroid so that it contains every point of
/// `points`.
fn enclose_points(vertices: &mut [Point<Real>], indices: &[[u32; 3]], points: &[Point<Real>]) {
    let center = utils::center(vertices);
    let mut scale: Real = 1.0;

    for idx in indices {
        let [a, b, c] = idx.map(|i| &vertices[i as usize]);
        let Some(normal) = utils::ccw_face_normal([a, b, c]) else {
            continue;
        };
        let height = normal.dot(&(*a - center));

        if height <= 0.0 {
            continue;
        }

        for pt in points {
            scale = scale.max(normal.dot(&(*pt - center)) / height);
        }
    }

    if scale > 1.0 + ENCLOSING_TOLERANCE {
        log::debug!("Scaling the hull by {scale} to enclose its input.");

        for vertex in vertices.iter_mut() {
            *vertex = center + (*vertex - center) * scale;
        }
    }
}

fn initial_facets(simplex: [usize; 4], points: &[Point<Real>], epsilon: Real) -> Vec<TriangleFacet> {
    let [p0, p1, p2, p3] = simplex;
    let mut facets = vec![
        TriangleFacet::new(p0, p2, p1, points),
        TriangleFacet::new(p0, p1, p3, points),
        TriangleFacet::new(p1, p2, p3, points),
        TriangleFacet::new(p2, p0, p3, points),
    ];

    link_facets(&mut facets);

    for point in 0..points.len() {
        if simplex.contains(&point) {
            continue;
        }

        assign_to_furthest_facet(point, points, epsilon, &mut facets);
        // If none of the facet can be seen from the point, it is naturally deleted.
    }

    facets
}

fn assign_to_furthest_facet(
    point: usize,
    points: &[Point<Real>],
    epsilon: Real,
    facets: &mut [TriangleFacet],
) {
    let mut furthest = usize::MAX;
    let mut furthest_dist = epsilon;

    for (i, facet) in facets.iter().enumerate() {
        let distance = facet.distance_to_point(point, points);

        if distance > furthest_dist {
            furthest = i;
            furthest_dist = distance;
        }
    }

    if furthest != usize::MAX {
        facets[furthest].add_outside_point(point, furthest_dist);
    }
}

fn compute_silhouette(
    facet: usize,
    indirect_id: usize,
    point: usize,
    visibility_margin: Real,
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    points: &[Point<Real>],
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) {
    if !triangles[facet].valid {
        return;
    }

    if !triangles[facet].can_see_point(point, points, visibility_margin) {
        out_facets_and_idx.push((facet, indirect_id));
    } else {
        triangles[facet].valid = false; // The facet must be removed from the convex hull.
        removed_facets.push(facet);

        compute_silhouette(
            triangles[facet].adj[(indirect_id + 1) % 3],
            triangles[facet].indirect_adj_id[(indirect_id + 1) % 3],
            point,
            visibility_margin,
            out_facets_and_idx,
            points,
            removed_facets,
            triangles,
        );

        compute_silhouette(
            triangles[facet].adj[(indirect_id + 2) % 3],
            triangles[facet].indirect_adj_id[(indirect_id + 2) % 3],
            point,
            visibility_margin,
            out_facets_and_idx,
            points,
            removed_facets,
            triangles,
        );
    }
}

/// Checks that fanning the silhouette around `point` yields a simple loop of well-shaped,
/// outward-facing triangles.
fn is_valid_extrusion(
    silhouette_loop_facets_and_idx: &[(usize, usize)],
    point: usize,
    points: &[Point<Real>],
    triangles: &[TriangleFacet],
    interior: &Point<Real>,
    min_height: Real,
) -> bool {
    if silhouette_loop_facets_and_idx.len() < 3 {
        return false;
    }

    let apex = points[point];
    let mut loop_vertices = Vec::with_capacity(silhouette_loop_facets_and_idx.len());

    for (facet, adj_id) in silhouette_loop_facets_and_idx {
        let a = triangles[*facet].second_point_from_edge(*adj_id);
        let b = triangles[*facet].first_point_from_edge(*adj_id);

        // A vertex used twice means the silhouette is not a simple loop.
        if loop_vertices.contains(&a) {
            return false;
        }
        loop_vertices.push(a);

        let pa = points[a] - apex;
        let pb = points[b] - apex;
        let ab = points[b] - points[a];
        let scaled_normal = pa.cross(&pb);
        let longest_edge = pa.norm().max(pb.norm()).max(ab.norm());

        // Sliver triangle.
        if scaled_normal.norm() <= min_height * longest_edge {
            return false;
        }

        // Flipped triangle.
        if scaled_normal.dot(&(apex - interior)) <= 0.0 {
            return false;
        }
    }

    true
}

fn attach_and_push_facets(
    silhouette_loop_facets_and_idx: &[(usize, usize)],
    point: usize,
    points: &[Point<Real>],
    epsilon: Real,
    triangles: &mut Vec<TriangleFacet>,
    removed_facets: &[usize],
) {
    // The silhouette is built to be in CCW order.
    let mut new_facets = Vec::with_capacity(silhouette_loop_facets_and_idx.len());

    for (adj_facet, indirect_id) in silhouette_loop_facets_and_idx {
        let facet = TriangleFacet::new(
            point,
            triangles[*adj_facet].second_point_from_edge(*indirect_id),
            triangles[*adj_facet].first_point_from_edge(*indirect_id),
            points,
        );
        new_facets.push(facet);
    }

    // Link the facets together.
    let num_new = silhouette_loop_facets_and_idx.len();
    for i in 0..num_new {
        let prev_facet = if i == 0 {
            triangles.len() + num_new - 1
        } else {
            triangles.len() + i - 1
        };

        let (middle_facet, middle_id) = silhouette_loop_facets_and_idx[i];
        let next_facet = triangles.len() + (i + 1) % num_new;

        new_facets[i].set_facets_adjacency(prev_facet, middle_facet, next_facet, 2, middle_id, 0);
        triangles[middle_facet].adj[middle_id] = triangles.len() + i; // The future id of curr_facet.
        triangles[middle_facet].indirect_adj_id[middle_id] = 1;
    }

    // Assign to each facets some of the points which can see it.
    for curr_facet in removed_facets.iter() {
        let outside_points = std::mem::take(&mut triangles[*curr_facet].outside_points);

        for outside_point in outside_points {
            if outside_point != point {
                assign_to_furthest_facet(outside_point, points, epsilon, &mut new_facets);
            }
        }
    }

    triangles.append(&mut new_facets);
}

#[cfg(test)]
mod test {
    use super::{convex_hull, try_convex_hull};
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real};
    use crate::transformation::{check_convex_hull, ConvexHullError};
    use crate::utils::mesh_volume;

    fn random_cloud(seed: u64, n: usize) -> Vec<Point<Real>> {
        let mut rng = oorandom::Rand32::new(seed);
        (0..n)
            .map(|_| {
                Point::new(
                    rng.rand_float() as Real * 2.0 - 1.0,
                    rng.rand_float() as Real * 2.0 - 1.0,
                    rng.rand_float() as Real * 2.0 - 1.0,
                )
            })
            .collect()
    }

    #[test]
    fn cube_hull_ignores_interior_points() {
        let mut points = Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0))
            .vertices()
            .to_vec();
        points.push(Point::new(0.5, 0.5, 0.5));
        points.push(Point::new(0.5, 0.5, 1.0));
        points.push(Point::new(0.25, 0.75, 0.5));

        let (vertices, indices) = convex_hull(&points, 64, 0.0);

        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 12);
        assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));
        assert_relative_eq!(mesh_volume(&vertices, &indices), 1.0, epsilon = 1.0e-5);
    }

    #[test]
    fn random_cloud_hull_contains_every_point() {
        for seed in 0..5 {
            let points = random_cloud(seed, 200);
            let (vertices, indices) = convex_hull(&points, 1000, 0.0);

            assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));

            // Points skipped by the hull tolerance are enclosed by rescaling the hull.
            let tolerance = 1.0e-4;
            for idx in &indices {
                let a = vertices[idx[0] as usize];
                let b = vertices[idx[1] as usize];
                let c = vertices[idx[2] as usize];
                let n = (b - a).cross(&(c - a)).normalize();

                for pt in &points {
                    assert!(n.dot(&(*pt - a)) <= tolerance);
                }
            }
        }
    }

    #[test]
    fn vertex_budget_is_honored() {
        let points = random_cloud(42, 500);
        let (vertices, indices) = convex_hull(&points, 12, 0.0);

        assert!(vertices.len() <= 12);
        assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));
    }

    #[test]
    fn limited_hull_encloses_every_point() {
        // Points on a sphere: all of them are hull vertices.
        let mut points = Vec::new();
        for i in 1..12 {
            let theta = i as Real * std::f64::consts::PI as Real / 12.0;
            for j in 0..24 {
                let phi = j as Real * std::f64::consts::PI as Real / 12.0;
                points.push(Point::new(
                    theta.sin() * phi.cos(),
                    theta.sin() * phi.sin(),
                    theta.cos(),
                ));
            }
        }

        let (vertices, indices) = convex_hull(&points, 16, 0.0);
        assert!(vertices.len() <= 16);
        assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));

        for idx in &indices {
            let a = vertices[idx[0] as usize];
            let n = (vertices[idx[1] as usize] - a)
                .cross(&(vertices[idx[2] as usize] - a))
                .normalize();

            for pt in &points {
                assert!(n.dot(&(*pt - a)) <= 1.0e-4);
            }
        }
    }

    #[test]
    fn flat_input_yields_a_thin_closed_box() {
        let points = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];

        let (vertices, indices) = convex_hull(&points, 64, 0.0);
        assert_eq!(check_convex_hull(&vertices, &indices), Ok(()));
        assert_relative_eq!(mesh_volume(&vertices, &indices), 0.05, epsilon = 1.0e-4);
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            try_convex_hull(&[], 64, 0.0),
            Err(ConvexHullError::IncompleteInput)
        );
        assert!(convex_hull(&[], 64, 0.0).1.is_empty());
    }

    #[test]
    fn tilted_coplanar_input_falls_back_to_its_bounding_box() {
        let points = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
        ];

        assert_eq!(
            try_convex_hull(&points, 64, 0.0),
            Err(ConvexHullError::DegenerateInput)
        );

        let (vertices, indices) = convex_hull(&points, 64, 0.0);
        assert_relative_eq!(mesh_volume(&vertices, &indices), 1.0, epsilon = 1.0e-5);
    }
}

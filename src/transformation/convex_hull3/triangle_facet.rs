use crate::math::{Point, Real, Vector};
use crate::utils::hashmap::HashMap;
use num::Bounded;

#[derive(Debug)]
pub struct TriangleFacet {
    pub valid: bool,
    pub normal: Vector<Real>,
    pub adj: [usize; 3],
    pub indirect_adj_id: [usize; 3],
    pub pts: [usize; 3],
    pub outside_points: Vec<usize>,
    pub furthest_point: usize,
    pub furthest_distance: Real,
}

impl TriangleFacet {
    pub fn new(p1: usize, p2: usize, p3: usize, points: &[Point<Real>]) -> TriangleFacet {
        let p1p2 = points[p2] - points[p1];
        let p1p3 = points[p3] - points[p1];
        let normal = p1p2.cross(&p1p3).try_normalize(0.0).unwrap_or_else(Vector::zeros);

        TriangleFacet {
            valid: true,
            normal,
            adj: [0, 0, 0],
            indirect_adj_id: [0, 0, 0],
            pts: [p1, p2, p3],
            outside_points: Vec::new(),
            furthest_point: Bounded::max_value(),
            furthest_distance: 0.0,
        }
    }

    pub fn add_outside_point(&mut self, pid: usize, distance: Real) {
        if distance > self.furthest_distance {
            self.furthest_distance = distance;
            self.furthest_point = pid;
        }

        self.outside_points.push(pid);
    }

    /// Removes `pid` from the outside set of this facet, and refreshes its furthest point.
    pub fn discard_outside_point(&mut self, pid: usize, points: &[Point<Real>]) {
        self.outside_points.retain(|p| *p != pid);
        self.furthest_distance = 0.0;
        self.furthest_point = Bounded::max_value();

        for i in 0..self.outside_points.len() {
            let p = self.outside_points[i];
            let distance = self.distance_to_point(p, points);

            if distance > self.furthest_distance {
                self.furthest_distance = distance;
                self.furthest_point = p;
            }
        }
    }

    pub fn distance_to_point(&self, point: usize, points: &[Point<Real>]) -> Real {
        self.normal.dot(&(points[point] - points[self.pts[0]]))
    }

    pub fn set_facets_adjacency(
        &mut self,
        adj1: usize,
        adj2: usize,
        adj3: usize,
        id_adj1: usize,
        id_adj2: usize,
        id_adj3: usize,
    ) {
        self.indirect_adj_id = [id_adj1, id_adj2, id_adj3];
        self.adj = [adj1, adj2, adj3];
    }

    pub fn first_point_from_edge(&self, id: usize) -> usize {
        self.pts[id]
    }

    pub fn second_point_from_edge(&self, id: usize) -> usize {
        self.pts[(id + 1) % 3]
    }

    /// Is `point` strictly above the plane of this facet, by more than `margin`?
    pub fn can_see_point(&self, point: usize, points: &[Point<Real>], margin: Real) -> bool {
        self.distance_to_point(point, points) > margin
    }
}

/// Sets the adjacency information of a closed set of facets from their shared edges.
///
/// The edge `i` of a facet goes from `pts[i]` to `pts[(i + 1) % 3]`, so its neighbor is the facet
/// traversing that edge in the opposite direction.
pub fn link_facets(facets: &mut [TriangleFacet]) {
    let mut edges = HashMap::default();

    for (ifacet, facet) in facets.iter().enumerate() {
        for i in 0..3 {
            let _ = edges.insert(
                (facet.first_point_from_edge(i), facet.second_point_from_edge(i)),
                (ifacet, i),
            );
        }
    }

    for ifacet in 0..facets.len() {
        for i in 0..3 {
            let reversed = (
                facets[ifacet].second_point_from_edge(i),
                facets[ifacet].first_point_from_edge(i),
            );

            if let Some((adj, adj_id)) = edges.get(&reversed) {
                facets[ifacet].adj[i] = *adj;
                facets[ifacet].indirect_adj_id[i] = *adj_id;
            }
        }
    }
}

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::Plane;
use crate::utils::hashmap::HashMap;
use crate::utils::{self, SortedPair};
use ordered_float::OrderedFloat;

/// A planar face of a [`ConvexPolytope`].
#[derive(Clone, Debug)]
pub struct PolytopeFace {
    /// The vertex loop of this face, counter-clockwise when seen from the outside.
    pub vertices: Vec<usize>,
    /// The supporting plane of this face, the polytope lying on its back side.
    pub plane: Plane,
}

/// The result of [`ConvexPolytope::crop`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CropOutcome {
    /// The plane does not intersect the polytope.
    Unchanged,
    /// The part of the polytope in front of the plane was removed.
    Cropped,
    /// The crop would have emptied the polytope, broken its topology, or exceeded its vertex
    /// capacity. The polytope was left untouched.
    Rejected,
}

/// A closed convex polyhedron described by its vertices and its face loops.
#[derive(Clone, Debug)]
pub struct ConvexPolytope {
    vertices: Vec<Point<Real>>,
    faces: Vec<PolytopeFace>,
}

/// The position of a vertex relative to a cutting plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Below,
    On,
    Above,
}

impl ConvexPolytope {
    /// The polytope with the shape of the given box.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let vertices = aabb.vertices().to_vec();
        let faces = Aabb::FACES_VERTEX_IDS
            .iter()
            .zip(Aabb::FACES_NORMAL_AXIS.iter())
            .map(|(ids, (axis, sign))| {
                let normal = UnitVector::new_unchecked(Vector::ith(*axis, *sign));
                PolytopeFace {
                    vertices: ids.to_vec(),
                    plane: Plane::from_point_and_normal(&vertices[ids[0]], normal),
                }
            })
            .collect();

        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[PolytopeFace] {
        &self.faces
    }

    /// Removes the part of this polytope lying in front of `plane`.
    ///
    /// Vertices closer than `eps` to the plane are considered to lie on it. The crop is
    /// rejected, leaving `self` unchanged, if it would yield more than `max_vertices` vertices
    /// or a polytope that is not a closed convex polyhedron.
    pub fn crop(&mut self, plane: &Plane, eps: Real, max_vertices: usize) -> CropOutcome {
        let sides: Vec<Side> = self
            .vertices
            .iter()
            .map(|pt| {
                let dist = plane.signed_distance(pt);
                if dist > eps {
                    Side::Above
                } else if dist < -eps {
                    Side::Below
                } else {
                    Side::On
                }
            })
            .collect();

        if !sides.contains(&Side::Above) {
            return CropOutcome::Unchanged;
        }

        if !sides.contains(&Side::Below) {
            return CropOutcome::Rejected;
        }

        let mut new_vertices = Vec::with_capacity(self.vertices.len());
        let mut new_ids = vec![usize::MAX; self.vertices.len()];
        let mut cap = Vec::new();

        for (i, pt) in self.vertices.iter().enumerate() {
            if sides[i] != Side::Above {
                new_ids[i] = new_vertices.len();
                new_vertices.push(*pt);

                if sides[i] == Side::On {
                    cap.push(new_ids[i]);
                }
            }
        }

        let mut cuts = HashMap::default();
        let mut new_faces = Vec::with_capacity(self.faces.len() + 1);

        for face in &self.faces {
            let mut clipped = Vec::with_capacity(face.vertices.len() + 1);
            let mut has_below = false;

            for (k, a) in face.vertices.iter().enumerate() {
                let b = face.vertices[(k + 1) % face.vertices.len()];
                let (side_a, side_b) = (sides[*a], sides[b]);

                if side_a != Side::Above {
                    clipped.push(new_ids[*a]);
                    has_below |= side_a == Side::Below;
                }

                if (side_a == Side::Above && side_b == Side::Below)
                    || (side_a == Side::Below && side_b == Side::Above)
                {
                    let cut = *cuts.entry(SortedPair::new(*a, b)).or_insert_with(|| {
                        let (pa, pb) = (self.vertices[*a], self.vertices[b]);
                        let (da, db) = (plane.signed_distance(&pa), plane.signed_distance(&pb));
                        let t = da / (da - db);
                        new_vertices.push(pa + (pb - pa) * t);
                        cap.push(new_vertices.len() - 1);
                        new_vertices.len() - 1
                    });
                    clipped.push(cut);
                }
            }

            // A face without any vertex strictly behind the plane is replaced by the cap.
            if has_below && clipped.len() >= 3 {
                new_faces.push(PolytopeFace {
                    vertices: clipped,
                    plane: face.plane,
                });
            }
        }

        if cap.len() < 3 || new_vertices.len() > max_vertices {
            return CropOutcome::Rejected;
        }

        let cap_points: Vec<_> = cap.iter().map(|i| new_vertices[*i]).collect();
        let cap_center = utils::center(&cap_points);
        let (u, v) = plane.tangent_basis();
        cap.sort_by_key(|i| {
            let dpt = new_vertices[*i] - cap_center;
            OrderedFloat(dpt.dot(&v).atan2(dpt.dot(&u)))
        });
        new_faces.push(PolytopeFace {
            vertices: cap,
            plane: *plane,
        });

        let mut cropped = ConvexPolytope {
            vertices: new_vertices,
            faces: new_faces,
        };
        cropped.remove_unused_vertices();

        if !cropped.is_closed_sphere() {
            return CropOutcome::Rejected;
        }

        *self = cropped;
        CropOutcome::Cropped
    }

    fn remove_unused_vertices(&mut self) {
        let mut new_ids = vec![usize::MAX; self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.vertices.len());

        for face in &mut self.faces {
            for id in &mut face.vertices {
                if new_ids[*id] == usize::MAX {
                    new_ids[*id] = vertices.len();
                    vertices.push(self.vertices[*id]);
                }

                *id = new_ids[*id];
            }
        }

        self.vertices = vertices;
    }

    /// Is every edge shared by exactly two faces, with `V - E + F = 2`?
    fn is_closed_sphere(&self) -> bool {
        let mut edges: HashMap<SortedPair<usize>, usize> = HashMap::default();

        for face in &self.faces {
            for (k, a) in face.vertices.iter().enumerate() {
                let b = face.vertices[(k + 1) % face.vertices.len()];

                if *a == b {
                    return false;
                }

                *edges.entry(SortedPair::new(*a, b)).or_insert(0) += 1;
            }
        }

        if edges.values().any(|count| *count != 2) {
            return false;
        }

        self.vertices.len() as isize - edges.len() as isize + self.faces.len() as isize == 2
    }

    /// Fan-triangulates every face of this polytope.
    pub fn to_trimesh(&self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let mut indices = Vec::new();

        for face in &self.faces {
            for k in 1..face.vertices.len() - 1 {
                indices.push([
                    face.vertices[0] as u32,
                    face.vertices[k] as u32,
                    face.vertices[k + 1] as u32,
                ]);
            }
        }

        (self.vertices.clone(), indices)
    }
}

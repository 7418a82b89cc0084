use crate::math::{Point, Real};
use crate::query::SplitResult;
use crate::shape::{Plane, TriangleMesh};
use crate::utils::VertexWelder;
use arrayvec::ArrayVec;

bitflags::bitflags! {
    /// The half-spaces touched by a vertex or a triangle.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Sides: u8 {
        const FRONT = 1 << 0;
        const BACK = 1 << 1;
        const STRADDLING = Self::FRONT.bits() | Self::BACK.bits();
    }
}

/// A clipped triangle is at most a quad on either side of the plane.
type ClippedPolygon = ArrayVec<Point<Real>, 4>;

/// One side of the split being accumulated.
struct SplitSide {
    welder: VertexWelder,
    indices: Vec<[u32; 3]>,
    ids: Option<Vec<u32>>,
}

impl SplitSide {
    fn new(precision: Real, with_ids: bool) -> Self {
        Self {
            welder: VertexWelder::new(precision),
            indices: Vec::new(),
            ids: with_ids.then(Vec::new),
        }
    }

    fn push_polygon(&mut self, polygon: &[Point<Real>], id: Option<u32>) {
        if polygon.len() < 3 {
            return;
        }

        for i in 1..polygon.len() - 1 {
            let tri = [
                self.welder.get_index(polygon[0]).0,
                self.welder.get_index(polygon[i]).0,
                self.welder.get_index(polygon[i + 1]).0,
            ];

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
                // The fragment collapsed to a segment or a point.
                continue;
            }

            self.indices.push(tri);

            if let (Some(ids), Some(id)) = (&mut self.ids, id) {
                ids.push(id);
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn into_mesh(self) -> TriangleMesh {
        TriangleMesh::from_raw_parts(self.welder.into_vertices(), self.indices, self.ids)
    }
}

fn classify(distance: Real, precision: Real) -> Sides {
    if distance > precision {
        Sides::FRONT
    } else if distance < -precision {
        Sides::BACK
    } else {
        Sides::empty()
    }
}

/// Splits a triangle mesh in two along a plane.
///
/// Vertices farther than `precision` from the plane are on its front (resp. back) side; the
/// others lie on the plane. Triangles crossing the plane are clipped, and the resulting polygons
/// are fan-triangulated on each side. Triangles lying entirely on the plane go to the front side.
/// Each side welds its own vertices, and every fragment keeps the id of its source triangle.
///
/// Returns [`SplitResult::Pair`] with the front part first and the back part second if both
/// parts contain at least one triangle. Otherwise the whole mesh lies on one side of the plane
/// and [`SplitResult::Positive`] (front) or [`SplitResult::Negative`] (back) is returned.
pub fn split_mesh(mesh: &TriangleMesh, plane: &Plane, precision: Real) -> SplitResult<TriangleMesh> {
    let precision = precision.max(0.0);
    let vertices = mesh.vertices();
    let distances: Vec<Real> = vertices.iter().map(|pt| plane.signed_distance(pt)).collect();

    let with_ids = mesh.ids().is_some();
    let mut front = SplitSide::new(precision, with_ids);
    let mut back = SplitSide::new(precision, with_ids);

    for (i, idx) in mesh.indices().iter().enumerate() {
        let id = mesh.triangle_id(i);
        let corners = idx.map(|v| v as usize);
        let sides = corners
            .iter()
            .fold(Sides::empty(), |acc, v| acc | classify(distances[*v], precision));

        if sides == Sides::STRADDLING {
            let (front_poly, back_poly) = clip_triangle(
                corners.map(|v| vertices[v]),
                corners.map(|v| distances[v]),
                precision,
            );
            front.push_polygon(&front_poly, id);
            back.push_polygon(&back_poly, id);
        } else {
            let tri = corners.map(|v| vertices[v]);

            if sides.contains(Sides::BACK) {
                back.push_polygon(&tri, id);
            } else {
                front.push_polygon(&tri, id);
            }
        }
    }

    match (front.is_empty(), back.is_empty()) {
        (false, false) => SplitResult::Pair(front.into_mesh(), back.into_mesh()),
        (_, true) => SplitResult::Positive,
        (true, false) => SplitResult::Negative,
    }
}

/// Sutherland-Hodgman clipping of a triangle against both sides of a plane.
fn clip_triangle(
    pts: [Point<Real>; 3],
    distances: [Real; 3],
    precision: Real,
) -> (ClippedPolygon, ClippedPolygon) {
    let mut front = ClippedPolygon::new();
    let mut back = ClippedPolygon::new();

    for i in 0..3 {
        let j = (i + 1) % 3;
        let (a, b) = (pts[i], pts[j]);
        let (da, db) = (distances[i], distances[j]);
        let side_a = classify(da, precision);
        let side_b = classify(db, precision);

        if side_a != Sides::BACK {
            front.push(a);
        }
        if side_a != Sides::FRONT {
            back.push(a);
        }

        if (side_a | side_b) == Sides::STRADDLING {
            let t = da / (da - db);
            let cut = a + (b - a) * t;
            front.push(cut);
            back.push(cut);
        }
    }

    (front, back)
}

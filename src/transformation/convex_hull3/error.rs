/// Errors that can occur during convex hull computation.
///
/// [`convex_hull`](crate::transformation::convex_hull) never fails: it recovers from these
/// errors by returning the bounding box of its input. Use
/// [`try_convex_hull`](crate::transformation::try_convex_hull) to observe them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConvexHullError {
    /// No point was given to the convex-hull algorithm.
    #[error("No point was given to the convex-hull algorithm.")]
    IncompleteInput,

    /// No non-degenerate tetrahedron could be found among the input points.
    ///
    /// This happens when the points are (almost) coplanar without being aligned with the axes,
    /// or when they contain NaN values.
    #[error("Input points are either invalid (NaN) or are almost coplanar.")]
    DegenerateInput,

    /// An edge is shared by more than two triangles.
    #[error("Detected t-junction for triangle {0}, edge: ({1}, {2})")]
    TJunction(usize, u32, u32),

    /// An edge is used by a single triangle: the mesh is not closed.
    #[error("Detected unfinished triangle")]
    UnfinishedTriangle,

    /// A triangle references the same vertex more than once.
    #[error("Triangle {0} is degenerate")]
    DegenerateTriangle(usize),

    /// The mesh is closed but does not have the topology of a sphere.
    #[error("Invalid Euler characteristic: {0}")]
    InvalidEulerCharacteristic(isize),
}

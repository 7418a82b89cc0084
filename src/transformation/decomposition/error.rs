/// Errors that can occur when computing a convex decomposition.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionError {
    /// A decomposition is already running on a background thread.
    #[error("A convex decomposition is already running.")]
    AlreadyRunning,
    /// The decomposition was cancelled before its completion.
    #[error("The convex decomposition was cancelled.")]
    Cancelled,
    /// The last decomposition was cancelled: the decomposition must be reset before the next one.
    #[error("The convex decomposition was cancelled and must be reset.")]
    NeedsReset,
    /// Recomputing islands after every split is not supported.
    #[error("Islands generation after every split is not supported.")]
    UnsupportedIslandsEverySplit,
    /// No triangle was given to the decomposition.
    #[error("The mesh to decompose has no triangle.")]
    EmptyMesh,
    /// The background thread running the decomposition panicked.
    #[error("The convex decomposition thread panicked.")]
    TaskPanicked,
}

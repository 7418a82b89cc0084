//! Approximate convex decomposition by recursive plane splits and greedy hull merges.

pub use self::cancellation::CancellationToken;
pub use self::convex_decomposition::{ConvexDecomposition, DecompositionState};
pub use self::error::DecompositionError;
pub use self::parameters::DecompositionParameters;
pub use self::split_plane::best_fit_plane;

mod cancellation;
mod convex_decomposition;
mod decomposer;
mod error;
mod parameters;
mod split_plane;

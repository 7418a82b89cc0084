/// The result of a plane-splitting operation.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitResult<T> {
    /// The split operation yield two non-empty results: the first one lying on the front
    /// (positive) half-space of the plane and the second lying on its back (negative) half-space.
    Pair(T, T),
    /// The shape being split is fully contained in the negative half-space of the plane.
    Negative,
    /// The shape being split is fully contained in the positive half-space of the plane.
    Positive,
}

impl<T> SplitResult<T> {
    /// Did the split yield two non-empty parts?
    pub fn is_pair(&self) -> bool {
        matches!(self, SplitResult::Pair(..))
    }
}

use crate::utils::SortedPair;

/// An undirected mesh edge, identified by its two vertex indices.
///
/// Edges are bucketed by the compact 32-bit key `(min << 16) | max`. That key is not unique
/// once vertex indices exceed 16 bits, so maps keyed by [`EdgeKey::bucket`] must keep the
/// exact edge next to each entry and compare it with [`EdgeKey::pair`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pair: SortedPair<u32>,
}

impl EdgeKey {
    /// The edge between the vertices `a` and `b`, in any order.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            pair: SortedPair::new(a, b),
        }
    }

    /// The exact vertex pair of this edge, smallest index first.
    #[inline]
    pub fn pair(&self) -> (u32, u32) {
        (*self.pair.first(), *self.pair.second())
    }

    /// The compact 32-bit hash bucket of this edge.
    #[inline]
    pub fn bucket(&self) -> u32 {
        let (lo, hi) = self.pair();
        (lo << 16) | (hi & 0xffff)
    }
}

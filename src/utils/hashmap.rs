//! The hash-map used throughout this crate.
//!
//! Nothing in this crate depends on the iteration order of these maps: every pass that walks
//! a map either sorts its output or is driven by the triangle order of the mesh.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V>;

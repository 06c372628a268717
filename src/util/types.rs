use std::hash::BuildHasherDefault;

use hashers::fx_hash::FxHasher;

/// custom type definitions
pub type VertexType = i64;
pub type EdgeId = u64;
pub type Weight = f64;

/// hash maps and sets used across the crate, keyed with `FxHasher`
pub type FxBuildHasher = BuildHasherDefault<FxHasher>;
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
pub type FxHashSet<K> = hashbrown::HashSet<K, FxBuildHasher>;

/// constants
pub const DEFAULT_WEIGHT: Weight = 0.0;
/// number of matrix slots added whenever a graph runs out of free slots
pub const DEFAULT_INCREMENT: usize = 1;

pub use self::graph::{Edge, Graph};
pub use self::mst::{Kruskal, LazyPrim, MinimumSpanningTree, Prim, PrimMode};
pub use self::unionfind::UnionFind;
pub use self::util::error::{Error, Result};

pub mod graph;
pub mod mst;
pub mod queue;
pub mod unionfind;
pub mod util;

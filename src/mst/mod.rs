use itertools::Itertools;
use rand::Rng;
use rand::seq::IteratorRandom;
use strum_macros::{Display, EnumString};

use crate::graph::{Edge, Graph};
use crate::util::error::{Error, Result};
use crate::util::types::{VertexType, Weight};

pub use self::kruskal::Kruskal;
pub use self::lazy_prim::LazyPrim;
pub use self::prim::Prim;

pub mod kruskal;
pub mod lazy_prim;
pub mod prim;
pub mod stepwise;

/// Common interface of the batch spanning tree solvers
/// `edges`, `weight` and `is_complete` describe the result of the last `solve` call
pub trait MinimumSpanningTree {
    /// computes the spanning tree, or a spanning forest for disconnected graphs
    fn solve(&mut self) -> Result<()>;

    /// selected edges in the order they were committed
    fn edges(&self) -> &[Edge];

    /// sum of the weights of the selected edges
    fn weight(&self) -> Weight;

    /// true if the selected edges span every vertex of the graph
    fn is_complete(&self) -> bool;
}

/// Prim's behaviour on disconnected graphs
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum PrimMode {
    /// grow only the component of the root
    SingleTree,
    /// restart from the smallest unvisited vertex until every component is spanned
    Forest,
}

impl Default for PrimMode {
    fn default() -> Self {
        PrimMode::SingleTree
    }
}

/// validates a caller supplied root
pub(crate) fn check_root(graph: &Graph, root: VertexType) -> Result<VertexType> {
    if graph.has_vertex(root) {
        Ok(root)
    } else {
        Err(Error::ElementNotFound(format!("root {} is not a vertex of the graph", root)))
    }
}

/// picks a root uniformly at random, vertices are sorted first so seeded generators are reproducible
pub(crate) fn pick_root<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Option<VertexType> {
    graph.vertices().sorted().choose(rng)
}

/// a spanning structure over `vertex_count` vertices is a tree iff it has one edge less than vertices
pub(crate) fn spans_all(vertex_count: usize, edge_count: usize) -> bool {
    vertex_count > 0 && edge_count == vertex_count - 1
}

use log::{debug, trace};

use crate::graph::{Edge, Graph};
use crate::mst::MinimumSpanningTree;
use crate::unionfind::UnionFind;
use crate::util::error::Result;
use crate::util::types::Weight;

/// Kruskal's algorithm: scan the edges by ascending weight and keep every edge that joins two
/// different components of a union find over the vertices
/// On disconnected graphs the result is a minimum spanning forest and `is_complete` is false
#[derive(Clone, Debug)]
pub struct Kruskal<'a> {
    graph: &'a Graph,
    edges: Vec<Edge>,
    weight: Weight,
    complete: bool,
}

impl<'a> Kruskal<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            edges: Vec::new(),
            weight: 0.0,
            complete: false,
        }
    }
}

/// graph edges ordered by weight, equal weights keep their creation order
pub(crate) fn sorted_edges(graph: &Graph) -> Vec<Edge> {
    let mut edges: Vec<Edge> = graph.edges().collect();
    edges.sort_by(|first, second| first.cmp_weight(second));
    edges
}

impl<'a> MinimumSpanningTree for Kruskal<'a> {
    fn solve(&mut self) -> Result<()> {
        self.edges.clear();
        self.weight = 0.0;

        let mut union_find: UnionFind = self.graph.vertices().collect();

        for edge in sorted_edges(self.graph) {
            if union_find.connected(edge.from, edge.to)? {
                trace!("Kruskal skips {} as it closes a cycle", edge);
                continue;
            }

            union_find.union(edge.from, edge.to)?;
            self.weight += edge.weight;
            self.edges.push(edge);
            trace!("Kruskal selects {}, weight so far {}", edge, self.weight);

            if union_find.all_in_one_set() {
                break;
            }
        }

        self.complete = union_find.all_in_one_set();
        debug!("Kruskal selected {} edges with weight {}, complete: {}", self.edges.len(), self.weight, self.complete);

        Ok(())
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn weight(&self) -> Weight {
        self.weight
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

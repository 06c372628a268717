use itertools::Itertools;
use log::{debug, trace};

use crate::graph::{Edge, Graph};
use crate::mst::{spans_all, MinimumSpanningTree};
use crate::queue::MinPriorityQueue;
use crate::util::error::{Error, Result};
use crate::util::types::{EdgeId, FxHashSet, VertexType, Weight};

/// Lazy variant of Prim's algorithm
/// Candidate edges are queued as `(weight, edge id)` and stale edges, whose endpoints both
/// joined the tree in the meantime, are discarded when extracted.
/// Every vertex not reached yet becomes a new root in ascending order, so the result always spans
/// every component
#[derive(Clone, Debug)]
pub struct LazyPrim<'a> {
    graph: &'a Graph,
    edges: Vec<Edge>,
    weight: Weight,
    complete: bool,
}

impl<'a> LazyPrim<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            edges: Vec::new(),
            weight: 0.0,
            complete: false,
        }
    }

    /// marks the vertex and queues every edge leading out of the tree
    fn visit(&self, vertex: VertexType, marked: &mut FxHashSet<VertexType>, queue: &mut MinPriorityQueue<(Weight, EdgeId)>) {
        marked.insert(vertex);
        for edge in self.graph.incident_edges(vertex) {
            if !marked.contains(&edge.other(vertex)) {
                queue.insert((edge.weight, edge.id));
            }
        }
    }
}

impl<'a> MinimumSpanningTree for LazyPrim<'a> {
    fn solve(&mut self) -> Result<()> {
        self.edges.clear();
        self.weight = 0.0;

        let mut marked = FxHashSet::default();
        let mut queue = MinPriorityQueue::new();

        for root in self.graph.vertices().sorted() {
            if marked.contains(&root) {
                continue;
            }
            trace!("Lazy Prim starts a tree at {}", root);
            self.visit(root, &mut marked, &mut queue);

            while !queue.is_empty() {
                let (_, id) = queue.extract_min()?;
                let edge = self.graph.edge(id)
                    .ok_or_else(|| Error::ElementNotFound(format!("edge {} is not part of the graph", id)))?;

                let from_marked = marked.contains(&edge.from);
                let to_marked = marked.contains(&edge.to);
                if from_marked && to_marked {
                    trace!("Lazy Prim discards stale edge {}", edge);
                    continue;
                }

                self.weight += edge.weight;
                self.edges.push(edge);
                trace!("Lazy Prim selects {}, weight so far {}", edge, self.weight);

                let next = if from_marked { edge.to } else { edge.from };
                self.visit(next, &mut marked, &mut queue);
            }
        }

        self.complete = spans_all(self.graph.vertex_count(), self.edges.len());
        debug!("Lazy Prim selected {} edges with weight {}, complete: {}", self.edges.len(), self.weight, self.complete);

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

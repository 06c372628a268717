use itertools::Itertools;
use log::{debug, trace};
use rand::Rng;

use crate::graph::{Edge, Graph};
use crate::mst::{check_root, pick_root, spans_all, MinimumSpanningTree, PrimMode};
use crate::queue::indexed::IndexedPriorityQueue;
use crate::util::error::{Error, Result};
use crate::util::types::{FxHashMap, VertexType, Weight};

/// outcome of relaxing a single incident edge
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Relaxation {
    /// neighbor was seen for the first time and queued
    Insert,
    /// neighbor was already queued and its distance improved
    Update,
    /// neither, the neighbor is already part of the tree or the edge is not lighter
    Unchanged,
}

/// Bookkeeping of eager Prim shared by the batch and the stepwise engine
/// Vertices are addressed through dense indices into the sorted vertex list,
/// which also serve as indices of the priority queue
#[derive(Clone, Debug)]
pub(crate) struct PrimState<'a> {
    graph: &'a Graph,
    vertices: Vec<VertexType>,
    index_of: FxHashMap<VertexType, usize>,
    queue: IndexedPriorityQueue<Weight>,
    dist_to: Vec<Weight>,
    // a root is its own parent, None means never seen
    parent: Vec<Option<usize>>,
    edge_to: Vec<Option<Edge>>,
    visited: Vec<bool>,
    selected: Vec<Edge>,
    weight: Weight,
}

impl<'a> PrimState<'a> {
    pub(crate) fn new(graph: &'a Graph) -> Self {
        let vertices: Vec<VertexType> = graph.vertices().sorted().collect();
        let index_of = vertices.iter().enumerate().map(|(index, vertex)| (*vertex, index)).collect();
        let count = vertices.len();

        Self {
            graph,
            vertices,
            index_of,
            queue: IndexedPriorityQueue::new(count),
            dist_to: vec![Weight::INFINITY; count],
            parent: vec![None; count],
            edge_to: vec![None; count],
            visited: vec![false; count],
            selected: Vec::new(),
            weight: 0.0,
        }
    }

    pub(crate) fn vertex(&self, index: usize) -> VertexType {
        self.vertices[index]
    }

    pub(crate) fn index(&self, vertex: VertexType) -> Result<usize> {
        self.index_of.get(&vertex).copied()
            .ok_or_else(|| Error::ElementNotFound(format!("vertex {} is not part of the graph", vertex)))
    }

    pub(crate) fn has_queued(&self) -> bool {
        !self.queue.is_empty()
    }

    /// queues a new root with distance 0
    pub(crate) fn start(&mut self, root: VertexType) -> Result<()> {
        let index = self.index(root)?;
        self.dist_to[index] = 0.0;
        self.parent[index] = Some(index);
        self.queue.insert(index, 0.0)?;
        trace!("Prim starts a tree at {}", root);
        Ok(())
    }

    /// smallest vertex that was never reached, used to grow the next tree of a forest
    pub(crate) fn next_unseen(&self) -> Option<VertexType> {
        self.parent.iter().position(|parent| parent.is_none()).map(|index| self.vertex(index))
    }

    /// removes the closest vertex from the queue
    pub(crate) fn extract(&mut self) -> Result<usize> {
        self.queue.extract_min()
    }

    /// edge through which the vertex is (currently) reached, None for roots
    pub(crate) fn edge_to(&self, index: usize) -> Option<Edge> {
        self.edge_to[index]
    }

    /// adds the extracted vertex to the tree and returns the edge that connects it, None for roots
    pub(crate) fn commit(&mut self, index: usize) -> Option<Edge> {
        self.visited[index] = true;
        if self.parent[index] == Some(index) {
            return None;
        }

        let edge = self.edge_to[index]?;
        self.weight += edge.weight;
        self.selected.push(edge);
        trace!("Prim selects {}, weight so far {}", edge, self.weight);
        Some(edge)
    }

    /// every edge incident to the vertex, treated as undirected
    pub(crate) fn incident_edges(&self, index: usize) -> Vec<Edge> {
        self.graph.incident_edges(self.vertex(index))
    }

    /// relaxes `edge` as seen from the tree vertex at `index`
    pub(crate) fn relax(&mut self, index: usize, edge: Edge) -> Result<Relaxation> {
        let neighbor = self.index(edge.other(self.vertex(index)))?;

        if self.visited[neighbor] {
            return Ok(Relaxation::Unchanged);
        }

        if self.queue.contains(neighbor) {
            if edge.weight < self.dist_to[neighbor] {
                self.dist_to[neighbor] = edge.weight;
                self.parent[neighbor] = Some(index);
                self.edge_to[neighbor] = Some(edge);
                self.queue.decrease_key(neighbor, edge.weight)?;
                trace!("Prim lowers the distance of {} to {}", self.vertex(neighbor), edge.weight);
                return Ok(Relaxation::Update);
            }
        } else if self.parent[neighbor].is_none() {
            self.dist_to[neighbor] = edge.weight;
            self.parent[neighbor] = Some(index);
            self.edge_to[neighbor] = Some(edge);
            self.queue.insert(neighbor, edge.weight)?;
            trace!("Prim queues {} with distance {}", self.vertex(neighbor), edge.weight);
            return Ok(Relaxation::Insert);
        }

        Ok(Relaxation::Unchanged)
    }

    /// queued vertices with their distance, in heap order
    pub(crate) fn queue_snapshot(&self) -> Vec<(VertexType, Weight)> {
        self.queue.indices()
            .map(|index| (self.vertex(index), self.dist_to[index]))
            .collect()
    }

    pub(crate) fn selected(&self) -> &[Edge] {
        &self.selected
    }

    pub(crate) fn weight(&self) -> Weight {
        self.weight
    }

    pub(crate) fn is_complete(&self) -> bool {
        spans_all(self.vertices.len(), self.selected.len())
    }
}

/// Eager variant of Prim's algorithm backed by an indexed priority queue keyed by vertex distance
/// Only the component of the root is spanned unless the engine runs in `PrimMode::Forest`
#[derive(Clone, Debug)]
pub struct Prim<'a> {
    graph: &'a Graph,
    root: Option<VertexType>,
    mode: PrimMode,
    edges: Vec<Edge>,
    weight: Weight,
    complete: bool,
}

impl<'a> Prim<'a> {
    /// creates a solver growing the tree from `root`, which has to be a vertex of the graph
    pub fn new(graph: &'a Graph, root: VertexType) -> Result<Self> {
        let root = check_root(graph, root)?;
        Ok(Self::with_root(graph, Some(root)))
    }

    /// creates a solver with a root drawn from `rng`, an empty graph has no root
    pub fn with_random_root<R: Rng + ?Sized>(graph: &'a Graph, rng: &mut R) -> Self {
        Self::with_root(graph, pick_root(graph, rng))
    }

    fn with_root(graph: &'a Graph, root: Option<VertexType>) -> Self {
        Self {
            graph,
            root,
            mode: PrimMode::default(),
            edges: Vec::new(),
            weight: 0.0,
            complete: false,
        }
    }

    pub fn with_mode(mut self, mode: PrimMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn get_root(&self) -> Option<VertexType> {
        self.root
    }

    pub fn get_mode(&self) -> PrimMode {
        self.mode
    }
}

impl<'a> MinimumSpanningTree for Prim<'a> {
    fn solve(&mut self) -> Result<()> {
        let mut state = PrimState::new(self.graph);

        if let Some(root) = self.root {
            state.start(root)?;
        }

        loop {
            while state.has_queued() {
                let index = state.extract()?;
                state.commit(index);

                for edge in state.incident_edges(index) {
                    state.relax(index, edge)?;
                }
            }

            match state.next_unseen() {
                Some(next) if self.mode == PrimMode::Forest => state.start(next)?,
                _ => break,
            }
        }

        self.edges = state.selected().to_vec();
        self.weight = state.weight();
        self.complete = state.is_complete();
        debug!("Prim selected {} edges with weight {}, complete: {}", self.edges.len(), self.weight, self.complete);

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

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::graph::Graph;
    use crate::mst::prim::Prim;
    use crate::mst::{MinimumSpanningTree, PrimMode};
    use crate::mst::tests::{check_spanning_tree, is_acyclic, lecture_graph, two_triangles};
    use crate::util::error::Error;

    #[test]
    fn lecture_example_from_every_root() {
        let graph = lecture_graph();

        for root in 0..6 {
            let mut prim = Prim::new(&graph, root).unwrap();
            prim.solve().unwrap();

            assert!(prim.is_complete());
            assert_eq!(prim.weight(), 43.0);
            check_spanning_tree(&graph, prim.edges(), prim.weight());
        }
    }

    #[test]
    fn commit_order_from_root() {
        let graph = lecture_graph();
        let mut prim = Prim::new(&graph, 0).unwrap();
        prim.solve().unwrap();

        let weights: Vec<f64> = prim.edges().iter().map(|edge| edge.weight).collect();
        assert_eq!(weights, vec![10.0, 10.0, 1.0, 2.0, 20.0]);
    }

    #[test]
    fn unknown_root() {
        let graph = lecture_graph();
        assert!(matches!(Prim::new(&graph, 17), Err(Error::ElementNotFound(_))));
    }

    #[test]
    fn random_root_is_reproducible() {
        let graph = lecture_graph();

        let first = Prim::with_random_root(&graph, &mut StdRng::seed_from_u64(3)).get_root();
        let second = Prim::with_random_root(&graph, &mut StdRng::seed_from_u64(3)).get_root();

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::new();
        let mut prim = Prim::with_random_root(&graph, &mut StdRng::seed_from_u64(0));
        assert_eq!(prim.get_root(), None);

        prim.solve().unwrap();
        assert!(prim.edges().is_empty());
        assert!(!prim.is_complete());
    }

    #[test]
    fn two_triangles_single_tree() {
        let graph = two_triangles();
        let mut prim = Prim::new(&graph, 4).unwrap();
        prim.solve().unwrap();

        assert!(!prim.is_complete());
        assert_eq!(prim.edges().len(), 2);
        assert_eq!(prim.weight(), 3.0);
        assert!(prim.edges().iter().all(|edge| edge.from >= 3 && edge.to >= 3));
    }

    #[test]
    fn two_triangles_forest() {
        let graph = two_triangles();
        let mut prim = Prim::new(&graph, 4).unwrap().with_mode(PrimMode::Forest);
        prim.solve().unwrap();

        assert!(!prim.is_complete());
        assert_eq!(prim.edges().len(), 4);
        assert_eq!(prim.weight(), 6.0);
        assert!(is_acyclic(&graph, prim.edges()));
    }

    #[test]
    fn directed_edges_are_used_both_ways() {
        let mut graph = Graph::new();
        graph.add_edge(1, 0, 2.0);
        graph.add_edge(2, 1, 3.0);
        graph.add_edge(0, 2, 9.0);

        let mut prim = Prim::new(&graph, 0).unwrap();
        prim.solve().unwrap();

        assert!(prim.is_complete());
        assert_eq!(prim.weight(), 5.0);
    }
}

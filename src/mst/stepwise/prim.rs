use std::mem;

use log::debug;
use rand::Rng;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::graph::{Edge, Graph};
use crate::mst::prim::{PrimState, Relaxation};
use crate::mst::stepwise::StepwiseMst;
use crate::mst::{check_root, pick_root, PrimMode};
use crate::util::error::Result;
use crate::util::types::{VertexType, Weight};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimStepKind {
    NodeInspect,
    NodeSelect,
    NeighborInspect,
    QueueInsert,
    QueueUpdate,
    MstComplete,
    MstIncomplete,
}

/// Snapshot of the algorithm after a single decision
#[derive(Clone, Debug, PartialEq)]
pub struct PrimStep {
    kind: PrimStepKind,
    node: Option<VertexType>,
    edge: Option<Edge>,
    weight: Weight,
    edges: Vec<Edge>,
    queue: Vec<(VertexType, Weight)>,
}

impl PrimStep {
    pub fn get_kind(&self) -> PrimStepKind {
        self.kind
    }

    /// extracted vertex for node steps, the neighbor for neighbor and queue steps
    pub fn get_node(&self) -> Option<VertexType> {
        self.node
    }

    pub fn get_edge(&self) -> Option<Edge> {
        self.edge
    }

    pub fn get_weight(&self) -> Weight {
        self.weight
    }

    pub fn get_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// queued vertices and their distance in heap order
    pub fn get_queue(&self) -> &[(VertexType, Weight)] {
        &self.queue
    }
}

#[derive(Clone, Debug)]
enum State {
    Extract,
    Commit(usize),
    Scan { node: usize, incident: Vec<Edge>, position: usize },
    Relax { node: usize, incident: Vec<Edge>, position: usize, edge: Edge },
    Finish,
    Done,
}

/// Eager Prim as an iterator over its steps
#[derive(Clone, Debug)]
pub struct StepwisePrim<'a> {
    prim: PrimState<'a>,
    root: Option<VertexType>,
    mode: PrimMode,
    complete: bool,
    state: State,
}

impl<'a> StepwisePrim<'a> {
    pub fn new(graph: &'a Graph, root: VertexType) -> Result<Self> {
        let root = check_root(graph, root)?;
        Self::with_root(graph, Some(root), PrimMode::default())
    }

    pub fn with_random_root<R: Rng + ?Sized>(graph: &'a Graph, rng: &mut R) -> Result<Self> {
        Self::with_root(graph, pick_root(graph, rng), PrimMode::default())
    }

    /// the mode can only be chosen before the first step
    pub fn with_mode(mut self, mode: PrimMode) -> Self {
        self.mode = mode;
        self
    }

    fn with_root(graph: &'a Graph, root: Option<VertexType>, mode: PrimMode) -> Result<Self> {
        let mut prim = PrimState::new(graph);
        if let Some(root) = root {
            prim.start(root)?;
        }

        Ok(Self {
            prim,
            root,
            mode,
            complete: false,
            state: State::Extract,
        })
    }

    pub fn get_root(&self) -> Option<VertexType> {
        self.root
    }

    fn step(&self, kind: PrimStepKind, node: Option<VertexType>, edge: Option<Edge>) -> PrimStep {
        PrimStep {
            kind,
            node,
            edge,
            weight: self.prim.weight(),
            edges: self.prim.selected().to_vec(),
            queue: self.prim.queue_snapshot(),
        }
    }

    /// advances the state machine until the next step, None once it is done
    fn advance(&mut self) -> Result<Option<PrimStep>> {
        loop {
            match mem::replace(&mut self.state, State::Done) {
                State::Extract => {
                    if !self.prim.has_queued() {
                        match self.prim.next_unseen() {
                            Some(next) if self.mode == PrimMode::Forest => {
                                self.prim.start(next)?;
                                self.state = State::Extract;
                            }
                            _ => self.state = State::Finish,
                        }
                        continue;
                    }

                    let node = self.prim.extract()?;
                    self.state = State::Commit(node);
                    let vertex = self.prim.vertex(node);
                    return Ok(Some(self.step(PrimStepKind::NodeInspect, Some(vertex), self.prim.edge_to(node))));
                }
                State::Commit(node) => {
                    let selected = self.prim.commit(node);
                    let incident = self.prim.incident_edges(node);
                    self.state = State::Scan { node, incident, position: 0 };

                    // roots join the tree without an edge
                    if let Some(edge) = selected {
                        let vertex = self.prim.vertex(node);
                        return Ok(Some(self.step(PrimStepKind::NodeSelect, Some(vertex), Some(edge))));
                    }
                }
                State::Scan { node, incident, position } => {
                    match incident.get(position).copied() {
                        Some(edge) => {
                            let neighbor = edge.other(self.prim.vertex(node));
                            self.state = State::Relax { node, incident, position: position + 1, edge };
                            return Ok(Some(self.step(PrimStepKind::NeighborInspect, Some(neighbor), Some(edge))));
                        }
                        None => self.state = State::Extract,
                    }
                }
                State::Relax { node, incident, position, edge } => {
                    let relaxation = self.prim.relax(node, edge)?;
                    let neighbor = edge.other(self.prim.vertex(node));
                    self.state = State::Scan { node, incident, position };

                    match relaxation {
                        Relaxation::Insert => return Ok(Some(self.step(PrimStepKind::QueueInsert, Some(neighbor), Some(edge)))),
                        Relaxation::Update => return Ok(Some(self.step(PrimStepKind::QueueUpdate, Some(neighbor), Some(edge)))),
                        Relaxation::Unchanged => {}
                    }
                }
                State::Finish => {
                    self.complete = self.prim.is_complete();
                    debug!("Prim selected {} edges with weight {}, complete: {}", self.prim.selected().len(), self.prim.weight(), self.complete);
                    let kind = if self.complete {
                        PrimStepKind::MstComplete
                    } else {
                        PrimStepKind::MstIncomplete
                    };
                    return Ok(Some(self.step(kind, None, None)));
                }
                State::Done => return Ok(None),
            }
        }
    }
}

impl<'a> Iterator for StepwisePrim<'a> {
    type Item = Result<PrimStep>;

    fn next(&mut self) -> Option<Self::Item> {
        // a failed step leaves the state machine done
        self.advance().transpose()
    }
}

impl<'a> StepwiseMst for StepwisePrim<'a> {
    fn edges(&self) -> &[Edge] {
        self.prim.selected()
    }

    fn weight(&self) -> Weight {
        self.prim.weight()
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
    use crate::mst::stepwise::prim::{PrimStep, PrimStepKind, StepwisePrim};
    use crate::mst::stepwise::StepwiseMst;
    use crate::mst::tests::{lecture_graph, two_triangles};
    use crate::mst::{MinimumSpanningTree, PrimMode};
    use crate::util::error::Error;

    fn collect(engine: &mut StepwisePrim) -> Vec<PrimStep> {
        engine.steps().map(|step| step.unwrap()).collect()
    }

    fn kinds(steps: &[PrimStep], kind: PrimStepKind) -> usize {
        steps.iter().filter(|step| step.get_kind() == kind).count()
    }

    #[test]
    fn lecture_example_steps() {
        let graph = lecture_graph();
        let mut engine = StepwisePrim::new(&graph, 0).unwrap();
        let steps = collect(&mut engine);

        assert_eq!(kinds(&steps, PrimStepKind::NodeInspect), 6);
        assert_eq!(kinds(&steps, PrimStepKind::NodeSelect), 5);
        // every undirected edge is seen once from each endpoint
        assert_eq!(kinds(&steps, PrimStepKind::NeighborInspect), 18);
        assert_eq!(kinds(&steps, PrimStepKind::QueueInsert), 5);
        assert_eq!(kinds(&steps, PrimStepKind::QueueUpdate), 2);
        assert_eq!(steps.last().unwrap().get_kind(), PrimStepKind::MstComplete);

        let selected: Vec<f64> = steps.iter()
            .filter(|step| step.get_kind() == PrimStepKind::NodeSelect)
            .map(|step| step.get_edge().unwrap().weight)
            .collect();
        assert_eq!(selected, vec![10.0, 10.0, 1.0, 2.0, 20.0]);
        assert_eq!(engine.weight(), 43.0);
        assert!(engine.is_complete());
    }

    #[test]
    fn first_steps() {
        let graph = lecture_graph();
        let mut engine = StepwisePrim::new(&graph, 0).unwrap();

        let root = engine.next().unwrap().unwrap();
        assert_eq!(root.get_kind(), PrimStepKind::NodeInspect);
        assert_eq!(root.get_node(), Some(0));
        assert_eq!(root.get_edge(), None);
        assert!(root.get_queue().is_empty());

        // the root is committed silently, scanning starts right away
        let neighbor = engine.next().unwrap().unwrap();
        assert_eq!(neighbor.get_kind(), PrimStepKind::NeighborInspect);

        let insert = engine.next().unwrap().unwrap();
        assert_eq!(insert.get_kind(), PrimStepKind::QueueInsert);
        assert_eq!(insert.get_node(), neighbor.get_node());
        assert_eq!(insert.get_queue().len(), 1);
    }

    #[test]
    fn update_lowers_queue_entry() {
        let graph = lecture_graph();
        let mut engine = StepwisePrim::new(&graph, 0).unwrap();
        let steps = collect(&mut engine);

        let update = steps.iter().find(|step| step.get_kind() == PrimStepKind::QueueUpdate).unwrap();
        assert_eq!(update.get_node(), Some(3));
        assert!(update.get_queue().contains(&(3, 20.0)));
    }

    #[test]
    fn matches_batch_prim() {
        let graph = lecture_graph();
        for root in 0..6 {
            let mut engine = StepwisePrim::new(&graph, root).unwrap();
            collect(&mut engine);
            let mut batch = Prim::new(&graph, root).unwrap();
            batch.solve().unwrap();

            assert_eq!(engine.edges(), batch.edges());
        }
    }

    #[test]
    fn disconnected_graph() {
        let graph = two_triangles();

        let mut single = StepwisePrim::new(&graph, 0).unwrap();
        let steps = collect(&mut single);
        assert_eq!(steps.last().unwrap().get_kind(), PrimStepKind::MstIncomplete);
        assert_eq!(single.edges().len(), 2);

        let mut forest = StepwisePrim::new(&graph, 0).unwrap().with_mode(PrimMode::Forest);
        let steps = collect(&mut forest);
        assert_eq!(steps.last().unwrap().get_kind(), PrimStepKind::MstIncomplete);
        assert_eq!(kinds(&steps, PrimStepKind::NodeInspect), 6);
        assert_eq!(forest.edges().len(), 4);
        assert_eq!(forest.weight(), 6.0);
    }

    #[test]
    fn roots() {
        let graph = lecture_graph();
        assert!(matches!(StepwisePrim::new(&graph, 9), Err(Error::ElementNotFound(_))));

        let engine = StepwisePrim::with_random_root(&graph, &mut StdRng::seed_from_u64(11)).unwrap();
        assert!(engine.get_root().map_or(false, |root| graph.has_vertex(root)));

        let empty = Graph::new();
        let mut engine = StepwisePrim::with_random_root(&empty, &mut StdRng::seed_from_u64(11)).unwrap();
        let steps = collect(&mut engine);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].get_kind(), PrimStepKind::MstIncomplete);
    }

    #[test]
    fn kind_names() {
        assert_eq!(PrimStepKind::NeighborInspect.to_string(), "NEIGHBOR_INSPECT");
        assert_eq!("QUEUE_UPDATE".parse::<PrimStepKind>(), Ok(PrimStepKind::QueueUpdate));
    }
}

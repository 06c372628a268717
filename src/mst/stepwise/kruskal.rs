use std::collections::BTreeSet;
use std::mem;

use log::{debug, trace};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::graph::{Edge, Graph};
use crate::mst::kruskal::sorted_edges;
use crate::mst::stepwise::StepwiseMst;
use crate::unionfind::UnionFind;
use crate::util::error::Result;
use crate::util::types::{VertexType, Weight};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum KruskalStepKind {
    EdgeInspect,
    EdgeCycles,
    EdgeSelect,
    MstComplete,
    MstIncomplete,
}

/// Snapshot of the algorithm after a single decision
#[derive(Clone, Debug, PartialEq)]
pub struct KruskalStep {
    kind: KruskalStepKind,
    edge: Option<Edge>,
    weight: Weight,
    edges: Vec<Edge>,
    partition: Vec<BTreeSet<VertexType>>,
    cycle: Vec<Edge>,
}

impl KruskalStep {
    pub fn get_kind(&self) -> KruskalStepKind {
        self.kind
    }

    /// edge under consideration, None for the terminal step
    pub fn get_edge(&self) -> Option<Edge> {
        self.edge
    }

    pub fn get_weight(&self) -> Weight {
        self.weight
    }

    /// edges selected so far
    pub fn get_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// components of the union find, ordered by their root
    pub fn get_partition(&self) -> &[BTreeSet<VertexType>] {
        &self.partition
    }

    /// for `EDGE_CYCLES`: the selected edges of the component the skipped edge would close a cycle in
    pub fn get_cycle(&self) -> &[Edge] {
        &self.cycle
    }
}

#[derive(Copy, Clone, Debug)]
enum State {
    Inspect,
    Decide(Edge),
    Finish,
    Done,
}

/// Kruskal's algorithm as an iterator over its steps
/// Each edge is reported as `EDGE_INSPECT` followed by `EDGE_CYCLES` or `EDGE_SELECT`, the sequence
/// ends with a single `MST_COMPLETE` or `MST_INCOMPLETE`
#[derive(Clone, Debug)]
pub struct StepwiseKruskal<'a> {
    graph: &'a Graph,
    sorted: Vec<Edge>,
    position: usize,
    union_find: UnionFind,
    selected: Vec<Edge>,
    weight: Weight,
    complete: bool,
    state: State,
}

impl<'a> StepwiseKruskal<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            sorted: sorted_edges(graph),
            position: 0,
            union_find: graph.vertices().collect(),
            selected: Vec::new(),
            weight: 0.0,
            complete: false,
            state: State::Inspect,
        }
    }

    pub fn get_graph(&self) -> &'a Graph {
        self.graph
    }

    fn step(&mut self, kind: KruskalStepKind, edge: Option<Edge>, cycle: Vec<Edge>) -> KruskalStep {
        KruskalStep {
            kind,
            edge,
            weight: self.weight,
            edges: self.selected.clone(),
            partition: self.union_find.sets().into_iter().map(|(_, members)| members).collect(),
            cycle,
        }
    }

    fn decide(&mut self, edge: Edge) -> Result<KruskalStep> {
        if self.union_find.connected(edge.from, edge.to)? {
            let component = self.union_find.component_of(edge.from)?;
            let cycle = self.selected.iter()
                .filter(|selected| component.contains(&selected.from))
                .copied()
                .collect();
            self.state = State::Inspect;
            trace!("Kruskal skips {} as it closes a cycle", edge);
            return Ok(self.step(KruskalStepKind::EdgeCycles, Some(edge), cycle));
        }

        self.union_find.union(edge.from, edge.to)?;
        self.weight += edge.weight;
        self.selected.push(edge);
        trace!("Kruskal selects {}, weight so far {}", edge, self.weight);

        self.state = if self.union_find.all_in_one_set() {
            State::Finish
        } else {
            State::Inspect
        };
        Ok(self.step(KruskalStepKind::EdgeSelect, Some(edge), Vec::new()))
    }
}

impl<'a> Iterator for StepwiseKruskal<'a> {
    type Item = Result<KruskalStep>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match mem::replace(&mut self.state, State::Done) {
                State::Inspect => {
                    if let Some(edge) = self.sorted.get(self.position).copied() {
                        self.position += 1;
                        self.state = State::Decide(edge);
                        trace!("Kruskal inspects {}", edge);
                        return Some(Ok(self.step(KruskalStepKind::EdgeInspect, Some(edge), Vec::new())));
                    }
                    self.state = State::Finish;
                }
                State::Decide(edge) => {
                    // state stays Done if the decision fails
                    return Some(self.decide(edge));
                }
                State::Finish => {
                    self.complete = self.union_find.all_in_one_set();
                    debug!("Kruskal selected {} edges with weight {}, complete: {}", self.selected.len(), self.weight, self.complete);
                    let kind = if self.complete {
                        KruskalStepKind::MstComplete
                    } else {
                        KruskalStepKind::MstIncomplete
                    };
                    return Some(Ok(self.step(kind, None, Vec::new())));
                }
                State::Done => return None,
            }
        }
    }
}

impl<'a> StepwiseMst for StepwiseKruskal<'a> {
    fn edges(&self) -> &[Edge] {
        &self.selected
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
    use itertools::Itertools;

    use crate::graph::Graph;
    use crate::mst::stepwise::kruskal::{KruskalStep, KruskalStepKind, StepwiseKruskal};
    use crate::mst::stepwise::{StepHistory, StepwiseMst};
    use crate::mst::tests::{lecture_graph, two_triangles};

    fn collect(engine: &mut StepwiseKruskal) -> Vec<KruskalStep> {
        engine.steps().map(|step| step.unwrap()).collect()
    }

    #[test]
    fn lecture_example_steps() {
        let graph = lecture_graph();
        let mut engine = StepwiseKruskal::new(&graph);
        let steps = collect(&mut engine);

        let kinds = steps.iter().map(|step| step.get_kind().to_string()).join(" ");
        assert_eq!(kinds, "EDGE_INSPECT EDGE_SELECT EDGE_INSPECT EDGE_SELECT EDGE_INSPECT EDGE_SELECT \
                           EDGE_INSPECT EDGE_SELECT EDGE_INSPECT EDGE_CYCLES EDGE_INSPECT EDGE_SELECT MST_COMPLETE");

        let selected: Vec<f64> = steps.iter()
            .filter(|step| step.get_kind() == KruskalStepKind::EdgeSelect)
            .map(|step| step.get_edge().unwrap().weight)
            .collect();
        assert_eq!(selected, vec![1.0, 2.0, 10.0, 10.0, 20.0]);

        assert!(engine.is_complete());
        assert_eq!(engine.weight(), 43.0);
        assert_eq!(engine.edges().len(), 5);
    }

    #[test]
    fn snapshots_follow_progress() {
        let graph = lecture_graph();
        let mut engine = StepwiseKruskal::new(&graph);
        let steps = collect(&mut engine);

        let first = &steps[0];
        assert_eq!(first.get_weight(), 0.0);
        assert!(first.get_edges().is_empty());
        assert_eq!(first.get_partition().len(), 6);

        let second = &steps[1];
        assert_eq!(second.get_weight(), 1.0);
        assert_eq!(second.get_edges().len(), 1);
        assert_eq!(second.get_partition().len(), 5);

        let last = steps.last().unwrap();
        assert_eq!(last.get_edge(), None);
        assert_eq!(last.get_partition().len(), 1);
        assert_eq!(last.get_weight(), 43.0);
    }

    #[test]
    fn cycle_carries_component_edges() {
        let graph = lecture_graph();
        let mut engine = StepwiseKruskal::new(&graph);
        let steps = collect(&mut engine);

        let cycle_step = steps.iter().find(|step| step.get_kind() == KruskalStepKind::EdgeCycles).unwrap();
        let skipped = cycle_step.get_edge().unwrap();
        assert!(skipped.connects(3, 4));

        // 3 and 4 are joined through 0, 1, 4, 5 and 3 at that point
        let mut weights: Vec<f64> = cycle_step.get_cycle().iter().map(|edge| edge.weight).collect();
        weights.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(weights, vec![1.0, 2.0, 10.0, 10.0]);
    }

    #[test]
    fn two_triangles_incomplete() {
        let graph = two_triangles();
        let mut engine = StepwiseKruskal::new(&graph);
        let steps = collect(&mut engine);

        assert_eq!(steps.last().unwrap().get_kind(), KruskalStepKind::MstIncomplete);
        assert_eq!(steps.iter().filter(|step| step.get_kind() == KruskalStepKind::EdgeInspect).count(), 6);
        assert_eq!(steps.iter().filter(|step| step.get_kind() == KruskalStepKind::EdgeCycles).count(), 2);
        assert!(!engine.is_complete());
        assert_eq!(engine.edges().len(), 4);
        assert!(engine.next().is_none());
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::new();
        let mut engine = StepwiseKruskal::new(&graph);
        let steps = collect(&mut engine);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].get_kind(), KruskalStepKind::MstIncomplete);
    }

    #[test]
    fn history_replays_steps() {
        let graph = lecture_graph();
        let mut history = StepHistory::new(StepwiseKruskal::new(&graph));

        history.forward();
        history.forward();
        let selected = history.current().unwrap().as_ref().unwrap().clone();
        assert_eq!(selected.get_kind(), KruskalStepKind::EdgeSelect);

        let inspected = history.back().unwrap().as_ref().unwrap();
        assert_eq!(inspected.get_kind(), KruskalStepKind::EdgeInspect);
        assert_eq!(history.forward().unwrap().as_ref().unwrap(), &selected);
        assert_eq!(history.len(), 2);
        assert_eq!(history.get_source().weight(), 1.0);
    }

    #[test]
    fn kind_names() {
        assert_eq!(KruskalStepKind::EdgeCycles.as_ref(), "EDGE_CYCLES");
        assert_eq!("MST_INCOMPLETE".parse::<KruskalStepKind>(), Ok(KruskalStepKind::MstIncomplete));
    }
}

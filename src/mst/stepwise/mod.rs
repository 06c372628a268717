use crate::graph::Edge;
use crate::util::types::Weight;

pub use self::kruskal::{KruskalStep, KruskalStepKind, StepwiseKruskal};
pub use self::prim::{PrimStep, PrimStepKind, StepwisePrim};

pub mod kruskal;
pub mod prim;

/// Spanning tree engine that reports each decision as a step
/// The engine itself is the (single pass) iterator over its steps, the accessors report the
/// progress made so far and are final once the iterator is exhausted
pub trait StepwiseMst: Iterator {
    /// the engine as iterator over its steps
    fn steps(&mut self) -> &mut Self where Self: Sized {
        self
    }

    fn edges(&self) -> &[Edge];

    fn weight(&self) -> Weight;

    fn is_complete(&self) -> bool;
}

/// Cursor over the steps of an engine that allows going back and forth
/// Steps are only pulled from the engine when moving forward past the last step seen
#[derive(Debug)]
pub struct StepHistory<I: Iterator> {
    source: I,
    steps: Vec<I::Item>,
    // number of steps in front of and including the cursor
    position: usize,
}

impl<I: Iterator> StepHistory<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            steps: Vec::new(),
            position: 0,
        }
    }

    /// moves to the next step, None once the engine is exhausted
    pub fn forward(&mut self) -> Option<&I::Item> {
        if self.position == self.steps.len() {
            let step = self.source.next()?;
            self.steps.push(step);
        }
        self.position += 1;
        self.current()
    }

    /// moves back one step and returns the step now under the cursor, None before the first step
    pub fn back(&mut self) -> Option<&I::Item> {
        self.position = self.position.saturating_sub(1);
        self.current()
    }

    pub fn current(&self) -> Option<&I::Item> {
        self.position.checked_sub(1).and_then(|index| self.steps.get(index))
    }

    /// number of steps pulled from the engine so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get_source(&self) -> &I {
        &self.source
    }
}

use std::cmp::Ordering;
use std::fmt;

use crate::util::types::{EdgeId, VertexType, Weight};

/// Snapshot of a graph edge
/// An undirected edge is a single logical edge stored in both matrix cells of its endpoints,
/// both directions therefore share the same id and weight
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: VertexType,
    pub to: VertexType,
    pub weight: Weight,
    pub directed: bool,
}

impl Edge {
    pub fn new(id: EdgeId, from: VertexType, to: VertexType, weight: Weight, directed: bool) -> Self {
        Self { id, from, to, weight, directed }
    }

    /// returns the opposite endpoint of `vertex`, which has to be one of the endpoints
    pub fn other(&self, vertex: VertexType) -> VertexType {
        debug_assert!(vertex == self.from || vertex == self.to, "vertex {} is not an endpoint of {}", vertex, self);
        if vertex == self.from {
            self.to
        } else {
            self.from
        }
    }

    /// returns true if the edge connects `first` and `second` in any direction
    pub fn connects(&self, first: VertexType, second: VertexType) -> bool {
        (self.from == first && self.to == second) || (self.from == second && self.to == first)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// total order on edge weights, ties are left to the caller
    pub fn cmp_weight(&self, other: &Self) -> Ordering {
        self.weight.total_cmp(&other.weight)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        write!(f, "({} {} {}, {})", self.from, arrow, self.to, self.weight)
    }
}

/// edge record owned by the graph, endpoints are external vertex ids
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct EdgeEntry {
    pub(crate) from: VertexType,
    pub(crate) to: VertexType,
    pub(crate) weight: Weight,
    pub(crate) directed: bool,
}

impl EdgeEntry {
    pub(crate) fn snapshot(&self, id: EdgeId) -> Edge {
        Edge::new(id, self.from, self.to, self.weight, self.directed)
    }
}

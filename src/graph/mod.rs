use std::collections::BTreeMap;

use log::{debug, trace};

use crate::util::error::{Error, Result};
use crate::util::types::{DEFAULT_INCREMENT, EdgeId, FxHashMap, FxHashSet, VertexType, Weight};

pub use self::edge::Edge;
use self::edge::EdgeEntry;

pub mod edge;

/// Mutable weighted (mixed) graph backed by an adjacency matrix with recyclable slots
/// External vertex ids are mapped through `vertex_mapping` to matrix slots, freed slots are kept
/// on a stack and handed out again before the matrix grows.
/// Each matrix cell stores the id of at most one edge; an undirected edge occupies both cells of
/// its endpoints so that it reads back symmetric.
/// The matrix grows by `increment` slots whenever no free slot is left and only shrinks on `compact`
#[derive(Clone, Debug)]
pub struct Graph {
    connection: Vec<Vec<Option<EdgeId>>>,
    // ordered by creation so that iteration over edges is deterministic
    edges: BTreeMap<EdgeId, EdgeEntry>,
    vertex_mapping: FxHashMap<VertexType, usize>,
    slot_owner: Vec<Option<VertexType>>,
    free_slots: Vec<usize>,
    increment: usize,
    next_edge_id: EdgeId,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            connection: Vec::new(),
            edges: BTreeMap::new(),
            vertex_mapping: FxHashMap::default(),
            slot_owner: Vec::new(),
            free_slots: Vec::new(),
            increment: DEFAULT_INCREMENT,
            next_edge_id: 0,
        }
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// creates a graph that can hold `capacity` vertices before growing by `increment` slots
    pub fn with_capacity(capacity: usize, increment: usize) -> Result<Self> {
        if increment == 0 {
            return Err(Error::InvalidArgument("an increment must be greater than 0".to_string()));
        }

        let mut graph = Self { increment, ..Self::default() };
        graph.ensure_capacity(capacity);
        Ok(graph)
    }

    /// number of matrix slots, used or free
    pub fn capacity(&self) -> usize {
        self.connection.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_mapping.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// iterate over vertex ids in an arbitrary order
    pub fn vertices(&self) -> impl Iterator<Item=VertexType> + '_ {
        self.vertex_mapping.keys().copied()
    }

    /// iterate over edges in creation order, undirected edges are reported once
    pub fn edges(&self) -> impl Iterator<Item=Edge> + '_ {
        self.edges.iter().map(|(id, entry)| entry.snapshot(*id))
    }

    pub fn has_vertex(&self, id: VertexType) -> bool {
        self.vertex_mapping.contains_key(&id)
    }

    /// adds a vertex, no-op if the id is already present
    pub fn add_vertex(&mut self, id: VertexType) {
        self.assure_vertex(id);
    }

    /// removes the vertex together with every edge starting or ending at it
    /// the slot is returned to the free list, unknown ids are ignored
    pub fn remove_vertex(&mut self, id: VertexType) {
        let index = match self.vertex_mapping.remove(&id) {
            Some(index) => index,
            None => return,
        };

        for k in 0..self.connection.len() {
            if let Some(edge) = self.connection[index][k].take() {
                self.edges.remove(&edge);
            }
            if let Some(edge) = self.connection[k][index].take() {
                self.edges.remove(&edge);
            }
        }

        self.slot_owner[index] = None;
        self.free_slots.push(index);
        trace!("Vertex {} removed, slot {} is free again", id, index);
    }

    /// connects two vertices through a directed edge, missing vertices are created
    /// an existing edge from `from` to `to` is removed first
    pub fn add_edge(&mut self, from: VertexType, to: VertexType, weight: Weight) -> Edge {
        let u = self.assure_vertex(from);
        let v = self.assure_vertex(to);

        if let Some(existing) = self.connection[u][v] {
            self.remove_edge_by_id(existing);
        }

        let id = self.create_edge(from, to, weight, true);
        self.connection[u][v] = Some(id);

        Edge::new(id, from, to, weight, true)
    }

    /// connects two vertices through an undirected edge, missing vertices are created
    /// any edge between the two vertices, in either direction, is replaced
    pub fn add_undirected_edge(&mut self, first: VertexType, second: VertexType, weight: Weight) -> Edge {
        let u = self.assure_vertex(first);
        let v = self.assure_vertex(second);

        if let Some(existing) = self.connection[u][v] {
            self.remove_edge_by_id(existing);
        }
        if let Some(existing) = self.connection[v][u] {
            self.remove_edge_by_id(existing);
        }

        // a single edge stored in both cells acts as two reciprocal directed edges
        let id = self.create_edge(first, second, weight, false);
        self.connection[u][v] = Some(id);
        self.connection[v][u] = Some(id);

        Edge::new(id, first, second, weight, false)
    }

    /// removes the edge stored for the ordered pair, an undirected edge is removed in both directions
    /// returns the removed edge or `None` if there was none
    pub fn remove_edge(&mut self, from: VertexType, to: VertexType) -> Option<Edge> {
        let u = *self.vertex_mapping.get(&from)?;
        let v = *self.vertex_mapping.get(&to)?;
        let id = self.connection[u][v]?;

        self.remove_edge_by_id(id)
    }

    /// removes the edge with the given id, returns `None` if it is not part of the graph
    pub fn remove_edge_by_id(&mut self, id: EdgeId) -> Option<Edge> {
        let entry = self.edges.remove(&id)?;

        if let (Some(&u), Some(&v)) = (self.vertex_mapping.get(&entry.from), self.vertex_mapping.get(&entry.to)) {
            if self.connection[u][v] == Some(id) {
                self.connection[u][v] = None;
            }
            if self.connection[v][u] == Some(id) {
                self.connection[v][u] = None;
            }
        }

        Some(entry.snapshot(id))
    }

    /// returns the edge stored for the ordered pair
    pub fn get_edge(&self, from: VertexType, to: VertexType) -> Option<Edge> {
        let u = *self.vertex_mapping.get(&from)?;
        let v = *self.vertex_mapping.get(&to)?;
        let id = self.connection[u][v]?;

        self.edge(id)
    }

    /// returns the edge with the given id
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(&id).map(|entry| entry.snapshot(id))
    }

    /// changes the weight of an edge, visible from both directions for undirected edges
    pub fn set_weight(&mut self, id: EdgeId, weight: Weight) -> Result<()> {
        let entry = self.edges.get_mut(&id)
            .ok_or_else(|| Error::ElementNotFound(format!("edge {} is not part of the graph", id)))?;
        entry.weight = weight;
        Ok(())
    }

    /// returns true if there is an edge stored for the ordered pair
    pub fn is_adjacent(&self, from: VertexType, to: VertexType) -> bool {
        self.get_edge(from, to).is_some()
    }

    /// vertices reachable from `id` through an outgoing cell, empty for unknown ids
    pub fn neighbors_of(&self, id: VertexType) -> FxHashSet<VertexType> {
        let mut result = FxHashSet::default();
        if let Some(&index) = self.vertex_mapping.get(&id) {
            for (k, cell) in self.connection[index].iter().enumerate() {
                if cell.is_some() {
                    if let Some(other) = self.slot_owner[k] {
                        result.insert(other);
                    }
                }
            }
        }
        result
    }

    /// every edge touching the vertex in either direction, each reported once
    /// edges are ordered by the matrix slot of the opposite endpoint, outgoing cells first
    pub fn incident_edges(&self, id: VertexType) -> Vec<Edge> {
        let index = match self.vertex_mapping.get(&id) {
            Some(&index) => index,
            None => return Vec::new(),
        };

        let mut seen = FxHashSet::default();
        let outgoing = self.connection[index].iter();
        let incoming = self.connection.iter().map(|row| &row[index]);

        outgoing.chain(incoming)
            .filter_map(|cell| *cell)
            .filter(|edge| seen.insert(*edge))
            .filter_map(|edge| self.edge(edge))
            .collect()
    }

    /// makes sure the graph can hold `size` vertices without growing
    pub fn ensure_capacity(&mut self, size: usize) {
        if size > self.connection.len() {
            let amount = size - self.connection.len();
            self.grow_matrix(amount);
        }
    }

    /// renumbers the live vertices onto the slots `0..n` and shrinks the matrix to n x n
    /// relative slot order is preserved, edges and ids are unaffected
    pub fn compact(&mut self) {
        let live: Vec<(usize, VertexType)> = self.slot_owner.iter().enumerate()
            .filter_map(|(slot, owner)| owner.map(|id| (slot, id)))
            .collect();
        let size = live.len();

        let mut connection = vec![vec![None; size]; size];
        for (new_u, (old_u, _)) in live.iter().enumerate() {
            for (new_v, (old_v, _)) in live.iter().enumerate() {
                connection[new_u][new_v] = self.connection[*old_u][*old_v];
            }
        }

        self.connection = connection;
        self.slot_owner = live.iter().map(|(_, id)| Some(*id)).collect();
        self.vertex_mapping = live.iter().enumerate().map(|(slot, (_, id))| (*id, slot)).collect();
        self.free_slots.clear();
        debug!("Graph compacted to {} slots", size);
    }

    /// binds the id to a slot if it is not present yet and returns the slot
    fn assure_vertex(&mut self, id: VertexType) -> usize {
        if let Some(&index) = self.vertex_mapping.get(&id) {
            return index;
        }

        if self.free_slots.is_empty() {
            self.grow_matrix(self.increment);
        }

        // grow_matrix always leaves at least one free slot
        let index = self.free_slots.pop().unwrap_or_else(|| self.connection.len() - 1);
        self.vertex_mapping.insert(id, index);
        self.slot_owner[index] = Some(id);
        trace!("Vertex {} bound to slot {}", id, index);

        index
    }

    fn create_edge(&mut self, from: VertexType, to: VertexType, weight: Weight, directed: bool) -> EdgeId {
        let id = self.next_edge_id;
        self.next_edge_id += 1;
        self.edges.insert(id, EdgeEntry { from, to, weight, directed });
        id
    }

    /// increases the matrix by `amount` rows and columns
    /// new slots go below the already free ones on the stack and are popped in ascending order
    fn grow_matrix(&mut self, amount: usize) {
        debug_assert!(amount > 0, "an increment must be greater than 0");

        let previous = self.connection.len();
        let size = previous + amount;

        for row in self.connection.iter_mut() {
            row.resize(size, None);
        }
        self.connection.resize_with(size, || vec![None; size]);
        self.slot_owner.resize(size, None);

        let mut free_slots: Vec<usize> = (previous..size).rev().collect();
        free_slots.append(&mut self.free_slots);
        self.free_slots = free_slots;

        debug!("Graph matrix grown from {} to {} slots", previous, size);
    }
}

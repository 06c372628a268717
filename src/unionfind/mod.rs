use std::collections::{BTreeMap, BTreeSet};
use std::iter::FromIterator;

use crate::util::error::{Error, Result};
use crate::util::types::{FxHashMap, VertexType};

/// Disjoint-set over integer elements with union-by-size and full path compression
/// Elements have to be registered with `add_element` (or at construction) before use,
/// every operation on an unknown element returns `Error::ElementNotFound`
#[derive(Clone, Debug, Default)]
pub struct UnionFind {
    parent: FxHashMap<VertexType, VertexType>,
    // only meaningful when read at a root
    size: FxHashMap<VertexType, usize>,
    count: usize,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// register a new singleton component, no-op for known elements
    pub fn add_element(&mut self, element: VertexType) {
        if !self.parent.contains_key(&element) {
            self.parent.insert(element, element);
            self.size.insert(element, 1);
            self.count += 1;
        }
    }

    /// returns true if the element has been added
    pub fn contains(&self, element: VertexType) -> bool {
        self.parent.contains_key(&element)
    }

    /// number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// number of disjoint components
    pub fn count(&self) -> usize {
        self.count
    }

    /// returns the root of the component containing `element`
    /// every node visited on the way is re-pointed directly at the root
    pub fn find(&mut self, element: VertexType) -> Result<VertexType> {
        let mut root = *self.parent.get(&element)
            .ok_or_else(|| Error::ElementNotFound(format!("element {} is not in the union find", element)))?;

        // find root
        while let Some(&next) = self.parent.get(&root) {
            if next == root {
                break;
            }
            root = next;
        }

        // path compression
        let mut current = element;
        while current != root {
            let next = self.parent.insert(current, root).unwrap_or(root);
            current = next;
        }

        Ok(root)
    }

    /// returns true if both elements belong to the same component
    pub fn connected(&mut self, first: VertexType, second: VertexType) -> Result<bool> {
        Ok(self.find(first)? == self.find(second)?)
    }

    /// number of elements in the component of `element`
    pub fn size(&mut self, element: VertexType) -> Result<usize> {
        let root = self.find(element)?;
        Ok(self.size.get(&root).copied().unwrap_or(1))
    }

    /// merges the components of both elements, the smaller root is attached below the larger one
    /// on equal sizes the root of `first` survives
    /// returns false if both elements already were in the same component
    pub fn union(&mut self, first: VertexType, second: VertexType) -> Result<bool> {
        let root_first = self.find(first)?;
        let root_second = self.find(second)?;

        if root_first == root_second {
            return Ok(false);
        }

        let size_first = self.size.get(&root_first).copied().unwrap_or(1);
        let size_second = self.size.get(&root_second).copied().unwrap_or(1);

        let (survivor, absorbed) = if size_first < size_second {
            (root_second, root_first)
        } else {
            (root_first, root_second)
        };

        self.parent.insert(absorbed, survivor);
        self.size.insert(survivor, size_first + size_second);
        self.size.remove(&absorbed);
        self.count -= 1;

        Ok(true)
    }

    /// true iff a single component holds every element
    pub fn all_in_one_set(&self) -> bool {
        self.count == 1
    }

    /// snapshot of the current partition as root -> members
    pub fn sets(&mut self) -> BTreeMap<VertexType, BTreeSet<VertexType>> {
        let elements: Vec<VertexType> = self.parent.keys().copied().collect();
        let mut sets: BTreeMap<VertexType, BTreeSet<VertexType>> = BTreeMap::new();

        for element in elements {
            if let Ok(root) = self.find(element) {
                sets.entry(root).or_insert_with(BTreeSet::new).insert(element);
            }
        }

        sets
    }

    /// members of the component that contains `element`
    pub fn component_of(&mut self, element: VertexType) -> Result<BTreeSet<VertexType>> {
        let root = self.find(element)?;
        let elements: Vec<VertexType> = self.parent.keys().copied().collect();

        let mut component = BTreeSet::new();
        for other in elements {
            if self.find(other)? == root {
                component.insert(other);
            }
        }

        Ok(component)
    }
}

impl FromIterator<VertexType> for UnionFind {
    fn from_iter<T: IntoIterator<Item=VertexType>>(elements: T) -> Self {
        let mut union_find = UnionFind::new();
        for element in elements {
            union_find.add_element(element);
        }
        union_find
    }
}

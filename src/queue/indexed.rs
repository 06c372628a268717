use crate::util::error::{Error, Result};

/// Indexed min priority-queue backed by a binary heap
/// Each index in `0..max_size` can be associated with at most one key.
/// `pq` maps heap positions to indices and `qp` maps indices back to heap positions,
/// so the heap slot of an arbitrary index is found in O(1) which enables log(n) `decrease_key`
#[derive(Clone, Debug)]
pub struct IndexedPriorityQueue<K: PartialOrd> {
    max_size: usize,
    size: usize,
    // binary heap with 1-based indexing: heap position -> index
    pq: Vec<usize>,
    // inverse of pq: index -> heap position
    qp: Vec<Option<usize>>,
    keys: Vec<Option<K>>,
}

impl<K: PartialOrd> IndexedPriorityQueue<K> {
    pub fn new(max_size: usize) -> Self {
        let mut keys = Vec::with_capacity(max_size);
        keys.resize_with(max_size, || None);
        Self {
            max_size,
            size: 0,
            pq: vec![0; max_size + 1],
            qp: vec![None; max_size],
            keys,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// returns true if a key is associated with the index, false for out of range indices
    pub fn contains(&self, index: usize) -> bool {
        index < self.max_size && self.qp[index].is_some()
    }

    /// associate `key` with `index` - log(n)
    pub fn insert(&mut self, index: usize, key: K) -> Result<()> {
        self.validate_index(index)?;
        if self.contains(index) {
            return Err(Error::AlreadyPresent(index));
        }

        self.size += 1;
        self.qp[index] = Some(self.size);
        self.pq[self.size] = index;
        self.keys[index] = Some(key);
        self.swim(self.size);

        Ok(())
    }

    /// index associated with the smallest key
    pub fn min_index(&self) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::QueueUnderflow);
        }
        Ok(self.pq[1])
    }

    /// the smallest key
    pub fn min_key(&self) -> Result<&K> {
        let index = self.min_index()?;
        self.keys[index].as_ref().ok_or(Error::QueueUnderflow)
    }

    /// removes the smallest key and returns its index - log(n)
    pub fn extract_min(&mut self) -> Result<usize> {
        let min = self.min_index()?;
        self.exchange(1, self.size);
        self.size -= 1;
        self.sink(1);

        self.qp[min] = None;
        self.keys[min] = None;

        Ok(min)
    }

    /// removes the smallest key and returns it together with its index
    pub fn pop(&mut self) -> Result<(usize, K)> {
        let min = self.min_index()?;
        let key = self.delete(min)?;
        Ok((min, key))
    }

    /// key associated with the index
    pub fn key_of(&self, index: usize) -> Result<&K> {
        self.check_index(index)?;
        self.keys[index].as_ref().ok_or_else(|| not_found(index))
    }

    /// replace the key associated with the index, moving it up or down as required - log(n)
    pub fn change_key(&mut self, index: usize, key: K) -> Result<()> {
        let position = self.check_index(index)?;
        self.keys[index] = Some(key);
        self.swim(position);
        // swim may have moved the entry, sink from wherever it ended
        if let Some(position) = self.qp[index] {
            self.sink(position);
        }
        Ok(())
    }

    /// decrease the key associated with the index, the new key has to be strictly smaller
    pub fn decrease_key(&mut self, index: usize, key: K) -> Result<()> {
        let position = self.check_index(index)?;
        if !self.keys[index].as_ref().map_or(false, |current| *current > key) {
            return Err(Error::InvalidArgument("calling decrease_key with given argument would not strictly decrease the key".to_string()));
        }
        self.keys[index] = Some(key);
        self.swim(position);
        Ok(())
    }

    /// increase the key associated with the index, the new key has to be strictly larger
    pub fn increase_key(&mut self, index: usize, key: K) -> Result<()> {
        let position = self.check_index(index)?;
        if !self.keys[index].as_ref().map_or(false, |current| *current < key) {
            return Err(Error::InvalidArgument("calling increase_key with given argument would not strictly increase the key".to_string()));
        }
        self.keys[index] = Some(key);
        self.sink(position);
        Ok(())
    }

    /// remove the index and its key from the queue - log(n)
    pub fn delete(&mut self, index: usize) -> Result<K> {
        let position = self.check_index(index)?;
        self.exchange(position, self.size);
        self.size -= 1;

        // the deleted entry now sits right behind the heap, restore order for the moved one
        if position <= self.size {
            let moved = self.pq[position];
            self.swim(position);
            if let Some(moved_position) = self.qp[moved] {
                self.sink(moved_position);
            }
        }

        self.qp[index] = None;
        self.keys[index].take().ok_or_else(|| not_found(index))
    }

    /// iterate over the queued indices in heap order
    pub fn indices(&self) -> impl Iterator<Item=usize> + '_ {
        self.pq[1..=self.size].iter().copied()
    }

    fn validate_index(&self, index: usize) -> Result<()> {
        if index >= self.max_size {
            return Err(Error::InvalidArgument(format!("index {} is not between 0 and {}", index, self.max_size as i64 - 1)));
        }
        Ok(())
    }

    /// validates the index and returns its heap position
    fn check_index(&self, index: usize) -> Result<usize> {
        self.validate_index(index)?;
        self.qp[index].ok_or_else(|| not_found(index))
    }

    fn greater(&self, i: usize, j: usize) -> bool {
        match (&self.keys[self.pq[i]], &self.keys[self.pq[j]]) {
            (Some(first), Some(second)) => first > second,
            _ => false,
        }
    }

    fn exchange(&mut self, i: usize, j: usize) {
        self.pq.swap(i, j);
        self.qp[self.pq[i]] = Some(i);
        self.qp[self.pq[j]] = Some(j);
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.greater(k / 2, k) {
            self.exchange(k, k / 2);
            k /= 2;
        }
    }

    fn sink(&mut self, mut k: usize) {
        while 2 * k <= self.size {
            let mut j = 2 * k;
            if j < self.size && self.greater(j, j + 1) {
                j += 1;
            }
            if !self.greater(k, j) {
                break;
            }
            self.exchange(k, j);
            k = j;
        }
    }
}

fn not_found(index: usize) -> Error {
    Error::ElementNotFound(format!("index {} is not in the priority queue", index))
}

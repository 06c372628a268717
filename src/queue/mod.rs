use crate::util::error::{Error, Result};

pub mod indexed;

/// Helper struct for a resizable, array-backed binary min-heap
/// Keys are stored 1-indexed, slot 0 stays empty
/// The backing array doubles when full and halves once it is only a quarter full,
/// giving amortized log(n) insert and extract
#[derive(Clone, Debug)]
pub struct MinPriorityQueue<K: PartialOrd> {
    heap: Vec<Option<K>>,
    size: usize,
}

impl<K: PartialOrd> Default for MinPriorityQueue<K> {
    fn default() -> Self {
        Self::with_capacity(1)
    }
}

impl<K: PartialOrd> MinPriorityQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Vec::with_capacity(capacity + 1);
        heap.resize_with(capacity.max(1) + 1, || None);
        Self { heap, size: 0 }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// number of keys the queue holds before it has to grow
    pub fn capacity(&self) -> usize {
        self.heap.len() - 1
    }

    /// insert a new key - log(n)
    pub fn insert(&mut self, key: K) {
        if self.size == self.capacity() {
            self.resize(2 * self.capacity());
        }

        self.size += 1;
        self.heap[self.size] = Some(key);
        self.swim(self.size);
        debug_assert!(self.is_min_heap());
    }

    /// retrieve reference to the smallest key
    pub fn peek_min(&self) -> Result<&K> {
        if self.is_empty() {
            return Err(Error::QueueUnderflow);
        }
        self.heap[1].as_ref().ok_or(Error::QueueUnderflow)
    }

    /// remove and return the smallest key - log(n)
    pub fn extract_min(&mut self) -> Result<K> {
        if self.is_empty() {
            return Err(Error::QueueUnderflow);
        }

        self.heap.swap(1, self.size);
        let min = self.heap[self.size].take().ok_or(Error::QueueUnderflow)?;
        self.size -= 1;
        self.sink(1);

        if self.size > 0 && self.size == self.capacity() / 4 {
            self.resize(self.capacity() / 2);
        }
        debug_assert!(self.is_min_heap());

        Ok(min)
    }

    /// drains the queue into a vector in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut sorted = Vec::with_capacity(self.size);
        while let Ok(key) = self.extract_min() {
            sorted.push(key);
        }
        sorted
    }

    fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.size);
        self.heap.truncate(self.size + 1);
        self.heap.resize_with(capacity.max(1) + 1, || None);
    }

    fn greater(&self, i: usize, j: usize) -> bool {
        match (&self.heap[i], &self.heap[j]) {
            (Some(first), Some(second)) => first > second,
            _ => false,
        }
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.greater(k / 2, k) {
            self.heap.swap(k, k / 2);
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
            self.heap.swap(k, j);
            k = j;
        }
    }

    /// checks heap shape and order, used by debug assertions
    fn is_min_heap(&self) -> bool {
        if self.heap[0].is_some() {
            return false;
        }
        if self.heap[1..=self.size].iter().any(|key| key.is_none()) {
            return false;
        }
        if self.heap[self.size + 1..].iter().any(|key| key.is_some()) {
            return false;
        }
        (2..=self.size).all(|k| !self.greater(k / 2, k))
    }
}

/// unit-tests for the plain priority queue
#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::queue::MinPriorityQueue;
    use crate::util::error::Error;

    #[test]
    fn extract_in_order() {
        let mut queue = MinPriorityQueue::new();
        for key in vec![5, 3, 9, 1, 7, 3] {
            queue.insert(key);
        }

        assert_eq!(queue.len(), 6);
        assert_eq!(queue.peek_min(), Ok(&1));

        let mut extracted = Vec::new();
        while !queue.is_empty() {
            extracted.push(queue.extract_min().unwrap());
        }
        assert_eq!(extracted, vec![1, 3, 3, 5, 7, 9]);
    }

    #[test]
    fn underflow() {
        let mut queue: MinPriorityQueue<u32> = MinPriorityQueue::new();

        assert_eq!(queue.peek_min(), Err(Error::QueueUnderflow));
        assert_eq!(queue.extract_min(), Err(Error::QueueUnderflow));

        queue.insert(4);
        queue.extract_min().unwrap();
        assert_eq!(queue.extract_min(), Err(Error::QueueUnderflow));
    }

    #[test]
    fn grows_and_shrinks() {
        let mut queue = MinPriorityQueue::with_capacity(1);
        for key in 0..64 {
            queue.insert(64 - key);
        }
        assert!(queue.capacity() >= 64);

        for _ in 0..60 {
            queue.extract_min().unwrap();
        }
        assert!(queue.capacity() < 64);
        assert_eq!(queue.into_sorted_vec(), vec![61, 62, 63, 64]);
    }

    #[test]
    fn float_keys() {
        let mut queue = MinPriorityQueue::new();
        queue.insert((2.5, 1u64));
        queue.insert((0.5, 7u64));
        queue.insert((2.5, 0u64));

        assert_eq!(queue.extract_min(), Ok((0.5, 7)));
        assert_eq!(queue.extract_min(), Ok((2.5, 0)));
        assert_eq!(queue.extract_min(), Ok((2.5, 1)));
    }

    #[test]
    fn random_keys_sorted() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut keys: Vec<i32> = (0..500).map(|_| rng.gen_range(-1000..1000)).collect();

        let mut queue = MinPriorityQueue::new();
        for key in keys.iter() {
            queue.insert(*key);
        }
        keys.sort();

        assert_eq!(queue.into_sorted_vec(), keys);
    }
}

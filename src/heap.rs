/// Anything the queue can order by weight.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    // Equal weights fall back to insertion order.
    fn key(&self) -> (u64, u64) {
        (self.weight, self.seq)
    }
}

/// Binary min-heap ordered by `(weight, insertion sequence)`.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    elements: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T: Weighted> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, item: T) {
        let entry = Entry {
            weight: item.weight(),
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;
        self.elements.push(entry);

        let mut current = self.elements.len() - 1;
        while current > 0 {
            let parent = (current - 1) / 2;
            if self.elements[parent].key() <= self.elements[current].key() {
                break;
            }
            self.elements.swap(current, parent);
            current = parent;
        }
        debug_assert!(self.is_heap());
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.elements.len() <= 1 {
            return self.elements.pop().map(|entry| entry.item);
        }

        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let root = self.elements.pop().map(|entry| entry.item);
        self.heapify(0);
        root
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first().map(|entry| &entry.item)
    }

    fn heapify(&mut self, mut index: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.elements[left].key() < self.elements[smallest].key() {
                smallest = left;
            }
            if right < len && self.elements[right].key() < self.elements[smallest].key() {
                smallest = right;
            }
            if smallest == index {
                return;
            }
            self.elements.swap(index, smallest);
            index = smallest;
        }
    }

    /// Checks the min-heap ordering over every parent/child pair.
    pub fn is_heap(&self) -> bool {
        (1..self.elements.len()).all(|i| self.elements[(i - 1) / 2].key() <= self.elements[i].key())
    }
}

impl<T: Weighted> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

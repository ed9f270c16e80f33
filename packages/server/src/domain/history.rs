//! Bounded history of recent chat lines.

/// Fixed-capacity ring buffer that always keeps the latest `capacity` items.
///
/// Pushing onto a full buffer overwrites the oldest item. [`HistoryBuffer::all`]
/// returns the items oldest first regardless of wrap-around. A capacity of
/// zero keeps nothing, which is how history is disabled.
///
/// The buffer has no internal locking; it is owned by the coordinator task.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    items: Vec<T>,
    capacity: usize,
    /// Slot the next push overwrites once the buffer is full; also the oldest item
    next: usize,
}

impl<T: Clone> HistoryBuffer<T> {
    /// Create an empty buffer holding at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    /// Append an item, evicting the oldest one when full
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() < self.capacity {
            self.items.push(item);
            return;
        }
        self.items[self.next] = item;
        self.next = (self.next + 1) % self.capacity;
    }

    /// All items in chronological order (oldest first)
    pub fn all(&self) -> Vec<T> {
        let (newer, older) = self.items.split_at(self.next);
        older.iter().chain(newer.iter()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

use std::collections::HashMap;
use std::hash::Hash;

/// Trait implemented by heap entries that carry a unique identity.
///
/// The identity is what [`IndexedHeap::remove`] keys on. It must be
/// unique among the entries stored in one heap and must not change
/// while the entry is stored.
pub trait Identified {
    /// Type of the identity key.
    type Id: Copy + Eq + Hash;

    /// Returns the identity of this entry.
    fn id(&self) -> Self::Id;
}

/// A binary max-heap that additionally maintains an id → slot index,
/// allowing any entry to be located and removed in `O(log n)` without
/// draining the heap.
///
/// [`pop`](IndexedHeap::pop) returns the greatest entry according to
/// the entry's [`Ord`]. For a min-queue, invert the comparator in the
/// entry type.
///
/// # Panics
///
/// [`push`](IndexedHeap::push) panics when an entry with the same id is
/// already stored; the caller is responsible for uniqueness.
pub struct IndexedHeap<T: Ord + Identified> {
    entries: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Ord + Identified + std::fmt::Debug> std::fmt::Debug for IndexedHeap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<T: Ord + Identified> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Ord + Identified> IndexedHeap<T> {
    /// Constructs a new empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Returns the greatest entry without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Inserts `entry`, keeping the heap order.
    pub fn push(&mut self, entry: T) {
        assert!(
            !self.index.contains_key(&entry.id()),
            "duplicate id pushed to indexed heap"
        );
        let slot = self.entries.len();
        self.index.insert(entry.id(), slot);
        self.entries.push(entry);
        self.sift_up(slot);
    }

    /// Removes and returns the greatest entry, or `None` if the heap is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.remove_at(0))
        }
    }

    /// Removes and returns the entry with identity `id`, or `None` if
    /// no such entry is stored.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        self.index.get(&id).copied().map(|slot| self.remove_at(slot))
    }

    /// Keeps only the entries for which `keep` returns `true`, then
    /// restores the heap order in `O(n)`.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.entries.retain(keep);
        self.reindex();
    }

    /// Replaces the contents with `entries`, restoring the heap order
    /// in `O(n)`.
    pub fn rebuild<I: IntoIterator<Item = T>>(&mut self, entries: I) {
        self.entries = entries.into_iter().collect();
        self.reindex();
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.id(), slot))
            .collect();
        assert_eq!(
            self.index.len(),
            self.entries.len(),
            "duplicate id in indexed heap rebuild"
        );
        for slot in (0..self.entries.len() / 2).rev() {
            self.sift_down(slot);
        }
    }

    fn remove_at(&mut self, slot: usize) -> T {
        let last = self.entries.len() - 1;
        self.entries.swap(slot, last);
        let entry = self.entries.pop().expect("slot index out of bounds");
        self.index.remove(&entry.id());
        if slot < self.entries.len() {
            self.index.insert(self.entries[slot].id(), slot);
            self.sift_down(slot);
            self.sift_up(slot);
        }
        entry
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.index.insert(self.entries[a].id(), a);
        self.index.insert(self.entries[b].id(), b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot] <= self.entries[parent] {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let mut greatest = slot;
            for child in [2 * slot + 1, 2 * slot + 2] {
                if child < self.entries.len() && self.entries[child] > self.entries[greatest] {
                    greatest = child;
                }
            }
            if greatest == slot {
                return;
            }
            self.swap(slot, greatest);
            slot = greatest;
        }
    }
}

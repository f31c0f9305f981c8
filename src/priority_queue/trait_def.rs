use crate::{entry::Entry, error::Result};

/// A collection of key/value entries from which the entry with the minimal
/// key (under the queue's comparator) can be retrieved.
pub trait PriorityQueue<K, V> {
    /// The value returned by [`Self::insert`]; the adaptable queue hands out
    /// a locator here, the plain queue nothing.
    type Locator;

    /// Gets the number of entries in the queue.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a new entry.  Fails with
    /// [`GraphError::IncompatibleKey`](crate::GraphError::IncompatibleKey) if
    /// `key` cannot be compared with itself.
    fn insert(&mut self, key: K, value: V) -> Result<Self::Locator>;

    /// Gets the entry with the minimal key without removing it.
    fn min(&self) -> Option<&Entry<K, V>>;

    /// Removes and returns the entry with the minimal key.
    fn remove_min(&mut self) -> Option<Entry<K, V>>;
}

/// A priority queue whose entries can be located after insertion, and then
/// removed or re-keyed in O(log n).
///
/// All methods fail with
/// [`GraphError::InvalidHandle`](crate::GraphError::InvalidHandle) when the
/// locator was issued by another queue or its entry has already left the
/// queue.
pub trait AdaptablePriorityQueue<K, V>: PriorityQueue<K, V> {
    /// Gets the entry identified by `locator`.
    fn get(&self, locator: Self::Locator) -> Result<&Entry<K, V>>;

    /// Removes the entry identified by `locator`.
    fn remove(&mut self, locator: Self::Locator) -> Result<Entry<K, V>>;

    /// Replaces the key of an entry, restoring heap order.  Returns the old
    /// key.
    fn replace_key(&mut self, locator: Self::Locator, key: K) -> Result<K>;

    /// Replaces the value of an entry.  Returns the old value.
    fn replace_value(&mut self, locator: Self::Locator, value: V) -> Result<V>;
}

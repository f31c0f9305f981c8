use std::{cmp::Ordering, fmt::Debug, marker::PhantomData};

use derivative::Derivative;

use super::{
    AdaptablePriorityQueue, Comparator, NaturalOrder, PriorityQueue, check_key, heap::SiftHeap,
};
use crate::{
    entry::Entry,
    error::{GraphError, HandleKind, Result},
    instance_id::InstanceId,
    slot_vec::{SlotKey, SlotVec},
    tracing_support::debug,
};

/// A locator for an entry of a [`HeapAdaptablePriorityQueue`].  It follows
/// its entry through every sift, and goes stale once the entry is removed.
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = ""),
    Debug(bound = "")
)]
pub struct EntryId<K, V> {
    owner: InstanceId,
    token: SlotKey,
    #[derivative(Debug = "ignore")]
    marker: PhantomData<fn() -> (K, V)>,
}

struct HeapItem<K, V> {
    entry: Entry<K, V>,
    token: SlotKey,
}

/// A binary min-heap whose entries can be removed or re-keyed in place.
///
/// Every entry owns a token in a side table that records its current heap
/// index; the table is updated on each swap, so finding an entry from its
/// [`EntryId`] is O(1).
pub struct HeapAdaptablePriorityQueue<K, V, C = NaturalOrder> {
    heap: Vec<HeapItem<K, V>>,
    index: SlotVec<usize>,
    comparator: C,
    id: InstanceId,
}

impl<K, V, C> HeapAdaptablePriorityQueue<K, V, C>
where
    C: Comparator<K>,
{
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::with_comparator(C::default())
    }

    pub fn with_comparator(comparator: C) -> Self {
        Self {
            heap: Vec::new(),
            index: SlotVec::new(),
            comparator,
            id: InstanceId::new(),
        }
    }

    /// Tests whether `locator` still identifies an entry of this queue.
    pub fn contains(&self, locator: EntryId<K, V>) -> bool {
        self.locate(locator).is_ok()
    }

    /// Iterates over the entries in heap order, which is not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.heap.iter().map(|item| &item.entry)
    }

    fn locate(&self, locator: EntryId<K, V>) -> Result<usize> {
        let invalid = GraphError::InvalidHandle(HandleKind::Entry);
        if locator.owner != self.id {
            return Err(invalid);
        }
        match self.index.get(locator.token) {
            Some(&j) if self.heap.get(j).is_some_and(|item| item.token == locator.token) => Ok(j),
            _ => Err(invalid),
        }
    }

    /// Takes the item at `j` out of the heap by swapping it with the last one.
    fn take_at(&mut self, j: usize) -> Option<Entry<K, V>> {
        let last = self.heap.len().checked_sub(1)?;
        if j != last {
            self.swap_at(j, last);
        }
        let item = self.heap.pop()?;
        self.index.remove(item.token);
        if j < self.heap.len() {
            if let Err(err) = self.bubble(j) {
                debug!(%err, index = j, "removal left incomparable keys unsifted");
            }
        }
        Some(item.entry)
    }
}

impl<K, V, C> SiftHeap for HeapAdaptablePriorityQueue<K, V, C>
where
    C: Comparator<K>,
{
    fn heap_len(&self) -> usize {
        self.heap.len()
    }

    fn compare_at(&self, i: usize, j: usize) -> Option<Ordering> {
        self.comparator
            .compare(self.heap[i].entry.key(), self.heap[j].entry.key())
    }

    fn swap_at(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        for k in [i, j] {
            if let Some(slot) = self.index.get_mut(self.heap[k].token) {
                *slot = k;
            }
        }
    }
}

impl<K, V, C> PriorityQueue<K, V> for HeapAdaptablePriorityQueue<K, V, C>
where
    C: Comparator<K>,
{
    type Locator = EntryId<K, V>;

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn insert(&mut self, key: K, value: V) -> Result<EntryId<K, V>> {
        check_key(&self.comparator, &key)?;
        let j = self.heap.len();
        let token = self.index.insert(j);
        self.heap.push(HeapItem {
            entry: Entry::new(key, value),
            token,
        });
        if let Err(err) = self.upheap(j) {
            self.heap.pop();
            self.index.remove(token);
            return Err(err);
        }
        Ok(EntryId {
            owner: self.id,
            token,
            marker: PhantomData,
        })
    }

    fn min(&self) -> Option<&Entry<K, V>> {
        self.heap.first().map(|item| &item.entry)
    }

    fn remove_min(&mut self) -> Option<Entry<K, V>> {
        self.take_at(0)
    }
}

impl<K, V, C> AdaptablePriorityQueue<K, V> for HeapAdaptablePriorityQueue<K, V, C>
where
    C: Comparator<K>,
{
    fn get(&self, locator: EntryId<K, V>) -> Result<&Entry<K, V>> {
        let j = self.locate(locator)?;
        Ok(&self.heap[j].entry)
    }

    fn remove(&mut self, locator: EntryId<K, V>) -> Result<Entry<K, V>> {
        let j = self.locate(locator)?;
        self.take_at(j)
            .ok_or(GraphError::InvalidHandle(HandleKind::Entry))
    }

    fn replace_key(&mut self, locator: EntryId<K, V>, key: K) -> Result<K> {
        let j = self.locate(locator)?;
        check_key(&self.comparator, &key)?;
        let old = self.heap[j].entry.replace_key(key);
        match self.bubble(j) {
            Ok(()) => Ok(old),
            Err(err) => {
                // The failed sift put the entry back at `j`.
                self.heap[j].entry.replace_key(old);
                Err(err)
            }
        }
    }

    fn replace_value(&mut self, locator: EntryId<K, V>, value: V) -> Result<V> {
        let j = self.locate(locator)?;
        Ok(self.heap[j].entry.replace_value(value))
    }
}

impl<K, V, C> Default for HeapAdaptablePriorityQueue<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug, C> Debug for HeapAdaptablePriorityQueue<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.heap.iter().map(|item| (item.entry.key(), item.entry.value())))
            .finish()
    }
}

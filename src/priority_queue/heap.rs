use std::{cmp::Ordering, fmt::Debug};

use super::{Comparator, NaturalOrder, PriorityQueue, check_key};
use crate::{
    entry::Entry,
    error::{GraphError, Result},
    tracing_support::debug,
};

fn parent(j: usize) -> usize {
    (j - 1) / 2
}

fn left(j: usize) -> usize {
    2 * j + 1
}

fn right(j: usize) -> usize {
    2 * j + 2
}

/// Sift operations shared by the array-backed heaps.  Implementors supply
/// positional comparison and swapping; the adaptable heap uses the swap hook
/// to keep its locators current.
///
/// A sift that meets two keys the comparator cannot order undoes its own
/// swaps and fails with [`GraphError::IncompatibleKey`], so the heap is left
/// exactly as it was before the call.
pub(super) trait SiftHeap {
    fn heap_len(&self) -> usize;

    /// Compares the keys stored at heap indices `i` and `j`.
    fn compare_at(&self, i: usize, j: usize) -> Option<Ordering>;

    fn swap_at(&mut self, i: usize, j: usize);

    /// Replays `swaps` backwards and reports the incomparable pair.
    fn abort_sift(&mut self, swaps: &[(usize, usize)]) -> Result<()> {
        for &(i, j) in swaps.iter().rev() {
            self.swap_at(i, j);
        }
        Err(GraphError::IncompatibleKey)
    }

    fn upheap(&mut self, mut j: usize) -> Result<()> {
        let mut swaps = Vec::new();
        while j > 0 {
            let p = parent(j);
            match self.compare_at(j, p) {
                Some(Ordering::Less) => {
                    self.swap_at(j, p);
                    swaps.push((j, p));
                    j = p;
                }
                Some(_) => break,
                None => return self.abort_sift(&swaps),
            }
        }
        Ok(())
    }

    fn downheap(&mut self, mut j: usize) -> Result<()> {
        let len = self.heap_len();
        let mut swaps = Vec::new();
        while left(j) < len {
            let mut child = left(j);
            if right(j) < len {
                match self.compare_at(right(j), child) {
                    Some(Ordering::Less) => child = right(j),
                    Some(_) => {}
                    None => return self.abort_sift(&swaps),
                }
            }
            match self.compare_at(child, j) {
                Some(Ordering::Less) => {
                    self.swap_at(j, child);
                    swaps.push((j, child));
                    j = child;
                }
                Some(_) => break,
                None => return self.abort_sift(&swaps),
            }
        }
        Ok(())
    }

    /// Moves the entry at `j` up or down, whichever restores order.
    fn bubble(&mut self, j: usize) -> Result<()> {
        if j == 0 {
            return self.downheap(j);
        }
        match self.compare_at(j, parent(j)) {
            Some(Ordering::Less) => self.upheap(j),
            Some(_) => self.downheap(j),
            None => Err(GraphError::IncompatibleKey),
        }
    }

    /// Bottom-up heap construction in O(n).  Stops at the first incomparable
    /// pair; sifts that already finished are kept.
    fn heapify(&mut self) -> Result<()> {
        let len = self.heap_len();
        if len > 1 {
            for j in (0..=parent(len - 1)).rev() {
                self.downheap(j)?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap_len()).all(|j| self.compare_at(j, parent(j)) != Some(Ordering::Less))
    }
}

/// A binary min-heap of [`Entry`] values stored in a `Vec`.
///
/// Keys are ordered by the comparator `C`, which defaults to the keys'
/// natural order.  Entries with equal keys leave the queue in unspecified
/// order.
#[derive(Clone)]
pub struct HeapPriorityQueue<K, V, C = NaturalOrder> {
    heap: Vec<Entry<K, V>>,
    comparator: C,
}

impl<K, V, C> HeapPriorityQueue<K, V, C>
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
            comparator,
        }
    }

    /// Builds a queue from parallel sequences of keys and values using
    /// bottom-up construction.  Extra items in the longer sequence are
    /// ignored.
    pub fn from_keys_values<KI, VI>(keys: KI, values: VI) -> Result<Self>
    where
        C: Default,
        KI: IntoIterator<Item = K>,
        VI: IntoIterator<Item = V>,
    {
        Self::from_keys_values_with_comparator(keys, values, C::default())
    }

    pub fn from_keys_values_with_comparator<KI, VI>(
        keys: KI,
        values: VI,
        comparator: C,
    ) -> Result<Self>
    where
        KI: IntoIterator<Item = K>,
        VI: IntoIterator<Item = V>,
    {
        let heap = keys
            .into_iter()
            .zip(values)
            .map(|(key, value)| {
                check_key(&comparator, &key)?;
                Ok(Entry::new(key, value))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut queue = Self { heap, comparator };
        queue.heapify()?;
        Ok(queue)
    }

    /// Iterates over the entries in heap order, which is not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.heap.iter()
    }

    /// Consumes the queue, returning its entries from smallest key to
    /// largest.
    pub fn into_sorted_vec(mut self) -> Vec<Entry<K, V>> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Some(entry) = self.remove_min() {
            sorted.push(entry);
        }
        sorted
    }
}

impl<K, V, C> SiftHeap for HeapPriorityQueue<K, V, C>
where
    C: Comparator<K>,
{
    fn heap_len(&self) -> usize {
        self.heap.len()
    }

    fn compare_at(&self, i: usize, j: usize) -> Option<Ordering> {
        self.comparator
            .compare(self.heap[i].key(), self.heap[j].key())
    }

    fn swap_at(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
    }
}

impl<K, V, C> PriorityQueue<K, V> for HeapPriorityQueue<K, V, C>
where
    C: Comparator<K>,
{
    type Locator = ();

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        check_key(&self.comparator, &key)?;
        self.heap.push(Entry::new(key, value));
        if let Err(err) = self.upheap(self.heap.len() - 1) {
            self.heap.pop();
            return Err(err);
        }
        Ok(())
    }

    fn min(&self) -> Option<&Entry<K, V>> {
        self.heap.first()
    }

    fn remove_min(&mut self) -> Option<Entry<K, V>> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap_at(0, last);
        let entry = self.heap.pop();
        if let Err(err) = self.downheap(0) {
            debug!(%err, "remove_min left incomparable keys unsifted");
        }
        entry
    }
}

impl<K, V, C> Default for HeapPriorityQueue<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug, C> Debug for HeapPriorityQueue<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.heap.iter().map(|e| (e.key(), e.value())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{
        GraphError,
        priority_queue::{
            FnComparator, ReverseOrder,
            test::{FamilyOrder, Reading},
        },
    };

    #[test]
    fn test_empty() {
        let mut queue = HeapPriorityQueue::<i32, ()>::new();
        assert!(queue.is_empty());
        assert_eq!(queue.min(), None);
        assert_eq!(queue.remove_min(), None);
    }

    #[test]
    fn test_insert_and_remove_min() {
        let mut queue = HeapPriorityQueue::<_, _>::new();
        for (k, v) in [(5, 'A'), (9, 'C'), (3, 'B'), (7, 'Q')] {
            queue.insert(k, v).unwrap();
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.min().map(|e| *e.key()), Some(3));
        let order: Vec<_> = std::iter::from_fn(|| queue.remove_min())
            .map(|e| e.into_parts())
            .collect();
        assert_eq!(order, vec![(3, 'B'), (5, 'A'), (7, 'Q'), (9, 'C')]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_nan_key_is_rejected() {
        let mut queue = HeapPriorityQueue::<_, _>::new();
        queue.insert(1.5, "a").unwrap();
        assert_eq!(queue.insert(f64::NAN, "b"), Err(GraphError::IncompatibleKey));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_incomparable_insert_is_undone() {
        let mut queue = HeapPriorityQueue::<_, _>::new();
        queue.insert(Reading::Celsius(5), "noon").unwrap();
        assert_eq!(
            queue.insert(Reading::Fahrenheit(0), "night"),
            Err(GraphError::IncompatibleKey)
        );
        assert_eq!(queue.len(), 1);
        queue.insert(Reading::Celsius(1), "dawn").unwrap();
        let keys: Vec<_> = queue.into_sorted_vec().into_iter().map(|e| *e.key()).collect();
        assert_eq!(keys, vec![Reading::Celsius(1), Reading::Celsius(5)]);
    }

    #[test]
    fn test_incomparable_insert_restores_swaps() {
        // (2, 3) swaps past (0, 5) and then meets (1, 0).
        let mut queue = HeapPriorityQueue::<(u8, i32), (), _>::with_comparator(FamilyOrder);
        for key in [(1, 0), (0, 5), (1, 7)] {
            queue.insert(key, ()).unwrap();
        }
        queue.insert((0, 9), ()).unwrap();
        let before: Vec<_> = queue.iter().map(|e| *e.key()).collect();
        assert_eq!(queue.insert((2, 3), ()), Err(GraphError::IncompatibleKey));
        let after: Vec<_> = queue.iter().map(|e| *e.key()).collect();
        assert_eq!(before, after);
        assert!(queue.is_heap());
    }

    #[test]
    fn test_from_keys_values_rejects_mixed_scales() {
        let result = HeapPriorityQueue::<_, _>::from_keys_values(
            [Reading::Celsius(3), Reading::Fahrenheit(40), Reading::Celsius(1)],
            0..3,
        );
        assert!(matches!(result, Err(GraphError::IncompatibleKey)));
    }

    #[test]
    fn test_from_keys_values() {
        let queue =
            HeapPriorityQueue::<_, _>::from_keys_values([4, 1, 3, 2, 16, 9, 10], "abcdefg".chars())
                .unwrap();
        assert!(queue.is_heap());
        assert_eq!(queue.min().map(|e| (*e.key(), *e.value())), Some((1, 'b')));
        let keys: Vec<_> = queue.into_sorted_vec().into_iter().map(|e| *e.key()).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 9, 10, 16]);
    }

    #[test]
    fn test_from_keys_values_rejects_nan() {
        let result = HeapPriorityQueue::<f64, u8>::from_keys_values([1.0, f64::NAN], [0, 1]);
        assert!(matches!(result, Err(GraphError::IncompatibleKey)));
    }

    #[test]
    fn test_reverse_order_is_max_heap() {
        let mut queue = HeapPriorityQueue::<_, _, ReverseOrder>::new();
        for k in [2, 8, 5] {
            queue.insert(k, ()).unwrap();
        }
        assert_eq!(queue.remove_min().map(|e| *e.key()), Some(8));
    }

    #[test]
    fn test_fn_comparator() {
        let mut queue =
            HeapPriorityQueue::with_comparator(FnComparator(|a: &String, b: &String| {
                a.len().cmp(&b.len())
            }));
        queue.insert("three".to_string(), 3).unwrap();
        queue.insert("one".to_string(), 1).unwrap();
        queue.insert("eleven".to_string(), 11).unwrap();
        assert_eq!(queue.remove_min().map(|e| *e.value()), Some(1));
        assert_eq!(queue.remove_min().map(|e| *e.value()), Some(3));
    }

    #[quickcheck]
    fn prop_drains_in_sorted_order(keys: Vec<i32>) -> bool {
        let mut queue = HeapPriorityQueue::<_, _>::new();
        for &k in &keys {
            queue.insert(k, ()).unwrap();
            if !queue.is_heap() {
                return false;
            }
        }
        let drained: Vec<_> = queue.into_sorted_vec().into_iter().map(|e| *e.key()).collect();
        let mut expected = keys;
        expected.sort();
        drained == expected
    }

    #[quickcheck]
    fn prop_heapify_matches_inserts(keys: Vec<i16>) -> bool {
        let values = 0..keys.len();
        let queue = HeapPriorityQueue::<_, _>::from_keys_values(keys.clone(), values).unwrap();
        let mut expected = keys;
        expected.sort();
        queue.is_heap()
            && queue
                .into_sorted_vec()
                .into_iter()
                .map(|e| *e.key())
                .eq(expected)
    }
}

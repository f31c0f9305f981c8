mod adaptable;
mod comparator;
mod heap;
mod trait_def;

pub use adaptable::{EntryId, HeapAdaptablePriorityQueue};
pub use comparator::{Comparator, FnComparator, NaturalOrder, ReverseOrder};
pub use heap::HeapPriorityQueue;
pub use trait_def::{AdaptablePriorityQueue, PriorityQueue};

use crate::error::{GraphError, Result};

/// Rejects a key that does not compare equal to itself under `comparator`,
/// such as a NaN float under [`NaturalOrder`].  Admitting one would silently
/// corrupt the heap order.
fn check_key<K, C: Comparator<K>>(comparator: &C, key: &K) -> Result<()> {
    match comparator.compare(key, key) {
        Some(std::cmp::Ordering::Equal) => Ok(()),
        _ => Err(GraphError::IncompatibleKey),
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use quickcheck::{Arbitrary, Gen};

    use super::Comparator;

    /// A temperature reading.  Readings on different scales are not
    /// comparable with each other.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum Reading {
        Celsius(i32),
        Fahrenheit(i32),
    }

    impl PartialOrd for Reading {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            match (self, other) {
                (Reading::Celsius(a), Reading::Celsius(b))
                | (Reading::Fahrenheit(a), Reading::Fahrenheit(b)) => a.partial_cmp(b),
                _ => None,
            }
        }
    }

    /// Orders `(family, key)` pairs by key.  Family 0 compares with every
    /// family; any other two distinct families are incomparable.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FamilyOrder;

    impl Comparator<(u8, i32)> for FamilyOrder {
        fn compare(&self, a: &(u8, i32), b: &(u8, i32)) -> Option<Ordering> {
            if a.0 == 0 || b.0 == 0 || a.0 == b.0 {
                Some(a.1.cmp(&b.1))
            } else {
                None
            }
        }
    }

    /// A scripted operation against a priority queue.  Indices are reduced
    /// modulo the number of live locators when the script is replayed.
    #[derive(Clone, Debug)]
    pub enum QueueOp {
        Insert(i16),
        RemoveMin,
        Remove(usize),
        ReplaceKey(usize, i16),
    }

    impl Arbitrary for QueueOp {
        fn arbitrary(g: &mut Gen) -> Self {
            match u8::arbitrary(g) % 6 {
                0 | 1 | 2 => QueueOp::Insert(i16::arbitrary(g)),
                3 => QueueOp::RemoveMin,
                4 => QueueOp::Remove(usize::arbitrary(g)),
                _ => QueueOp::ReplaceKey(usize::arbitrary(g), i16::arbitrary(g)),
            }
        }
    }
}

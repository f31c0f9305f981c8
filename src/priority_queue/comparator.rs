use std::cmp::Ordering;

/// A total or partial order on priority-queue keys.
///
/// Returning `None` means the two keys cannot be compared.  Queues reject a
/// key that does not compare equal to itself, and an insertion or key
/// replacement that meets an incomparable key is undone and reported as
/// [`IncompatibleKey`](crate::GraphError::IncompatibleKey).
pub trait Comparator<K> {
    fn compare(&self, a: &K, b: &K) -> Option<Ordering>;
}

/// Orders keys by their [`PartialOrd`] implementation; smallest key first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: PartialOrd> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        a.partial_cmp(b)
    }
}

/// Orders keys by the reverse of their [`PartialOrd`] implementation, turning
/// a min-queue into a max-queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<K: PartialOrd> Comparator<K> for ReverseOrder {
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        b.partial_cmp(a)
    }
}

/// Adapts a closure returning a total [`Ordering`] into a [`Comparator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FnComparator<F>(pub F);

impl<K, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        Some((self.0)(a, b))
    }
}

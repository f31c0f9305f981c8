#[cfg(not(feature = "unchecked"))]
use std::sync::atomic::{AtomicUsize, Ordering};

/// A global instance identifier counter for paranoia mode. We assume no two
/// containers will have the same identifier, and though it is technically
/// possible for this to overflow and wrap around, the only impact would be that
/// two different containers might share an `InstanceId`, causing false positives
/// when checking the ownership of a handle.
#[cfg(not(feature = "unchecked"))]
static INSTANCE_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A unique identifier for a container instance (a graph, a positional list or
/// an adaptable priority queue).  Handles carry the id of the container that
/// issued them so that a handle presented to the wrong container is rejected.
///
/// With the `unchecked` feature the id is zero-sized and every instance
/// compares equal; handles are then validated by liveness alone.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct InstanceId(#[cfg(not(feature = "unchecked"))] usize);

impl InstanceId {
    /// Create a new unique instance identifier.
    pub fn new() -> Self {
        #[cfg(feature = "unchecked")]
        {
            InstanceId()
        }
        #[cfg(not(feature = "unchecked"))]
        {
            let id = INSTANCE_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
            InstanceId(id)
        }
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(feature = "unchecked"))]
    fn test_ids_are_distinct() {
        let a = InstanceId::new();
        let b = InstanceId::new();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }
}

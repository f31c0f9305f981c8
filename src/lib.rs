//! Generic graph toolkit: an adjacency-list graph with validated handles, the
//! containers its algorithms run on (a positional list, an open-addressing
//! hash map, binary-heap priority queues) and breadth-first, depth-first and
//! Dijkstra traversals.

pub mod directedness;
pub mod entry;
pub mod error;
pub mod graph;
pub mod hash_map;
pub mod instance_id;
pub mod path;
pub mod positional_list;
pub mod prelude;
pub mod priority_queue;
pub mod search;
pub mod shortest_path;
pub mod slot_vec;
pub mod tracing_support;

#[cfg(test)]
mod test_util;

pub use directedness::Directedness;
pub use entry::Entry;
pub use error::{GraphError, HandleKind, Result};
pub use graph::{AdjacencyListGraph, EdgeId, VertexId};
pub use hash_map::ProbeHashMap;
pub use path::Path;
pub use positional_list::{Position, PositionalList};
pub use priority_queue::{
    AdaptablePriorityQueue, Comparator, EntryId, FnComparator, HeapAdaptablePriorityQueue,
    HeapPriorityQueue, NaturalOrder, PriorityQueue, ReverseOrder,
};
pub use search::{
    ForestMap, KnownSet, bfs_forest, bfs_forest_from, construct_path, dfs_complete, dfs_forest,
    dfs_forest_iterative, forest_roots,
};
pub use shortest_path::{
    Closeness, DistanceMap, closeness_centrality, dijkstra, dijkstra_with_weights,
};

pub use crate::directedness::Directedness;
pub use crate::error::{GraphError, HandleKind};
pub use crate::graph::{AdjacencyListGraph, EdgeId, VertexId};
pub use crate::hash_map::ProbeHashMap;
pub use crate::priority_queue::{AdaptablePriorityQueue, PriorityQueue};
pub use crate::search::{bfs_forest, dfs_complete, dfs_forest};
pub use crate::shortest_path::dijkstra;

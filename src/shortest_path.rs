//! Single-source shortest paths with Dijkstra's algorithm, and the closeness
//! centrality measure built on it.

use num_traits::{CheckedAdd, Zero};

use crate::{
    error::Result,
    graph::{AdjacencyListGraph, VertexId},
    hash_map::ProbeHashMap,
    priority_queue::{AdaptablePriorityQueue, HeapAdaptablePriorityQueue, PriorityQueue},
    tracing_support::{debug, debug_span, trace},
};

/// Settled vertices mapped to their shortest distance from the source.
pub type DistanceMap<V, E, W = u64> = ProbeHashMap<VertexId<V, E>, W>;

/// A tentative distance.  `Infinite` orders after every finite distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Distance<W> {
    Finite(W),
    Infinite,
}

/// Computes hop counts from `source` to every vertex reachable from it along
/// outgoing edges.  Unreachable vertices are absent from the result.
pub fn dijkstra<V, E>(
    graph: &AdjacencyListGraph<V, E>,
    source: VertexId<V, E>,
) -> Result<DistanceMap<V, E>> {
    dijkstra_with_weights(graph, source, |_| 1u64)
}

/// Computes shortest distances from `source`, weighing each edge by
/// `weight` applied to its element.  Weights must not be negative.  A vertex
/// whose distance would overflow `W` is treated as unreachable.
pub fn dijkstra_with_weights<V, E, W, F>(
    graph: &AdjacencyListGraph<V, E>,
    source: VertexId<V, E>,
    mut weight: F,
) -> Result<DistanceMap<V, E, W>>
where
    W: Zero + CheckedAdd + Ord + Copy,
    F: FnMut(&E) -> W,
{
    let _span = debug_span!("dijkstra", ?source).entered();
    graph.vertex(source)?;
    let mut queue = HeapAdaptablePriorityQueue::<Distance<W>, VertexId<V, E>>::new();
    let mut locators = ProbeHashMap::with_capacity(2 * graph.num_vertices() + 1);
    for v in graph.vertices() {
        let distance = if v == source {
            Distance::Finite(W::zero())
        } else {
            Distance::Infinite
        };
        locators.put(v, queue.insert(distance, v)?);
    }

    let mut cloud = DistanceMap::new();
    while let Some(entry) = queue.remove_min() {
        let (distance, u) = entry.into_parts();
        locators.remove(&u);
        // Everything left in the queue is unreachable.
        let Distance::Finite(du) = distance else {
            break;
        };
        cloud.put(u, du);
        for e in graph.outgoing_edges(u)? {
            let v = graph.opposite(u, e)?;
            let Some(&locator) = locators.get(&v) else {
                continue;
            };
            let candidate = du
                .checked_add(&weight(graph.edge(e)?))
                .map_or(Distance::Infinite, Distance::Finite);
            if candidate < *queue.get(locator)?.key() {
                queue.replace_key(locator, candidate)?;
                trace!(?v, "relaxed");
            }
        }
    }
    debug!(settled = cloud.len(), "dijkstra finished");
    Ok(cloud)
}

/// Closeness centrality of a vertex under hop-count distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Closeness {
    /// The sum of `1 / d` over every other vertex reachable at distance `d`.
    pub sum: f64,
    /// `sum` divided by the number of other vertices in the graph.
    pub normalized: f64,
}

pub fn closeness_centrality<V, E>(
    graph: &AdjacencyListGraph<V, E>,
    v: VertexId<V, E>,
) -> Result<Closeness> {
    let sum: f64 = dijkstra(graph, v)?
        .values()
        .filter(|&&d| d > 0)
        .map(|&d| 1.0 / d as f64)
        .sum();
    let others = graph.num_vertices().saturating_sub(1);
    let normalized = if others == 0 { 0.0 } else { sum / others as f64 };
    Ok(Closeness { sum, normalized })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphError, HandleKind, directedness::Directedness};

    fn four_cycle() -> (AdjacencyListGraph<char, ()>, Vec<VertexId<char, ()>>) {
        let mut graph = AdjacencyListGraph::undirected();
        let vs: Vec<_> = "ABCD".chars().map(|c| graph.insert_vertex(c)).collect();
        for i in 0..4 {
            graph.insert_edge(vs[i], vs[(i + 1) % 4], ()).unwrap();
        }
        (graph, vs)
    }

    #[test]
    fn test_four_cycle() {
        let (graph, vs) = four_cycle();
        let distances = dijkstra(&graph, vs[0]).unwrap();
        let found: Vec<_> = vs.iter().map(|v| distances.get(v).copied()).collect();
        assert_eq!(found, vec![Some(0), Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn test_unreachable_vertices_are_omitted() {
        let mut graph = AdjacencyListGraph::<char, ()>::directed();
        let a = graph.insert_vertex('a');
        let b = graph.insert_vertex('b');
        let c = graph.insert_vertex('c');
        graph.insert_edge(b, a, ()).unwrap();
        graph.insert_edge(a, c, ()).unwrap();
        let distances = dijkstra(&graph, a).unwrap();
        assert_eq!(distances.len(), 2);
        assert_eq!(distances.get(&c), Some(&1));
        assert!(!distances.contains_key(&b));
    }

    #[test]
    fn test_weighted() {
        // a -5-> b, a -1-> c -1-> d -1-> b
        let mut graph = AdjacencyListGraph::<char, u32>::new(Directedness::Directed);
        let [a, b, c, d] = ['a', 'b', 'c', 'd'].map(|x| graph.insert_vertex(x));
        graph.insert_edge(a, b, 5).unwrap();
        graph.insert_edge(a, c, 1).unwrap();
        graph.insert_edge(c, d, 1).unwrap();
        graph.insert_edge(d, b, 1).unwrap();
        let distances = dijkstra_with_weights(&graph, a, |&w| w).unwrap();
        assert_eq!(distances.get(&b), Some(&3));
        assert_eq!(distances.get(&d), Some(&2));
        let hops = dijkstra(&graph, a).unwrap();
        assert_eq!(hops.get(&b), Some(&1));
    }

    #[test]
    fn test_overflowing_distance_is_unreachable() {
        let mut graph = AdjacencyListGraph::<char, u64>::directed();
        let [a, b, c, d] = ['a', 'b', 'c', 'd'].map(|x| graph.insert_vertex(x));
        graph.insert_edge(a, b, u64::MAX).unwrap();
        graph.insert_edge(a, c, 1).unwrap();
        graph.insert_edge(c, d, u64::MAX).unwrap();
        let distances = dijkstra_with_weights(&graph, a, |&w| w).unwrap();
        assert_eq!(distances.get(&b), Some(&u64::MAX));
        assert_eq!(distances.get(&c), Some(&1));
        assert!(!distances.contains_key(&d));
        assert_eq!(distances.len(), 3);
    }

    #[test]
    fn test_invalid_source() {
        let (mut graph, vs) = four_cycle();
        graph.remove_vertex(vs[2]).unwrap();
        assert_eq!(
            dijkstra(&graph, vs[2]).err(),
            Some(GraphError::InvalidHandle(HandleKind::Vertex))
        );
    }

    #[test]
    fn test_closeness_centrality() {
        let (graph, vs) = four_cycle();
        let closeness = closeness_centrality(&graph, vs[0]).unwrap();
        assert_eq!(closeness.sum, 2.5);
        assert!((closeness.normalized - 2.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_closeness_of_lone_vertex() {
        let mut graph = AdjacencyListGraph::<(), ()>::undirected();
        let v = graph.insert_vertex(());
        assert_eq!(
            closeness_centrality(&graph, v),
            Ok(Closeness {
                sum: 0.0,
                normalized: 0.0
            })
        );
    }
}

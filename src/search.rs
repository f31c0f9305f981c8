//! Breadth-first and depth-first traversals that record a discovery forest.
//!
//! A forest maps every discovered vertex to the edge by which it was first
//! reached; traversal roots map to `None`.

use crate::{
    error::Result,
    graph::{AdjacencyListGraph, EdgeId, VertexId},
    hash_map::ProbeHashMap,
    path::Path,
    tracing_support::{debug, debug_span, trace},
};

/// Discovered vertices mapped to their discovery edges.
pub type ForestMap<V, E> = ProbeHashMap<VertexId<V, E>, Option<EdgeId<V, E>>>;

/// A set of vertices already reached by a traversal.
pub type KnownSet<V, E> = ProbeHashMap<VertexId<V, E>, ()>;

/// Runs a level-order traversal from `start` along outgoing edges.
///
/// Every reachable vertex is explored, but only those whose element satisfies
/// `predicate` are recorded in the returned forest.  The root is always
/// recorded, mapped to `None`.
pub fn bfs_forest<V, E, P>(
    graph: &AdjacencyListGraph<V, E>,
    start: VertexId<V, E>,
    predicate: P,
) -> Result<ForestMap<V, E>>
where
    P: FnMut(&V) -> bool,
{
    bfs_forest_from(graph, start, &mut KnownSet::new(), predicate)
}

/// Like [`bfs_forest`], but marks vertices in a caller-owned `known` set and
/// skips vertices already in it.  Running it from several starts with the
/// same set partitions the reached vertices between those starts.
pub fn bfs_forest_from<V, E, P>(
    graph: &AdjacencyListGraph<V, E>,
    start: VertexId<V, E>,
    known: &mut KnownSet<V, E>,
    mut predicate: P,
) -> Result<ForestMap<V, E>>
where
    P: FnMut(&V) -> bool,
{
    let _span = debug_span!("bfs", ?start).entered();
    graph.vertex(start)?;
    let mut forest = ForestMap::new();
    forest.put(start, None);
    known.put(start, ());
    let mut level = vec![start];
    while !level.is_empty() {
        let mut next_level = Vec::new();
        for &u in &level {
            for e in graph.outgoing_edges(u)? {
                let v = graph.opposite(u, e)?;
                if !known.contains_key(&v) {
                    known.put(v, ());
                    if predicate(graph.vertex(v)?) {
                        forest.put(v, Some(e));
                    }
                    next_level.push(v);
                }
            }
        }
        trace!(size = next_level.len(), "next level");
        level = next_level;
    }
    debug!(recorded = forest.len(), "bfs finished");
    Ok(forest)
}

/// Runs a recursive pre-order depth-first traversal from `start` along
/// outgoing edges.  Deep graphs may exhaust the call stack; see
/// [`dfs_forest_iterative`].
pub fn dfs_forest<V, E>(
    graph: &AdjacencyListGraph<V, E>,
    start: VertexId<V, E>,
) -> Result<ForestMap<V, E>> {
    let _span = debug_span!("dfs", ?start).entered();
    graph.vertex(start)?;
    let mut known = KnownSet::new();
    let mut forest = ForestMap::new();
    forest.put(start, None);
    dfs_visit(graph, start, &mut known, &mut forest)?;
    debug!(recorded = forest.len(), "dfs finished");
    Ok(forest)
}

fn dfs_visit<V, E>(
    graph: &AdjacencyListGraph<V, E>,
    u: VertexId<V, E>,
    known: &mut KnownSet<V, E>,
    forest: &mut ForestMap<V, E>,
) -> Result<()> {
    known.put(u, ());
    for e in graph.outgoing_edges(u)? {
        let v = graph.opposite(u, e)?;
        if !known.contains_key(&v) {
            forest.put(v, Some(e));
            dfs_visit(graph, v, known, forest)?;
        }
    }
    Ok(())
}

/// Produces the same forest as [`dfs_forest`] using an explicit stack.
pub fn dfs_forest_iterative<V, E>(
    graph: &AdjacencyListGraph<V, E>,
    start: VertexId<V, E>,
) -> Result<ForestMap<V, E>> {
    let _span = debug_span!("dfs_iterative", ?start).entered();
    let mut known = KnownSet::new();
    let mut forest = ForestMap::new();
    forest.put(start, None);
    dfs_walk(graph, start, &mut known, &mut forest)?;
    debug!(recorded = forest.len(), "dfs finished");
    Ok(forest)
}

/// Explores everything reachable from `start` that is not yet `known`, in the
/// same order as [`dfs_visit`], keeping pending adjacency iterators on the
/// heap instead of the call stack.
fn dfs_walk<V, E>(
    graph: &AdjacencyListGraph<V, E>,
    start: VertexId<V, E>,
    known: &mut KnownSet<V, E>,
    forest: &mut ForestMap<V, E>,
) -> Result<()> {
    known.put(start, ());
    let mut stack = vec![(start, graph.outgoing_edges(start)?)];
    while let Some((u, edges)) = stack.last_mut() {
        let u = *u;
        match edges.next() {
            Some(e) => {
                let v = graph.opposite(u, e)?;
                if !known.contains_key(&v) {
                    known.put(v, ());
                    forest.put(v, Some(e));
                    stack.push((v, graph.outgoing_edges(v)?));
                }
            }
            None => {
                stack.pop();
            }
        }
    }
    Ok(())
}

/// Runs a depth-first traversal from every vertex not yet discovered, in
/// registry order, visiting vertices as [`dfs_forest`] would.  Each traversal
/// contributes one root mapped to `None`.  Uses an explicit stack, so path
/// length is not limited by the call stack.
pub fn dfs_complete<V, E>(graph: &AdjacencyListGraph<V, E>) -> Result<ForestMap<V, E>> {
    let _span = debug_span!("dfs_complete").entered();
    let mut known = KnownSet::new();
    let mut forest = ForestMap::new();
    for u in graph.vertices() {
        if !known.contains_key(&u) {
            forest.put(u, None);
            dfs_walk(graph, u, &mut known, &mut forest)?;
        }
    }
    debug!(
        recorded = forest.len(),
        roots = forest_roots(&forest).count(),
        "dfs_complete finished"
    );
    Ok(forest)
}

/// Iterates over the roots of a forest.
pub fn forest_roots<V, E>(forest: &ForestMap<V, E>) -> impl Iterator<Item = VertexId<V, E>> + '_ {
    forest
        .iter()
        .filter(|(_, edge)| edge.is_none())
        .map(|(&v, _)| v)
}

/// Follows the discovery edges of `forest` back from `v` to `u`.
///
/// Returns `None` when `v` was not reached from `u` in the forest.  When
/// `u == v` the path is empty.
pub fn construct_path<V, E>(
    graph: &AdjacencyListGraph<V, E>,
    u: VertexId<V, E>,
    v: VertexId<V, E>,
    forest: &ForestMap<V, E>,
) -> Result<Option<Path<V, E>>> {
    graph.vertex(u)?;
    graph.vertex(v)?;
    let mut edges = Vec::new();
    let mut walk = v;
    while walk != u {
        match forest.get(&walk) {
            Some(&Some(e)) if edges.len() < forest.len() => {
                edges.push(e);
                walk = graph.opposite(walk, e)?;
            }
            _ => return Ok(None),
        }
    }
    edges.reverse();
    Path::from_edges(graph, u, edges).map(Some)
}

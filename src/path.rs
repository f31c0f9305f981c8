use std::iter::once;

use derivative::Derivative;

use crate::{
    error::{GraphError, Result},
    graph::{AdjacencyListGraph, EdgeId, VertexId},
};

/// A walk through an [`AdjacencyListGraph`], represented as a sequence of
/// vertices and the edges that connect them.
///
/// A path always has at least one vertex; a path of length zero is just its
/// start.
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = ""),
    Debug(bound = "")
)]
pub struct Path<V, E> {
    vertices: Vec<VertexId<V, E>>,
    edges: Vec<EdgeId<V, E>>,
}

impl<V, E> Path<V, E> {
    /// Creates a new path starting at the given vertex.
    pub fn new(start: VertexId<V, E>) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
        }
    }

    pub fn from_edges(
        graph: &AdjacencyListGraph<V, E>,
        start: VertexId<V, E>,
        edges: impl IntoIterator<Item = EdgeId<V, E>>,
    ) -> Result<Self> {
        let mut path = Self::new(start);
        for e in edges {
            path.push_edge(graph, e)?;
        }
        Ok(path)
    }

    pub fn first_vertex(&self) -> VertexId<V, E> {
        self.vertices[0]
    }

    pub fn last_vertex(&self) -> VertexId<V, E> {
        self.vertices[self.vertices.len() - 1]
    }

    /// Gets the number of edges in the path.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId<V, E>> + '_ {
        self.edges.iter().copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId<V, E>> + '_ {
        self.vertices.iter().copied()
    }

    /// Returns an iterator over the vertices in the path along with the edges
    /// connecting them.  Each item is a tuple of the form `(incoming_edge,
    /// vertex, outgoing_edge)`; the edges are `None` only for the first
    /// vertex's incoming edge and the last vertex's outgoing edge.
    pub fn vertices_with_edges(
        &self,
    ) -> impl Iterator<Item = (Option<EdgeId<V, E>>, VertexId<V, E>, Option<EdgeId<V, E>>)> + '_
    {
        let incoming = once(None).chain(self.edges().map(Some));
        let outgoing = self.edges().map(Some).chain(once(None));
        incoming
            .zip(self.vertices())
            .zip(outgoing)
            .map(|((in_edge, v), out_edge)| (in_edge, v, out_edge))
    }

    /// Extends the path along `e`, which must be incident to the current last
    /// vertex.  In a directed graph the edge must also leave that vertex.
    pub fn push_edge(&mut self, graph: &AdjacencyListGraph<V, E>, e: EdgeId<V, E>) -> Result<()> {
        let last = self.last_vertex();
        let (origin, _) = graph.end_vertices(e)?;
        if graph.is_directed() && origin != last {
            return Err(GraphError::NotIncident);
        }
        let next = graph.opposite(last, e)?;
        self.edges.push(e);
        self.vertices.push(next);
        Ok(())
    }

    /// Appends the edges of `other`, which must start where this path ends.
    pub fn extend_with(&mut self, graph: &AdjacencyListGraph<V, E>, other: &Path<V, E>) -> Result<()> {
        if other.first_vertex() != self.last_vertex() {
            return Err(GraphError::NotIncident);
        }
        let mut extended = self.clone();
        for e in other.edges() {
            extended.push_edge(graph, e)?;
        }
        *self = extended;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directedness::Directedness;

    type TestGraph = AdjacencyListGraph<&'static str, &'static str>;

    fn chain(directedness: Directedness) -> (TestGraph, Vec<VertexId<&'static str, &'static str>>) {
        let mut graph = TestGraph::new(directedness);
        let vs: Vec<_> = ["n1", "n2", "n3"]
            .into_iter()
            .map(|name| graph.insert_vertex(name))
            .collect();
        graph.insert_edge(vs[0], vs[1], "e12").unwrap();
        graph.insert_edge(vs[1], vs[2], "e23").unwrap();
        (graph, vs)
    }

    #[test]
    fn test_new_path() {
        let (_, vs) = chain(Directedness::Directed);
        let path = Path::new(vs[0]);
        assert_eq!(path.first_vertex(), vs[0]);
        assert_eq!(path.last_vertex(), vs[0]);
        assert!(path.is_empty());
    }

    #[test]
    fn test_vertices_with_edges() {
        let (graph, vs) = chain(Directedness::Directed);
        let es: Vec<_> = graph.edges().collect();
        let path = Path::from_edges(&graph, vs[0], es.clone()).unwrap();
        let mut iter = path.vertices_with_edges();
        assert_eq!(iter.next(), Some((None, vs[0], Some(es[0]))));
        assert_eq!(iter.next(), Some((Some(es[0]), vs[1], Some(es[1]))));
        assert_eq!(iter.next(), Some((Some(es[1]), vs[2], None)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_directed_edge_must_leave_last_vertex() {
        let (graph, vs) = chain(Directedness::Directed);
        let e12 = graph.get_edge(vs[0], vs[1]).unwrap().unwrap();
        let mut path = Path::new(vs[1]);
        assert_eq!(path.push_edge(&graph, e12), Err(GraphError::NotIncident));
        assert_eq!(path.len(), 0);
    }

    #[test]
    fn test_undirected_walks_backwards() {
        let (graph, vs) = chain(Directedness::Undirected);
        let es: Vec<_> = graph.edges().collect();
        let path = Path::from_edges(&graph, vs[2], es.into_iter().rev()).unwrap();
        assert_eq!(path.last_vertex(), vs[0]);
        assert_eq!(path.vertices().collect::<Vec<_>>(), vec![vs[2], vs[1], vs[0]]);
    }

    #[test]
    fn test_extend_with() {
        let (graph, vs) = chain(Directedness::Directed);
        let es: Vec<_> = graph.edges().collect();
        let mut first = Path::from_edges(&graph, vs[0], [es[0]]).unwrap();
        let second = Path::from_edges(&graph, vs[1], [es[1]]).unwrap();
        first.extend_with(&graph, &second).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.vertices().count(), 3);
        assert_eq!(first.extend_with(&graph, &second), Err(GraphError::NotIncident));
        assert_eq!(first.len(), 2);
    }
}

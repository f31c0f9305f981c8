//! An adjacency-list graph whose vertices and edges are addressed by
//! validated handles.
//!
//! Vertices and edges live in two [`PositionalList`] registries.  Each vertex
//! additionally owns the list of its outgoing edges and, in a directed graph,
//! a separate list of its incoming edges; in an undirected graph the single
//! list serves as both.  Every edge remembers its positions in those lists so
//! that removing it is O(1).

mod handles;

use std::fmt::Debug;

use derivative::Derivative;

pub use handles::{EdgeId, VertexId};

use crate::{
    directedness::Directedness,
    error::{GraphError, HandleKind, Result},
    positional_list::{Position, PositionalList},
    tracing_support::trace,
};

struct VertexRecord<V, E> {
    element: V,
    outgoing: PositionalList<EdgeId<V, E>>,
    incoming: Option<PositionalList<EdgeId<V, E>>>,
}

impl<V, E> VertexRecord<V, E> {
    fn incoming(&self) -> &PositionalList<EdgeId<V, E>> {
        self.incoming.as_ref().unwrap_or(&self.outgoing)
    }

    fn incoming_mut(&mut self) -> &mut PositionalList<EdgeId<V, E>> {
        match &mut self.incoming {
            Some(incoming) => incoming,
            None => &mut self.outgoing,
        }
    }
}

/// Where an edge sits in its endpoints' adjacency lists.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Copy(bound = ""))]
struct AdjacencyLinks<V, E> {
    outgoing: Position<EdgeId<V, E>>,
    incoming: Position<EdgeId<V, E>>,
}

struct EdgeRecord<V, E> {
    element: E,
    origin: VertexId<V, E>,
    destination: VertexId<V, E>,
    links: Option<AdjacencyLinks<V, E>>,
}

impl<V, E> EdgeRecord<V, E> {
    fn connects(&self, u: VertexId<V, E>, v: VertexId<V, E>, directedness: Directedness) -> bool {
        (self.origin == u && self.destination == v)
            || (!directedness.is_directed() && self.origin == v && self.destination == u)
    }
}

/// A graph stored as adjacency lists, with vertex elements of type `V` and
/// edge elements of type `E`.
///
/// At most one edge may join a given pair of vertices (in each direction, for
/// a directed graph).  Self-loops are allowed; in an undirected graph a
/// self-loop appears twice in its vertex's adjacency list, so it contributes
/// two to the vertex's degree.
///
/// Every operation validates the handles it is given before changing
/// anything, so a failed call leaves the graph untouched.
pub struct AdjacencyListGraph<V, E> {
    directedness: Directedness,
    vertices: PositionalList<VertexRecord<V, E>>,
    edges: PositionalList<EdgeRecord<V, E>>,
}

impl<V, E> AdjacencyListGraph<V, E> {
    pub fn new(directedness: Directedness) -> Self {
        Self {
            directedness,
            vertices: PositionalList::new(),
            edges: PositionalList::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(Directedness::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Directedness::Undirected)
    }

    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    pub fn is_directed(&self) -> bool {
        self.directedness.is_directed()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over the vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId<V, E>> + '_ {
        self.vertices.positions().map(VertexId::new)
    }

    /// Iterates over the edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId<V, E>> + '_ {
        self.edges.positions().map(EdgeId::new)
    }

    pub fn contains_vertex(&self, v: VertexId<V, E>) -> bool {
        self.vertices.contains(v.position)
    }

    pub fn contains_edge(&self, e: EdgeId<V, E>) -> bool {
        self.edges.contains(e.position)
    }

    fn vertex_record(&self, v: VertexId<V, E>) -> Result<&VertexRecord<V, E>> {
        self.vertices
            .get(v.position)
            .map_err(|_| GraphError::InvalidHandle(HandleKind::Vertex))
    }

    fn vertex_record_mut(&mut self, v: VertexId<V, E>) -> Result<&mut VertexRecord<V, E>> {
        self.vertices
            .get_mut(v.position)
            .map_err(|_| GraphError::InvalidHandle(HandleKind::Vertex))
    }

    fn edge_record(&self, e: EdgeId<V, E>) -> Result<&EdgeRecord<V, E>> {
        self.edges
            .get(e.position)
            .map_err(|_| GraphError::InvalidHandle(HandleKind::Edge))
    }

    /// Gets the element stored at a vertex.
    pub fn vertex(&self, v: VertexId<V, E>) -> Result<&V> {
        Ok(&self.vertex_record(v)?.element)
    }

    pub fn vertex_mut(&mut self, v: VertexId<V, E>) -> Result<&mut V> {
        Ok(&mut self.vertex_record_mut(v)?.element)
    }

    /// Gets the element stored at an edge.
    pub fn edge(&self, e: EdgeId<V, E>) -> Result<&E> {
        Ok(&self.edge_record(e)?.element)
    }

    pub fn edge_mut(&mut self, e: EdgeId<V, E>) -> Result<&mut E> {
        self.edges
            .get_mut(e.position)
            .map(|record| &mut record.element)
            .map_err(|_| GraphError::InvalidHandle(HandleKind::Edge))
    }

    /// Gets the `(origin, destination)` endpoints of an edge.
    pub fn end_vertices(&self, e: EdgeId<V, E>) -> Result<(VertexId<V, E>, VertexId<V, E>)> {
        let record = self.edge_record(e)?;
        Ok((record.origin, record.destination))
    }

    /// Gets the endpoint of `e` other than `v`.  For a self-loop that is `v`
    /// itself.
    pub fn opposite(&self, v: VertexId<V, E>, e: EdgeId<V, E>) -> Result<VertexId<V, E>> {
        self.vertex_record(v)?;
        let record = self.edge_record(e)?;
        if record.origin == v {
            Ok(record.destination)
        } else if record.destination == v {
            Ok(record.origin)
        } else {
            Err(GraphError::NotIncident)
        }
    }

    /// Counts the edges leaving `v`; for an undirected graph, the edges
    /// incident to it.
    pub fn out_degree(&self, v: VertexId<V, E>) -> Result<usize> {
        Ok(self.vertex_record(v)?.outgoing.len())
    }

    /// Counts the edges entering `v`; for an undirected graph, the edges
    /// incident to it.
    pub fn in_degree(&self, v: VertexId<V, E>) -> Result<usize> {
        Ok(self.vertex_record(v)?.incoming().len())
    }

    pub fn outgoing_edges(
        &self,
        v: VertexId<V, E>,
    ) -> Result<impl Iterator<Item = EdgeId<V, E>> + '_> {
        Ok(self.vertex_record(v)?.outgoing.iter().copied())
    }

    pub fn incoming_edges(
        &self,
        v: VertexId<V, E>,
    ) -> Result<impl Iterator<Item = EdgeId<V, E>> + '_> {
        Ok(self.vertex_record(v)?.incoming().iter().copied())
    }

    /// Finds the edge from `u` to `v`, or between them in either order for an
    /// undirected graph.  This scans the edge registry.
    pub fn get_edge(&self, u: VertexId<V, E>, v: VertexId<V, E>) -> Result<Option<EdgeId<V, E>>> {
        self.vertex_record(u)?;
        self.vertex_record(v)?;
        Ok(self
            .edges
            .positions()
            .find(|&p| {
                self.edges
                    .get(p)
                    .is_ok_and(|record| record.connects(u, v, self.directedness))
            })
            .map(EdgeId::new))
    }

    pub fn insert_vertex(&mut self, element: V) -> VertexId<V, E> {
        let incoming = self.directedness.is_directed().then(PositionalList::new);
        let v = VertexId::new(self.vertices.add_last(VertexRecord {
            element,
            outgoing: PositionalList::new(),
            incoming,
        }));
        trace!(?v, "inserted vertex");
        v
    }

    /// Inserts an edge from `u` to `v`.  Fails with
    /// [`GraphError::EdgeAlreadyExists`] if [`Self::get_edge`] already finds
    /// one.
    pub fn insert_edge(
        &mut self,
        u: VertexId<V, E>,
        v: VertexId<V, E>,
        element: E,
    ) -> Result<EdgeId<V, E>> {
        if self.get_edge(u, v)?.is_some() {
            return Err(GraphError::EdgeAlreadyExists);
        }
        let e = EdgeId::new(self.edges.add_last(EdgeRecord {
            element,
            origin: u,
            destination: v,
            links: None,
        }));
        let outgoing = self.vertex_record_mut(u)?.outgoing.add_last(e);
        let incoming = self.vertex_record_mut(v)?.incoming_mut().add_last(e);
        if let Ok(record) = self.edges.get_mut(e.position) {
            record.links = Some(AdjacencyLinks { outgoing, incoming });
        }
        trace!(?e, ?u, ?v, "inserted edge");
        Ok(e)
    }

    /// Removes an edge from the graph and both endpoints' adjacency lists,
    /// returning its element.
    pub fn remove_edge(&mut self, e: EdgeId<V, E>) -> Result<E> {
        let record = self
            .edges
            .remove(e.position)
            .map_err(|_| GraphError::InvalidHandle(HandleKind::Edge))?;
        if let Some(links) = record.links {
            if let Ok(origin) = self.vertices.get_mut(record.origin.position) {
                let removed = origin.outgoing.remove(links.outgoing);
                debug_assert!(removed.is_ok());
            }
            if let Ok(destination) = self.vertices.get_mut(record.destination.position) {
                let removed = destination.incoming_mut().remove(links.incoming);
                debug_assert!(removed.is_ok());
            }
        }
        trace!(?e, "removed edge");
        Ok(record.element)
    }

    /// Removes a vertex together with every edge incident to it, returning
    /// the vertex's element.
    pub fn remove_vertex(&mut self, v: VertexId<V, E>) -> Result<V> {
        let record = self.vertex_record(v)?;
        let mut incident: Vec<_> = record.outgoing.iter().copied().collect();
        if let Some(incoming) = &record.incoming {
            incident.extend(incoming.iter().copied());
        }
        for e in incident {
            // A self-loop is listed twice; the second copy is already gone.
            if self.contains_edge(e) {
                self.remove_edge(e)?;
            }
        }
        let record = self
            .vertices
            .remove(v.position)
            .map_err(|_| GraphError::InvalidHandle(HandleKind::Vertex))?;
        trace!(?v, "removed vertex");
        Ok(record.element)
    }
}

impl<V, E> Default for AdjacencyListGraph<V, E> {
    fn default() -> Self {
        Self::new(Directedness::default())
    }
}

impl<V: Debug, E: Debug> Debug for AdjacencyListGraph<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edges: Vec<_> = self
            .edges
            .iter()
            .map(|record| {
                let origin = self.vertices.get(record.origin.position).map(|r| &r.element);
                let destination = self
                    .vertices
                    .get(record.destination.position)
                    .map(|r| &r.element);
                (origin.ok(), destination.ok(), &record.element)
            })
            .collect();
        f.debug_struct("AdjacencyListGraph")
            .field("directedness", &self.directedness)
            .field(
                "vertices",
                &self.vertices.iter().map(|r| &r.element).collect::<Vec<_>>(),
            )
            .field("edges", &edges)
            .finish()
    }
}

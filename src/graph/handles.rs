use derivative::Derivative;

use super::{EdgeRecord, VertexRecord};
use crate::positional_list::Position;

/// A handle to a vertex of an
/// [`AdjacencyListGraph`](super::AdjacencyListGraph).
///
/// The handle wraps the vertex's position in the graph's vertex registry, so
/// it carries the identity of the graph that issued it and goes stale when
/// the vertex is removed.
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = ""),
    Debug(bound = "")
)]
pub struct VertexId<V, E> {
    pub(super) position: Position<VertexRecord<V, E>>,
}

/// A handle to an edge of an
/// [`AdjacencyListGraph`](super::AdjacencyListGraph).
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = ""),
    Debug(bound = "")
)]
pub struct EdgeId<V, E> {
    pub(super) position: Position<EdgeRecord<V, E>>,
}

impl<V, E> VertexId<V, E> {
    pub(super) fn new(position: Position<VertexRecord<V, E>>) -> Self {
        Self { position }
    }
}

impl<V, E> EdgeId<V, E> {
    pub(super) fn new(position: Position<EdgeRecord<V, E>>) -> Self {
        Self { position }
    }
}

use std::fmt;

/// The kind of handle that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Vertex,
    Edge,
    Position,
    Entry,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandleKind::Vertex => "vertex",
            HandleKind::Edge => "edge",
            HandleKind::Position => "position",
            HandleKind::Entry => "entry",
        })
    }
}

/// Errors raised by the graph, its positional lists and the priority queues.
///
/// Every variant is a contract violation by the caller.  Operations that
/// return one of these leave the structure they were called on unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The handle belongs to a different container, or the element it
    /// referred to has been removed.
    #[error("invalid {0} handle")]
    InvalidHandle(HandleKind),
    /// An edge already connects the two vertices.
    #[error("an edge already exists between the given vertices")]
    EdgeAlreadyExists,
    /// A priority queue key does not compare equal to itself.
    #[error("incompatible key")]
    IncompatibleKey,
    /// The vertex is not an endpoint of the edge.
    #[error("vertex is not incident to the edge")]
    NotIncident,
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

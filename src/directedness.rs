/// Whether the edges of a graph have a direction.
///
/// A directed graph keeps separate outgoing and incoming adjacency lists per
/// vertex.  An undirected graph keeps one list, which serves as both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Directedness {
    Directed,
    #[default]
    Undirected,
}

impl Directedness {
    pub fn is_directed(self) -> bool {
        self == Directedness::Directed
    }
}

impl From<bool> for Directedness {
    /// Converts an `is_directed` flag.
    fn from(is_directed: bool) -> Self {
        if is_directed {
            Directedness::Directed
        } else {
            Directedness::Undirected
        }
    }
}

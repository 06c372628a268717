use thiserror::Error;

/// Errors raised by the graph, the disjoint-set and the priority queues.
///
/// All variants indicate a mistake at the call site. A disconnected input graph is never an
/// error: spanning tree engines report it through their completeness flag instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument is outside of the accepted domain, e.g. a zero growth increment,
    /// an index beyond the capacity of an indexed queue, or a key change that does not
    /// strictly move the key in the requested direction
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// The referenced vertex, edge, disjoint-set element or queue index does not exist
    #[error("Element not found - {0}")]
    ElementNotFound(String),

    /// Extract or peek on an empty priority queue
    #[error("Priority queue underflow")]
    QueueUnderflow,

    /// The index is already associated with a key in an indexed priority queue
    #[error("Index {0} is already in the priority queue")]
    AlreadyPresent(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

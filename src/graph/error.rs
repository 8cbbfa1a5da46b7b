//! Errors raised by graph construction and queries.

/// Errors that can occur while building or querying a town graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("town {vertex} out of range for graph of size {size}")]
    VertexOutOfRange { vertex: usize, size: usize },
    #[error("edge {from} -> {to} has negative length {length}")]
    NegativeLength { from: usize, to: usize, length: i64 },
    #[error("matrix has {actual} entries, expected {expected}")]
    MatrixShape { expected: usize, actual: usize },
    #[error("town {vertex} lists {actual} edges, expected {expected}")]
    DegreeMismatch {
        vertex: usize,
        expected: usize,
        actual: usize,
    },
    #[error("total road length does not fit in u64")]
    LengthOverflow,
    #[error("adjacency list is not a simple chain: {0}")]
    NotAChain(&'static str),
}

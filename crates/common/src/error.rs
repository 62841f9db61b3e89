use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A network needs at least one vertex to have a source and a sink.
    #[error("Network must contain at least one vertex.")]
    EmptyNetwork,

    /// An edge tuple references a vertex outside `[0, vertex_count)`.
    #[error("Edge ({from}, {to}) references a vertex outside [0, {vertex_count}).")]
    InvalidEdge {
        from: usize,
        to: usize,
        vertex_count: usize,
    },

    /// The dense matrices for this many vertices cannot be allocated.
    #[error("Network with {0} vertices is too large to allocate.")]
    NetworkTooLarge(usize),

    /// Both `(from, to)` and `(to, from)` were supplied; the reverse residual
    /// edge of one would alias the other.
    #[error("Edges ({from}, {to}) and ({to}, {from}) are antiparallel.")]
    AntiparallelEdge { from: usize, to: usize },

    /// An edge tuple carries a capacity below zero.
    #[error("Edge ({from}, {to}) has negative capacity {capacity}.")]
    NegativeCapacity { from: usize, to: usize, capacity: i64 },

    /// Indicates an attempt to access a node index that exceeds the network size (N).
    #[error("Node index {0} is out of bounds.")]
    NodeIndexOutOfBounds(usize),

    /// Failed to trace the augmenting path, usually due to broken predecessor chains.
    #[error("Augmenting path reconstruction failed due to broken predecessor chain.")]
    PathReconstructionFailed,
}

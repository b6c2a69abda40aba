use thiserror::Error;

/// Top-level error type for the unistroke pipeline.
#[derive(Debug, Error)]
pub enum UnistrokeError {
    #[error(transparent)]
    Skeleton(#[from] SkeletonError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to the input skeleton mask.
#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("invalid skeleton: {0}")]
    InvalidSkeleton(String),
}

/// Errors related to the skeleton multigraph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("a node already exists at ({row}, {col})")]
    DuplicateNode { row: i32, col: i32 },

    #[error("invalid pixel chain: {0}")]
    InvalidChain(String),
}

/// Errors raised while computing a continuous traversal.
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error(
        "graph is not traversable in one stroke ({odd_nodes} odd-degree nodes); \
         run the Eulerian transform first"
    )]
    NotTraversable { odd_nodes: usize },

    #[error("graph is disconnected: only {visited} of {total} edges are reachable")]
    DisconnectedGraph { visited: usize, total: usize },
}

/// Errors related to operation parameters.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`UnistrokeError`].
pub type Result<T> = std::result::Result<T, UnistrokeError>;

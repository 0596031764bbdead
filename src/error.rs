//! Error types for queue operations

use thiserror::Error;

/// Queue error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Either the payload or the node of an element could not be allocated.
    #[error("out of memory while allocating {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("queue is empty")]
    Empty,
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;

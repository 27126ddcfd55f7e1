//! Error types for kernel invocations.

use thiserror::Error;

/// Errors that can abort a kernel invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The input stream ran dry before R×C elements were delivered.
    ///
    /// Fatal configuration error: the invocation aborts without emitting any
    /// partial output.
    #[error("input stream exhausted: expected {expected} elements, got {got}")]
    InputExhausted { expected: usize, got: usize },

    /// The output stream's consumer disappeared mid-write.
    #[error("output stream closed: wrote {written} of {expected} elements")]
    OutputClosed { written: usize, expected: usize },

    /// Dimension mismatch.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;

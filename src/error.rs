use thiserror::Error;

/// Error type definitions
///
/// Every failure in this crate is synchronous and surfaced to the immediate
/// caller. A failed operation leaves the structure it was invoked on unchanged;
/// there is no retry and no partial-failure recovery.
#[derive(Error, Debug)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index out of range: index {index}, size {size}")]
    OutOfRange { index: usize, size: usize },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("platform unsupported: {0}")]
    PlatformUnsupported(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("type cast error: {0}")]
    Cast(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

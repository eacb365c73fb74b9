use thiserror::Error;

/// Failure taxonomy for a recalculation run.
///
/// Every variant is fatal: the first error aborts the whole run and is
/// translated into a non-zero exit code at the outermost boundary. There is
/// no per-play isolation and no automatic retry.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// Malformed or missing input, surfaced before any I/O happens.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The client-credentials exchange was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Network, download, or cache-write failure.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A fetched document is missing an expected field or cannot be decoded.
    #[error("malformed record: {0}")]
    Parse(String),

    /// The scoring capability rejected a mod combination or map content.
    #[error("calculation failed: {0}")]
    Calculation(String),
}

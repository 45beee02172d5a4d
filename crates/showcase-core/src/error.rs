use thiserror::Error;

/// Errors the coordinator can report.  None of these are fatal to the
/// page: callers either clamp before the boundary or degrade to a no-op.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A navigation request outside `[0, count)`.  The router clamps user
    /// input before calling, so hitting this is a programming error.
    #[error("section index {index} out of range (have {count} sections)")]
    InvalidSection { index: usize, count: usize },

    /// The content file could not be parsed.
    #[error("invalid content file: {0}")]
    InvalidContent(String),
}

//! Structured error types for gridflow.
//!
//! Every recoverable failure is one of these kinds; batch operations log
//! and skip non-fatal kinds rather than aborting.

/// All errors that can occur during grid detection and mutation.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The selection has the wrong element count/type for the operation.
    #[error("invalid selection: {0}")]
    SelectionInvalid(String),

    /// Clustering found fewer rows/columns than the operation requires.
    #[error("no grid detected: {0}")]
    GridNotDetected(String),

    /// The destination grid is smaller than the paste source.
    #[error("paste source {src_rows}\u{d7}{src_cols} exceeds destination {dest_rows}\u{d7}{dest_cols}")]
    SizeMismatch {
        /// Rows in the paste source.
        src_rows: usize,
        /// Columns in the paste source.
        src_cols: usize,
        /// Rows in the destination grid.
        dest_rows: usize,
        /// Columns in the destination grid.
        dest_cols: usize,
    },

    /// A single element's geometry/format update failed.
    #[error("element mutation failed: {0}")]
    ElementMutationFailed(String),

    /// No usable container/view. The only fatal kind: aborts the whole
    /// operation instead of being logged and skipped.
    #[error("container unavailable: {0}")]
    ContainerUnavailable(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    /// Whether this error aborts a batch operation outright.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GridError::ContainerUnavailable(_))
    }
}

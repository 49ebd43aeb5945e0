use thiserror::Error;

/// Errors that can occur while resolving a workflow reference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
  /// No workflow carries this exact name.
  #[error("workflow not found: {name}")]
  NotFound { name: String },

  /// The reference parsed as an index but there is no workflow at that position.
  #[error("workflow index {index} out of range ({len} workflows)")]
  IndexOutOfRange { index: i64, len: usize },
}

use imagr_config::ComponentError;
use imagr_resolver::ResolveError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
  #[error("workflow name must not be empty")]
  EmptyName,

  #[error("a workflow named '{0}' already exists")]
  DuplicateName(String),

  #[error("insert index {index} out of range (0..={len})")]
  InsertIndexOutOfRange { index: usize, len: usize },

  #[error("workflow '{workflow}' has no component at index {index} ({len} components)")]
  ComponentIndexOutOfRange {
    workflow: String,
    index: usize,
    len: usize,
  },

  #[error("workflow '{0}' already has an image component")]
  DuplicateImage(String),

  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error(transparent)]
  Component(#[from] ComponentError),
}

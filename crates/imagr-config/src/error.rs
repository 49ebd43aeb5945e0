use thiserror::Error;

/// A component or field value that cannot be represented in a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComponentError {
  #[error("{field} must not be empty")]
  EmptyField { field: &'static str },

  #[error("invalid restart action '{value}' (expected one of: none, restart, shutdown)")]
  InvalidRestartAction { value: String },

  #[error("partition lists differ in length: {names} names, {formats} formats, {sizes} sizes")]
  PartitionArity {
    names: usize,
    formats: usize,
    sizes: usize,
  },

  #[error("partition target '{target}' is not one of the listed partitions")]
  UnknownPartitionTarget { target: String },
}

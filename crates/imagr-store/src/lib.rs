//! Imagr Store
//!
//! This crate provides the storage trait and the property-list implementation
//! for configuration documents.
//!
//! The [`DocumentStore`] contract:
//! - `load` on a missing file yields an empty document, not an error
//! - `load` on an unreadable or malformed file fails with [`Error::Corrupt`]
//! - `persist` overwrites the whole file; nothing is merged

mod plist_store;

pub use plist_store::PlistStore;

use std::path::{Path, PathBuf};

use imagr_config::ConfigDocument;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The document exists but could not be read or decoded.
  #[error("could not read document {}: {message}", .path.display())]
  Corrupt { path: PathBuf, message: String },

  /// The document could not be written back.
  #[error("could not write document {}: {message}", .path.display())]
  Persist { path: PathBuf, message: String },
}

/// Storage for a single configuration document.
pub trait DocumentStore {
  /// Where the document lives.
  fn location(&self) -> &Path;

  /// Read the document, or an empty one if nothing exists yet.
  fn load(&self) -> Result<ConfigDocument, Error>;

  /// Replace the stored document with `document`.
  fn persist(&self, document: &ConfigDocument) -> Result<(), Error>;
}

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use imagr_config::ConfigDocument;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{DocumentStore, Error};

/// XML property-list document on the local filesystem.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so the file on disk is either the old or the new document.
pub struct PlistStore {
  path: PathBuf,
}

impl PlistStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  fn corrupt(&self, message: impl ToString) -> Error {
    Error::Corrupt {
      path: self.path.clone(),
      message: message.to_string(),
    }
  }

  fn persist_error(&self, message: impl ToString) -> Error {
    Error::Persist {
      path: self.path.clone(),
      message: message.to_string(),
    }
  }

  /// Directory the temporary file is created in.
  fn parent_dir(&self) -> &Path {
    match self.path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    }
  }
}

impl DocumentStore for PlistStore {
  fn location(&self) -> &Path {
    &self.path
  }

  fn load(&self) -> Result<ConfigDocument, Error> {
    let bytes = match std::fs::read(&self.path) {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        info!(path = %self.path.display(), "no existing document, starting empty");
        return Ok(ConfigDocument::new());
      }
      Err(e) => return Err(self.corrupt(e)),
    };

    let document: ConfigDocument = plist::from_bytes(&bytes).map_err(|e| self.corrupt(e))?;
    debug!(
      path = %self.path.display(),
      workflows = document.workflows.len(),
      "loaded document"
    );
    Ok(document)
  }

  fn persist(&self, document: &ConfigDocument) -> Result<(), Error> {
    let mut file = NamedTempFile::new_in(self.parent_dir()).map_err(|e| self.persist_error(e))?;

    plist::to_writer_xml(&mut file, document).map_err(|e| self.persist_error(e))?;
    file.flush().map_err(|e| self.persist_error(e))?;
    file
      .persist(&self.path)
      .map_err(|e| self.persist_error(e.error))?;

    info!(
      path = %self.path.display(),
      workflows = document.workflows.len(),
      "saved document"
    );
    Ok(())
  }
}

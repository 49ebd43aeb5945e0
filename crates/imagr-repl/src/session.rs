//! An editing session: load, command loop, persist.

use std::io::{self, Write};

use imagr_store::{DocumentStore, Error as StoreError};
use imagr_workflow::Catalog;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::commands::CommandTable;
use crate::dispatcher::Dispatcher;
use crate::error::SessionError;

pub const BANNER: &str = "Entering interactive mode... (type \"help\" for commands)";
pub const PROMPT: &str = "> ";

/// Why the command loop stopped. Every variant is followed by the same save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
  /// The operator typed `exit`.
  Exit,
  /// Input ended (Ctrl-D or a closed pipe).
  EndOfInput,
  /// Ctrl-C while waiting for input.
  Interrupted,
}

/// A loaded document plus the store it is saved back to.
///
/// Closing consumes the session, so nothing can be edited after the save.
pub struct Session<S: DocumentStore> {
  store: S,
  dispatcher: Dispatcher,
}

impl<S: DocumentStore> Session<S> {
  /// Load the document from `store`. A missing document starts empty.
  pub fn open(store: S) -> Result<Self, StoreError> {
    let document = store.load()?;
    info!(
      path = %store.location().display(),
      workflows = document.workflows.len(),
      "session opened"
    );
    Ok(Self {
      store,
      dispatcher: Dispatcher::new(CommandTable::standard(), Catalog::new(document)),
    })
  }

  pub fn dispatcher(&self) -> &Dispatcher {
    &self.dispatcher
  }

  /// Run commands from `lines` until exit, end of input or `cancel`.
  ///
  /// Each line is fully handled before the next is taken.
  pub async fn run<W: Write>(
    &mut self,
    mut lines: mpsc::Receiver<String>,
    out: &mut W,
    cancel: CancellationToken,
  ) -> io::Result<Termination> {
    writeln!(out, "{}", BANNER)?;

    loop {
      write!(out, "{}", PROMPT)?;
      out.flush()?;

      let line = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
          writeln!(out)?;
          return Ok(Termination::Interrupted);
        }
        line = lines.recv() => line,
      };

      let Some(line) = line else {
        writeln!(out)?;
        return Ok(Termination::EndOfInput);
      };

      let outcome = self.dispatcher.execute(&line);
      if !outcome.output.is_empty() {
        writeln!(out, "{}", outcome.output)?;
      }
      if outcome.exit {
        return Ok(Termination::Exit);
      }
    }
  }

  /// [`run`](Self::run), then [`close`](Self::close) however the loop ended.
  ///
  /// A failed write to `out` still saves the document before it is reported.
  pub async fn run_and_close<W: Write>(
    mut self,
    lines: mpsc::Receiver<String>,
    out: &mut W,
    cancel: CancellationToken,
  ) -> Result<Termination, SessionError> {
    let ran = self.run(lines, out, cancel).await;
    if let Err(e) = &ran {
      warn!(error = %e, "command loop failed, saving anyway");
    }
    self.close()?;
    Ok(ran?)
  }

  /// Save the document, overwriting the stored copy.
  pub fn close(self) -> Result<(), StoreError> {
    let document = self.dispatcher.into_catalog().into_document();
    self.store.persist(&document)?;
    info!(path = %self.store.location().display(), "session closed");
    Ok(())
  }
}

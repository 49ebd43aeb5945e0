use std::path::PathBuf;

use imagr_workflow::WorkflowError;
use thiserror::Error;

use crate::lexer::LexError;

/// Status reported for each command line, mirroring process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Success,
  /// `EINVAL`: the command was understood but its arguments were rejected.
  InvalidArgument,
  UnknownCommand,
}

impl Status {
  pub fn code(&self) -> i32 {
    match self {
      Status::Success => 0,
      Status::InvalidArgument => 22,
      Status::UnknownCommand => 2,
    }
  }
}

/// Every way a single command can fail. None of these end the session.
#[derive(Debug, Error)]
pub enum CommandError {
  /// Argument parsing failed; the message carries clap's usage text.
  #[error("{0}")]
  Usage(String),

  /// `--help` was requested. Not a failure.
  #[error("{0}")]
  DisplayHelp(String),

  #[error("{0}")]
  Lex(#[from] LexError),

  #[error("{0}")]
  Workflow(#[from] WorkflowError),

  #[error("could not read script {}: {source}", .path.display())]
  ScriptRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("unknown command '{name}'. Available commands: {}", .available.join(", "))]
  UnknownCommand {
    name: String,
    available: Vec<&'static str>,
  },
}

impl CommandError {
  pub fn status(&self) -> Status {
    match self {
      CommandError::DisplayHelp(_) => Status::Success,
      CommandError::UnknownCommand { .. } => Status::UnknownCommand,
      CommandError::Usage(_)
      | CommandError::Lex(_)
      | CommandError::Workflow(_)
      | CommandError::ScriptRead { .. } => Status::InvalidArgument,
    }
  }
}

/// Why a session could not finish cleanly.
#[derive(Debug, Error)]
pub enum SessionError {
  /// The transcript could not be written. The document was still saved.
  #[error("failed to write to the terminal: {0}")]
  Output(#[from] std::io::Error),

  #[error(transparent)]
  Store(#[from] imagr_store::Error),
}

impl From<clap::Error> for CommandError {
  fn from(err: clap::Error) -> Self {
    let text = err.render().to_string().trim_end().to_string();
    match err.kind() {
      clap::error::ErrorKind::DisplayHelp => CommandError::DisplayHelp(text),
      _ => CommandError::Usage(text),
    }
  }
}

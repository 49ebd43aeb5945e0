use imagr_workflow::Catalog;
use tracing::{debug, warn};

use crate::commands::{CommandTable, Context, Reply};
use crate::error::{CommandError, Status};
use crate::lexer::split_words;

/// Result of running one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
  pub status: Status,
  /// Text for the operator; empty when there is nothing to say.
  pub output: String,
  /// The session should end.
  pub exit: bool,
}

impl Outcome {
  fn quiet() -> Self {
    Self {
      status: Status::Success,
      output: String::new(),
      exit: false,
    }
  }
}

/// Routes command lines to operations on the catalog.
///
/// A failed command never changes the catalog and never ends the session.
pub struct Dispatcher {
  table: CommandTable,
  catalog: Catalog,
}

impl Dispatcher {
  pub fn new(table: CommandTable, catalog: Catalog) -> Self {
    Self { table, catalog }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn into_catalog(self) -> Catalog {
    self.catalog
  }

  pub fn execute(&mut self, line: &str) -> Outcome {
    match self.try_execute(line) {
      Ok(None) => Outcome::quiet(),
      Ok(Some(Reply::Text(output))) => Outcome {
        status: Status::Success,
        output,
        exit: false,
      },
      Ok(Some(Reply::Exit)) => Outcome {
        status: Status::Success,
        output: String::new(),
        exit: true,
      },
      Err(CommandError::DisplayHelp(output)) => Outcome {
        status: Status::Success,
        output,
        exit: false,
      },
      Err(err) => {
        let status = err.status();
        warn!(code = status.code(), error = %err, "command rejected");
        Outcome {
          status,
          output: format!("error: {}", err),
          exit: false,
        }
      }
    }
  }

  fn try_execute(&mut self, line: &str) -> Result<Option<Reply>, CommandError> {
    let words = split_words(line)?;
    let Some((name, args)) = words.split_first() else {
      return Ok(None);
    };

    let spec = self
      .table
      .lookup(name)
      .ok_or_else(|| CommandError::UnknownCommand {
        name: name.clone(),
        available: self.table.names(),
      })?;

    debug!(command = spec.name, args = args.len(), "dispatching");
    let mut cx = Context {
      catalog: &mut self.catalog,
      table: &self.table,
    };
    (spec.handler)(&mut cx, args).map(Some)
  }
}

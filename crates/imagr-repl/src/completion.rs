//! Candidate lists for a line editor's tab completion.

use imagr_config::ComponentKind;
use imagr_workflow::Catalog;

use crate::commands::{CommandTable, Completion};
use crate::lexer::split_words;

/// Candidates for the word being typed at the end of `line`.
///
/// At the start of a line the candidates are command names. After a command
/// they are its long options when the word starts with `-`, otherwise
/// workflow names or component type tags, depending on the command. Commands
/// that take both offer workflows until one has been given, and after
/// `--workflow`. Matching is a case-insensitive prefix match.
pub fn complete(line: &str, table: &CommandTable, catalog: &Catalog) -> Vec<String> {
  let Ok(words) = split_words(line) else {
    return Vec::new();
  };
  let at_word_boundary = line.is_empty() || line.ends_with(char::is_whitespace);

  let (command, given, partial) = match (words.as_slice(), at_word_boundary) {
    ([], _) => (None, &[] as &[String], ""),
    ([only], false) => (None, &[] as &[String], only.as_str()),
    ([first, rest @ ..], true) => (Some(first.as_str()), rest, ""),
    ([first, rest @ .., last], false) => (Some(first.as_str()), rest, last.as_str()),
  };

  let candidates: Vec<String> = match command {
    None => table.names().into_iter().map(str::to_string).collect(),
    Some(name) => match table.lookup(name) {
      None => Vec::new(),
      Some(spec) if partial.starts_with('-') => spec.options(),
      Some(spec) => match spec.completion {
        Completion::None => Vec::new(),
        Completion::Workflows => catalog.workflow_names(),
        Completion::Components => component_tags(),
        Completion::WorkflowsAndComponents => {
          let after_workflow_flag = given.last().is_some_and(|w| w == "--workflow");
          if given.is_empty() || after_workflow_flag {
            catalog.workflow_names()
          } else {
            component_tags()
          }
        }
      },
    },
  };

  let partial = partial.to_lowercase();
  candidates
    .into_iter()
    .filter(|c| c.to_lowercase().starts_with(&partial))
    .collect()
}

fn component_tags() -> Vec<String> {
  ComponentKind::ALL
    .iter()
    .map(|kind| kind.tag().to_string())
    .collect()
}

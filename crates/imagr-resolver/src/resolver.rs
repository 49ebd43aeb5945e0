use imagr_config::Workflow;

use crate::error::ResolveError;

/// An operator-supplied workflow reference.
///
/// A token that parses as a base-10 integer is always a position, even when a
/// workflow happens to be named with digits. Anything else is an exact,
/// case-sensitive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowRef {
  Index(i64),
  Name(String),
}

impl WorkflowRef {
  pub fn parse(token: &str) -> Self {
    match token.parse::<i64>() {
      Ok(index) => WorkflowRef::Index(index),
      Err(_) => WorkflowRef::Name(token.to_string()),
    }
  }

  /// Locate the referenced workflow without bounds checking indices.
  ///
  /// Names are matched by linear scan, first match wins. An index is returned
  /// as-is; the caller decides whether it is in range.
  pub fn locate(&self, workflows: &[Workflow]) -> Result<i64, ResolveError> {
    match self {
      WorkflowRef::Index(index) => Ok(*index),
      WorkflowRef::Name(name) => workflows
        .iter()
        .position(|w| &w.name == name)
        .map(|pos| pos as i64)
        .ok_or_else(|| ResolveError::NotFound { name: name.clone() }),
    }
  }
}

/// A reference pinned to a live position in the workflow list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
  pub index: usize,
  /// Name at that position, for operator feedback.
  pub name: String,
}

/// Resolve `token` to an existing workflow.
pub fn resolve_workflow(token: &str, workflows: &[Workflow]) -> Result<Resolved, ResolveError> {
  let index = WorkflowRef::parse(token).locate(workflows)?;

  let workflow = usize::try_from(index)
    .ok()
    .and_then(|i| workflows.get(i).map(|w| (i, w)));

  match workflow {
    Some((index, workflow)) => Ok(Resolved {
      index,
      name: workflow.name.clone(),
    }),
    None => Err(ResolveError::IndexOutOfRange {
      index,
      len: workflows.len(),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn workflows(names: &[&str]) -> Vec<Workflow> {
    names.iter().map(|n| Workflow::new(*n)).collect()
  }

  #[test]
  fn test_parse_index_and_name() {
    assert_eq!(WorkflowRef::parse("3"), WorkflowRef::Index(3));
    assert_eq!(WorkflowRef::parse("-1"), WorkflowRef::Index(-1));
    assert_eq!(
      WorkflowRef::parse("alpha"),
      WorkflowRef::Name("alpha".to_string())
    );
    assert_eq!(
      WorkflowRef::parse("3a"),
      WorkflowRef::Name("3a".to_string())
    );
  }

  #[test]
  fn test_index_wins_over_numeric_name() {
    let list = workflows(&["alpha", "0"]);
    let resolved = resolve_workflow("0", &list).unwrap();
    assert_eq!(resolved.index, 0);
    assert_eq!(resolved.name, "alpha");
  }

  #[test]
  fn test_name_is_case_sensitive() {
    let list = workflows(&["Alpha"]);
    assert_eq!(
      resolve_workflow("alpha", &list),
      Err(ResolveError::NotFound {
        name: "alpha".to_string()
      })
    );
    assert_eq!(resolve_workflow("Alpha", &list).unwrap().index, 0);
  }

  #[test]
  fn test_locate_leaves_bounds_to_caller() {
    let list = workflows(&["alpha"]);
    assert_eq!(WorkflowRef::Index(7).locate(&list), Ok(7));
  }

  #[test]
  fn test_out_of_range_index() {
    let list = workflows(&["alpha"]);
    assert_eq!(
      resolve_workflow("1", &list),
      Err(ResolveError::IndexOutOfRange { index: 1, len: 1 })
    );
    assert_eq!(
      resolve_workflow("-1", &list),
      Err(ResolveError::IndexOutOfRange { index: -1, len: 1 })
    );
  }

  #[test]
  fn test_empty_list() {
    assert!(matches!(
      resolve_workflow("0", &[]),
      Err(ResolveError::IndexOutOfRange { index: 0, len: 0 })
    ));
    assert!(matches!(
      resolve_workflow("alpha", &[]),
      Err(ResolveError::NotFound { .. })
    ));
  }
}

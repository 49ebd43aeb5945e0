//! Plain-text views of the document.

use std::fmt::Write;

use imagr_config::{Component, ComponentKind, Workflow};

pub fn workflow_summary(index: usize, workflow: &Workflow) -> String {
  let count = workflow.components.len();
  format!(
    "{}: {} ({} component{})",
    index,
    workflow.name,
    count,
    if count == 1 { "" } else { "s" }
  )
}

pub fn workflow_list(workflows: &[Workflow]) -> String {
  if workflows.is_empty() {
    return "No workflows.".to_string();
  }
  workflows
    .iter()
    .enumerate()
    .map(|(i, w)| workflow_summary(i, w))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn component_line(index: usize, component: &Component) -> String {
  format!("{}: {}", index, component)
}

pub fn component_list(components: &[Component]) -> String {
  if components.is_empty() {
    return "(no components)".to_string();
  }
  components
    .iter()
    .enumerate()
    .map(|(i, c)| component_line(i, c))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn workflow_detail(index: usize, workflow: &Workflow) -> String {
  let mut out = String::new();
  // Writing into a String cannot fail.
  let _ = writeln!(out, "Workflow {}: {}", index, workflow.name);
  let _ = writeln!(out, "  description: {}", workflow.description);
  let _ = writeln!(out, "  restart_action: {}", workflow.restart_action);
  let _ = writeln!(out, "  bless_target: {}", workflow.bless_target);
  let _ = write!(out, "  components:");
  for line in component_list(&workflow.components).lines() {
    let _ = write!(out, "\n    {}", line);
  }
  out
}

pub fn component_type(kind: ComponentKind) -> String {
  format!("{}: {}", kind.tag(), kind.fields().join(", "))
}

pub fn component_types() -> String {
  ComponentKind::ALL
    .iter()
    .map(|kind| component_type(*kind))
    .collect::<Vec<_>>()
    .join("\n")
}

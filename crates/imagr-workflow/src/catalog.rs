use imagr_config::{Component, ComponentKind, ConfigDocument, RestartAction, Workflow};
use imagr_resolver::{Resolved, resolve_workflow};
use tracing::info;

use crate::error::WorkflowError;

/// The configuration document plus the rules for changing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
  document: ConfigDocument,
}

impl Catalog {
  pub fn new(document: ConfigDocument) -> Self {
    Self { document }
  }

  pub fn document(&self) -> &ConfigDocument {
    &self.document
  }

  pub fn into_document(self) -> ConfigDocument {
    self.document
  }

  pub fn workflows(&self) -> &[Workflow] {
    &self.document.workflows
  }

  pub fn workflow_names(&self) -> Vec<String> {
    self.document.workflow_names()
  }

  /// Store the digest of `password`, overwriting any previous one.
  pub fn set_password(&mut self, password: &str) {
    self.document.set_password(password);
    info!("password digest updated");
  }

  /// The stored digest, or `None` when no password is set.
  pub fn password_digest(&self) -> Option<&str> {
    self
      .document
      .has_password()
      .then_some(self.document.password.as_str())
  }

  /// Resolve a workflow reference to an existing workflow.
  pub fn resolve(&self, reference: &str) -> Result<Resolved, WorkflowError> {
    Ok(resolve_workflow(reference, &self.document.workflows)?)
  }

  pub fn workflow(&self, reference: &str) -> Result<&Workflow, WorkflowError> {
    let resolved = self.resolve(reference)?;
    Ok(&self.document.workflows[resolved.index])
  }

  fn workflow_mut(&mut self, reference: &str) -> Result<(Resolved, &mut Workflow), WorkflowError> {
    let resolved = self.resolve(reference)?;
    let workflow = &mut self.document.workflows[resolved.index];
    Ok((resolved, workflow))
  }

  /// Insert a new, empty workflow. Returns its position.
  pub fn add_workflow(&mut self, name: &str, index: Option<usize>) -> Result<usize, WorkflowError> {
    if name.trim().is_empty() {
      return Err(WorkflowError::EmptyName);
    }
    if self.document.workflows.iter().any(|w| w.name == name) {
      return Err(WorkflowError::DuplicateName(name.to_string()));
    }
    let len = self.document.workflows.len();
    let index = index.unwrap_or(len);
    if index > len {
      return Err(WorkflowError::InsertIndexOutOfRange { index, len });
    }

    self.document.workflows.insert(index, Workflow::new(name));
    info!(workflow = %name, index, "added workflow");
    Ok(index)
  }

  /// Remove a workflow and all of its components. Later workflows shift down.
  pub fn remove_workflow(&mut self, reference: &str) -> Result<Workflow, WorkflowError> {
    let resolved = self.resolve(reference)?;
    let removed = self.document.workflows.remove(resolved.index);
    info!(workflow = %removed.name, index = resolved.index, "removed workflow");
    Ok(removed)
  }

  pub fn set_description(
    &mut self,
    reference: &str,
    description: &str,
  ) -> Result<Resolved, WorkflowError> {
    let (resolved, workflow) = self.workflow_mut(reference)?;
    workflow.description = description.to_string();
    info!(workflow = %resolved.name, "set description");
    Ok(resolved)
  }

  /// Set the restart action from its textual form.
  pub fn set_restart_action(
    &mut self,
    reference: &str,
    action: &str,
  ) -> Result<(Resolved, RestartAction), WorkflowError> {
    let action: RestartAction = action.parse()?;
    let (resolved, workflow) = self.workflow_mut(reference)?;
    workflow.restart_action = action;
    info!(workflow = %resolved.name, %action, "set restart action");
    Ok((resolved, action))
  }

  pub fn set_bless_target(&mut self, reference: &str, bless: bool) -> Result<Resolved, WorkflowError> {
    let (resolved, workflow) = self.workflow_mut(reference)?;
    workflow.bless_target = bless;
    info!(workflow = %resolved.name, bless, "set bless target");
    Ok(resolved)
  }

  /// Insert `component` at `index` (default: append). Returns the position used.
  pub fn add_component(
    &mut self,
    reference: &str,
    component: Component,
    index: Option<usize>,
  ) -> Result<(Resolved, usize), WorkflowError> {
    component.validate()?;
    let (resolved, workflow) = self.workflow_mut(reference)?;

    if component.kind() == ComponentKind::Image && workflow.has_component(ComponentKind::Image) {
      return Err(WorkflowError::DuplicateImage(resolved.name));
    }

    let len = workflow.components.len();
    let index = index.unwrap_or(len);
    if index > len {
      return Err(WorkflowError::InsertIndexOutOfRange { index, len });
    }

    let kind = component.kind();
    workflow.components.insert(index, component);
    info!(workflow = %resolved.name, %kind, index, "added component");
    Ok((resolved, index))
  }

  /// Remove the component at `index`. Later components shift down.
  pub fn remove_component(
    &mut self,
    reference: &str,
    index: usize,
  ) -> Result<(Resolved, Component), WorkflowError> {
    let (resolved, workflow) = self.workflow_mut(reference)?;
    let len = workflow.components.len();
    if index >= len {
      return Err(WorkflowError::ComponentIndexOutOfRange {
        workflow: resolved.name,
        index,
        len,
      });
    }

    let removed = workflow.components.remove(index);
    info!(workflow = %resolved.name, kind = %removed.kind(), index, "removed component");
    Ok((resolved, removed))
  }

  pub fn components(&self, reference: &str) -> Result<&[Component], WorkflowError> {
    Ok(&self.workflow(reference)?.components)
  }
}

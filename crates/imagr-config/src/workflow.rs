use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};
use crate::enums::RestartAction;

/// A named, ordered pipeline of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub restart_action: RestartAction,
  #[serde(default)]
  pub bless_target: bool,
  #[serde(default)]
  pub components: Vec<Component>,
}

impl Workflow {
  /// A fresh workflow: empty description, no restart, not blessed, no components.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      description: String::new(),
      restart_action: RestartAction::None,
      bless_target: false,
      components: Vec::new(),
    }
  }

  pub fn has_component(&self, kind: ComponentKind) -> bool {
    self.components.iter().any(|c| c.kind() == kind)
  }
}

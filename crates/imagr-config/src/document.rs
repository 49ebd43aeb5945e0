use serde::{Deserialize, Serialize};

use crate::password::digest_password;
use crate::workflow::Workflow;

/// The whole configuration document as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
  /// Hex digest of the operator password; empty when unset.
  #[serde(default)]
  pub password: String,
  #[serde(default)]
  pub workflows: Vec<Workflow>,
}

impl ConfigDocument {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the stored digest. The plaintext is not retained.
  pub fn set_password(&mut self, password: &str) {
    self.password = digest_password(password);
  }

  pub fn has_password(&self) -> bool {
    !self.password.is_empty()
  }

  /// Workflow names in document order.
  pub fn workflow_names(&self) -> Vec<String> {
    self.workflows.iter().map(|w| w.name.clone()).collect()
  }
}

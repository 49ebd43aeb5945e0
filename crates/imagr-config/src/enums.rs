use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;

/// What the imaging agent does once a workflow finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartAction {
  #[default]
  None,
  Restart,
  Shutdown,
}

impl RestartAction {
  pub const ALL: [RestartAction; 3] = [
    RestartAction::None,
    RestartAction::Restart,
    RestartAction::Shutdown,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      RestartAction::None => "none",
      RestartAction::Restart => "restart",
      RestartAction::Shutdown => "shutdown",
    }
  }
}

impl fmt::Display for RestartAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RestartAction {
  type Err = ComponentError;

  /// Exact, lowercase match only.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    RestartAction::ALL
      .into_iter()
      .find(|action| action.as_str() == s)
      .ok_or_else(|| ComponentError::InvalidRestartAction {
        value: s.to_string(),
      })
  }
}

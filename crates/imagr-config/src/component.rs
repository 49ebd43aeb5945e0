use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;

pub const DEFAULT_VOLUME_NAME: &str = "Macintosh HD";
pub const DEFAULT_VOLUME_FORMAT: &str = "Journaled HFS+";
pub const DEFAULT_PARTITION_MAP: &str = "GPTFormat";

fn default_true() -> bool {
  true
}

fn default_volume_name() -> String {
  DEFAULT_VOLUME_NAME.to_string()
}

fn default_volume_format() -> String {
  DEFAULT_VOLUME_FORMAT.to_string()
}

fn default_partition_map() -> String {
  DEFAULT_PARTITION_MAP.to_string()
}

/// One partition in a `partition` component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSpec {
  pub name: String,
  pub format_type: String,
  /// Passed through to the agent untouched, e.g. "100%" or "250G".
  pub size: String,
}

/// A single provisioning step in a workflow.
///
/// Components are only ever created through the constructors below, which
/// return fresh values; there is no shared template to mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
  /// Restore a disk image onto the target volume.
  Image { url: String },
  /// Install a package, optionally deferred to first boot.
  Package {
    url: String,
    #[serde(default = "default_true")]
    first_boot: bool,
  },
  /// Prompt for (or derive) the computer name.
  ComputerName {
    #[serde(default)]
    use_serial: bool,
    #[serde(default)]
    auto: bool,
  },
  /// Run a script body, optionally deferred to first boot.
  Script {
    content: String,
    #[serde(default = "default_true")]
    first_boot: bool,
  },
  #[serde(rename = "eraseVolume")]
  EraseVolume {
    #[serde(default = "default_volume_name")]
    name: String,
    #[serde(default = "default_volume_format")]
    format: String,
  },
  Partition {
    #[serde(default = "default_partition_map")]
    map: String,
    #[serde(default)]
    partitions: Vec<PartitionSpec>,
    target: String,
  },
}

/// The `type` tag of a component, without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
  Image,
  Package,
  ComputerName,
  Script,
  EraseVolume,
  Partition,
}

impl ComponentKind {
  pub const ALL: [ComponentKind; 6] = [
    ComponentKind::Image,
    ComponentKind::Package,
    ComponentKind::ComputerName,
    ComponentKind::Script,
    ComponentKind::EraseVolume,
    ComponentKind::Partition,
  ];

  /// The tag as written to the document.
  pub fn tag(&self) -> &'static str {
    match self {
      ComponentKind::Image => "image",
      ComponentKind::Package => "package",
      ComponentKind::ComputerName => "computer_name",
      ComponentKind::Script => "script",
      ComponentKind::EraseVolume => "eraseVolume",
      ComponentKind::Partition => "partition",
    }
  }

  /// Field names carried by this kind, in document key form.
  pub fn fields(&self) -> &'static [&'static str] {
    match self {
      ComponentKind::Image => &["url"],
      ComponentKind::Package => &["url", "first_boot"],
      ComponentKind::ComputerName => &["use_serial", "auto"],
      ComponentKind::Script => &["content", "first_boot"],
      ComponentKind::EraseVolume => &["name", "format"],
      ComponentKind::Partition => &["map", "partitions", "target"],
    }
  }
}

impl fmt::Display for ComponentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

impl Component {
  pub fn image(url: impl Into<String>) -> Self {
    Component::Image { url: url.into() }
  }

  pub fn package(url: impl Into<String>, first_boot: bool) -> Self {
    Component::Package {
      url: url.into(),
      first_boot,
    }
  }

  pub fn computer_name(use_serial: bool, auto: bool) -> Self {
    Component::ComputerName { use_serial, auto }
  }

  pub fn script(content: impl Into<String>, first_boot: bool) -> Self {
    Component::Script {
      content: content.into(),
      first_boot,
    }
  }

  /// Erase component; `None` falls back to the agent defaults.
  pub fn erase_volume(name: Option<String>, format: Option<String>) -> Self {
    Component::EraseVolume {
      name: name.unwrap_or_else(default_volume_name),
      format: format.unwrap_or_else(default_volume_format),
    }
  }

  pub fn partition(
    map: Option<String>,
    partitions: Vec<PartitionSpec>,
    target: impl Into<String>,
  ) -> Self {
    Component::Partition {
      map: map.unwrap_or_else(default_partition_map),
      partitions,
      target: target.into(),
    }
  }

  /// Zip parallel name/format/size lists into partition specs.
  pub fn partition_specs(
    names: Vec<String>,
    formats: Vec<String>,
    sizes: Vec<String>,
  ) -> Result<Vec<PartitionSpec>, ComponentError> {
    if names.is_empty() || names.len() != formats.len() || names.len() != sizes.len() {
      return Err(ComponentError::PartitionArity {
        names: names.len(),
        formats: formats.len(),
        sizes: sizes.len(),
      });
    }

    Ok(
      names
        .into_iter()
        .zip(formats)
        .zip(sizes)
        .map(|((name, format_type), size)| PartitionSpec {
          name,
          format_type,
          size,
        })
        .collect(),
    )
  }

  pub fn kind(&self) -> ComponentKind {
    match self {
      Component::Image { .. } => ComponentKind::Image,
      Component::Package { .. } => ComponentKind::Package,
      Component::ComputerName { .. } => ComponentKind::ComputerName,
      Component::Script { .. } => ComponentKind::Script,
      Component::EraseVolume { .. } => ComponentKind::EraseVolume,
      Component::Partition { .. } => ComponentKind::Partition,
    }
  }

  /// Check the variant's required fields.
  pub fn validate(&self) -> Result<(), ComponentError> {
    match self {
      Component::Image { url } | Component::Package { url, .. } => {
        require("url", url)?;
      }
      Component::Script { content, .. } => {
        require("content", content)?;
      }
      Component::EraseVolume { name, format } => {
        require("name", name)?;
        require("format", format)?;
      }
      Component::Partition {
        map,
        partitions,
        target,
      } => {
        require("map", map)?;
        if partitions.is_empty() {
          return Err(ComponentError::EmptyField {
            field: "partitions",
          });
        }
        if !partitions.iter().any(|p| &p.name == target) {
          return Err(ComponentError::UnknownPartitionTarget {
            target: target.clone(),
          });
        }
      }
      Component::ComputerName { .. } => {}
    }
    Ok(())
  }
}

fn require(field: &'static str, value: &str) -> Result<(), ComponentError> {
  if value.trim().is_empty() {
    Err(ComponentError::EmptyField { field })
  } else {
    Ok(())
  }
}

impl fmt::Display for Component {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}(", self.kind())?;
    match self {
      Component::Image { url } => write!(f, "url={}", url)?,
      Component::Package { url, first_boot } => {
        write!(f, "url={}, first_boot={}", url, first_boot)?
      }
      Component::ComputerName { use_serial, auto } => {
        write!(f, "use_serial={}, auto={}", use_serial, auto)?
      }
      Component::Script {
        content,
        first_boot,
      } => write!(
        f,
        "content={} bytes, first_boot={}",
        content.len(),
        first_boot
      )?,
      Component::EraseVolume { name, format } => write!(f, "name={}, format={}", name, format)?,
      Component::Partition {
        map,
        partitions,
        target,
      } => {
        write!(f, "map={}, target={}, partitions=[", map, target)?;
        for (i, p) in partitions.iter().enumerate() {
          if i > 0 {
            f.write_str("; ")?;
          }
          write!(f, "{} {} {}", p.name, p.format_type, p.size)?;
        }
        f.write_str("]")?;
      }
    }
    f.write_str(")")
  }
}

//! Argument shapes for each interactive command.
//!
//! Each struct is parsed from the words following the command name, so none
//! of them expect a binary name.

use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Debug, Args)]
pub struct TargetWorkflow {
  /// Workflow name or index
  #[arg(long)]
  pub workflow: String,
}

#[derive(Debug, Args)]
pub struct InsertAt {
  /// Position to insert at (default: append)
  #[arg(long)]
  pub index: Option<usize>,
}

/// Set the shared password (stored as a SHA-512 digest)
#[derive(Debug, Parser)]
#[command(name = "new-password", no_binary_name = true)]
pub struct NewPassword {
  #[arg(allow_hyphen_values = true)]
  pub password: String,
}

/// Show the stored password digest
#[derive(Debug, Parser)]
#[command(name = "show-password", no_binary_name = true)]
pub struct ShowPassword {}

/// Add a new, empty workflow
#[derive(Debug, Parser)]
#[command(name = "add-workflow", no_binary_name = true)]
pub struct AddWorkflow {
  pub name: String,
  #[command(flatten)]
  pub at: InsertAt,
}

/// Remove a workflow and all of its components
#[derive(Debug, Parser)]
#[command(name = "remove-workflow", no_binary_name = true)]
pub struct RemoveWorkflow {
  /// Workflow name or index
  pub workflow: String,
}

/// Show one workflow in full
#[derive(Debug, Parser)]
#[command(name = "show-workflow", no_binary_name = true)]
pub struct ShowWorkflow {
  /// Workflow name or index
  pub workflow: String,
}

/// List all workflows, or show one
#[derive(Debug, Parser)]
#[command(name = "display-workflows", no_binary_name = true)]
pub struct DisplayWorkflows {
  /// Workflow name or index
  pub workflow: Option<String>,
}

/// Set what happens after the workflow completes
#[derive(Debug, Parser)]
#[command(name = "set-restart-action", no_binary_name = true)]
pub struct SetRestartAction {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// One of: restart, shutdown, none
  #[arg(long)]
  pub restart: String,
}

/// Bless the imaged volume as the startup disk (or stop doing so)
#[derive(Debug, Parser)]
#[command(name = "set-bless-target", no_binary_name = true)]
pub struct SetBlessTarget {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// Do not bless the target volume
  #[arg(long)]
  pub no_bless: bool,
}

/// Set a workflow's description
#[derive(Debug, Parser)]
#[command(name = "set-description", no_binary_name = true)]
pub struct SetDescription {
  #[command(flatten)]
  pub target: TargetWorkflow,
  #[arg(long, allow_hyphen_values = true)]
  pub desc: String,
}

/// Add an image component (at most one per workflow)
#[derive(Debug, Parser)]
#[command(name = "add-image-component", no_binary_name = true)]
pub struct AddImageComponent {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// URL of the disk image
  #[arg(long)]
  pub url: String,
  #[command(flatten)]
  pub at: InsertAt,
}

/// Add a package component
#[derive(Debug, Parser)]
#[command(name = "add-package-component", no_binary_name = true)]
pub struct AddPackageComponent {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// URL of the package
  #[arg(long)]
  pub url: String,
  /// Install during imaging instead of at first boot
  #[arg(long)]
  pub no_firstboot: bool,
  #[command(flatten)]
  pub at: InsertAt,
}

/// Add a computer name component
#[derive(Debug, Parser)]
#[command(name = "add-computername-component", no_binary_name = true)]
pub struct AddComputerNameComponent {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// Default the name to the serial number
  #[arg(long)]
  pub use_serial: bool,
  /// Apply the name without prompting
  #[arg(long)]
  pub auto: bool,
  #[command(flatten)]
  pub at: InsertAt,
}

/// Add a script component from a local file
#[derive(Debug, Parser)]
#[command(name = "add-script-component", no_binary_name = true)]
pub struct AddScriptComponent {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// Path to the script; its contents are embedded
  #[arg(long)]
  pub content: PathBuf,
  /// Run during imaging instead of at first boot
  #[arg(long)]
  pub no_firstboot: bool,
  #[command(flatten)]
  pub at: InsertAt,
}

/// Add an erase volume component
#[derive(Debug, Parser)]
#[command(name = "add-erase-component", no_binary_name = true)]
pub struct AddEraseComponent {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// Volume name (default: Macintosh HD)
  #[arg(long)]
  pub name: Option<String>,
  /// Volume format (default: Journaled HFS+)
  #[arg(long)]
  pub format: Option<String>,
  #[command(flatten)]
  pub at: InsertAt,
}

/// Add a partition component
#[derive(Debug, Parser)]
#[command(name = "add-partition-component", no_binary_name = true)]
pub struct AddPartitionComponent {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// Partition map (default: GPTFormat)
  #[arg(long)]
  pub map: Option<String>,
  #[arg(long, num_args = 1.., required = true)]
  pub names: Vec<String>,
  #[arg(long, num_args = 1.., required = true)]
  pub formats: Vec<String>,
  #[arg(long, num_args = 1.., required = true)]
  pub sizes: Vec<String>,
  /// Name of the partition to install onto
  #[arg(long = "target")]
  pub install_target: String,
  #[command(flatten)]
  pub at: InsertAt,
}

/// Remove a component by index
#[derive(Debug, Parser)]
#[command(name = "remove-component", no_binary_name = true)]
pub struct RemoveComponent {
  #[command(flatten)]
  pub target: TargetWorkflow,
  /// Component index within the workflow
  #[arg(long)]
  pub component: usize,
}

/// List a workflow's components, or show one
#[derive(Debug, Parser)]
#[command(name = "display-components", no_binary_name = true)]
pub struct DisplayComponents {
  /// Workflow name or index
  pub workflow: String,
  /// Only show the component at this index
  #[arg(long)]
  pub component: Option<usize>,
}

/// List component types and their fields
#[derive(Debug, Parser)]
#[command(name = "list-types", no_binary_name = true)]
pub struct ListTypes {
  /// Only show this component type
  #[arg(value_name = "TYPE")]
  pub kind: Option<String>,
}

/// List commands, or show help for one
#[derive(Debug, Parser)]
#[command(name = "help", no_binary_name = true)]
pub struct Help {
  pub command: Option<String>,
}

/// Print the program version
#[derive(Debug, Parser)]
#[command(name = "version", no_binary_name = true)]
pub struct Version {}

/// Save the document and leave
#[derive(Debug, Parser)]
#[command(name = "exit", no_binary_name = true)]
pub struct Exit {}

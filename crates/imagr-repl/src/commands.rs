//! The command table: every interactive command, bound once at startup to the
//! operation it performs.

use std::collections::HashMap;

use clap::{CommandFactory, Parser};
use imagr_config::{Component, ComponentKind};
use imagr_workflow::Catalog;

use crate::args;
use crate::error::CommandError;
use crate::render;

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
  Text(String),
  /// End the session; the document is saved by the caller.
  Exit,
}

/// Which values the line editor should offer for a command's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
  None,
  Workflows,
  /// Component type tags.
  Components,
  /// A workflow first, then component type tags.
  WorkflowsAndComponents,
}

/// State a handler may read or change.
pub struct Context<'a> {
  pub catalog: &'a mut Catalog,
  pub table: &'a CommandTable,
}

pub type Handler = fn(&mut Context<'_>, &[String]) -> Result<Reply, CommandError>;

pub struct CommandSpec {
  pub name: &'static str,
  pub completion: Completion,
  /// Argument definition, used for parsing, help and option completion.
  pub command: fn() -> clap::Command,
  pub handler: Handler,
}

impl CommandSpec {
  pub fn about(&self) -> String {
    (self.command)()
      .get_about()
      .map(|about| about.to_string())
      .unwrap_or_default()
  }

  /// Long option names, with their leading dashes.
  pub fn options(&self) -> Vec<String> {
    (self.command)()
      .get_arguments()
      .filter_map(|arg| arg.get_long())
      .map(|long| format!("--{}", long))
      .collect()
  }
}

/// Immutable mapping from command name to operation.
pub struct CommandTable {
  commands: Vec<CommandSpec>,
  by_key: HashMap<String, usize>,
}

/// Lookup key for a command name: case and separators are not significant.
pub fn command_key(name: &str) -> String {
  name
    .trim()
    .chars()
    .filter(|c| *c != '-' && *c != '_')
    .flat_map(char::to_lowercase)
    .collect()
}

impl CommandTable {
  pub fn new(commands: Vec<CommandSpec>) -> Self {
    let by_key = commands
      .iter()
      .enumerate()
      .map(|(i, spec)| (command_key(spec.name), i))
      .collect();
    Self { commands, by_key }
  }

  /// Every command imagr understands.
  pub fn standard() -> Self {
    Self::new(vec![
      spec::<args::NewPassword>("new-password", Completion::None, new_password),
      spec::<args::ShowPassword>("show-password", Completion::None, show_password),
      spec::<args::AddWorkflow>("add-workflow", Completion::None, add_workflow),
      spec::<args::RemoveWorkflow>("remove-workflow", Completion::Workflows, remove_workflow),
      spec::<args::ShowWorkflow>("show-workflow", Completion::Workflows, show_workflow),
      spec::<args::DisplayWorkflows>(
        "display-workflows",
        Completion::Workflows,
        display_workflows,
      ),
      spec::<args::SetRestartAction>(
        "set-restart-action",
        Completion::Workflows,
        set_restart_action,
      ),
      spec::<args::SetBlessTarget>("set-bless-target", Completion::Workflows, set_bless_target),
      spec::<args::SetDescription>("set-description", Completion::Workflows, set_description),
      spec::<args::AddImageComponent>(
        "add-image-component",
        Completion::Workflows,
        add_image_component,
      ),
      spec::<args::AddPackageComponent>(
        "add-package-component",
        Completion::Workflows,
        add_package_component,
      ),
      spec::<args::AddComputerNameComponent>(
        "add-computername-component",
        Completion::Workflows,
        add_computername_component,
      ),
      spec::<args::AddScriptComponent>(
        "add-script-component",
        Completion::Workflows,
        add_script_component,
      ),
      spec::<args::AddEraseComponent>(
        "add-erase-component",
        Completion::Workflows,
        add_erase_component,
      ),
      spec::<args::AddPartitionComponent>(
        "add-partition-component",
        Completion::Workflows,
        add_partition_component,
      ),
      spec::<args::RemoveComponent>(
        "remove-component",
        Completion::WorkflowsAndComponents,
        remove_component,
      ),
      spec::<args::DisplayComponents>(
        "display-components",
        Completion::WorkflowsAndComponents,
        display_components,
      ),
      spec::<args::ListTypes>("list-types", Completion::Components, list_types),
      spec::<args::Help>("help", Completion::None, help),
      spec::<args::Version>("version", Completion::None, version),
      spec::<args::Exit>("exit", Completion::None, exit),
    ])
  }

  pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
    self
      .by_key
      .get(&command_key(name))
      .map(|&i| &self.commands[i])
  }

  pub fn names(&self) -> Vec<&'static str> {
    self.commands.iter().map(|spec| spec.name).collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
    self.commands.iter()
  }
}

fn spec<A: CommandFactory>(
  name: &'static str,
  completion: Completion,
  handler: Handler,
) -> CommandSpec {
  CommandSpec {
    name,
    completion,
    command: A::command,
    handler,
  }
}

fn parse<A: Parser>(words: &[String]) -> Result<A, CommandError> {
  Ok(A::try_parse_from(words)?)
}

fn text(message: impl Into<String>) -> Result<Reply, CommandError> {
  Ok(Reply::Text(message.into()))
}

fn new_password(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::NewPassword = parse(words)?;
  cx.catalog.set_password(&args.password);
  text("Password updated.")
}

fn show_password(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let _: args::ShowPassword = parse(words)?;
  match cx.catalog.password_digest() {
    Some(digest) => text(format!("Password digest: {}", digest)),
    None => text("No password set."),
  }
}

fn add_workflow(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::AddWorkflow = parse(words)?;
  let index = cx.catalog.add_workflow(&args.name, args.at.index)?;
  text(format!("Added workflow '{}' at index {}.", args.name, index))
}

fn remove_workflow(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::RemoveWorkflow = parse(words)?;
  let removed = cx.catalog.remove_workflow(&args.workflow)?;
  text(format!(
    "Removed workflow '{}' and its {} component(s).",
    removed.name,
    removed.components.len()
  ))
}

fn show_workflow(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::ShowWorkflow = parse(words)?;
  let resolved = cx.catalog.resolve(&args.workflow)?;
  text(render::workflow_detail(
    resolved.index,
    &cx.catalog.workflows()[resolved.index],
  ))
}

fn display_workflows(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::DisplayWorkflows = parse(words)?;
  match args.workflow {
    Some(reference) => {
      let resolved = cx.catalog.resolve(&reference)?;
      text(render::workflow_detail(
        resolved.index,
        &cx.catalog.workflows()[resolved.index],
      ))
    }
    None => text(render::workflow_list(cx.catalog.workflows())),
  }
}

fn set_restart_action(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::SetRestartAction = parse(words)?;
  let (resolved, action) = cx
    .catalog
    .set_restart_action(&args.target.workflow, &args.restart)?;
  text(format!(
    "Restart action for '{}' set to {}.",
    resolved.name, action
  ))
}

fn set_bless_target(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::SetBlessTarget = parse(words)?;
  let bless = !args.no_bless;
  let resolved = cx.catalog.set_bless_target(&args.target.workflow, bless)?;
  text(format!(
    "Bless target for '{}' set to {}.",
    resolved.name, bless
  ))
}

fn set_description(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::SetDescription = parse(words)?;
  let resolved = cx
    .catalog
    .set_description(&args.target.workflow, &args.desc)?;
  text(format!("Description for '{}' updated.", resolved.name))
}

fn insert_component(
  cx: &mut Context<'_>,
  workflow: &str,
  component: Component,
  index: Option<usize>,
) -> Result<Reply, CommandError> {
  let kind = component.kind();
  let (resolved, index) = cx.catalog.add_component(workflow, component, index)?;
  text(format!(
    "Added {} component to '{}' at index {}.",
    kind, resolved.name, index
  ))
}

fn add_image_component(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::AddImageComponent = parse(words)?;
  insert_component(
    cx,
    &args.target.workflow,
    Component::image(args.url),
    args.at.index,
  )
}

fn add_package_component(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::AddPackageComponent = parse(words)?;
  insert_component(
    cx,
    &args.target.workflow,
    Component::package(args.url, !args.no_firstboot),
    args.at.index,
  )
}

fn add_computername_component(
  cx: &mut Context<'_>,
  words: &[String],
) -> Result<Reply, CommandError> {
  let args: args::AddComputerNameComponent = parse(words)?;
  insert_component(
    cx,
    &args.target.workflow,
    Component::computer_name(args.use_serial, args.auto),
    args.at.index,
  )
}

fn add_script_component(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::AddScriptComponent = parse(words)?;
  // Fail on an unknown workflow before touching the filesystem.
  cx.catalog.resolve(&args.target.workflow)?;
  let content =
    std::fs::read_to_string(&args.content).map_err(|source| CommandError::ScriptRead {
      path: args.content.clone(),
      source,
    })?;
  insert_component(
    cx,
    &args.target.workflow,
    Component::script(content, !args.no_firstboot),
    args.at.index,
  )
}

fn add_erase_component(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::AddEraseComponent = parse(words)?;
  insert_component(
    cx,
    &args.target.workflow,
    Component::erase_volume(args.name, args.format),
    args.at.index,
  )
}

fn add_partition_component(
  cx: &mut Context<'_>,
  words: &[String],
) -> Result<Reply, CommandError> {
  let args: args::AddPartitionComponent = parse(words)?;
  let partitions = Component::partition_specs(args.names, args.formats, args.sizes)
    .map_err(imagr_workflow::WorkflowError::from)?;
  insert_component(
    cx,
    &args.target.workflow,
    Component::partition(args.map, partitions, args.install_target),
    args.at.index,
  )
}

fn remove_component(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::RemoveComponent = parse(words)?;
  let (resolved, removed) = cx
    .catalog
    .remove_component(&args.target.workflow, args.component)?;
  text(format!(
    "Removed component {} ({}) from '{}'.",
    args.component,
    removed.kind(),
    resolved.name
  ))
}

fn display_components(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::DisplayComponents = parse(words)?;
  let resolved = cx.catalog.resolve(&args.workflow)?;
  let components = &cx.catalog.workflows()[resolved.index].components;

  match args.component {
    Some(index) => match components.get(index) {
      Some(component) => text(render::component_line(index, component)),
      None => Err(
        imagr_workflow::WorkflowError::ComponentIndexOutOfRange {
          workflow: resolved.name,
          index,
          len: components.len(),
        }
        .into(),
      ),
    },
    None => text(render::component_list(components)),
  }
}

fn list_types(_: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::ListTypes = parse(words)?;
  let Some(tag) = args.kind else {
    return text(render::component_types());
  };
  let kind = ComponentKind::ALL
    .into_iter()
    .find(|kind| kind.tag().eq_ignore_ascii_case(&tag))
    .ok_or_else(|| {
      let tags: Vec<&str> = ComponentKind::ALL.iter().map(|k| k.tag()).collect();
      CommandError::Usage(format!(
        "unknown component type '{}'. Known types: {}",
        tag,
        tags.join(", ")
      ))
    })?;
  text(render::component_type(kind))
}

fn help(cx: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let args: args::Help = parse(words)?;

  if let Some(name) = args.command {
    let spec = cx
      .table
      .lookup(&name)
      .ok_or_else(|| CommandError::UnknownCommand {
        name: name.clone(),
        available: cx.table.names(),
      })?;
    return text((spec.command)().render_long_help().to_string().trim_end());
  }

  let width = cx.table.iter().map(|s| s.name.len()).max().unwrap_or(0);
  let lines: Vec<String> = cx
    .table
    .iter()
    .map(|spec| format!("  {:width$}  {}", spec.name, spec.about(), width = width))
    .collect();
  text(format!(
    "Commands:\n{}\n\nRun 'help <command>' or '<command> --help' for details.",
    lines.join("\n")
  ))
}

fn version(_: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let _: args::Version = parse(words)?;
  text(format!("imagr {}", env!("CARGO_PKG_VERSION")))
}

fn exit(_: &mut Context<'_>, words: &[String]) -> Result<Reply, CommandError> {
  let _: args::Exit = parse(words)?;
  Ok(Reply::Exit)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_command_key_ignores_separators_and_case() {
    assert_eq!(command_key(" Add-Workflow "), "addworkflow");
    assert_eq!(command_key("add_workflow"), "addworkflow");
  }

  #[test]
  fn test_standard_table_keys_are_unique() {
    let table = CommandTable::standard();
    assert_eq!(table.by_key.len(), table.commands.len());
  }

  #[test]
  fn test_lookup() {
    let table = CommandTable::standard();
    assert_eq!(table.lookup("ADD_WORKFLOW").unwrap().name, "add-workflow");
    assert!(table.lookup("add-component").is_none());
  }

  #[test]
  fn test_every_command_has_about() {
    let table = CommandTable::standard();
    for spec in table.iter() {
      assert!(!spec.about().is_empty(), "{} has no about text", spec.name);
      (spec.command)().debug_assert();
    }
  }

  #[test]
  fn test_options() {
    let table = CommandTable::standard();
    let options = table.lookup("add-package-component").unwrap().options();
    for expected in ["--workflow", "--url", "--no-firstboot", "--index"] {
      assert!(options.iter().any(|o| o == expected), "missing {}", expected);
    }
  }
}

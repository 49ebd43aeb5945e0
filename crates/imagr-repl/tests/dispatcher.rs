//! End-to-end command scenarios against the dispatcher.

use std::io::Write;

use imagr_config::{Component, RestartAction};
use imagr_repl::{CommandTable, Dispatcher, Status};
use imagr_workflow::Catalog;

fn dispatcher() -> Dispatcher {
  Dispatcher::new(CommandTable::standard(), Catalog::default())
}

fn run_ok(dispatcher: &mut Dispatcher, line: &str) -> String {
  let outcome = dispatcher.execute(line);
  assert_eq!(
    outcome.status,
    Status::Success,
    "`{}` failed: {}",
    line,
    outcome.output
  );
  outcome.output
}

#[test]
fn test_build_and_show_workflow() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  run_ok(
    &mut d,
    "add-image-component --workflow alpha --url http://x/y.dmg",
  );
  run_ok(
    &mut d,
    "add-package-component --workflow alpha --url http://x/p.pkg",
  );

  let workflow = d.catalog().workflow("alpha").unwrap();
  assert_eq!(workflow.name, "alpha");
  assert_eq!(workflow.restart_action, RestartAction::None);
  assert!(!workflow.bless_target);
  assert_eq!(
    workflow.components,
    vec![
      Component::image("http://x/y.dmg"),
      Component::package("http://x/p.pkg", true),
    ]
  );

  let shown = run_ok(&mut d, "show-workflow alpha");
  assert!(shown.starts_with("Workflow 0: alpha"));
  assert!(shown.contains("restart_action: none"));
  assert!(shown.contains("bless_target: false"));
  assert!(shown.contains("0: image(url=http://x/y.dmg)"));
  assert!(shown.contains("1: package(url=http://x/p.pkg, first_boot=true)"));
}

#[test]
fn test_remove_only_workflow_by_index() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  run_ok(&mut d, "remove-workflow 0");
  assert!(d.catalog().workflows().is_empty());
}

#[test]
fn test_duplicate_workflow_is_invalid_argument() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  let outcome = d.execute("add-workflow alpha");
  assert_eq!(outcome.status, Status::InvalidArgument);
  assert_eq!(outcome.status.code(), 22);
  assert!(!outcome.exit);
  assert_eq!(d.catalog().workflows().len(), 1);
}

#[test]
fn test_second_image_rejected() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  run_ok(&mut d, "add-image-component --workflow alpha --url http://x/1.dmg");
  let outcome = d.execute("add-image-component --workflow alpha --url http://x/2.dmg");
  assert_eq!(outcome.status, Status::InvalidArgument);
  assert!(outcome.output.contains("already has an image component"));
  assert_eq!(d.catalog().components("alpha").unwrap().len(), 1);
}

#[test]
fn test_unknown_command_lists_commands() {
  let mut d = dispatcher();
  let outcome = d.execute("frobnicate now");
  assert_eq!(outcome.status, Status::UnknownCommand);
  assert_eq!(outcome.status.code(), 2);
  assert!(outcome.output.contains("add-workflow"));
  assert!(outcome.output.contains("exit"));
}

#[test]
fn test_blank_line_is_quiet() {
  let mut d = dispatcher();
  let outcome = d.execute("   ");
  assert_eq!(outcome.status, Status::Success);
  assert!(outcome.output.is_empty());
  assert!(!outcome.exit);
}

#[test]
fn test_bad_arguments() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  let before = d.catalog().clone();

  for line in [
    "add-workflow",
    "add-workflow beta gamma",
    "add-workflow beta --index -1",
    "add-workflow beta --index 5",
    "remove-workflow missing",
    "remove-workflow 3",
    "set-restart-action --workflow alpha --restart reboot",
    "set-restart-action --workflow alpha",
    "set-bless-target --workflow alpha --no-bless yes",
    "add-image-component --workflow alpha",
    "remove-component --workflow alpha --component 0",
    "display-components alpha --component 0",
    "add-workflow 'unterminated",
  ] {
    let outcome = d.execute(line);
    assert_eq!(outcome.status, Status::InvalidArgument, "{}", line);
    assert!(outcome.output.starts_with("error:"), "{}", line);
  }

  assert_eq!(d.catalog(), &before);
}

#[test]
fn test_setters_and_normalized_names() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  run_ok(
    &mut d,
    "set_restart_action --workflow 0 --restart shutdown",
  );
  run_ok(&mut d, "Set-Bless-Target --workflow alpha");
  run_ok(
    &mut d,
    "set-description --workflow alpha --desc 'Lab machines, 10.15'",
  );

  let workflow = d.catalog().workflow("alpha").unwrap();
  assert_eq!(workflow.restart_action, RestartAction::Shutdown);
  assert!(workflow.bless_target);
  assert_eq!(workflow.description, "Lab machines, 10.15");

  run_ok(&mut d, "set-bless-target --workflow alpha --no-bless");
  assert!(!d.catalog().workflow("alpha").unwrap().bless_target);
}

#[test]
fn test_all_component_kinds() {
  let mut script = tempfile::NamedTempFile::new().unwrap();
  write!(script, "#!/bin/sh\nsystemsetup -setremotelogin on\n").unwrap();

  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  run_ok(
    &mut d,
    "add-partition-component --workflow alpha --map GPTFormat --names 'Macintosh HD' Data \
     --formats 'Journaled HFS+' 'Journaled HFS+' --sizes 60% 40% --target 'Macintosh HD'",
  );
  run_ok(&mut d, "add-erase-component --workflow alpha --name Data");
  run_ok(
    &mut d,
    "add-computername-component --workflow alpha --use-serial --auto --index 0",
  );
  run_ok(
    &mut d,
    &format!(
      "add-script-component --workflow alpha --content '{}' --no-firstboot",
      script.path().display()
    ),
  );

  let components = d.catalog().components("alpha").unwrap();
  let kinds: Vec<&str> = components.iter().map(|c| c.kind().tag()).collect();
  assert_eq!(
    kinds,
    vec!["computer_name", "partition", "eraseVolume", "script"]
  );
  assert_eq!(components[0], Component::computer_name(true, true));
  assert_eq!(
    components[2],
    Component::erase_volume(Some("Data".to_string()), None)
  );
  assert_eq!(
    components[3],
    Component::script("#!/bin/sh\nsystemsetup -setremotelogin on\n", false)
  );
  match &components[1] {
    Component::Partition {
      map,
      partitions,
      target,
    } => {
      assert_eq!(map, "GPTFormat");
      assert_eq!(partitions.len(), 2);
      assert_eq!(partitions[1].name, "Data");
      assert_eq!(partitions[1].size, "40%");
      assert_eq!(target, "Macintosh HD");
    }
    other => panic!("expected partition, got {:?}", other),
  }
}

#[test]
fn test_partition_validation() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");

  let mismatched = d.execute(
    "add-partition-component --workflow alpha --names A B --formats F --sizes 1 2 --target A",
  );
  assert_eq!(mismatched.status, Status::InvalidArgument);

  let bad_target = d.execute(
    "add-partition-component --workflow alpha --names A --formats F --sizes 100% --target B",
  );
  assert_eq!(bad_target.status, Status::InvalidArgument);
  assert!(d.catalog().components("alpha").unwrap().is_empty());
}

#[test]
fn test_missing_script_file() {
  let dir = tempfile::tempdir().unwrap();
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  let outcome = d.execute(&format!(
    "add-script-component --workflow alpha --content '{}'",
    dir.path().join("nope.sh").display()
  ));
  assert_eq!(outcome.status, Status::InvalidArgument);
  assert!(outcome.output.contains("could not read script"));
}

#[test]
fn test_remove_component_renumbers() {
  let mut d = dispatcher();
  run_ok(&mut d, "add-workflow alpha");
  for i in 0..3 {
    run_ok(
      &mut d,
      &format!("add-package-component --workflow alpha --url http://x/{}.pkg", i),
    );
  }
  run_ok(&mut d, "remove-component --workflow alpha --component 1");

  let listed = run_ok(&mut d, "display-components alpha");
  assert_eq!(
    listed,
    "0: package(url=http://x/0.pkg, first_boot=true)\n\
     1: package(url=http://x/2.pkg, first_boot=true)"
  );
  let single = run_ok(&mut d, "display-components 0 --component 1");
  assert_eq!(single, "1: package(url=http://x/2.pkg, first_boot=true)");
}

#[test]
fn test_password_commands() {
  let mut d = dispatcher();
  assert_eq!(run_ok(&mut d, "show-password"), "No password set.");
  run_ok(&mut d, "new-password hunter2");

  let shown = run_ok(&mut d, "show-password");
  assert!(!shown.contains("hunter2"));
  assert_eq!(
    shown,
    format!(
      "Password digest: {}",
      imagr_config::digest_password("hunter2")
    )
  );
}

#[test]
fn test_display_workflows() {
  let mut d = dispatcher();
  assert_eq!(run_ok(&mut d, "display-workflows"), "No workflows.");
  run_ok(&mut d, "add-workflow beta");
  run_ok(&mut d, "add-workflow alpha --index 0");
  assert_eq!(
    run_ok(&mut d, "display-workflows"),
    "0: alpha (0 components)\n1: beta (0 components)"
  );
  assert!(run_ok(&mut d, "display-workflows 1").starts_with("Workflow 1: beta"));
}

#[test]
fn test_help_and_info_commands() {
  let mut d = dispatcher();
  let help = run_ok(&mut d, "help");
  assert!(help.contains("add-partition-component"));

  let command_help = run_ok(&mut d, "help add-workflow");
  assert!(command_help.contains("--index"));

  let flag_help = run_ok(&mut d, "add-workflow --help");
  assert!(flag_help.contains("Usage"));

  assert_eq!(d.execute("help nope").status, Status::UnknownCommand);

  let types = run_ok(&mut d, "list-types");
  assert!(types.contains("eraseVolume: name, format"));
  assert_eq!(run_ok(&mut d, "list-types erasevolume"), "eraseVolume: name, format");
  assert_eq!(
    d.execute("list-types volume").status,
    Status::InvalidArgument
  );

  assert!(run_ok(&mut d, "version").starts_with("imagr "));
}

#[test]
fn test_exit() {
  let mut d = dispatcher();
  let outcome = d.execute("exit");
  assert!(outcome.exit);
  assert_eq!(outcome.status, Status::Success);
  assert_eq!(d.execute("exit now").status, Status::InvalidArgument);
}

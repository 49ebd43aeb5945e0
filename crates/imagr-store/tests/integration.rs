//! Load/persist behaviour against real files.

use imagr_config::{Component, ConfigDocument, Workflow};
use imagr_store::{DocumentStore, Error, PlistStore};

fn sample_document() -> ConfigDocument {
  let mut workflow = Workflow::new("alpha");
  workflow.description = "Base install".to_string();
  workflow.components = vec![
    Component::image("http://x/y.dmg"),
    Component::package("http://x/p.pkg", false),
    Component::script("#!/bin/sh\necho hi\n", true),
    Component::computer_name(true, false),
  ];

  let mut doc = ConfigDocument::new();
  doc.set_password("secret");
  doc.workflows.push(workflow);
  doc.workflows.push(Workflow::new("beta"));
  doc
}

#[test]
fn test_missing_file_loads_empty() {
  let dir = tempfile::tempdir().unwrap();
  let store = PlistStore::new(dir.path().join("absent.plist"));
  let doc = store.load().unwrap();
  assert_eq!(doc, ConfigDocument::new());
  assert!(!store.location().exists());
}

#[test]
fn test_persist_then_load() {
  let dir = tempfile::tempdir().unwrap();
  let store = PlistStore::new(dir.path().join("config.plist"));
  let doc = sample_document();

  store.persist(&doc).unwrap();
  assert_eq!(store.load().unwrap(), doc);
}

#[test]
fn test_persist_is_idempotent() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("config.plist");
  let store = PlistStore::new(&path);

  store.persist(&sample_document()).unwrap();
  let once = std::fs::read(&path).unwrap();

  let reloaded = store.load().unwrap();
  store.persist(&reloaded).unwrap();
  let twice = std::fs::read(&path).unwrap();

  assert_eq!(once, twice);
}

#[test]
fn test_persist_overwrites() {
  let dir = tempfile::tempdir().unwrap();
  let store = PlistStore::new(dir.path().join("config.plist"));
  store.persist(&sample_document()).unwrap();
  store.persist(&ConfigDocument::new()).unwrap();
  assert!(store.load().unwrap().workflows.is_empty());
}

#[test]
fn test_malformed_file_is_corrupt() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("broken.plist");
  std::fs::write(&path, "<plist><dict><key>workflows</key>").unwrap();

  let err = PlistStore::new(&path).load().unwrap_err();
  assert!(matches!(err, Error::Corrupt { .. }));
}

#[test]
fn test_wrong_shape_is_corrupt() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("array.plist");
  std::fs::write(
    &path,
    r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><array><string>nope</string></array></plist>"#,
  )
  .unwrap();

  assert!(matches!(
    PlistStore::new(&path).load(),
    Err(Error::Corrupt { .. })
  ));
}

#[test]
fn test_persist_into_missing_directory_fails() {
  let dir = tempfile::tempdir().unwrap();
  let store = PlistStore::new(dir.path().join("nope").join("config.plist"));
  assert!(matches!(
    store.persist(&ConfigDocument::new()),
    Err(Error::Persist { .. })
  ));
}

//! Imagr Config
//!
//! This crate contains the serializable document model edited by imagr.
//! A document holds a password digest and an ordered list of workflows; each
//! workflow is an ordered pipeline of typed provisioning components.
//!
//! The types serialize with the key layout the imaging agent reads:
//!
//! ```text
//! password        -> hex SHA-512 digest ("" when unset)
//! workflows[]     -> name, description, restart_action, bless_target, components[]
//! components[]    -> type = image | package | computer_name | script | eraseVolume | partition
//! ```
//!
//! Mutation rules (unique names, one image per workflow, index bounds) live in
//! `imagr-workflow`; this crate only describes shapes and defaults.

mod component;
mod document;
mod enums;
mod error;
mod password;
mod workflow;

pub use component::{Component, ComponentKind, PartitionSpec};
pub use document::ConfigDocument;
pub use enums::RestartAction;
pub use error::ComponentError;
pub use password::digest_password;
pub use workflow::Workflow;

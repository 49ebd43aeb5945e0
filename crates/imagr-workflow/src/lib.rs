//! Imagr Workflow
//!
//! This crate owns the editing rules for a [`ConfigDocument`]. Every operation
//! on [`Catalog`] validates first and only then mutates, so a rejected
//! operation leaves the document exactly as it was.
//!
//! Rules enforced here:
//! - workflow names are non-empty and unique (exact, case-sensitive)
//! - a workflow holds at most one `image` component
//! - insertion indices must lie in `0..=len`; removal indices in `0..len`
//! - workflow arguments resolve by index or exact name (see `imagr-resolver`)
//!
//! [`ConfigDocument`]: imagr_config::ConfigDocument

mod catalog;
mod error;

pub use catalog::Catalog;
pub use error::WorkflowError;
pub use imagr_resolver::Resolved;

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::{Resolved, WorkflowRef, resolve_workflow};

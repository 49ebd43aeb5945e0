//! Imagr REPL
//!
//! The interactive front end for editing a configuration document.
//!
//! ```text
//! stdin line ──► lexer::split_words ──► CommandTable::lookup ──► handler(Context, args)
//!                                                                   │
//!                                       Outcome { status, output } ◄┘
//! ```
//!
//! The command table is built once and handed to the [`Dispatcher`]; handlers
//! are plain functions that parse their own arguments with clap and call into
//! [`imagr_workflow::Catalog`]. A [`Session`] wraps the dispatcher with the
//! load/save boundary.

pub mod args;
pub mod commands;
pub mod completion;
mod dispatcher;
mod error;
pub mod input;
pub mod lexer;
pub mod render;
mod session;

pub use commands::{CommandTable, Reply};
pub use completion::complete;
pub use dispatcher::{Dispatcher, Outcome};
pub use error::{CommandError, SessionError, Status};
pub use session::{BANNER, PROMPT, Session, Termination};

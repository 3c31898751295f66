//! REPL and CLI for playing legs on Oche.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop over the legs commands
//! - [`Session`] - The store, the current match, and pending board renders
//! - [`RuntimeConfig`] - Prompt, banner, color, and logging settings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod repl;
pub mod session;

pub use config::RuntimeConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{COMMANDS, Command, Repl, Reply};
pub use session::Session;

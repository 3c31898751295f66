//! Core values, errors, and persistent collections for Oche.
//!
//! This crate provides:
//! - [`Value`] - The scalar stored in every declared model field
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtSet`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod value;

pub use collections::{LtSet, LtVec};
pub use error::{Error, ErrorContext, ErrorKind};
pub use value::Value;

/// Result type alias using Oche's Error type.
pub type Result<T> = std::result::Result<T, Error>;

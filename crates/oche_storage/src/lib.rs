//! Collections, store registry, model declarations, and relations for Oche.
//!
//! This crate provides:
//! - [`Collection`] - Ordered, optionally uniquely-keyed container
//! - [`ModelSchema`] - Property, key, and relation declarations
//! - [`Entity`] - Shared handle to a model instance
//! - [`Store`] - Registry of one collection per store identifier, plus the
//!   factory and relation resolver
//! - [`observed`] - Post-mutation observer hook
//!
//! Everything here is single-threaded: entities are `Rc` handles with
//! interior mutability and the [`Store`] is an explicit context value.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attributes;
pub mod collection;
pub mod entity;
pub mod observe;
pub mod probe;
mod relation;
pub mod schema;
pub mod store;

pub use attributes::{Attribute, Attributes};
pub use collection::{Collection, Keyed};
pub use entity::Entity;
pub use observe::{Observer, observed};
pub use probe::{Capabilities, Capable, has_own_or_inherits};
pub use schema::{Declaration, ModelSchema, OBSERVE, RelationSchema, SchemaBuilder};
pub use store::Store;

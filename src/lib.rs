//! Oche - In-memory model layer and scorekeeper for the darts game legs
//!
//! This crate re-exports all layers of the Oche system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: oche_runtime     - REPL, CLI, scoreboard rendering
//! Layer 2: oche_legs        - Match, player, and round models
//! Layer 1: oche_storage     - Collections, store, declarations, relations
//! Layer 0: oche_foundation  - Core types (Value, Error)
//! ```

pub use oche_foundation as foundation;
pub use oche_legs as legs;
pub use oche_runtime as runtime;
pub use oche_storage as storage;

//! Integration tests for Layer 1: Storage
//!
//! Tests for collections, model declarations, the store factory, relations,
//! and observation.

mod collections;
mod observe;
mod store;

//! Integration tests for Value

use oche_foundation::Value;
use std::collections::HashSet;
use std::sync::Arc;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn default_is_nil() {
    assert_eq!(Value::default(), Value::Nil);
    assert!(Value::Nil.is_nil());
}

#[test]
fn from_primitives() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42i64), Value::Int(42));
    assert_eq!(Value::from(7i32), Value::Int(7));
    assert_eq!(Value::from("g1"), Value::String(Arc::from("g1")));
    assert_eq!(Value::from(String::from("g1")), Value::from("g1"));
}

#[test]
fn from_option() {
    assert_eq!(Value::from(None::<i64>), Value::Nil);
    assert_eq!(Value::from(Some("alice")), Value::from("alice"));
}

// =============================================================================
// Accessors
// =============================================================================

#[test]
fn typed_accessors() {
    assert_eq!(Value::Int(26).as_int(), Some(26));
    assert_eq!(Value::from("26").as_int(), None);
}

#[test]
fn truthiness() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Int(0).is_truthy());
    assert!(Value::from("").is_truthy());
}

// =============================================================================
// Equality and hashing
// =============================================================================

#[test]
fn int_and_string_keys_differ() {
    assert_ne!(Value::Int(1), Value::from("1"));
}

#[test]
fn values_hash_as_set_members() {
    let keys: HashSet<Value> = [Value::from("g1"), Value::from("g1"), Value::Int(1)]
        .into_iter()
        .collect();
    assert_eq!(keys.len(), 2);
}

#[test]
fn display_is_bare() {
    assert_eq!(Value::from("alice").to_string(), "alice");
    assert_eq!(Value::Int(180).to_string(), "180");
    assert_eq!(Value::Nil.to_string(), "nil");
}

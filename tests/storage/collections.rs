//! Integration tests for Collection
//!
//! Tests keyed uniqueness, lookup, and positional access.

use oche_foundation::{ErrorKind, Value};
use oche_storage::{Collection, Keyed};
use std::collections::BTreeMap;

type Record = BTreeMap<&'static str, Value>;

fn record(pairs: &[(&'static str, Value)]) -> Record {
    pairs.iter().cloned().collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn keyed_construction_names_first_duplicate() {
    let members = vec![
        record(&[("id", Value::Int(1))]),
        record(&[("id", Value::Int(2))]),
        record(&[("id", Value::Int(2))]),
        record(&[("id", Value::Int(3))]),
        record(&[("id", Value::Int(3))]),
    ];

    let err = Collection::keyed(members, "id").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateKey { value: Value::Int(2), .. }));
}

#[test]
fn unkeyed_allows_repeats() {
    let words = Collection::new(["foo", "foo", "foo"]);
    assert_eq!(words.len(), 3);
    assert!(!words.is_keyed());
}

// =============================================================================
// Insertion
// =============================================================================

#[test]
fn add_to_keyed_then_get() {
    let mut rows = Collection::with_key(Some("id".into()));
    let row = record(&[("id", Value::from("g1")), ("started", Value::Bool(false))]);
    rows.add(row.clone()).unwrap();

    assert_eq!(rows.get("g1").unwrap(), Some(&row));
    assert_eq!(rows.get("g2").unwrap(), None);
}

#[test]
fn colliding_add_leaves_members_untouched() {
    let mut rows = Collection::keyed(
        vec![record(&[("id", Value::Int(1))]), record(&[("id", Value::Int(2))])],
        "id",
    )
    .unwrap();

    let err = rows
        .add(record(&[("id", Value::Int(2)), ("extra", Value::Bool(true))]))
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.get(2).unwrap().unwrap().key_value("extra"), Value::Nil);
}

#[test]
fn missing_key_is_rejected() {
    let mut rows = Collection::with_key(Some("id".into()));
    let err = rows.add(record(&[("name", Value::from("x"))])).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingKey { ref key } if key == "id"));
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn get_requires_a_key() {
    let rows = Collection::new(vec![record(&[("id", Value::Int(1))])]);
    assert!(matches!(rows.get(1).unwrap_err().kind, ErrorKind::UnkeyedLookup));
}

#[test]
fn find_by_returns_first_match() {
    let rows = Collection::new(vec![
        record(&[("score", Value::Int(45))]),
        record(&[("score", Value::Int(180))]),
        record(&[("score", Value::Int(180)), ("last", Value::Bool(true))]),
    ]);

    let found = rows.find_by(|r| r.key_value("score") == Value::Int(180)).unwrap();
    assert_eq!(found.key_value("last"), Value::Nil);
    assert!(rows.find_by(|r| r.key_value("score") == Value::Int(0)).is_none());
}

#[test]
fn positional_access() {
    let rows = Collection::new(["foo", "bar", "baz"]);
    assert_eq!(rows.first(), Some(&"foo"));
    assert_eq!(rows.last(), Some(&"baz"));
    assert_eq!(rows.at(1), Some(&"bar"));
    assert_eq!(rows.position(|w| *w == "baz"), Some(2));

    let empty: Collection<&str> = Collection::default();
    assert_eq!(empty.first(), None);
    assert_eq!(empty.last(), None);
}

#[test]
fn iteration_keeps_insertion_order() {
    let mut rows = Collection::with_key(Some("id".into()));
    for id in [3, 1, 2] {
        rows.add(record(&[("id", Value::Int(id))])).unwrap();
    }

    let ids: Vec<Value> = rows.iter().map(|r| r.key_value("id")).collect();
    assert_eq!(ids, vec![Value::Int(3), Value::Int(1), Value::Int(2)]);

    let owned: Vec<Record> = rows.into_iter().collect();
    assert_eq!(owned.len(), 3);
}

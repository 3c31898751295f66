//! Integration tests for persistent collections
//!
//! Tests LtVec and LtSet with structural sharing and immutability.

use oche_foundation::{LtSet, LtVec, Value};

// =============================================================================
// LtVec
// =============================================================================

#[test]
fn vector_push_back_is_persistent() {
    let v1 = LtVec::new().push_back(Value::Int(1));
    let v2 = v1.push_back(Value::Int(2));

    assert_eq!(v1.len(), 1);
    assert_eq!(v2.len(), 2);
    assert_eq!(v2.get(1), Some(&Value::Int(2)));
}

#[test]
fn vector_first_last() {
    let empty: LtVec<Value> = LtVec::new();
    assert_eq!(empty.first(), None);
    assert_eq!(empty.last(), None);

    let v: LtVec<i64> = [45, 180, 26].into_iter().collect();
    assert_eq!(v.first(), Some(&45));
    assert_eq!(v.last(), Some(&26));
}

#[test]
fn vector_filter_and_position() {
    let v: LtVec<i64> = (1..=6).collect();
    let even = v.filter(|n| n % 2 == 0);

    assert_eq!(even.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    assert_eq!(v.position(|n| *n == 4), Some(3));
    assert_eq!(v.position(|n| *n == 9), None);
}

#[test]
fn vector_structural_sharing() {
    let mut v = LtVec::new();
    for i in 0..1000 {
        v = v.push_back(Value::Int(i));
    }

    let v2 = v.clone();
    let v3 = v2.push_back(Value::Int(1000));
    assert_eq!(v.len(), 1000);
    assert_eq!(v3.len(), 1001);
    assert_eq!(v, v2);
}

// =============================================================================
// LtSet
// =============================================================================

#[test]
fn set_insert_is_persistent() {
    let s1: LtSet<&str> = LtSet::new().insert("observe");
    let s2 = s1.insert("splash");

    assert!(s1.contains("observe"));
    assert!(!s1.contains("splash"));
    assert_eq!(s2.len(), 2);
}

#[test]
fn set_union() {
    let a: LtSet<i64> = [1, 2].into_iter().collect();
    let b: LtSet<i64> = [2, 3].into_iter().collect();
    let both = a.union(&b);

    assert_eq!(both.len(), 3);
    assert!(both.contains(&3));
}

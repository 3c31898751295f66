//! Integration tests for error construction and display

use oche_foundation::{Error, ErrorContext, ErrorKind, Value};

// =============================================================================
// Kinds
// =============================================================================

#[test]
fn helpers_build_matching_kinds() {
    assert!(matches!(
        Error::duplicate_key("id", Value::Int(1)).kind,
        ErrorKind::DuplicateKey { ref key, value: Value::Int(1) } if key == "id"
    ));
    assert!(matches!(Error::missing_key("name").kind, ErrorKind::MissingKey { .. }));
    assert!(matches!(Error::unkeyed_lookup().kind, ErrorKind::UnkeyedLookup));
    assert!(matches!(
        Error::no_identity_key("legs-rounds").kind,
        ErrorKind::NoIdentityKey { ref model } if model == "legs-rounds"
    ));
    assert!(matches!(Error::unknown_store("x").kind, ErrorKind::UnknownStore(_)));
    assert!(matches!(
        Error::unknown_relation("legs-games", "owner").kind,
        ErrorKind::UnknownRelation { .. }
    ));
    assert!(matches!(
        Error::attribute_mismatch("game", "an entity").kind,
        ErrorKind::AttributeMismatch { expected: "an entity", .. }
    ));
    assert!(matches!(Error::precondition("no").kind, ErrorKind::Precondition(_)));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_names_the_key() {
    let err = Error::missing_key("name");
    assert_eq!(err.to_string(), "name keyed collection member must have key name");

    let err = Error::duplicate_key("id", Value::from("g1"));
    assert!(err.to_string().contains("duplicate id keys"));
}

#[test]
fn precondition_displays_message_verbatim() {
    let err = Error::precondition("legs requires at least 2 players to start");
    assert_eq!(err.to_string(), "legs requires at least 2 players to start");
}

#[test]
fn unkeyed_lookup_message() {
    assert_eq!(
        Error::unkeyed_lookup().to_string(),
        "cannot look up by key on an un-keyed collection"
    );
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_is_attached_not_displayed() {
    let err = Error::precondition("the match has not started").with_context(
        ErrorContext::new()
            .with_source("match.oche")
            .with_line(4),
    );

    assert_eq!(err.to_string(), "the match has not started");
    let context = err.context.unwrap();
    assert_eq!(context.to_string(), "at match.oche:4");
}

#[test]
fn empty_context_shows_nothing() {
    assert_eq!(ErrorContext::new().to_string(), "");
    assert_eq!(ErrorContext::new().with_line(9).to_string(), "");
}

//! Integration tests for the store registry and factory
//!
//! Tests registration, declaration rules, and attribute application.

use oche_foundation::{ErrorKind, Value};
use oche_storage::{
    Attribute, Attributes, Declaration, ModelSchema, OBSERVE, Store, has_own_or_inherits,
};

fn game_schema() -> ModelSchema {
    ModelSchema::declare("games")
        .key("id")
        .prop("started")
        .has_many("players", "players", "gameId")
        .finish()
        .unwrap()
}

fn player_schema() -> ModelSchema {
    ModelSchema::declare("players")
        .key("name")
        .prop("splash")
        .belongs_to("game", "games", "gameId")
        .finish()
        .unwrap()
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn second_key_fails_to_declare() {
    let err = ModelSchema::declare("players")
        .key("name")
        .key("nickname")
        .finish()
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::KeyRedeclared { ref first, ref second, .. } if first == "name" && second == "nickname"
    ));
}

#[test]
fn duplicate_member_fails_to_declare() {
    let err = ModelSchema::declare("players")
        .prop("splash")
        .prop("splash")
        .finish()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration { .. }));
}

#[test]
fn every_model_inherits_observe() {
    let schema = player_schema();
    assert_eq!(schema.declaration(OBSERVE), Some(&Declaration::Observer));
    assert!(has_own_or_inherits(&schema, OBSERVE));
    assert!(has_own_or_inherits(&schema, "splash"));
    assert!(!has_own_or_inherits(&schema, "gameId"));
}

#[test]
fn child_declaration_may_rekey() {
    let base = player_schema();
    let child = base.extend("seeded").key("seed").finish().unwrap();

    assert_eq!(child.key(), Some("seed"));
    assert!(child.props().any(|p| p == "name"));
    assert!(child.belongs_to("game").is_some());
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn register_keys_collection_by_declared_key() {
    let mut store = Store::new();
    store.register(game_schema());
    store.register(ModelSchema::declare("notes").prop("text").finish().unwrap());

    assert_eq!(store.collection("games").unwrap().key(), Some("id"));
    assert_eq!(store.collection("notes").unwrap().key(), None);
    assert!(store.is_registered("games"));
    assert!(!store.is_registered("players"));
}

#[test]
fn reregistration_keeps_existing_members() {
    let mut store = Store::new();
    store.register(game_schema());
    store.create("games", Attributes::new().with("id", "g1")).unwrap();

    store.register(game_schema());
    assert_eq!(store.collection("games").unwrap().len(), 1);
}

#[test]
fn creating_unregistered_model_fails() {
    let mut store = Store::new();
    let err = store.create("games", Attributes::new().with("id", "g1")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownStore(_)));
}

// =============================================================================
// Factory
// =============================================================================

#[test]
fn unknown_attributes_are_dropped() {
    let mut store = Store::new();
    store.register(player_schema());

    let player = store
        .create(
            "players",
            Attributes::new()
                .with("name", "alice")
                .with("hoge", "fuga")
                .with("gameId", "sneaky"),
        )
        .unwrap();

    assert!(!player.has("hoge"));
    assert!(!player.has("gameId"));
}

#[test]
fn attributes_apply_in_order() {
    let mut store = Store::new();
    store.register(game_schema());
    store.register(player_schema());
    let alice = store
        .create("players", Attributes::new().with("name", "alice"))
        .unwrap();

    let mut attributes = Attributes::new();
    attributes.insert("id", Value::from("g1"));
    attributes.insert("players", Attribute::Many(vec![alice.clone()]));
    let game = store.create("games", attributes).unwrap();

    assert_eq!(store.resolve_one(&alice, "game").unwrap(), Some(game));
}

#[test]
fn relations_apply_after_fields() {
    let mut store = Store::new();
    store.register(game_schema());
    store.register(player_schema());
    let alice = store
        .create("players", Attributes::new().with("name", "alice"))
        .unwrap();

    let game = store
        .create(
            "games",
            Attributes::new()
                .with_many("players", [alice.clone()])
                .with("id", "g1"),
        )
        .unwrap();
    assert_eq!(store.resolve_one(&alice, "game").unwrap(), Some(game));
}

#[test]
fn duplicate_create_leaves_relations_alone() {
    let mut store = Store::new();
    store.register(game_schema());
    store.register(player_schema());
    let alice = store
        .create("players", Attributes::new().with("name", "alice"))
        .unwrap();
    let game = store
        .create(
            "games",
            Attributes::new().with("id", "g1").with_many("players", [alice.clone()]),
        )
        .unwrap();

    let err = store
        .create(
            "games",
            Attributes::new().with("id", "g1").with_many("players", []),
        )
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }));
    assert_eq!(alice.get("gameId"), Value::from("g1"));
    assert_eq!(store.resolve_many(&game, "players").unwrap().to_vec(), vec![alice]);
    assert_eq!(store.collection("games").unwrap().len(), 1);
}

#[test]
fn keyless_create_admits_no_relation_members() {
    let mut store = Store::new();
    store.register(game_schema());
    store.register(player_schema());
    let alice = store.build("players", Attributes::new().with("name", "alice")).unwrap();

    let err = store
        .create("games", Attributes::new().with_many("players", [alice]))
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::MissingKey { .. }));
    assert!(store.collection("players").unwrap().is_empty());
    assert!(store.collection("games").unwrap().is_empty());
}

#[test]
fn created_entities_are_findable() {
    let mut store = Store::new();
    store.register(player_schema());
    let alice = store
        .create("players", Attributes::new().with("name", "alice").with("splash", 50))
        .unwrap();

    let players = store.collection("players").unwrap();
    assert_eq!(players.get("alice").unwrap(), Some(&alice));
    assert_eq!(players.first(), Some(&alice));
    assert_eq!(store.store_ids(), vec!["players"]);
}

//! Integration tests for observation

use std::cell::Cell;
use std::rc::Rc;

use oche_foundation::Error;
use oche_storage::{Attributes, ModelSchema, Store, observed};

fn counted_store() -> (Store, oche_storage::Entity, Rc<Cell<usize>>) {
    let mut store = Store::new();
    store.register(ModelSchema::declare("boards").key("id").prop("title").finish().unwrap());

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let board = store
        .create(
            "boards",
            Attributes::new()
                .with("id", 1)
                .with_observer(move || counter.set(counter.get() + 1)),
        )
        .unwrap();
    (store, board, calls)
}

#[test]
fn observed_success_fires_once() {
    let (_store, board, calls) = counted_store();
    let title: Result<&str, Error> = observed(&board, || {
        board.set("title", "legs");
        Ok("legs")
    });

    assert_eq!(title.unwrap(), "legs");
    assert_eq!(calls.get(), 1);
}

#[test]
fn observed_failure_is_silent() {
    let (_store, board, calls) = counted_store();
    let result: Result<(), Error> = observed(&board, || Err(Error::precondition("bust")));
    assert!(result.is_err());
    assert_eq!(calls.get(), 0);
}

#[test]
fn plain_writes_are_silent() {
    let (_store, board, calls) = counted_store();
    board.set("title", "quiet");
    assert_eq!(calls.get(), 0);
}

#[test]
fn cleared_observer_stops_notifications() {
    let (_store, board, calls) = counted_store();
    board.clear_observer();
    let _: Result<(), Error> = observed(&board, || Ok(()));
    assert_eq!(calls.get(), 0);
}

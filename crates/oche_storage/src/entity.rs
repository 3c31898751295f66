//! Model instances.
//!
//! An [`Entity`] is a cheap, shared handle to one record: its declaration, its
//! backing fields, and its observer slot. Clones refer to the same record and
//! compare equal only to each other, so membership tests are identity tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use oche_foundation::{Result, Value};

use crate::collection::Keyed;
use crate::observe::Observer;
use crate::probe::{Capabilities, Capable};
use crate::schema::ModelSchema;

/// Shared handle to a model instance.
#[derive(Clone)]
pub struct Entity(Rc<Record>);

struct Record {
    schema: Rc<ModelSchema>,
    fields: RefCell<BTreeMap<Arc<str>, Value>>,
    observer: RefCell<Option<Observer>>,
}

impl Entity {
    /// Creates a blank instance of a model. No attributes are applied and
    /// the instance is not inserted anywhere.
    #[must_use]
    pub fn new(schema: Rc<ModelSchema>) -> Self {
        Self(Rc::new(Record {
            schema,
            fields: RefCell::new(BTreeMap::new()),
            observer: RefCell::new(None),
        }))
    }

    /// Returns the model declaration.
    #[must_use]
    pub fn schema(&self) -> &Rc<ModelSchema> {
        &self.0.schema
    }

    /// Returns the store identifier of the model.
    #[must_use]
    pub fn store_id(&self) -> &str {
        self.0.schema.store_id()
    }

    /// Reads a backing field. Unwritten or cleared fields read as `Nil`.
    #[must_use]
    pub fn get(&self, field: &str) -> Value {
        self.0.fields.borrow().get(field).cloned().unwrap_or_default()
    }

    /// Writes a backing field verbatim.
    pub fn set(&self, field: &str, value: impl Into<Value>) {
        self.0.fields.borrow_mut().insert(field.into(), value.into());
    }

    /// Removes a backing field.
    pub fn clear(&self, field: &str) {
        self.0.fields.borrow_mut().remove(field);
    }

    /// Returns true if the backing field has been written and not cleared.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.fields.borrow().contains_key(field)
    }

    /// Returns the value of the model's identity key.
    ///
    /// # Errors
    ///
    /// Returns `NoIdentityKey` if the model declares no key.
    pub fn identity(&self) -> Result<Value> {
        let key = self.0.schema.require_key()?;
        Ok(self.get(key))
    }

    /// Returns the attached observer, if any.
    #[must_use]
    pub fn observer(&self) -> Option<Observer> {
        self.0.observer.borrow().clone()
    }

    /// Attaches an observer, replacing any previous one.
    pub fn set_observer(&self, observer: Observer) {
        *self.0.observer.borrow_mut() = Some(observer);
    }

    /// Detaches the observer.
    pub fn clear_observer(&self) {
        self.0.observer.borrow_mut().take();
    }

    /// Fires the observer, if one is attached.
    pub fn notify(&self) {
        // released before the call so the observer can touch this entity
        let observer = self.observer();
        if let Some(observe) = observer {
            observe();
        }
    }

    /// Returns true if both handles refer to the same record.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Entity {}

impl Keyed for Entity {
    fn key_value(&self, key: &str) -> Value {
        self.get(key)
    }
}

impl Capable for Entity {
    fn capabilities(&self) -> &Capabilities {
        self.0.schema.capabilities()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({} ", self.store_id())?;
        f.debug_map().entries(self.0.fields.borrow().iter()).finish()?;
        write!(f, ")")
    }
}

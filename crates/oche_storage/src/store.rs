//! The store registry and entity factory.
//!
//! A [`Store`] owns exactly one [`Collection`] per registered store
//! identifier. Collections are created on first registration and only ever
//! appended to afterwards.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use oche_foundation::{Error, Result};

use crate::attributes::{Attribute, Attributes};
use crate::collection::Collection;
use crate::entity::Entity;
use crate::probe::has_own_or_inherits;
use crate::schema::{Declaration, ModelSchema};

/// Registry of model declarations and their collections.
#[derive(Clone, Debug, Default)]
pub struct Store {
    schemas: HashMap<Arc<str>, Rc<ModelSchema>>,
    collections: HashMap<Arc<str>, Collection<Entity>>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Registration ---

    /// Registers a model, creating its collection keyed by the model's key.
    ///
    /// Registering a store identifier a second time is a no-op: the first
    /// declaration and its collection are kept and returned.
    pub fn register(&mut self, schema: ModelSchema) -> Rc<ModelSchema> {
        let store_id: Arc<str> = schema.store_id().into();
        if let Some(existing) = self.schemas.get(&store_id) {
            return Rc::clone(existing);
        }

        let key = schema.key().map(Arc::from);
        let schema = Rc::new(schema);
        self.collections
            .insert(Arc::clone(&store_id), Collection::with_key(key));
        self.schemas.insert(store_id, Rc::clone(&schema));
        schema
    }

    /// Returns true if a model has been registered under `store_id`.
    #[must_use]
    pub fn is_registered(&self, store_id: &str) -> bool {
        self.schemas.contains_key(store_id)
    }

    /// Returns the declaration registered under `store_id`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` if nothing is registered under `store_id`.
    pub fn schema(&self, store_id: &str) -> Result<&Rc<ModelSchema>> {
        self.schemas
            .get(store_id)
            .ok_or_else(|| Error::unknown_store(store_id))
    }

    /// Returns the collection for `store_id`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` if nothing is registered under `store_id`.
    pub fn collection(&self, store_id: &str) -> Result<&Collection<Entity>> {
        self.collections
            .get(store_id)
            .ok_or_else(|| Error::unknown_store(store_id))
    }

    pub(crate) fn collection_mut(&mut self, store_id: &str) -> Result<&mut Collection<Entity>> {
        self.collections
            .get_mut(store_id)
            .ok_or_else(|| Error::unknown_store(store_id))
    }

    /// Returns the registered store identifiers, sorted.
    #[must_use]
    pub fn store_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.schemas.keys().map(|id| &**id).collect();
        ids.sort_unstable();
        ids
    }

    // --- Factory ---

    /// Constructs an entity of the model registered under `store_id`.
    ///
    /// Scalar and observer attributes are applied first, then relation
    /// attributes, each group in insertion order. Names the model neither
    /// declares nor inherits are skipped. The entity is not inserted into its
    /// collection, although a to-many attribute may insert the related
    /// entities into theirs.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` for an unregistered model, `AttributeMismatch`
    /// for an attribute of the wrong shape, or any error raised by a relation
    /// write.
    pub fn build(&mut self, store_id: &str, attributes: Attributes) -> Result<Entity> {
        self.construct(store_id, attributes, false)
    }

    /// Constructs an entity and appends it to its model's collection.
    ///
    /// The key is checked against the collection before any relation
    /// attribute is written, so a refused entity leaves related members
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Store::build`], or `MissingKey`/`DuplicateKey`
    /// if the keyed collection refuses the new entity.
    pub fn create(&mut self, store_id: &str, attributes: Attributes) -> Result<Entity> {
        let entity = self.construct(store_id, attributes, true)?;
        self.collection_mut(store_id)?.add(entity.clone())?;
        Ok(entity)
    }

    fn construct(
        &mut self,
        store_id: &str,
        attributes: Attributes,
        claim_key: bool,
    ) -> Result<Entity> {
        let schema = Rc::clone(self.schema(store_id)?);
        let entity = Entity::new(Rc::clone(&schema));
        let (relations, fields): (Vec<_>, Vec<_>) = attributes
            .into_iter()
            .filter(|(name, _)| has_own_or_inherits(&entity, name))
            .partition(|(name, _)| {
                schema
                    .declaration(name)
                    .is_some_and(Declaration::is_relation)
            });

        for (name, attribute) in fields {
            self.apply(&entity, &name, attribute)?;
        }
        if claim_key {
            self.check_key_free(store_id, &entity)?;
        }
        for (name, attribute) in relations {
            self.apply(&entity, &name, attribute)?;
        }
        Ok(entity)
    }

    fn check_key_free(&self, store_id: &str, entity: &Entity) -> Result<()> {
        let collection = self.collection(store_id)?;
        let Some(key) = collection.key() else {
            return Ok(());
        };
        let value = entity.get(key);
        if value.is_nil() {
            return Err(Error::missing_key(key));
        }
        if collection.get(value.clone())?.is_some() {
            return Err(Error::duplicate_key(key, value));
        }
        Ok(())
    }

    fn apply(&mut self, entity: &Entity, name: &str, attribute: Attribute) -> Result<()> {
        let Some(declaration) = entity.schema().declaration(name).cloned() else {
            return Ok(());
        };
        match (declaration, attribute) {
            (Declaration::Prop | Declaration::Key, Attribute::Value(value)) => {
                entity.set(name, value);
                Ok(())
            }
            (Declaration::Observer, Attribute::Observer(observer)) => {
                entity.set_observer(observer);
                Ok(())
            }
            (Declaration::BelongsTo(_), Attribute::One(target)) => {
                self.assign_one(entity, name, &target)
            }
            (Declaration::HasMany(_), Attribute::Many(values)) => {
                self.assign_many(entity, name, &values)
            }
            (declaration, _) => Err(Error::attribute_mismatch(name, declaration.expects())),
        }
    }
}

//! Relation resolution over live collections.
//!
//! Relations are never cached: every read scans the target collection and
//! every write touches foreign-key fields directly.

use oche_foundation::{Error, Result};

use crate::collection::Collection;
use crate::entity::Entity;
use crate::schema::RelationSchema;
use crate::store::Store;

fn belongs_to<'a>(entity: &'a Entity, relation: &str) -> Result<&'a RelationSchema> {
    entity
        .schema()
        .belongs_to(relation)
        .ok_or_else(|| Error::unknown_relation(entity.store_id(), relation))
}

fn expect_model(relation: &str, rel: &RelationSchema, entity: &Entity) -> Result<()> {
    if entity.store_id() == &*rel.target {
        Ok(())
    } else {
        Err(Error::wrong_model(relation, &*rel.target, entity.store_id()))
    }
}

fn has_many<'a>(entity: &'a Entity, relation: &str) -> Result<&'a RelationSchema> {
    entity
        .schema()
        .has_many(relation)
        .ok_or_else(|| Error::unknown_relation(entity.store_id(), relation))
}

impl Store {
    /// Reads a to-one relation.
    ///
    /// Looks up the target member whose key equals `entity`'s foreign key.
    /// A nil foreign key or a key with no match yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRelation` if `relation` is not a to-one relation of the
    /// entity's model, or `UnknownStore` if the target is not registered.
    pub fn resolve_one(&self, entity: &Entity, relation: &str) -> Result<Option<Entity>> {
        let rel = belongs_to(entity, relation)?;
        let target = self.collection(&rel.target)?;
        let fk = entity.get(&rel.foreign_key);
        if fk.is_nil() {
            return Ok(None);
        }
        Ok(target.get(fk)?.cloned())
    }

    /// Writes a to-one relation by storing `target`'s key in the foreign key.
    ///
    /// # Errors
    ///
    /// Returns `WrongModel` if `target` is not an entity of the relation's
    /// target model, `NoIdentityKey` if that model declares no key, along with
    /// the errors of [`Store::resolve_one`].
    pub fn assign_one(&self, entity: &Entity, relation: &str, target: &Entity) -> Result<()> {
        let rel = belongs_to(entity, relation)?;
        self.collection(&rel.target)?;
        expect_model(relation, rel, target)?;
        let key = target.identity()?;
        entity.set(&rel.foreign_key, key);
        Ok(())
    }

    /// Reads a to-many relation.
    ///
    /// Returns every member of the target collection whose foreign key equals
    /// `owner`'s key, in collection order, as an unkeyed collection.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRelation`, `UnknownStore`, or `NoIdentityKey` if the
    /// owner's model has no key.
    pub fn resolve_many(&self, owner: &Entity, relation: &str) -> Result<Collection<Entity>> {
        let rel = has_many(owner, relation)?;
        let target = self.collection(&rel.target)?;
        let key = owner.identity()?;
        if key.is_nil() {
            return Ok(Collection::empty());
        }
        Ok(target.filter(|member| member.get(&rel.foreign_key) == key))
    }

    /// Replaces a to-many relation with exactly `values`.
    ///
    /// Members of the target collection in `values` are pointed at `owner`;
    /// members previously pointed at `owner` but absent from `values` have
    /// their foreign key cleared. Values not yet in the target collection are
    /// then pointed at `owner` and added. Nothing is rolled back on failure.
    ///
    /// # Errors
    ///
    /// Returns `WrongModel` before touching any foreign key if a value is not
    /// an entity of the relation's target model, `MissingKey` if `owner`'s
    /// key is nil, any error of [`Store::resolve_many`], or the collection's
    /// error for a refused insertion.
    pub fn assign_many(&mut self, owner: &Entity, relation: &str, values: &[Entity]) -> Result<()> {
        let rel = has_many(owner, relation)?;
        for value in values {
            expect_model(relation, rel, value)?;
        }
        let key = owner.identity()?;
        if key.is_nil() {
            return Err(Error::missing_key(owner.schema().require_key()?));
        }

        let fk = &rel.foreign_key;
        let target = self.collection_mut(&rel.target)?;
        for member in target.iter() {
            if values.contains(member) {
                member.set(fk, key.clone());
            } else if member.get(fk) == key {
                member.clear(fk);
            }
        }

        for value in values {
            if !target.contains(value) {
                value.set(fk, key.clone());
                target.add(value.clone())?;
            }
        }
        Ok(())
    }
}

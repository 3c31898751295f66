//! Model declarations: properties, identity key, and relations.
//!
//! A model is declared once with a [`SchemaBuilder`] and finished into an
//! immutable [`ModelSchema`]. Parent declarations are flattened into their
//! children at declaration time.

use std::sync::Arc;

use oche_foundation::{Error, ErrorKind, Result};

use crate::probe::{Capabilities, Capable};

/// Name of the observer slot every model inherits from the base model.
pub const OBSERVE: &str = "observe";

/// A relation-valued member backed by a foreign-key field.
///
/// For a to-one relation the foreign key lives on the declaring model; for a
/// to-many relation it lives on the members of the target store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationSchema {
    /// Relation name (e.g. `game`, `players`).
    pub name: Arc<str>,
    /// Store identifier of the related model.
    pub target: Arc<str>,
    /// Foreign-key field name on the "many" side.
    pub foreign_key: Arc<str>,
}

impl RelationSchema {
    /// Creates a relation schema.
    #[must_use]
    pub fn new(
        name: impl Into<Arc<str>>,
        target: impl Into<Arc<str>>,
        foreign_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            foreign_key: foreign_key.into(),
        }
    }
}

/// What a declared member name stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    /// Plain scalar property.
    Prop,
    /// Scalar property that is also the identity key.
    Key,
    /// The observer slot.
    Observer,
    /// To-one relation.
    BelongsTo(RelationSchema),
    /// To-many relation.
    HasMany(RelationSchema),
}

impl Declaration {
    /// Describes the attribute shape this member accepts.
    #[must_use]
    pub const fn expects(&self) -> &'static str {
        match self {
            Self::Prop | Self::Key => "a value",
            Self::Observer => "an observer",
            Self::BelongsTo(_) => "an entity",
            Self::HasMany(_) => "a list of entities",
        }
    }

    /// Returns true for to-one and to-many relations.
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self, Self::BelongsTo(_) | Self::HasMany(_))
    }
}

/// Immutable declaration of a model.
#[derive(Clone, Debug)]
pub struct ModelSchema {
    store_id: Arc<str>,
    key: Option<Arc<str>>,
    declarations: Vec<(Arc<str>, Declaration)>,
    capabilities: Capabilities,
}

impl ModelSchema {
    /// Starts a declaration for a model stored under `store_id`.
    ///
    /// The model inherits the base model's observer slot.
    #[must_use]
    pub fn declare(store_id: impl Into<Arc<str>>) -> SchemaBuilder {
        SchemaBuilder {
            store_id: store_id.into(),
            key: None,
            key_is_inherited: false,
            declarations: vec![(Arc::from(OBSERVE), Declaration::Observer)],
            capabilities: Capabilities::child_of(&Capabilities::root()),
            error: None,
        }
    }

    /// Starts a child declaration that inherits every member of this one.
    ///
    /// The child may declare its own key, replacing the inherited one.
    #[must_use]
    pub fn extend(&self, store_id: impl Into<Arc<str>>) -> SchemaBuilder {
        SchemaBuilder {
            store_id: store_id.into(),
            key: self.key.clone(),
            key_is_inherited: self.key.is_some(),
            declarations: self.declarations.clone(),
            capabilities: Capabilities::child_of(&self.capabilities),
            error: None,
        }
    }

    /// Returns the store identifier.
    #[must_use]
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Returns the identity key field name, if one was declared.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the identity key field name or a `NoIdentityKey` error.
    ///
    /// # Errors
    ///
    /// Returns an error if the model declares no key.
    pub fn require_key(&self) -> Result<&str> {
        self.key()
            .ok_or_else(|| Error::no_identity_key(self.store_id()))
    }

    /// Returns the declaration for a member name.
    #[must_use]
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, d)| d)
    }

    /// Returns all declarations, inherited ones first.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.declarations.iter().map(|(n, d)| (n.as_ref(), d))
    }

    /// Returns the names of scalar properties, including the key.
    pub fn props(&self) -> impl Iterator<Item = &str> {
        self.declarations()
            .filter(|(_, d)| matches!(d, Declaration::Prop | Declaration::Key))
            .map(|(n, _)| n)
    }

    /// Returns the to-one relation with this name.
    #[must_use]
    pub fn belongs_to(&self, name: &str) -> Option<&RelationSchema> {
        match self.declaration(name) {
            Some(Declaration::BelongsTo(rel)) => Some(rel),
            _ => None,
        }
    }

    /// Returns the to-many relation with this name.
    #[must_use]
    pub fn has_many(&self, name: &str) -> Option<&RelationSchema> {
        match self.declaration(name) {
            Some(Declaration::HasMany(rel)) => Some(rel),
            _ => None,
        }
    }
}

impl Capable for ModelSchema {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

/// Builder for a [`ModelSchema`].
///
/// Declaration errors are collected and reported by [`SchemaBuilder::finish`].
#[derive(Debug)]
pub struct SchemaBuilder {
    store_id: Arc<str>,
    key: Option<Arc<str>>,
    key_is_inherited: bool,
    declarations: Vec<(Arc<str>, Declaration)>,
    capabilities: Capabilities,
    error: Option<Error>,
}

impl SchemaBuilder {
    /// Declares a scalar property.
    #[must_use]
    pub fn prop(mut self, name: impl Into<Arc<str>>) -> Self {
        self.member(name.into(), Declaration::Prop);
        self
    }

    /// Declares a scalar property as the model's identity key.
    #[must_use]
    pub fn key(mut self, name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let redeclared = if self.key_is_inherited {
            None
        } else {
            self.key.clone()
        };
        if let Some(first) = redeclared {
            let err = Error::new(ErrorKind::KeyRedeclared {
                model: self.store_id.to_string(),
                first: first.to_string(),
                second: name.to_string(),
            });
            self.fail(err);
            return self;
        }
        if let Some(inherited) = self.key.take() {
            // the replaced key stays readable as a plain property
            self.replace(&inherited, Declaration::Prop);
        }
        self.key = Some(name.clone());
        self.key_is_inherited = false;
        self.member(name, Declaration::Key);
        self
    }

    /// Declares a to-one relation to the model stored under `target`.
    #[must_use]
    pub fn belongs_to(
        mut self,
        name: impl Into<Arc<str>>,
        target: impl Into<Arc<str>>,
        foreign_key: impl Into<Arc<str>>,
    ) -> Self {
        let rel = RelationSchema::new(name, target, foreign_key);
        self.member(rel.name.clone(), Declaration::BelongsTo(rel));
        self
    }

    /// Declares a to-many relation to the model stored under `target`.
    #[must_use]
    pub fn has_many(
        mut self,
        name: impl Into<Arc<str>>,
        target: impl Into<Arc<str>>,
        foreign_key: impl Into<Arc<str>>,
    ) -> Self {
        let rel = RelationSchema::new(name, target, foreign_key);
        self.member(rel.name.clone(), Declaration::HasMany(rel));
        self
    }

    /// Finishes the declaration.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error: a second key
    /// (`KeyRedeclared`) or a member declared twice (`DuplicateDeclaration`).
    pub fn finish(self) -> Result<ModelSchema> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(ModelSchema {
            store_id: self.store_id,
            key: self.key,
            declarations: self.declarations,
            capabilities: self.capabilities,
        })
    }

    fn member(&mut self, name: Arc<str>, declaration: Declaration) {
        if self.capabilities.has_own(&name) {
            let err = Error::new(ErrorKind::DuplicateDeclaration {
                model: self.store_id.to_string(),
                member: name.to_string(),
            });
            self.fail(err);
            return;
        }
        self.capabilities.declare(name.clone());
        if !self.replace(&name, declaration.clone()) {
            self.declarations.push((name, declaration));
        }
    }

    fn replace(&mut self, name: &str, declaration: Declaration) -> bool {
        match self.declarations.iter_mut().find(|(n, _)| n.as_ref() == name) {
            Some(slot) => {
                slot.1 = declaration;
                true
            }
            None => false,
        }
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

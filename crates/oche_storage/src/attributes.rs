//! Constructor attributes.
//!
//! [`Attributes`] is an insertion-ordered map from member name to
//! [`Attribute`]. The factory applies entries in order and silently skips
//! names the model neither declares nor inherits.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use oche_foundation::Value;

use crate::entity::Entity;
use crate::observe::Observer;

/// A single constructor attribute.
#[derive(Clone)]
pub enum Attribute {
    /// Value for a property or key.
    Value(Value),
    /// Related instance for a to-one relation.
    One(Entity),
    /// Related instances for a to-many relation.
    Many(Vec<Entity>),
    /// Observer for the `observe` slot.
    Observer(Observer),
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:?}"),
            Self::One(e) => write!(f, "{e:?}"),
            Self::Many(es) => f.debug_list().entries(es).finish(),
            Self::Observer(_) => write!(f, "<observer>"),
        }
    }
}

impl From<Value> for Attribute {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Entity> for Attribute {
    fn from(e: Entity) -> Self {
        Self::One(e)
    }
}

impl From<Vec<Entity>> for Attribute {
    fn from(es: Vec<Entity>) -> Self {
        Self::Many(es)
    }
}

/// Insertion-ordered attribute map.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    entries: Vec<(Arc<str>, Attribute)>,
}

impl Attributes {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute. Re-setting a name replaces its value in place.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, attribute: impl Into<Attribute>) {
        let name = name.into();
        let attribute = attribute.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = attribute,
            None => self.entries.push((name, attribute)),
        }
    }

    /// Builder form of [`Attributes::insert`] for scalar values.
    #[must_use]
    pub fn with(mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.insert(name, Attribute::Value(value.into()));
        self
    }

    /// Adds a to-one relation attribute.
    #[must_use]
    pub fn with_one(mut self, name: impl Into<Arc<str>>, entity: &Entity) -> Self {
        self.insert(name, Attribute::One(entity.clone()));
        self
    }

    /// Adds a to-many relation attribute.
    #[must_use]
    pub fn with_many(
        mut self,
        name: impl Into<Arc<str>>,
        entities: impl IntoIterator<Item = Entity>,
    ) -> Self {
        self.insert(name, Attribute::Many(entities.into_iter().collect()));
        self
    }

    /// Adds the observer attribute.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn() + 'static) -> Self {
        self.insert(crate::schema::OBSERVE, Attribute::Observer(Rc::new(observer)));
        self
    }

    /// Returns the attribute for a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, a)| a)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_ref())
    }
}

impl IntoIterator for Attributes {
    type Item = (Arc<str>, Attribute);
    type IntoIter = std::vec::IntoIter<(Arc<str>, Attribute)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<Arc<str>>, A: Into<Attribute>> FromIterator<(K, A)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, A)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, attribute) in iter {
            attributes.insert(name, attribute);
        }
        attributes
    }
}

//! Ordered, optionally keyed containers.
//!
//! A [`Collection`] keeps members in insertion order. When constructed with a
//! key field name, no two members may ever share a value for that field.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use oche_foundation::{Error, LtVec, Result, Value};

/// A member whose fields can be read for keyed lookup.
pub trait Keyed {
    /// Returns the value of field `key`, or `Nil` if the member has none.
    fn key_value(&self, key: &str) -> Value;
}

impl<K, S> Keyed for std::collections::HashMap<K, Value, S>
where
    K: std::borrow::Borrow<str> + Eq + std::hash::Hash,
    S: std::hash::BuildHasher,
{
    fn key_value(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl<K> Keyed for std::collections::BTreeMap<K, Value>
where
    K: std::borrow::Borrow<str> + Ord,
{
    fn key_value(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }
}

/// Ordered container with an optional unique key field.
#[derive(Clone)]
pub struct Collection<T: Clone> {
    members: LtVec<T>,
    key: Option<Arc<str>>,
}

impl<T: Clone> Collection<T> {
    /// Creates an unkeyed collection from existing members.
    pub fn new(members: impl IntoIterator<Item = T>) -> Self {
        Self {
            members: members.into_iter().collect(),
            key: None,
        }
    }

    /// Creates an empty unkeyed collection.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            members: LtVec::new(),
            key: None,
        }
    }

    /// Returns the key field name, if keyed.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns true if the collection enforces a unique key.
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        self.key.is_some()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns an iterator over members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.members.iter()
    }

    /// Returns the member at a position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&T> {
        self.members.get(index)
    }

    /// Returns the first member.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.members.first()
    }

    /// Returns the last member.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.members.last()
    }

    /// Returns the first member matching the predicate.
    pub fn find_by(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.members.iter().find(|member| predicate(member))
    }

    /// Returns the position of the first member matching the predicate.
    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.members.position(predicate)
    }

    /// Returns the members matching the predicate as a new, unkeyed
    /// collection in the same order.
    #[must_use]
    pub fn filter(&self, predicate: impl FnMut(&T) -> bool) -> Self {
        Self {
            members: self.members.filter(predicate),
            key: None,
        }
    }

    /// Appends a member to an unkeyed collection.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` on a keyed collection; keyed members go through
    /// [`Collection::add`].
    pub fn push(&mut self, member: T) -> Result<()> {
        if let Some(key) = &self.key {
            return Err(Error::missing_key(key.as_ref()));
        }
        self.members = self.members.push_back(member);
        Ok(())
    }

    /// Copies the members into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.members.iter().cloned().collect()
    }
}

impl<T: Clone + PartialEq> Collection<T> {
    /// Returns true if `member` is present.
    #[must_use]
    pub fn contains(&self, member: &T) -> bool {
        self.members.iter().any(|m| m == member)
    }
}

impl<T: Clone + Keyed> Collection<T> {
    /// Creates a collection keyed on `key` from existing members.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` naming the first repeated key value.
    pub fn keyed(members: impl IntoIterator<Item = T>, key: impl Into<Arc<str>>) -> Result<Self> {
        let key = key.into();
        let members: LtVec<T> = members.into_iter().collect();
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            let value = member.key_value(&key);
            if !seen.insert(value.clone()) {
                return Err(Error::duplicate_key(key.as_ref(), value));
            }
        }
        Ok(Self {
            members,
            key: Some(key),
        })
    }

    /// Creates an empty collection, keyed if `key` is given.
    #[must_use]
    pub fn with_key(key: Option<Arc<str>>) -> Self {
        Self {
            members: LtVec::new(),
            key,
        }
    }

    /// Appends a member.
    ///
    /// # Errors
    ///
    /// On a keyed collection, returns `MissingKey` if the member's key is nil
    /// and `DuplicateKey` if another member already has that key. The
    /// collection is unchanged on error.
    pub fn add(&mut self, member: T) -> Result<()> {
        if let Some(key) = &self.key {
            let value = member.key_value(key);
            if value.is_nil() {
                return Err(Error::missing_key(key.as_ref()));
            }
            if self.members.iter().any(|m| m.key_value(key) == value) {
                return Err(Error::duplicate_key(key.as_ref(), value));
            }
        }
        self.members = self.members.push_back(member);
        Ok(())
    }

    /// Returns the member whose key equals `value`.
    ///
    /// # Errors
    ///
    /// Returns `UnkeyedLookup` on an unkeyed collection.
    pub fn get(&self, value: impl Into<Value>) -> Result<Option<&T>> {
        let key = self.key.as_deref().ok_or_else(Error::unkeyed_lookup)?;
        let value = value.into();
        Ok(self.members.iter().find(|m| m.key_value(key) == value))
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            write!(f, "Collection<{key}>")?;
        } else {
            write!(f, "Collection")?;
        }
        f.debug_list().entries(self.members.iter()).finish()
    }
}

impl<T: Clone> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, T: Clone> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = <&'a LtVec<T> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: Clone> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = <LtVec<T> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

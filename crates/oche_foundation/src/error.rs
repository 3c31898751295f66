//! Error types for the Oche system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// The main error type for Oche operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate key error.
    #[must_use]
    pub fn duplicate_key(key: impl Into<String>, value: Value) -> Self {
        Self::new(ErrorKind::DuplicateKey {
            key: key.into(),
            value,
        })
    }

    /// Creates a missing key error.
    #[must_use]
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingKey { key: key.into() })
    }

    /// Creates an unkeyed lookup error.
    #[must_use]
    pub fn unkeyed_lookup() -> Self {
        Self::new(ErrorKind::UnkeyedLookup)
    }

    /// Creates an error for a model that never declared an identity key.
    #[must_use]
    pub fn no_identity_key(model: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoIdentityKey {
            model: model.into(),
        })
    }

    /// Creates an unknown store error.
    #[must_use]
    pub fn unknown_store(store: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownStore(store.into()))
    }

    /// Creates an unknown relation error.
    #[must_use]
    pub fn unknown_relation(model: impl Into<String>, relation: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRelation {
            model: model.into(),
            relation: relation.into(),
        })
    }

    /// Creates an attribute mismatch error.
    #[must_use]
    pub fn attribute_mismatch(attribute: impl Into<String>, expected: &'static str) -> Self {
        Self::new(ErrorKind::AttributeMismatch {
            attribute: attribute.into(),
            expected,
        })
    }

    /// Creates an error for a relation write given an entity of the wrong model.
    #[must_use]
    pub fn wrong_model(
        relation: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::WrongModel {
            relation: relation.into(),
            expected: expected.into(),
            found: found.into(),
        })
    }

    /// Creates a domain precondition error.
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Precondition(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Two members of a keyed collection share a key value.
    #[error("collection may not include members with duplicate {key} keys: {value:?}")]
    DuplicateKey {
        /// The key field name.
        key: String,
        /// The colliding key value.
        value: Value,
    },

    /// A member added to a keyed collection has no value for the key field.
    #[error("{key} keyed collection member must have key {key}")]
    MissingKey {
        /// The key field name.
        key: String,
    },

    /// Keyed lookup on a collection without a key.
    #[error("cannot look up by key on an un-keyed collection")]
    UnkeyedLookup,

    /// A relation operation needed an identity key the model never declared.
    #[error("model {model} declares no identity key")]
    NoIdentityKey {
        /// The model's store identifier.
        model: String,
    },

    /// A declaration marked a second field as the identity key.
    #[error("model {model} already declares key {first}, cannot also key {second}")]
    KeyRedeclared {
        /// The model's store identifier.
        model: String,
        /// The key declared first.
        first: String,
        /// The key declared second.
        second: String,
    },

    /// A declaration named the same member twice.
    #[error("model {model} declares {member} more than once")]
    DuplicateDeclaration {
        /// The model's store identifier.
        model: String,
        /// The repeated member name.
        member: String,
    },

    /// No collection is registered under the store identifier.
    #[error("unknown store: {0}")]
    UnknownStore(String),

    /// The model has no relation of the requested kind with this name.
    #[error("unknown relation: {relation} on {model}")]
    UnknownRelation {
        /// The model's store identifier.
        model: String,
        /// The relation name that was requested.
        relation: String,
    },

    /// A constructor attribute has the wrong shape for its member.
    #[error("attribute {attribute} expects {expected}")]
    AttributeMismatch {
        /// The attribute name.
        attribute: String,
        /// Description of the expected shape.
        expected: &'static str,
    },

    /// A relation was assigned an entity of a model other than its target.
    #[error("relation {relation} expects {expected}, got {found}")]
    WrongModel {
        /// The relation name.
        relation: String,
        /// The relation's target store identifier.
        expected: String,
        /// The store identifier of the assigned entity.
        found: String,
    },

    /// A domain-level precondition was not met.
    #[error("{0}")]
    Precondition(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source name (script file, command).
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}

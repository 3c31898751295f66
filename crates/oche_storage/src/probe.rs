//! Capability probing for constructor attribute filtering.
//!
//! Every declaration carries the names it declares itself (`own`) and the
//! names flattened from all of its ancestors (`inherited`). The probe is
//! plain set membership over both, so no chain is walked at lookup time.

use std::sync::Arc;

use oche_foundation::LtSet;

use crate::schema::OBSERVE;

/// Own and inherited member names of a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    own: LtSet<Arc<str>>,
    inherited: LtSet<Arc<str>>,
}

impl Capabilities {
    /// Capabilities of the base model, which declares only the observer slot.
    #[must_use]
    pub fn root() -> Self {
        Self {
            own: LtSet::new().insert(Arc::from(OBSERVE)),
            inherited: LtSet::new(),
        }
    }

    /// Creates empty own capabilities that inherit everything `parent` has.
    #[must_use]
    pub fn child_of(parent: &Self) -> Self {
        Self {
            own: LtSet::new(),
            inherited: parent.own.union(&parent.inherited),
        }
    }

    /// Records `name` as declared by this level.
    pub fn declare(&mut self, name: Arc<str>) {
        self.own = self.own.insert(name);
    }

    /// Returns true if this level declares `name` itself.
    #[must_use]
    pub fn has_own(&self, name: &str) -> bool {
        self.own.contains(name)
    }

    /// Returns true if some ancestor declares `name`.
    #[must_use]
    pub fn inherits(&self, name: &str) -> bool {
        self.inherited.contains(name)
    }

    /// Returns true if `name` is declared here or by any ancestor.
    #[must_use]
    pub fn has_own_or_inherits(&self, name: &str) -> bool {
        self.has_own(name) || self.inherits(name)
    }

    /// Returns every name this level can answer for.
    pub fn names(&self) -> impl Iterator<Item = &Arc<str>> {
        self.own.iter().chain(self.inherited.iter())
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::root()
    }
}

/// Anything whose accepted member names can be probed.
pub trait Capable {
    /// Returns the flattened capability sets.
    fn capabilities(&self) -> &Capabilities;
}

impl Capable for Capabilities {
    fn capabilities(&self) -> &Capabilities {
        self
    }
}

/// Returns true if `target` defines or inherits a member called `name`.
pub fn has_own_or_inherits(target: &impl Capable, name: &str) -> bool {
    target.capabilities().has_own_or_inherits(name)
}

//! Construct-by-kind factories for registry subtrees.
//!
//! A [`FactoryCatalog`] maps a kind label (e.g. `"CellElementSubRegion"`)
//! to a function that populates a freshly registered child with the
//! children and slots that kind always carries. The catalog is an owned
//! value; whoever creates it decides when it is filled and torn down.

use std::fmt;

use canopy_foundation::{Error, Result, Target};

use crate::registry::Registry;
use crate::table::DualIndexTable;

/// A function that populates a registry of some kind.
pub type Factory = Box<dyn Fn(&mut Registry) -> Result<()> + Send + Sync>;

/// Owned catalog of registry factories keyed by kind.
#[derive(Default)]
pub struct FactoryCatalog {
    factories: DualIndexTable<Factory>,
}

impl FactoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::DuplicateKey`] if `kind`
    /// already has a factory.
    pub fn register<F>(&mut self, kind: &str, factory: F) -> Result<()>
    where
        F: Fn(&mut Registry) -> Result<()> + Send + Sync + 'static,
    {
        if self.factories.is_populated(kind) {
            return Err(Error::duplicate_key(kind, "factory", "factory"));
        }
        self.factories.insert(kind, Box::new(factory))?;
        Ok(())
    }

    /// Returns true if `kind` has a factory.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.is_populated(kind)
    }

    /// Iterates registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.live().map(|(_, kind, _)| kind)
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.live_len()
    }

    /// Returns true if no factory is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers `name` under `parent` with `kind` and runs the kind's factory on it.
    ///
    /// An existing live child of the same kind is populated again; factories
    /// should register through the idempotent `register_*` calls.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::NotFound`] for an unknown
    /// kind (before anything is registered), any registration error for
    /// `name`, and whatever the factory returns.
    pub fn build_child<'a>(
        &self,
        parent: &'a mut Registry,
        kind: &str,
        name: &str,
    ) -> Result<&'a mut Registry> {
        let factory = self
            .factories
            .get_by_key(kind)
            .ok_or_else(|| Error::not_found(Target::Factory, kind, parent.path()))?;

        let child = parent.register_child_of_kind(name, kind)?;
        factory(child)?;
        if child.config().trace_mutations {
            tracing::debug!(path = %child.path(), kind, "built child from catalog");
        }
        Ok(child)
    }

    /// Drops every factory.
    pub fn clear(&mut self) {
        self.factories.clear();
    }
}

impl fmt::Debug for FactoryCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryCatalog")
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}

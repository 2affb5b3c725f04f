//! Resolving slots across a region forest.

use canopy_foundation::{ErrorContext, Result};
use canopy_storage::{Cursor, Registry, SlotValue};

use crate::accessor::{
    ElementAccessor, ElementView, MaterialAccessor, MaterialView, NestedAccessor,
    NestedMaterialAccessor,
};
use crate::forest::ForestDescriptor;

/// Builds nested accessors for a slot across every region and subregion.
///
/// The slot name is resolved once per subregion through a single
/// [`Cursor`], so sibling subregions that registered their slots in the
/// same order are resolved without hashing.
#[derive(Clone, Debug, Default)]
pub struct AccessorBuilder {
    descriptor: ForestDescriptor,
    lenient: bool,
}

impl AccessorBuilder {
    /// Creates a strict builder for the given forest layout.
    #[must_use]
    pub fn new(descriptor: ForestDescriptor) -> Self {
        Self {
            descriptor,
            lenient: false,
        }
    }

    /// Treats subregions (or containers) that lack the slot as empty
    /// instead of failing. Type mismatches are still errors.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Returns the forest layout.
    #[must_use]
    pub const fn descriptor(&self) -> &ForestDescriptor {
        &self.descriptor
    }

    /// Returns true if missing slots are tolerated.
    #[must_use]
    pub const fn is_lenient(&self) -> bool {
        self.lenient
    }

    fn context(slot: &str, forest: &str) -> ErrorContext {
        ErrorContext::new()
            .with_path(forest)
            .with_frame(format!("building accessor for '{slot}'"))
    }

    fn tolerate<V: Default>(&self, result: Result<V>) -> Result<V> {
        match result {
            Err(err) if self.lenient && err.is_not_found() => Ok(V::default()),
            other => other,
        }
    }

    /// Builds a writable accessor over array slot `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::NotFound`] if (unless
    /// lenient) a container or a subregion's slot is missing, and
    /// [`canopy_foundation::ErrorKind::TypeMismatch`] if any subregion's
    /// slot is not an array of `T`.
    pub fn build<'a, T: SlotValue>(
        &self,
        forest: &'a mut Registry,
        slot: &str,
    ) -> Result<ElementAccessor<'a, T>> {
        let trace = forest.config().trace_mutations;
        let context = Self::context(slot, forest.path());
        let mut cursor = Cursor::new(slot);

        let mut regions = Vec::new();
        for (_, region) in self.regions_mut(forest).map_err(|e| e.within(context.clone()))? {
            let mut subs = Vec::new();
            if let Some(region) = region {
                for (_, sub) in self.subregions_mut(region).map_err(|e| e.within(context.clone()))? {
                    let values = match sub {
                        Some(sub) => self
                            .tolerate(sub.array_by_cursor_mut::<T>(&mut cursor))
                            .map_err(|e| e.within(context.clone()))?,
                        None => <&mut [T]>::default(),
                    };
                    subs.push(values);
                }
            }
            regions.push(subs);
        }

        if trace {
            tracing::debug!(path = ?context.path, slot, regions = regions.len(), "built accessor");
        }
        Ok(NestedAccessor::from_regions(regions))
    }

    /// Builds a read-only view over array slot `slot`.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn view<'a, T: SlotValue>(&self, forest: &'a Registry, slot: &str) -> Result<ElementView<'a, T>> {
        let context = Self::context(slot, forest.path());
        let mut cursor = Cursor::new(slot);

        let mut regions = Vec::new();
        for (_, region) in self.regions(forest).map_err(|e| e.within(context.clone()))? {
            let mut subs = Vec::new();
            if let Some(region) = region {
                for (_, sub) in self.subregions(region).map_err(|e| e.within(context.clone()))? {
                    let values = match sub {
                        Some(sub) => self
                            .tolerate(sub.array_by_cursor::<T>(&mut cursor))
                            .map_err(|e| e.within(context.clone()))?,
                        None => &[][..],
                    };
                    subs.push(values);
                }
            }
            regions.push(subs);
        }

        if forest.config().trace_mutations {
            tracing::debug!(path = forest.path(), slot, regions = regions.len(), "built view");
        }
        Ok(NestedAccessor::from_regions(regions))
    }

    /// Builds a writable accessor over array slot `slot` of every material
    /// registered under each subregion's `materials` container.
    ///
    /// # Errors
    ///
    /// As [`build`](Self::build); a subregion without the `materials`
    /// container is an error unless the builder is lenient.
    pub fn build_material<'a, T: SlotValue>(
        &self,
        forest: &'a mut Registry,
        materials: &str,
        slot: &str,
    ) -> Result<MaterialAccessor<'a, T>> {
        let trace = forest.config().trace_mutations;
        let context = Self::context(slot, forest.path()).with_frame(format!("materials '{materials}'"));
        let mut cursor = Cursor::new(slot);

        let mut regions = Vec::new();
        for (_, region) in self.regions_mut(forest).map_err(|e| e.within(context.clone()))? {
            let mut subs = Vec::new();
            if let Some(region) = region {
                for (_, sub) in self.subregions_mut(region).map_err(|e| e.within(context.clone()))? {
                    let mut mats = Vec::new();
                    if let Some(sub) = sub {
                        let container = self
                            .tolerate(sub.child_mut(materials).map(Some))
                            .map_err(|e| e.within(context.clone()))?;
                        for (_, material) in container.into_iter().flat_map(|node| node.children_mut()) {
                            let values = match material {
                                Some(material) => self
                                    .tolerate(material.array_by_cursor_mut::<T>(&mut cursor))
                                    .map_err(|e| e.within(context.clone()))?,
                                None => <&mut [T]>::default(),
                            };
                            mats.push(values);
                        }
                    }
                    subs.push(mats);
                }
            }
            regions.push(subs);
        }

        if trace {
            tracing::debug!(path = ?context.path, slot, materials, "built material accessor");
        }
        Ok(NestedMaterialAccessor::from_regions(regions))
    }

    /// Builds a read-only material view.
    ///
    /// # Errors
    ///
    /// See [`build_material`](Self::build_material).
    pub fn view_material<'a, T: SlotValue>(
        &self,
        forest: &'a Registry,
        materials: &str,
        slot: &str,
    ) -> Result<MaterialView<'a, T>> {
        let context = Self::context(slot, forest.path()).with_frame(format!("materials '{materials}'"));
        let mut cursor = Cursor::new(slot);

        let mut regions = Vec::new();
        for (_, region) in self.regions(forest).map_err(|e| e.within(context.clone()))? {
            let mut subs = Vec::new();
            if let Some(region) = region {
                for (_, sub) in self.subregions(region).map_err(|e| e.within(context.clone()))? {
                    let mut mats = Vec::new();
                    if let Some(sub) = sub {
                        let container = self
                            .tolerate(sub.child(materials).map(Some))
                            .map_err(|e| e.within(context.clone()))?;
                        for (_, material) in container.into_iter().flat_map(|node| node.children()) {
                            let values = match material {
                                Some(material) => self
                                    .tolerate(material.array_by_cursor::<T>(&mut cursor))
                                    .map_err(|e| e.within(context.clone()))?,
                                None => &[][..],
                            };
                            mats.push(values);
                        }
                    }
                    subs.push(mats);
                }
            }
            regions.push(subs);
        }
        Ok(NestedMaterialAccessor::from_regions(regions))
    }

    // --- Forest traversal ---

    /// A forest without the region container yields no regions when
    /// lenient.
    fn regions<'a>(
        &self,
        forest: &'a Registry,
    ) -> Result<impl Iterator<Item = (&'a str, Option<&'a Registry>)>> {
        let root = match self.descriptor.region_container() {
            Some(container) => self.tolerate(forest.child(container).map(Some))?,
            None => Some(forest),
        };
        Ok(root.into_iter().flat_map(|node| node.children()))
    }

    fn regions_mut<'a>(
        &self,
        forest: &'a mut Registry,
    ) -> Result<impl Iterator<Item = (&'a str, Option<&'a mut Registry>)>> {
        let root = match self.descriptor.region_container() {
            Some(container) => self.tolerate(forest.child_mut(container).map(Some))?,
            None => Some(forest),
        };
        Ok(root.into_iter().flat_map(|node| node.children_mut()))
    }

    /// A region without the subregion container yields no subregions when
    /// lenient.
    fn subregions<'a>(
        &self,
        region: &'a Registry,
    ) -> Result<impl Iterator<Item = (&'a str, Option<&'a Registry>)>> {
        let root = match self.descriptor.subregion_container() {
            Some(container) => self.tolerate(region.child(container).map(Some))?,
            None => Some(region),
        };
        Ok(root.into_iter().flat_map(|node| node.children()))
    }

    fn subregions_mut<'a>(
        &self,
        region: &'a mut Registry,
    ) -> Result<impl Iterator<Item = (&'a str, Option<&'a mut Registry>)>> {
        let root = match self.descriptor.subregion_container() {
            Some(container) => self.tolerate(region.child_mut(container).map(Some))?,
            None => Some(region),
        };
        Ok(root.into_iter().flat_map(|node| node.children_mut()))
    }
}

impl From<ForestDescriptor> for AccessorBuilder {
    fn from(descriptor: ForestDescriptor) -> Self {
        Self::new(descriptor)
    }
}

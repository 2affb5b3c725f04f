//! Pre-resolved, index-addressable views over a region forest.
//!
//! An accessor holds one slice per `(region, subregion)` pair (or per
//! `(region, subregion, material)` triple) and borrows the forest it was
//! built from. While it is alive the forest cannot be restructured or
//! resized, so the slices always point at live storage.

use std::ops::{Deref, DerefMut, Index, IndexMut};

/// Slices of one slot, nested by region and subregion.
///
/// `L` is `&[T]` for a read-only view or `&mut [T]` for a writable one.
/// Region and subregion positions are the stable indices of the
/// corresponding child tables; erased or skipped entries are empty.
#[derive(Clone, Debug, Default)]
pub struct NestedAccessor<L> {
    regions: Vec<Vec<L>>,
}

/// Writable accessor indexed by `(region, subregion, element)`.
pub type ElementAccessor<'a, T> = NestedAccessor<&'a mut [T]>;

/// Read-only accessor indexed by `(region, subregion, element)`.
pub type ElementView<'a, T> = NestedAccessor<&'a [T]>;

impl<L> NestedAccessor<L> {
    pub(crate) fn from_regions(regions: Vec<Vec<L>>) -> Self {
        Self { regions }
    }

    /// Returns the number of region positions.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Returns the number of subregion positions in region `r`.
    #[must_use]
    pub fn subregion_count(&self, r: usize) -> usize {
        self.regions.get(r).map_or(0, Vec::len)
    }
}

impl<T, L> NestedAccessor<L>
where
    L: Deref<Target = [T]>,
{
    /// Returns the element at `(r, s, e)`.
    #[must_use]
    pub fn get(&self, r: usize, s: usize, e: usize) -> Option<&T> {
        self.subregion(r, s)?.get(e)
    }

    /// Returns all elements of subregion `(r, s)`.
    #[must_use]
    pub fn subregion(&self, r: usize, s: usize) -> Option<&[T]> {
        self.regions.get(r)?.get(s).map(|values| &**values)
    }

    /// Iterates `(region, subregion, elements)` in index order.
    pub fn subregions<'a>(&'a self) -> impl Iterator<Item = (usize, usize, &'a [T])>
    where
        T: 'a,
    {
        self.regions.iter().enumerate().flat_map(|(r, subs)| {
            subs.iter()
                .enumerate()
                .map(move |(s, values)| (r, s, &**values))
        })
    }

    /// Returns the total element count across all subregions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.iter().flatten().map(|values| values.len()).sum()
    }

    /// Returns true if no subregion holds an element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, L> NestedAccessor<L>
where
    L: DerefMut<Target = [T]>,
{
    /// Returns the element at `(r, s, e)` mutably.
    pub fn get_mut(&mut self, r: usize, s: usize, e: usize) -> Option<&mut T> {
        self.subregion_mut(r, s)?.get_mut(e)
    }

    /// Returns all elements of subregion `(r, s)` mutably.
    pub fn subregion_mut(&mut self, r: usize, s: usize) -> Option<&mut [T]> {
        self.regions
            .get_mut(r)?
            .get_mut(s)
            .map(|values| &mut **values)
    }

    /// Iterates `(region, subregion, elements)` mutably.
    ///
    /// The slices are disjoint, so they can be handed to separate threads.
    pub fn subregions_mut<'a>(&'a mut self) -> impl Iterator<Item = (usize, usize, &'a mut [T])>
    where
        T: 'a,
    {
        self.regions.iter_mut().enumerate().flat_map(|(r, subs)| {
            subs.iter_mut()
                .enumerate()
                .map(move |(s, values)| (r, s, &mut **values))
        })
    }
}

impl<T, L> Index<(usize, usize, usize)> for NestedAccessor<L>
where
    L: Deref<Target = [T]>,
{
    type Output = T;

    fn index(&self, (r, s, e): (usize, usize, usize)) -> &T {
        &(*self.regions[r][s])[e]
    }
}

impl<T, L> IndexMut<(usize, usize, usize)> for NestedAccessor<L>
where
    L: DerefMut<Target = [T]>,
{
    fn index_mut(&mut self, (r, s, e): (usize, usize, usize)) -> &mut T {
        &mut (*self.regions[r][s])[e]
    }
}

/// Slices of one slot, nested by region, subregion and material.
#[derive(Clone, Debug, Default)]
pub struct NestedMaterialAccessor<L> {
    regions: Vec<Vec<Vec<L>>>,
}

/// Writable accessor indexed by `(region, subregion, material, element)`.
pub type MaterialAccessor<'a, T> = NestedMaterialAccessor<&'a mut [T]>;

/// Read-only accessor indexed by `(region, subregion, material, element)`.
pub type MaterialView<'a, T> = NestedMaterialAccessor<&'a [T]>;

impl<L> NestedMaterialAccessor<L> {
    pub(crate) fn from_regions(regions: Vec<Vec<Vec<L>>>) -> Self {
        Self { regions }
    }

    /// Returns the number of region positions.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Returns the number of subregion positions in region `r`.
    #[must_use]
    pub fn subregion_count(&self, r: usize) -> usize {
        self.regions.get(r).map_or(0, Vec::len)
    }

    /// Returns the number of material positions in subregion `(r, s)`.
    #[must_use]
    pub fn material_count(&self, r: usize, s: usize) -> usize {
        self.regions
            .get(r)
            .and_then(|subs| subs.get(s))
            .map_or(0, Vec::len)
    }
}

impl<T, L> NestedMaterialAccessor<L>
where
    L: Deref<Target = [T]>,
{
    /// Returns the element at `(r, s, m, e)`.
    #[must_use]
    pub fn get(&self, r: usize, s: usize, m: usize, e: usize) -> Option<&T> {
        self.material(r, s, m)?.get(e)
    }

    /// Returns all elements of material `m` in subregion `(r, s)`.
    #[must_use]
    pub fn material(&self, r: usize, s: usize, m: usize) -> Option<&[T]> {
        self.regions
            .get(r)?
            .get(s)?
            .get(m)
            .map(|values| &**values)
    }
}

impl<T, L> NestedMaterialAccessor<L>
where
    L: DerefMut<Target = [T]>,
{
    /// Returns the element at `(r, s, m, e)` mutably.
    pub fn get_mut(&mut self, r: usize, s: usize, m: usize, e: usize) -> Option<&mut T> {
        self.material_mut(r, s, m)?.get_mut(e)
    }

    /// Returns all elements of material `m` in subregion `(r, s)` mutably.
    pub fn material_mut(&mut self, r: usize, s: usize, m: usize) -> Option<&mut [T]> {
        self.regions
            .get_mut(r)?
            .get_mut(s)?
            .get_mut(m)
            .map(|values| &mut **values)
    }
}

impl<T, L> Index<(usize, usize, usize, usize)> for NestedMaterialAccessor<L>
where
    L: Deref<Target = [T]>,
{
    type Output = T;

    fn index(&self, (r, s, m, e): (usize, usize, usize, usize)) -> &T {
        &(*self.regions[r][s][m])[e]
    }
}

impl<T, L> IndexMut<(usize, usize, usize, usize)> for NestedMaterialAccessor<L>
where
    L: DerefMut<Target = [T]>,
{
    fn index_mut(&mut self, (r, s, m, e): (usize, usize, usize, usize)) -> &mut T {
        &mut (*self.regions[r][s][m])[e]
    }
}

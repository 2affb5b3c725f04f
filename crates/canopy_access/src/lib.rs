//! Pre-resolved accessors over region forests for Canopy.
//!
//! Compute loops index simulation fields by `(region, subregion, element)`.
//! Looking the field up by name at every step would hash the same key
//! millions of times, so this crate resolves it once:
//!
//! - [`ForestDescriptor`] - Where regions and subregions live in the tree
//! - [`AccessorBuilder`] - Resolves a slot across the whole forest
//! - [`ElementAccessor`] / [`ElementView`] - Writable and read-only results
//! - [`MaterialAccessor`] / [`MaterialView`] - Same, with a material level
//!
//! An accessor borrows the forest it was built from, so the tree cannot
//! change shape while the accessor is in use. Rebuild it after any
//! registration, erasure, or resize.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accessor;
pub mod builder;
pub mod forest;

pub use accessor::{
    ElementAccessor, ElementView, MaterialAccessor, MaterialView, NestedAccessor,
    NestedMaterialAccessor,
};
pub use builder::AccessorBuilder;
pub use forest::ForestDescriptor;

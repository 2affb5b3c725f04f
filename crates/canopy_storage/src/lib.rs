//! Tables, typed slots, and the registry tree for Canopy.
//!
//! This crate provides:
//! - [`DualIndexTable`] - Stable-index storage with key lookup and tombstones
//! - [`Cursor`] - Cached key-to-index lookups for hot call sites
//! - [`TypedSlot`] - Type-erased scalar and array fields
//! - [`Registry`] - Hierarchical, single-owner tree of children and slots
//! - [`FactoryCatalog`] - Construct-by-kind factories for subtrees
//! - [`RegistryOutline`] - Structural walk for schema and persistence

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod outline;
pub mod registry;
pub mod schema;
pub mod slot;
pub mod table;

pub use catalog::{Factory, FactoryCatalog};
pub use config::RegistryConfig;
pub use outline::{ChildOutline, RegistryOutline, SlotInfo, SlotOutline};
pub use registry::{DEFAULT_KIND, Registry};
pub use schema::{InputRequirement, OutputLevel, Persistence, SlotMetadata};
pub use slot::{SlotValue, TypedSlot};
pub use table::{Cursor, DualIndexTable, StableIndex};

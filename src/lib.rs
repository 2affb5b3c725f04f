//! Canopy - Hierarchical data repository for simulation state
//!
//! This crate re-exports all layers of the Canopy system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: canopy_access     — Forest descriptors, pre-resolved accessors
//! Layer 1: canopy_storage    — Dual-index tables, typed slots, registry tree
//! Layer 0: canopy_foundation — Core types (TypeTag, Error, paths)
//! ```

pub use canopy_access as access;
pub use canopy_foundation as foundation;
pub use canopy_storage as storage;

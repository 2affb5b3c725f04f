//! Integration tests for Layer 1: Storage
//!
//! Tests for dual-index tables, typed slots, registries, factory catalogs,
//! and outlines.

mod outline;
mod table;

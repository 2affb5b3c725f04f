//! Core types, type tags, and errors for Canopy.
//!
//! This crate provides:
//! - [`TypeTag`] - Runtime type descriptors for type-erased slots
//! - [`ElementKind`] - Scalar versus extent-sized array slots
//! - [`Error`] - Rich error types with context
//! - [`path`] - Helpers for separator-delimited registry paths

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod path;
pub mod types;

pub use error::{Error, ErrorContext, ErrorKind, Result, Target};
pub use types::{ElementKind, TypeTag};

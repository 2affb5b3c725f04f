//! Error types for the Canopy repository.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::TypeTag;

/// The main error type for Canopy operations.
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

    /// Adds outer context to this error.
    ///
    /// An existing context keeps its path, which is the more specific
    /// one, and gains the outer frames after its own.
    #[must_use]
    pub fn within(mut self, context: ErrorContext) -> Self {
        match &mut self.context {
            Some(inner) => inner.stack.extend(context.stack),
            None => self.context = Some(context),
        }
        self
    }

    /// Creates a not-found error for a missing child, slot, entry, or factory.
    #[must_use]
    pub fn not_found(target: Target, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            target,
            name: name.into(),
            path: path.into(),
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(name: impl Into<String>, registered: TypeTag, requested: TypeTag) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            name: name.into(),
            registered,
            requested,
        })
    }

    /// Creates a duplicate key error.
    #[must_use]
    pub fn duplicate_key(
        name: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::DuplicateKey {
            name: name.into(),
            existing: existing.into(),
            requested: requested.into(),
        })
    }

    /// Creates an index out of range error.
    #[must_use]
    pub fn out_of_range(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::OutOfRange { index, length })
    }

    /// Creates an already-populated error.
    #[must_use]
    pub fn already_populated(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyPopulated { key: key.into() })
    }

    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::new(ErrorKind::InvalidName {
            name: name.into(),
            reason,
        })
    }

    /// Returns true if this is a [`ErrorKind::NotFound`] error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// Returns true if this is a [`ErrorKind::TypeMismatch`] error.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }
}

/// What kind of entry a lookup failed to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// A child registry.
    Child,
    /// A typed slot.
    Slot,
    /// A raw table entry.
    Entry,
    /// A catalog factory.
    Factory,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child => write!(f, "child"),
            Self::Slot => write!(f, "slot"),
            Self::Entry => write!(f, "entry"),
            Self::Factory => write!(f, "factory"),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A child, slot, path segment, or factory is absent or tombstoned.
    #[error("{target} not found: {name} (in '{path}')")]
    NotFound {
        /// What was being looked up.
        target: Target,
        /// The missing name or path segment.
        name: String,
        /// The path resolved so far.
        path: String,
    },

    /// The requested type differs from the registered type.
    #[error("type mismatch for {name}: registered as {registered}, requested {requested}")]
    TypeMismatch {
        /// The slot name.
        name: String,
        /// The tag fixed at registration.
        registered: TypeTag,
        /// The tag the caller asked for.
        requested: TypeTag,
    },

    /// Registration collides with an existing, incompatible entry.
    #[error("duplicate key: {name} is registered as {existing}, cannot register as {requested}")]
    DuplicateKey {
        /// The colliding name.
        name: String,
        /// Description of the live entry.
        existing: String,
        /// Description of the rejected registration.
        requested: String,
    },

    /// Index beyond table length.
    #[error("index out of range: {index} (length {length})")]
    OutOfRange {
        /// The index that was accessed.
        index: usize,
        /// The table length.
        length: usize,
    },

    /// Insert into a live, non-tombstoned key.
    #[error("entry already populated: {key}")]
    AlreadyPopulated {
        /// The occupied key.
        key: String,
    },

    /// A name cannot be used as a registry key.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Registry path the failing operation ran against.
    pub path: Option<String>,
    /// Operations that led to the failure, outermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the registry path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds an operation frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "at {path}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias using the Canopy error type.
pub type Result<T> = std::result::Result<T, Error>;

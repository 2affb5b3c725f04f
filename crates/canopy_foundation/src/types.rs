//! Runtime type tags for type-erased slot storage.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a slot holds one value or an extent-sized array of values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementKind {
    /// A single value, unaffected by registry resizes.
    Scalar,
    /// One value per element, sized by the owning registry's extent.
    Array,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// Runtime type descriptor for a slot.
///
/// A tag pairs the element type's [`TypeId`] with its [`ElementKind`], so
/// `f64` and `f64[]` are distinct tags. Two tags are equal only when both
/// parts match; the human-readable name is carried for diagnostics and
/// does not take part in comparison.
#[derive(Clone, Copy, Eq)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
    kind: ElementKind,
}

impl TypeTag {
    /// Creates a tag for element type `T` with the given kind.
    #[must_use]
    pub fn of<T: 'static>(kind: ElementKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind,
        }
    }

    /// Creates a scalar tag for `T`.
    #[must_use]
    pub fn scalar<T: 'static>() -> Self {
        Self::of::<T>(ElementKind::Scalar)
    }

    /// Creates an array tag for element type `T`.
    #[must_use]
    pub fn array<T: 'static>() -> Self {
        Self::of::<T>(ElementKind::Array)
    }

    /// Returns the element kind.
    #[must_use]
    pub const fn kind(self) -> ElementKind {
        self.kind
    }

    /// Returns the element type's name as reported by [`type_name`].
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        self.name
    }

    /// Returns the element type's [`TypeId`].
    #[must_use]
    pub const fn element_id(self) -> TypeId {
        self.id
    }

    /// Returns true for array tags.
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self.kind, ElementKind::Array)
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Scalar => write!(f, "{}", self.name),
            ElementKind::Array => write!(f, "{}[]", self.name),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

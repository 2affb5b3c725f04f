//! Type-erased storage for one named field.
//!
//! A [`TypedSlot`] holds either a single value or an array of values of one
//! element type, fixed when the slot is created. Every typed access checks
//! the requested [`TypeTag`] against the registered one before downcasting.

use std::any::Any;
use std::fmt;

use canopy_foundation::{ElementKind, Error, Result, TypeTag};

use crate::schema::{InputRequirement, OutputLevel, Persistence, SlotMetadata};

/// Types that can be stored in a slot.
///
/// Blanket-implemented; values must be cloneable (for defaults and resizes)
/// and shareable across threads so registries can be read concurrently.
pub trait SlotValue: Any + Clone + fmt::Debug + Send + Sync {}

impl<T> SlotValue for T where T: Any + Clone + fmt::Debug + Send + Sync {}

trait ErasedStorage: fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn resize(&mut self, len: usize);
    fn len(&self) -> Option<usize>;
    fn reset(&mut self);
    fn default_debug(&self) -> String;
}

#[derive(Debug)]
struct ScalarStorage<T> {
    value: T,
    default: T,
}

impl<T: SlotValue> ErasedStorage for ScalarStorage<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn resize(&mut self, _len: usize) {}

    fn len(&self) -> Option<usize> {
        None
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
    }

    fn default_debug(&self) -> String {
        format!("{:?}", self.default)
    }
}

#[derive(Debug)]
struct ArrayStorage<T> {
    values: Vec<T>,
    default: T,
}

impl<T: SlotValue> ErasedStorage for ArrayStorage<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn resize(&mut self, len: usize) {
        // Keeps the prefix, fills growth with the default, drops the tail.
        self.values.resize(len, self.default.clone());
    }

    fn len(&self) -> Option<usize> {
        Some(self.values.len())
    }

    fn reset(&mut self) {
        self.values.fill(self.default.clone());
    }

    fn default_debug(&self) -> String {
        format!("{:?}", self.default)
    }
}

/// A named, type-erased field holding a scalar or an array.
#[derive(Debug)]
pub struct TypedSlot {
    name: String,
    tag: TypeTag,
    storage: Box<dyn ErasedStorage>,
    metadata: SlotMetadata,
}

impl TypedSlot {
    /// Creates a scalar slot initialized to `default`.
    #[must_use]
    pub fn scalar<T: SlotValue>(default: T) -> Self {
        Self {
            name: String::new(),
            tag: TypeTag::scalar::<T>(),
            storage: Box::new(ScalarStorage {
                value: default.clone(),
                default,
            }),
            metadata: SlotMetadata::default(),
        }
    }

    /// Creates an empty array slot whose new elements take `default`.
    ///
    /// The array is sized to the owning registry's extent on registration.
    #[must_use]
    pub fn array<T: SlotValue>(default: T) -> Self {
        Self {
            name: String::new(),
            tag: TypeTag::array::<T>(),
            storage: Box::new(ArrayStorage {
                values: Vec::new(),
                default,
            }),
            metadata: SlotMetadata::default(),
        }
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: SlotMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    /// Sets the persistence flag.
    #[must_use]
    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.metadata.persistence = persistence;
        self
    }

    /// Sets the output level.
    #[must_use]
    pub fn with_output(mut self, output: OutputLevel) -> Self {
        self.metadata.output = output;
        self
    }

    /// Sets the input requirement.
    #[must_use]
    pub fn with_input(mut self, input: InputRequirement) -> Self {
        self.metadata.input = input;
        self
    }

    pub(crate) fn named(mut self, name: &str) -> Self {
        name.clone_into(&mut self.name);
        self
    }

    /// Returns the name this slot was registered under (empty before registration).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type tag fixed at creation.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Returns the element kind.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.tag.kind()
    }

    /// Returns the metadata.
    #[must_use]
    pub const fn metadata(&self) -> &SlotMetadata {
        &self.metadata
    }

    /// Returns the metadata for editing after registration.
    pub fn metadata_mut(&mut self) -> &mut SlotMetadata {
        &mut self.metadata
    }

    /// Returns the array length, or `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        self.storage.len()
    }

    /// Returns true for an array slot with no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Renders the default value with its `Debug` formatting.
    #[must_use]
    pub fn default_debug(&self) -> String {
        self.storage.default_debug()
    }

    /// Sets an array's length; scalars ignore this.
    ///
    /// Elements in `[0, min(old, len))` are preserved, new elements take
    /// the default, and elements past `len` are dropped.
    pub fn resize(&mut self, len: usize) {
        self.storage.resize(len);
    }

    /// Restores every element (or the scalar) to the default.
    pub fn reset(&mut self) {
        self.storage.reset();
    }

    fn check(&self, requested: TypeTag) -> Result<()> {
        if self.tag == requested {
            Ok(())
        } else {
            Err(self.mismatch(requested))
        }
    }

    fn mismatch(&self, requested: TypeTag) -> Error {
        Error::type_mismatch(&self.name, self.tag, requested)
    }

    /// Returns the scalar value.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::TypeMismatch`] unless the slot
    /// is a scalar of exactly `T`.
    pub fn value<T: SlotValue>(&self) -> Result<&T> {
        let requested = TypeTag::scalar::<T>();
        self.check(requested)?;
        self.storage
            .as_any()
            .downcast_ref::<ScalarStorage<T>>()
            .map(|storage| &storage.value)
            .ok_or_else(|| self.mismatch(requested))
    }

    /// Returns the scalar value mutably.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::TypeMismatch`] unless the slot
    /// is a scalar of exactly `T`.
    pub fn value_mut<T: SlotValue>(&mut self) -> Result<&mut T> {
        let requested = TypeTag::scalar::<T>();
        self.check(requested)?;
        self.storage
            .as_any_mut()
            .downcast_mut::<ScalarStorage<T>>()
            .map(|storage| &mut storage.value)
            .ok_or_else(|| Error::type_mismatch(&self.name, self.tag, requested))
    }

    /// Returns the array elements.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::TypeMismatch`] unless the slot
    /// is an array of exactly `T`.
    pub fn values<T: SlotValue>(&self) -> Result<&[T]> {
        let requested = TypeTag::array::<T>();
        self.check(requested)?;
        self.storage
            .as_any()
            .downcast_ref::<ArrayStorage<T>>()
            .map(|storage| storage.values.as_slice())
            .ok_or_else(|| self.mismatch(requested))
    }

    /// Returns the array elements mutably.
    ///
    /// The slice cannot change length; only the owning registry resizes.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::TypeMismatch`] unless the slot
    /// is an array of exactly `T`.
    pub fn values_mut<T: SlotValue>(&mut self) -> Result<&mut [T]> {
        let requested = TypeTag::array::<T>();
        self.check(requested)?;
        self.storage
            .as_any_mut()
            .downcast_mut::<ArrayStorage<T>>()
            .map(|storage| storage.values.as_mut_slice())
            .ok_or_else(|| Error::type_mismatch(&self.name, self.tag, requested))
    }
}

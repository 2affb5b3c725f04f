//! Hierarchical registry of named children and typed slots.
//!
//! A [`Registry`] is one node of a single-owner tree. It owns a
//! [`DualIndexTable`] of child registries and a [`DualIndexTable`] of
//! [`TypedSlot`]s, plus an extent that sizes every array slot it owns
//! directly. Children know their parent only by path.

use canopy_foundation::{Error, ErrorContext, Result, Target, path};

use crate::config::RegistryConfig;
use crate::slot::{SlotValue, TypedSlot};
use crate::table::{Cursor, DualIndexTable, StableIndex};

/// Kind given to children registered without an explicit kind.
pub const DEFAULT_KIND: &str = "Group";

/// Attaches the registry path and the failing operation to an error.
fn located<'a>(path: &'a str, frame: &'static str) -> impl FnOnce(Error) -> Error + 'a {
    move |err| err.with_context(ErrorContext::new().with_path(path).with_frame(frame))
}

/// A tree node owning named child registries and named typed slots.
#[derive(Debug)]
pub struct Registry {
    name: String,
    kind: String,
    path: String,
    children: DualIndexTable<Registry>,
    slots: DualIndexTable<TypedSlot>,
    extent: usize,
    config: RegistryConfig,
}

impl Registry {
    /// Creates a root registry with the default configuration.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_config(name, RegistryConfig::default())
    }

    /// Creates a root registry with the given configuration.
    #[must_use]
    pub fn with_config(name: &str, config: RegistryConfig) -> Self {
        Self {
            name: name.to_owned(),
            kind: DEFAULT_KIND.to_owned(),
            path: path::join("", name, config.path_separator),
            children: DualIndexTable::with_capacity(config.child_capacity),
            slots: DualIndexTable::with_capacity(config.slot_capacity),
            extent: 0,
            config,
        }
    }

    fn spawn(&self, name: &str, kind: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: kind.to_owned(),
            path: path::join(&self.path, name, self.config.path_separator),
            children: DualIndexTable::with_capacity(self.config.child_capacity),
            slots: DualIndexTable::with_capacity(self.config.slot_capacity),
            extent: 0,
            config: self.config.clone(),
        }
    }

    // --- Accessors ---

    /// Returns the name this registry was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind label given at registration.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the full path from the root, e.g. `/problem/mesh/nodes`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the parent's path, or `None` for a root.
    #[must_use]
    pub fn parent_path(&self) -> Option<&str> {
        path::parent(&self.path, self.config.path_separator)
    }

    /// Returns the element count applied to directly owned array slots.
    #[must_use]
    pub const fn extent(&self) -> usize {
        self.extent
    }

    /// Returns the configuration shared with this registry's subtree.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // --- Registration ---

    /// Registers a child of the default kind, or returns the live child.
    ///
    /// # Errors
    ///
    /// See [`register_child_of_kind`](Self::register_child_of_kind).
    pub fn register_child(&mut self, name: &str) -> Result<&mut Registry> {
        self.register_child_of_kind(name, DEFAULT_KIND)
    }

    /// Registers a child with a kind label.
    ///
    /// A live child of the same kind is returned unchanged. A tombstoned
    /// name gets a fresh, empty child at its original stable index.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::InvalidName`] for empty names
    /// or names containing the path separator, and
    /// [`canopy_foundation::ErrorKind::DuplicateKey`] if a live child of a
    /// different kind holds the name.
    pub fn register_child_of_kind(&mut self, name: &str, kind: &str) -> Result<&mut Registry> {
        path::validate_name(name, self.config.path_separator)?;

        match self.children.get_by_key(name) {
            Some(existing) if existing.kind == kind => {}
            Some(existing) => {
                return Err(located(&self.path, "register_child")(Error::duplicate_key(
                    name,
                    format!("child of kind {}", existing.kind),
                    format!("child of kind {kind}"),
                )));
            }
            None => {
                let child = self.spawn(name, kind);
                let repopulated = self.children.contains_key(name);
                let (index, _) = self.children.insert_full(name, child)?;
                if self.config.trace_mutations {
                    tracing::debug!(path = %self.path, name, kind, %index, repopulated, "registered child");
                }
            }
        }

        self.children
            .get_by_key_mut(name)
            .ok_or_else(|| Error::not_found(Target::Child, name, self.path.as_str()))
    }

    /// Registers a slot, or returns the live slot if its type tag matches.
    ///
    /// New array slots are sized to the current extent. When a compatible
    /// slot is already live, `slot` (and its default) is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::InvalidName`] for unusable
    /// names and [`canopy_foundation::ErrorKind::DuplicateKey`] if a live
    /// slot with a different type tag holds the name.
    pub fn register_slot(&mut self, name: &str, slot: TypedSlot) -> Result<&mut TypedSlot> {
        path::validate_name(name, self.config.path_separator)?;

        match self.slots.get_by_key(name) {
            Some(existing) if existing.tag() == slot.tag() => {}
            Some(existing) => {
                return Err(located(&self.path, "register_slot")(Error::duplicate_key(
                    name,
                    existing.tag().to_string(),
                    slot.tag().to_string(),
                )));
            }
            None => {
                let tag = slot.tag();
                let mut slot = slot.named(name);
                slot.resize(self.extent);
                let repopulated = self.slots.contains_key(name);
                let (index, _) = self.slots.insert_full(name, slot)?;
                if self.config.trace_mutations {
                    tracing::debug!(path = %self.path, name, %tag, %index, repopulated, "registered slot");
                }
            }
        }

        self.slots
            .get_by_key_mut(name)
            .ok_or_else(|| Error::not_found(Target::Slot, name, self.path.as_str()))
    }

    /// Registers a scalar slot and returns its value.
    ///
    /// # Errors
    ///
    /// See [`register_slot`](Self::register_slot).
    pub fn register_scalar<T: SlotValue>(&mut self, name: &str, default: T) -> Result<&mut T> {
        self.register_slot(name, TypedSlot::scalar(default))?
            .value_mut()
    }

    /// Registers an array slot sized to the extent and returns its elements.
    ///
    /// # Errors
    ///
    /// See [`register_slot`](Self::register_slot).
    pub fn register_array<T: SlotValue>(&mut self, name: &str, default: T) -> Result<&mut [T]> {
        self.register_slot(name, TypedSlot::array(default))?
            .values_mut()
    }

    /// Sets the extent and resizes every directly owned array slot.
    ///
    /// Child registries keep their own extents.
    pub fn resize(&mut self, extent: usize) {
        let previous = self.extent;
        self.extent = extent;
        for (_, _, slot) in self.slots.live_mut() {
            slot.resize(extent);
        }
        if self.config.trace_mutations {
            tracing::debug!(path = %self.path, previous, extent, "resized");
        }
    }

    // --- Children ---

    /// Resolves a separator-delimited path of child names.
    ///
    /// Paths are relative to `self`; empty segments are skipped, so the
    /// empty path resolves to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::NotFound`] naming the first
    /// missing (or tombstoned) segment and the path resolved so far.
    pub fn child(&self, path: &str) -> Result<&Registry> {
        let mut node = self;
        for segment in path::segments(path, self.config.path_separator) {
            node = node
                .children
                .get_by_key(segment)
                .ok_or_else(|| Error::not_found(Target::Child, segment, node.path.as_str()))?;
        }
        Ok(node)
    }

    /// Resolves a path of child names mutably.
    ///
    /// # Errors
    ///
    /// See [`child`](Self::child).
    pub fn child_mut(&mut self, path: &str) -> Result<&mut Registry> {
        let separator = self.config.path_separator;
        let mut node = self;
        for segment in path::segments(path, separator) {
            if !node.children.is_populated(segment) {
                return Err(Error::not_found(Target::Child, segment, node.path.as_str()));
            }
            node = node
                .children
                .get_by_key_mut(segment)
                .ok_or_else(|| Error::not_found(Target::Child, segment, path))?;
        }
        Ok(node)
    }

    /// Gets a direct child by stable index.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::OutOfRange`] past the child
    /// table and [`canopy_foundation::ErrorKind::NotFound`] for a tombstone.
    pub fn child_by_index(&self, index: StableIndex) -> Result<&Registry> {
        self.children
            .try_get(index)
            .map_err(located(&self.path, "child_by_index"))
    }

    /// Gets a direct child through a cursor.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::NotFound`] if the child is
    /// absent or tombstoned.
    pub fn child_by_cursor(&self, cursor: &mut Cursor) -> Result<&Registry> {
        self.children
            .get_by_cursor(cursor)
            .ok_or_else(|| Error::not_found(Target::Child, cursor.key(), self.path.as_str()))
    }

    /// Gets a direct child mutably through a cursor.
    ///
    /// # Errors
    ///
    /// See [`child_by_cursor`](Self::child_by_cursor).
    pub fn child_by_cursor_mut(&mut self, cursor: &mut Cursor) -> Result<&mut Registry> {
        self.children
            .get_by_cursor_mut(cursor)
            .ok_or_else(|| Error::not_found(Target::Child, cursor.key(), self.path.as_str()))
    }

    /// Returns true if `name` is a live direct child.
    #[must_use]
    pub fn has_child(&self, name: &str) -> bool {
        self.children.is_populated(name)
    }

    /// Iterates direct children in insertion order, tombstones as `None`.
    pub fn children(&self) -> impl Iterator<Item = (&str, Option<&Registry>)> {
        self.children.iter()
    }

    /// Iterates direct children mutably in insertion order.
    ///
    /// The position of each item is the child's stable index.
    pub fn children_mut(&mut self) -> impl Iterator<Item = (&str, Option<&mut Registry>)> {
        self.children.iter_mut()
    }

    /// Returns the child table.
    #[must_use]
    pub const fn child_table(&self) -> &DualIndexTable<Registry> {
        &self.children
    }

    // --- Slots ---

    /// Gets a live slot by name.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::NotFound`] if the slot is
    /// absent or tombstoned.
    pub fn slot(&self, name: &str) -> Result<&TypedSlot> {
        self.slots
            .get_by_key(name)
            .ok_or_else(|| Error::not_found(Target::Slot, name, self.path.as_str()))
    }

    /// Gets a live slot mutably by name.
    ///
    /// # Errors
    ///
    /// See [`slot`](Self::slot).
    pub fn slot_mut(&mut self, name: &str) -> Result<&mut TypedSlot> {
        self.slots
            .get_by_key_mut(name)
            .ok_or_else(|| Error::not_found(Target::Slot, name, self.path.as_str()))
    }

    /// Gets a live slot through a cursor.
    ///
    /// # Errors
    ///
    /// See [`slot`](Self::slot).
    pub fn slot_by_cursor(&self, cursor: &mut Cursor) -> Result<&TypedSlot> {
        self.slots
            .get_by_cursor(cursor)
            .ok_or_else(|| Error::not_found(Target::Slot, cursor.key(), self.path.as_str()))
    }

    /// Gets a live slot mutably through a cursor.
    ///
    /// # Errors
    ///
    /// See [`slot`](Self::slot).
    pub fn slot_by_cursor_mut(&mut self, cursor: &mut Cursor) -> Result<&mut TypedSlot> {
        self.slots
            .get_by_cursor_mut(cursor)
            .ok_or_else(|| Error::not_found(Target::Slot, cursor.key(), self.path.as_str()))
    }

    /// Returns true if `name` is a live slot.
    #[must_use]
    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.is_populated(name)
    }

    /// Gets a scalar slot's value.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::NotFound`] if absent and
    /// [`canopy_foundation::ErrorKind::TypeMismatch`] unless the slot is a
    /// scalar of exactly `T`.
    pub fn scalar<T: SlotValue>(&self, name: &str) -> Result<&T> {
        self.slot(name)?.value().map_err(located(&self.path, "scalar"))
    }

    /// Gets a scalar slot's value mutably.
    ///
    /// # Errors
    ///
    /// See [`scalar`](Self::scalar).
    pub fn scalar_mut<T: SlotValue>(&mut self, name: &str) -> Result<&mut T> {
        self.slots
            .get_by_key_mut(name)
            .ok_or_else(|| Error::not_found(Target::Slot, name, self.path.as_str()))?
            .value_mut()
            .map_err(located(&self.path, "scalar_mut"))
    }

    /// Gets an array slot's elements.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::NotFound`] if absent and
    /// [`canopy_foundation::ErrorKind::TypeMismatch`] unless the slot is an
    /// array of exactly `T`.
    pub fn array<T: SlotValue>(&self, name: &str) -> Result<&[T]> {
        self.slot(name)?.values().map_err(located(&self.path, "array"))
    }

    /// Gets an array slot's elements mutably.
    ///
    /// # Errors
    ///
    /// See [`array`](Self::array).
    pub fn array_mut<T: SlotValue>(&mut self, name: &str) -> Result<&mut [T]> {
        self.slots
            .get_by_key_mut(name)
            .ok_or_else(|| Error::not_found(Target::Slot, name, self.path.as_str()))?
            .values_mut()
            .map_err(located(&self.path, "array_mut"))
    }

    /// Gets an array slot's elements through a cursor.
    ///
    /// # Errors
    ///
    /// See [`array`](Self::array).
    pub fn array_by_cursor<T: SlotValue>(&self, cursor: &mut Cursor) -> Result<&[T]> {
        self.slot_by_cursor(cursor)?
            .values()
            .map_err(located(&self.path, "array_by_cursor"))
    }

    /// Gets an array slot's elements mutably through a cursor.
    ///
    /// # Errors
    ///
    /// See [`array`](Self::array).
    pub fn array_by_cursor_mut<T: SlotValue>(&mut self, cursor: &mut Cursor) -> Result<&mut [T]> {
        self.slots
            .get_by_cursor_mut(cursor)
            .ok_or_else(|| Error::not_found(Target::Slot, cursor.key(), self.path.as_str()))?
            .values_mut()
            .map_err(located(&self.path, "array_by_cursor_mut"))
    }

    /// Iterates slots in insertion order, tombstones as `None`.
    pub fn slots(&self) -> impl Iterator<Item = (&str, Option<&TypedSlot>)> {
        self.slots.iter()
    }

    /// Returns the slot table.
    #[must_use]
    pub const fn slot_table(&self) -> &DualIndexTable<TypedSlot> {
        &self.slots
    }

    // --- Erasure ---

    /// Tombstones a child and drops its subtree. Returns true if it was live.
    pub fn erase_child(&mut self, name: &str) -> bool {
        let erased = self.children.erase_key(name).is_some();
        if erased && self.config.trace_mutations {
            tracing::debug!(path = %self.path, name, "erased child");
        }
        erased
    }

    /// Tombstones a slot and drops its storage. Returns true if it was live.
    pub fn erase_slot(&mut self, name: &str) -> bool {
        let erased = self.slots.erase_key(name).is_some();
        if erased && self.config.trace_mutations {
            tracing::debug!(path = %self.path, name, "erased slot");
        }
        erased
    }

    /// Tombstones the child and the slot called `name`, whichever exist.
    ///
    /// Never fails. Returns true if anything live was dropped.
    pub fn erase(&mut self, name: &str) -> bool {
        let child = self.erase_child(name);
        let slot = self.erase_slot(name);
        child || slot
    }
}

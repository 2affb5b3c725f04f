//! Dual-index tables with stable indices and tombstone erasure.
//!
//! A [`DualIndexTable`] owns its values and gives two ways to reach them:
//! a [`StableIndex`] assigned once at first insertion, and the key the value
//! was inserted under. Erasure leaves a tombstone behind instead of
//! compacting, so indices cached by callers stay valid for the life of the
//! table. A [`Cursor`] caches a key's index at a call site to skip hashing on
//! repeated lookups.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use canopy_foundation::{Error, Result, Target};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of an entry in a [`DualIndexTable`].
///
/// Assigned densely in insertion order and never reassigned, even after the
/// entry is erased.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StableIndex(usize);

impl StableIndex {
    /// Creates an index from a raw position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Debug for StableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StableIndex({})", self.0)
    }
}

impl fmt::Display for StableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cached `(index, key)` pair for repeated lookups of the same key.
///
/// A cursor belongs to a call site, not to a table. It starts unresolved;
/// the first lookup fills in the index, and later lookups go straight to
/// that index as long as the entry there still carries the expected key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    key: Arc<str>,
    index: Option<StableIndex>,
}

impl Cursor {
    /// Creates an unresolved cursor for `key`.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: Arc::from(key),
            index: None,
        }
    }

    /// Returns the key this cursor looks up.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cached index, if the cursor has been resolved.
    #[must_use]
    pub const fn cached_index(&self) -> Option<StableIndex> {
        self.index
    }

    /// Forgets the cached index.
    pub fn invalidate(&mut self) {
        self.index = None;
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    key: Arc<str>,
    /// `None` is a tombstone.
    value: Option<T>,
}

/// Associative container with stable-index and hash-keyed access.
///
/// Keys are unique. Erasing an entry drops its value but keeps the key and
/// its index, so [`len`](Self::len) never decreases until [`clear`](Self::clear).
/// Re-inserting an erased key reuses the original index.
#[derive(Clone, Debug)]
pub struct DualIndexTable<T> {
    entries: Vec<Entry<T>>,
    lookup: HashMap<Arc<str>, StableIndex>,
}

impl<T> Default for DualIndexTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DualIndexTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Creates an empty table with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `value` under `key`.
    ///
    /// A new key is appended at the next stable index. A tombstoned key is
    /// repopulated at its existing index.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::AlreadyPopulated`] if `key`
    /// holds a live value. The existing value is left untouched.
    pub fn insert(&mut self, key: &str, value: T) -> Result<&mut T> {
        self.insert_full(key, value).map(|(_, value)| value)
    }

    /// Like [`insert`](Self::insert), also returning the entry's index.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::AlreadyPopulated`] if `key`
    /// holds a live value.
    pub fn insert_full(&mut self, key: &str, value: T) -> Result<(StableIndex, &mut T)> {
        let index = match self.lookup.get(key).copied() {
            Some(index) => {
                if self.entries[index.0].value.is_some() {
                    return Err(Error::already_populated(key));
                }
                index
            }
            None => {
                let index = StableIndex(self.entries.len());
                let key: Arc<str> = Arc::from(key);
                self.lookup.insert(Arc::clone(&key), index);
                self.entries.push(Entry { key, value: None });
                index
            }
        };
        Ok((index, self.entries[index.0].value.insert(value)))
    }

    /// Gets a value by index.
    ///
    /// Returns `None` if `index` is out of range or tombstoned.
    #[must_use]
    pub fn get(&self, index: StableIndex) -> Option<&T> {
        self.entries.get(index.0)?.value.as_ref()
    }

    /// Gets a mutable value by index.
    pub fn get_mut(&mut self, index: StableIndex) -> Option<&mut T> {
        self.entries.get_mut(index.0)?.value.as_mut()
    }

    /// Gets a value by index, distinguishing the two failure cases.
    ///
    /// # Errors
    ///
    /// Returns [`canopy_foundation::ErrorKind::OutOfRange`] beyond the table
    /// length and [`canopy_foundation::ErrorKind::NotFound`] for a tombstone.
    pub fn try_get(&self, index: StableIndex) -> Result<&T> {
        let entry = self
            .entries
            .get(index.0)
            .ok_or_else(|| Error::out_of_range(index.0, self.entries.len()))?;
        entry
            .value
            .as_ref()
            .ok_or_else(|| Error::not_found(Target::Entry, &*entry.key, ""))
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get_by_key(&self, key: &str) -> Option<&T> {
        self.get(*self.lookup.get(key)?)
    }

    /// Gets a mutable value by key.
    pub fn get_by_key_mut(&mut self, key: &str) -> Option<&mut T> {
        let index = *self.lookup.get(key)?;
        self.get_mut(index)
    }

    /// Gets a value through a cursor, refreshing the cursor on a cache miss.
    pub fn get_by_cursor(&self, cursor: &mut Cursor) -> Option<&T> {
        let index = self.resolve(cursor)?;
        self.get(index)
    }

    /// Gets a mutable value through a cursor.
    pub fn get_by_cursor_mut(&mut self, cursor: &mut Cursor) -> Option<&mut T> {
        let index = self.resolve(cursor)?;
        self.get_mut(index)
    }

    /// Resolves a cursor to an index.
    ///
    /// When the entry at the cached index still carries the cursor's key the
    /// index is returned without hashing. Otherwise the key is looked up and
    /// the cursor refreshed; an unknown key leaves the cursor unchanged.
    pub fn resolve(&self, cursor: &mut Cursor) -> Option<StableIndex> {
        if let Some(index) = cursor.index {
            if self
                .entries
                .get(index.0)
                .is_some_and(|entry| *entry.key == *cursor.key)
            {
                return Some(index);
            }
        }

        let index = self.index_of(&cursor.key)?;
        tracing::trace!(key = %cursor.key, cached = ?cursor.index, %index, "cursor miss");
        cursor.index = Some(index);
        Some(index)
    }

    /// Returns the index assigned to `key`, including tombstoned keys.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<StableIndex> {
        self.lookup.get(key).copied()
    }

    /// Returns the key stored at `index`.
    #[must_use]
    pub fn key_at(&self, index: StableIndex) -> Option<&str> {
        self.entries.get(index.0).map(|entry| &*entry.key)
    }

    /// Returns true if `key` has ever been inserted (live or tombstoned).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    /// Returns true if `key` currently holds a live value.
    #[must_use]
    pub fn is_populated(&self, key: &str) -> bool {
        self.get_by_key(key).is_some()
    }

    /// Tombstones the entry at `index`, returning the dropped value.
    ///
    /// Erasing an out-of-range index or an existing tombstone does nothing.
    pub fn erase(&mut self, index: StableIndex) -> Option<T> {
        self.entries.get_mut(index.0)?.value.take()
    }

    /// Tombstones the entry for `key`.
    pub fn erase_key(&mut self, key: &str) -> Option<T> {
        let index = self.index_of(key)?;
        self.erase(index)
    }

    /// Tombstones the entry a cursor resolves to.
    pub fn erase_cursor(&mut self, cursor: &mut Cursor) -> Option<T> {
        let index = self.resolve(cursor)?;
        self.erase(index)
    }

    /// Returns the number of entries, tombstones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.entries.iter().filter(|e| e.value.is_some()).count()
    }

    /// Returns true if no entry was ever inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and the key map. Indices start over from zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lookup.clear();
    }

    /// Iterates `(key, value)` in insertion order; tombstones yield `None`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&T>)> {
        self.entries
            .iter()
            .map(|entry| (&*entry.key, entry.value.as_ref()))
    }

    /// Iterates `(key, value)` mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, Option<&mut T>)> {
        self.entries
            .iter_mut()
            .map(|entry| (&*entry.key, entry.value.as_mut()))
    }

    /// Iterates live entries with their indices.
    pub fn live(&self) -> impl Iterator<Item = (StableIndex, &str, &T)> {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry
                .value
                .as_ref()
                .map(|value| (StableIndex(i), &*entry.key, value))
        })
    }

    /// Iterates live entries mutably with their indices.
    pub fn live_mut(&mut self) -> impl Iterator<Item = (StableIndex, &str, &mut T)> {
        self.entries.iter_mut().enumerate().filter_map(|(i, entry)| {
            let key = &*entry.key;
            entry.value.as_mut().map(|value| (StableIndex(i), key, value))
        })
    }

    /// Iterates keys in insertion order, tombstones included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| &*entry.key)
    }
}

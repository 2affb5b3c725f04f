//! Structural outline of a registry tree.
//!
//! [`Registry::outline`] walks children and slots in insertion order,
//! tombstones included, and records names, kinds, extents, type names and
//! metadata. Schema generators and checkpoint writers consume this instead
//! of reaching into the tree. With the `serde` feature the outline can be
//! handed to any serializer; the crate itself picks no format.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use canopy_foundation::ElementKind;

use crate::registry::Registry;
use crate::schema::SlotMetadata;
use crate::slot::TypedSlot;

/// Outline of one registry and its subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegistryOutline {
    /// Registered name.
    pub name: String,
    /// Kind label.
    pub kind: String,
    /// Full path from the root.
    pub path: String,
    /// Current extent.
    pub extent: usize,
    /// Children in insertion order.
    pub children: Vec<ChildOutline>,
    /// Slots in insertion order.
    pub slots: Vec<SlotOutline>,
}

/// A child entry, live or tombstoned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChildOutline {
    /// A live child and its subtree.
    Live(RegistryOutline),
    /// An erased child; only the name survives.
    Tombstone(String),
}

/// A slot entry, live or tombstoned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SlotOutline {
    /// A live slot.
    Live(SlotInfo),
    /// An erased slot; only the name survives.
    Tombstone(String),
}

/// Description of a live slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotInfo {
    /// Registered name.
    pub name: String,
    /// Element type name, e.g. `f64`.
    pub type_name: String,
    /// Scalar or array.
    pub kind: ElementKind,
    /// Array length, `None` for scalars.
    pub len: Option<usize>,
    /// Default value rendered with `Debug`.
    pub default: String,
    /// Opaque metadata.
    pub metadata: SlotMetadata,
}

impl SlotInfo {
    fn of(name: &str, slot: &TypedSlot) -> Self {
        Self {
            name: name.to_owned(),
            type_name: slot.tag().element_name().to_owned(),
            kind: slot.kind(),
            len: slot.len(),
            default: slot.default_debug(),
            metadata: slot.metadata().clone(),
        }
    }
}

impl ChildOutline {
    /// Returns the entry's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Live(outline) => &outline.name,
            Self::Tombstone(name) => name,
        }
    }

    /// Returns true for an erased entry.
    #[must_use]
    pub const fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone(_))
    }
}

impl SlotOutline {
    /// Returns the entry's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Live(info) => &info.name,
            Self::Tombstone(name) => name,
        }
    }

    /// Returns true for an erased entry.
    #[must_use]
    pub const fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone(_))
    }
}

impl RegistryOutline {
    /// Counts live slots in this subtree.
    #[must_use]
    pub fn live_slot_count(&self) -> usize {
        let own = self.slots.iter().filter(|s| !s.is_tombstone()).count();
        let nested: usize = self
            .children
            .iter()
            .map(|child| match child {
                ChildOutline::Live(outline) => outline.live_slot_count(),
                ChildOutline::Tombstone(_) => 0,
            })
            .sum();
        own + nested
    }
}

impl Registry {
    /// Builds the outline of this registry's subtree.
    #[must_use]
    pub fn outline(&self) -> RegistryOutline {
        RegistryOutline {
            name: self.name().to_owned(),
            kind: self.kind().to_owned(),
            path: self.path().to_owned(),
            extent: self.extent(),
            children: self
                .children()
                .map(|(name, child)| match child {
                    Some(child) => ChildOutline::Live(child.outline()),
                    None => ChildOutline::Tombstone(name.to_owned()),
                })
                .collect(),
            slots: self
                .slots()
                .map(|(name, slot)| match slot {
                    Some(slot) => SlotOutline::Live(SlotInfo::of(name, slot)),
                    None => SlotOutline::Tombstone(name.to_owned()),
                })
                .collect(),
        }
    }
}

//! Slot metadata carried for schema and persistence collaborators.
//!
//! None of these fields affect storage behavior. They are recorded at
//! registration and surfaced through [`crate::Registry::outline`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Descriptive metadata attached to a slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotMetadata {
    /// Human-readable description for generated documentation.
    pub description: Option<String>,
    /// Whether the slot is written to restart checkpoints.
    pub persistence: Persistence,
    /// Visualization output level.
    pub output: OutputLevel,
    /// Whether the slot is expected from user input.
    pub input: InputRequirement,
}

impl SlotMetadata {
    /// Creates metadata with default flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the persistence flag.
    #[must_use]
    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the output level.
    #[must_use]
    pub fn with_output(mut self, output: OutputLevel) -> Self {
        self.output = output;
        self
    }

    /// Sets the input requirement.
    #[must_use]
    pub fn with_input(mut self, input: InputRequirement) -> Self {
        self.input = input;
        self
    }
}

/// Whether a slot takes part in restart checkpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Persistence {
    /// Never written; rebuilt on restart.
    Transient,
    /// Written and read back on restart.
    #[default]
    Restart,
}

/// Visualization output level, lowest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputLevel {
    /// Always written.
    Level0,
    /// Written at level 1 and above.
    Level1,
    /// Written at level 2 and above.
    Level2,
    /// Written only at the most verbose level.
    Level3,
    /// Never written.
    #[default]
    Never,
}

/// How a slot relates to user input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputRequirement {
    /// Internal state, not read from input.
    #[default]
    Internal,
    /// May be given in input; the default applies otherwise.
    Optional,
    /// Must be given in input.
    Required,
}

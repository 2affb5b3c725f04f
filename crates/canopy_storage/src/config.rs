//! Configuration for registry trees.

use canopy_foundation::path::DEFAULT_SEPARATOR;

/// Configuration shared by a registry and every child it creates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Separator between names in child paths.
    pub path_separator: char,

    /// Initial capacity hint for each registry's child table.
    pub child_capacity: usize,

    /// Initial capacity hint for each registry's slot table.
    pub slot_capacity: usize,

    /// Emit `tracing` debug events on structural mutation.
    pub trace_mutations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_SEPARATOR,
            child_capacity: 0,
            slot_capacity: 0,
            trace_mutations: true,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration that never emits mutation events.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            trace_mutations: false,
            ..Self::default()
        }
    }

    /// Creates a configuration sized for mesh-level registries.
    ///
    /// Mesh objects typically carry a few dozen fields and a handful of
    /// subgroups.
    #[must_use]
    pub fn mesh() -> Self {
        Self {
            path_separator: DEFAULT_SEPARATOR,
            child_capacity: 8,
            slot_capacity: 32,
            trace_mutations: true,
        }
    }

    /// Builder method to set the path separator.
    #[must_use]
    pub fn with_path_separator(mut self, separator: char) -> Self {
        self.path_separator = separator;
        self
    }

    /// Builder method to set the child table capacity hint.
    #[must_use]
    pub fn with_child_capacity(mut self, capacity: usize) -> Self {
        self.child_capacity = capacity;
        self
    }

    /// Builder method to set the slot table capacity hint.
    #[must_use]
    pub fn with_slot_capacity(mut self, capacity: usize) -> Self {
        self.slot_capacity = capacity;
        self
    }

    /// Builder method to enable/disable mutation events.
    #[must_use]
    pub fn with_trace_mutations(mut self, trace: bool) -> Self {
        self.trace_mutations = trace;
        self
    }
}

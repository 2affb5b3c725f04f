//! Shape of a region/subregion forest.

/// How an accessor reaches regions and subregions.
///
/// By default regions are the direct children of the forest root and
/// subregions are the direct children of each region. Mesh trees usually
/// put them one level further down, under a named container child; the
/// `with_*_container` builders describe that.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForestDescriptor {
    region_container: Option<String>,
    subregion_container: Option<String>,
}

impl ForestDescriptor {
    /// Regions and subregions are direct children.
    #[must_use]
    pub fn direct() -> Self {
        Self::default()
    }

    /// The layout used by element region managers:
    /// `<root>/elementRegions/<region>/elementSubRegions/<subregion>`.
    #[must_use]
    pub fn element_regions() -> Self {
        Self::direct()
            .with_region_container("elementRegions")
            .with_subregion_container("elementSubRegions")
    }

    /// Builder method to look for regions under a container child (a path
    /// relative to the forest root).
    #[must_use]
    pub fn with_region_container(mut self, container: impl Into<String>) -> Self {
        self.region_container = Some(container.into());
        self
    }

    /// Builder method to look for subregions under a container child of
    /// each region.
    #[must_use]
    pub fn with_subregion_container(mut self, container: impl Into<String>) -> Self {
        self.subregion_container = Some(container.into());
        self
    }

    /// Returns the region container path, if any.
    #[must_use]
    pub fn region_container(&self) -> Option<&str> {
        self.region_container.as_deref()
    }

    /// Returns the subregion container path, if any.
    #[must_use]
    pub fn subregion_container(&self) -> Option<&str> {
        self.subregion_container.as_deref()
    }
}

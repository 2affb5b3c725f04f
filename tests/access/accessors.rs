//! Integration tests for element accessors
//!
//! Tests resolution across region forests, identity with direct lookups,
//! and lenient handling of partially populated forests.

use std::ptr;

use canopy_access::{AccessorBuilder, ForestDescriptor};
use canopy_foundation::ErrorKind;
use canopy_storage::{Registry, RegistryConfig};

/// Builds `regions` regions with `subregions` subregions each, every
/// subregion holding a `pressure` array of `extent` elements.
fn forest(regions: usize, subregions: usize, extent: usize) -> Registry {
    let mut root = Registry::with_config("forest", RegistryConfig::quiet());
    for r in 0..regions {
        let region = root.register_child(&format!("region{r}")).unwrap();
        for s in 0..subregions {
            let sub = region.register_child(&format!("sub{s}")).unwrap();
            sub.resize(extent);
            sub.register_array("pressure", 0.0f64).unwrap();
        }
    }
    root
}

// =============================================================================
// Identity with direct lookup
// =============================================================================

#[test]
fn pressure_accessor_points_at_registry_storage() {
    let mut root = forest(2, 3, 4);
    let builder = AccessorBuilder::new(ForestDescriptor::direct());

    let expected: *const f64 = &root
        .child("region1/sub2")
        .unwrap()
        .array::<f64>("pressure")
        .unwrap()[3];

    let mut accessor = builder.build::<f64>(&mut root, "pressure").unwrap();
    assert_eq!(accessor.region_count(), 2);
    assert_eq!(accessor.subregion_count(1), 3);
    assert_eq!(accessor.len(), 24);
    assert!(ptr::eq(&accessor[(1, 2, 3)], expected));

    accessor[(1, 2, 3)] = 101.3;
    drop(accessor);

    let direct = root.child("region1/sub2").unwrap().array::<f64>("pressure").unwrap();
    assert_eq!(direct[3], 101.3);
}

#[test]
fn view_points_at_registry_storage() {
    let root = forest(2, 3, 4);
    let view = AccessorBuilder::new(ForestDescriptor::direct())
        .view::<f64>(&root, "pressure")
        .unwrap();

    for r in 0..2 {
        for s in 0..3 {
            let direct = root
                .child(&format!("region{r}/sub{s}"))
                .unwrap()
                .array::<f64>("pressure")
                .unwrap();
            for (e, value) in direct.iter().enumerate() {
                assert!(ptr::eq(&view[(r, s, e)], value));
            }
        }
    }
}

#[test]
fn views_can_coexist() {
    let root = forest(1, 2, 2);
    let builder = AccessorBuilder::new(ForestDescriptor::direct());
    let a = builder.view::<f64>(&root, "pressure").unwrap();
    let b = a.clone();
    assert!(ptr::eq(&a[(0, 1, 1)], &b[(0, 1, 1)]));
}

// =============================================================================
// Forest layouts
// =============================================================================

#[test]
fn container_layout() {
    let mut mesh = Registry::with_config("mesh", RegistryConfig::quiet());
    let regions = mesh.register_child("elementRegions").unwrap();
    let region = regions.register_child("Region1").unwrap();
    let subs = region.register_child("elementSubRegions").unwrap();
    let cb = subs.register_child("cb1").unwrap();
    cb.resize(3);
    cb.register_array("ghostRank", -1i32).unwrap();

    let builder = AccessorBuilder::new(ForestDescriptor::element_regions());
    let mut accessor = builder.build::<i32>(&mut mesh, "ghostRank").unwrap();
    accessor[(0, 0, 2)] = 0;
    assert_eq!(accessor.subregion(0, 0), Some(&[-1, -1, 0][..]));
}

#[test]
fn missing_container_is_not_found() {
    let mut mesh = Registry::with_config("mesh", RegistryConfig::quiet());
    let builder = AccessorBuilder::new(ForestDescriptor::element_regions());
    let err = builder.build::<i32>(&mut mesh, "ghostRank").unwrap_err();
    assert!(err.is_not_found());
    let context = err.context.unwrap();
    assert_eq!(context.path.as_deref(), Some("/mesh"));
    assert!(context.stack[0].contains("ghostRank"));
}

#[test]
fn lenient_builder_tolerates_missing_region_container() {
    let mut mesh = Registry::with_config("mesh", RegistryConfig::quiet());
    let builder = AccessorBuilder::new(ForestDescriptor::element_regions()).lenient();

    let accessor = builder.build::<f64>(&mut mesh, "pressure").unwrap();
    assert_eq!(accessor.region_count(), 0);
    assert!(accessor.is_empty());

    let view = builder.view::<f64>(&mesh, "pressure").unwrap();
    assert_eq!(view.region_count(), 0);
}

#[test]
fn mismatch_names_the_offending_subregion() {
    let mut root = forest(2, 2, 1);
    let sub = root.child_mut("region1/sub0").unwrap();
    sub.erase_slot("pressure");
    sub.register_array("pressure", 0i32).unwrap();

    let err = AccessorBuilder::new(ForestDescriptor::direct())
        .view::<f64>(&root, "pressure")
        .unwrap_err();
    assert!(err.is_type_mismatch());
    let context = err.context.unwrap();
    assert_eq!(context.path.as_deref(), Some("/forest/region1/sub0"));
    assert!(context.stack.iter().any(|frame| frame.contains("pressure")));
}

// =============================================================================
// Missing slots and tombstones
// =============================================================================

#[test]
fn strict_builder_rejects_missing_slot() {
    let mut root = forest(1, 2, 2);
    root.child_mut("region0/sub1").unwrap().erase_slot("pressure");

    let err = AccessorBuilder::new(ForestDescriptor::direct())
        .build::<f64>(&mut root, "pressure")
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn lenient_builder_leaves_gaps_empty() {
    let mut root = forest(1, 3, 2);
    root.child_mut("region0/sub1").unwrap().erase_slot("pressure");

    let accessor = AccessorBuilder::new(ForestDescriptor::direct())
        .lenient()
        .build::<f64>(&mut root, "pressure")
        .unwrap();

    assert_eq!(accessor.subregion(0, 1), Some(&[][..]));
    assert_eq!(accessor.subregion(0, 2).map(<[f64]>::len), Some(2));
    assert_eq!(accessor.get(0, 1, 0), None);
}

#[test]
fn lenient_builder_still_rejects_wrong_type() {
    let mut root = forest(1, 1, 2);
    let err = AccessorBuilder::new(ForestDescriptor::direct())
        .lenient()
        .build::<f32>(&mut root, "pressure")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn erased_subregion_keeps_its_position() {
    let mut root = forest(2, 3, 1);
    root.child_mut("region1").unwrap().erase_child("sub1");
    root.erase_child("region0");

    let view = AccessorBuilder::new(ForestDescriptor::direct())
        .view::<f64>(&root, "pressure")
        .unwrap();

    assert_eq!(view.region_count(), 2);
    assert_eq!(view.subregion_count(0), 0);
    assert_eq!(view.subregion_count(1), 3);
    assert_eq!(view.subregion(1, 1), Some(&[][..]));
    assert_eq!(view.get(1, 2, 0), Some(&0.0));
}

// =============================================================================
// Parallel compute
// =============================================================================

#[test]
fn disjoint_subregions_written_in_parallel() {
    let mut root = forest(2, 3, 16);
    let mut accessor = AccessorBuilder::new(ForestDescriptor::direct())
        .build::<f64>(&mut root, "pressure")
        .unwrap();

    std::thread::scope(|scope| {
        for (r, s, values) in accessor.subregions_mut() {
            scope.spawn(move || {
                let fill = f64::from(u32::try_from(r * 10 + s).unwrap());
                values.fill(fill);
            });
        }
    });
    drop(accessor);

    let sub = root.child("region1/sub2").unwrap();
    assert!(sub.array::<f64>("pressure").unwrap().iter().all(|v| *v == 12.0));
}

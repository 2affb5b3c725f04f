//! Integration tests for registry outlines
//!
//! Tests the structural walk consumed by schema and persistence code.

use canopy_foundation::ElementKind;
use canopy_storage::{
    ChildOutline, InputRequirement, OutputLevel, Persistence, Registry, RegistryOutline,
    SlotOutline, TypedSlot,
};

fn problem() -> Registry {
    let mut root = Registry::new("problem");
    let nodes = root.register_child_of_kind("nodeManager", "NodeManager").unwrap();
    nodes.resize(4);
    nodes
        .register_slot(
            "mass",
            TypedSlot::array(0.0f64)
                .with_description("nodal mass")
                .with_output(OutputLevel::Level1),
        )
        .unwrap();
    nodes
        .register_slot(
            "scratch",
            TypedSlot::array(0u8).with_persistence(Persistence::Transient),
        )
        .unwrap();
    nodes.erase_slot("scratch");
    root.register_child("solvers")
        .unwrap()
        .register_slot(
            "tolerance",
            TypedSlot::scalar(1e-6f64).with_input(InputRequirement::Required),
        )
        .unwrap();
    root
}

#[test]
fn outline_preserves_insertion_order_and_tombstones() {
    let outline = problem().outline();
    let names: Vec<_> = outline.children.iter().map(ChildOutline::name).collect();
    assert_eq!(names, vec!["nodeManager", "solvers"]);

    let ChildOutline::Live(nodes) = &outline.children[0] else {
        panic!("nodeManager should be live");
    };
    assert_eq!(nodes.path, "/problem/nodeManager");
    assert_eq!(nodes.extent, 4);
    assert!(matches!(&nodes.slots[1], SlotOutline::Tombstone(name) if name == "scratch"));
}

#[test]
fn outline_carries_slot_details() {
    let outline = problem().outline();
    let ChildOutline::Live(solvers) = &outline.children[1] else {
        panic!("solvers should be live");
    };
    let SlotOutline::Live(tolerance) = &solvers.slots[0] else {
        panic!("tolerance should be live");
    };
    assert_eq!(tolerance.kind, ElementKind::Scalar);
    assert_eq!(tolerance.type_name, "f64");
    assert_eq!(tolerance.metadata.input, InputRequirement::Required);
    assert_eq!(outline.live_slot_count(), 2);
}

#[test]
fn outline_survives_a_serializer() {
    let outline = problem().outline();
    let bytes = rmp_serde::to_vec(&outline).unwrap();
    let decoded: RegistryOutline = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(decoded, outline);
}

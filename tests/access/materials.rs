//! Integration tests for material accessors

use canopy_access::{AccessorBuilder, ForestDescriptor};
use canopy_storage::{Registry, RegistryConfig};

fn forest_with_materials() -> Registry {
    let mut root = Registry::with_config("forest", RegistryConfig::quiet());
    let region = root.register_child("region0").unwrap();
    for (s, extent) in [(0, 2usize), (1, 3)] {
        let sub = region.register_child(&format!("sub{s}")).unwrap();
        let models = sub.register_child("ConstitutiveModels").unwrap();
        for material in ["rock", "water"] {
            let model = models.register_child(material).unwrap();
            model.resize(extent);
            model.register_array("density", 1000.0f64).unwrap();
        }
    }
    root
}

#[test]
fn material_accessor_indexes_four_levels() {
    let mut root = forest_with_materials();
    let builder = AccessorBuilder::new(ForestDescriptor::direct());

    let mut accessor = builder
        .build_material::<f64>(&mut root, "ConstitutiveModels", "density")
        .unwrap();
    assert_eq!(accessor.material_count(0, 1), 2);
    accessor[(0, 1, 0, 2)] = 2650.0;
    drop(accessor);

    let rock = root.child("region0/sub1/ConstitutiveModels/rock").unwrap();
    assert_eq!(rock.array::<f64>("density").unwrap(), &[1000.0, 1000.0, 2650.0]);

    let view = builder
        .view_material::<f64>(&root, "ConstitutiveModels", "density")
        .unwrap();
    assert_eq!(view.get(0, 1, 0, 2), Some(&2650.0));
    assert_eq!(view.material(0, 0, 1).map(<[f64]>::len), Some(2));
}

#[test]
fn missing_material_container() {
    let mut root = forest_with_materials();
    root.child_mut("region0")
        .unwrap()
        .register_child("sub2")
        .unwrap();

    let strict = AccessorBuilder::new(ForestDescriptor::direct());
    assert!(strict
        .build_material::<f64>(&mut root, "ConstitutiveModels", "density")
        .unwrap_err()
        .is_not_found());

    let lenient = strict.lenient();
    let view = lenient
        .view_material::<f64>(&root, "ConstitutiveModels", "density")
        .unwrap();
    assert_eq!(view.subregion_count(0), 3);
    assert_eq!(view.material_count(0, 2), 0);
}

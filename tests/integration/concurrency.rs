//! Multi-reader lookups and disjoint parallel writes

use std::thread;

use canopy_access::{AccessorBuilder, ForestDescriptor};
use canopy_storage::{Cursor, Registry, RegistryConfig};

fn forest(regions: usize, subregions: usize, extent: usize) -> Registry {
    let mut root = Registry::with_config("forest", RegistryConfig::quiet());
    for r in 0..regions {
        let region = root.register_child(&format!("r{r}")).unwrap();
        for s in 0..subregions {
            let sub = region.register_child(&format!("s{s}")).unwrap();
            sub.resize(extent);
            sub.register_array("temperature", 300.0f64).unwrap();
            sub.register_array("flux", 0.0f64).unwrap();
        }
    }
    root
}

#[test]
fn concurrent_readers_with_private_cursors() {
    let root = forest(3, 3, 64);
    let root = &root;

    let totals: Vec<f64> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    let mut cursor = Cursor::new("temperature");
                    let mut total = 0.0;
                    for (_, region) in root.children() {
                        for (_, sub) in region.unwrap().children() {
                            let values = sub.unwrap().array_by_cursor::<f64>(&mut cursor).unwrap();
                            total += values.iter().sum::<f64>();
                        }
                    }
                    total
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected = 300.0 * 9.0 * 64.0;
    assert!(totals.iter().all(|t| (*t - expected).abs() < 1e-6));
}

#[test]
fn parallel_compute_reads_one_field_writes_another() {
    let mut root = forest(2, 4, 32);
    let builder = AccessorBuilder::new(ForestDescriptor::direct());

    let temperatures: Vec<Vec<f64>> = builder
        .view::<f64>(&root, "temperature")
        .unwrap()
        .subregions()
        .map(|(_, _, v)| v.to_vec())
        .collect();

    let mut flux = builder.build::<f64>(&mut root, "flux").unwrap();
    thread::scope(|scope| {
        for ((_, _, out), temps) in flux.subregions_mut().zip(&temperatures) {
            scope.spawn(move || {
                for (f, t) in out.iter_mut().zip(temps) {
                    *f = -0.5 * t;
                }
            });
        }
    });
    drop(flux);

    let view = builder.view::<f64>(&root, "flux").unwrap();
    assert_eq!(view.len(), 2 * 4 * 32);
    assert!(view.subregions().all(|(_, _, v)| v.iter().all(|f| *f == -150.0)));
}

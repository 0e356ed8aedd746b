#![allow(dead_code)]

use std::path::PathBuf;

use rigsmith::domain::{Configuration, Psu};
use rigsmith::{CatalogSnapshot, InMemoryCatalog};

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("catalog.json")
}

pub fn snapshot() -> CatalogSnapshot {
    InMemoryCatalog::read_snapshot(&fixture_path()).expect("fixture catalog parses")
}

pub fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(snapshot())
}

/// Fixture catalog after `edit` has removed or changed listings.
pub fn catalog_with(edit: impl FnOnce(&mut CatalogSnapshot)) -> InMemoryCatalog {
    let mut snapshot = snapshot();
    edit(&mut snapshot);
    InMemoryCatalog::new(snapshot)
}

/// Fixture catalog whose only PSU is far above any PSU allotment.
pub fn catalog_with_only_expensive_psu() -> InMemoryCatalog {
    let mut snapshot = snapshot();
    snapshot.psus.retain(|psu: &Psu| psu.wattage >= 1600);
    InMemoryCatalog::new(snapshot)
}

/// Panics unless every cross-component constraint holds.
pub fn assert_compatible(config: &Configuration) {
    let parts = &config.components;

    assert_eq!(parts.cpu.socket, parts.motherboard.socket, "CPU/board socket");
    assert!(parts.cpu.supports(parts.ram.memory_type), "CPU memory type");
    assert!(parts.motherboard.supports(parts.ram.memory_type), "board memory type");
    assert!(
        parts.ram.frequency <= parts.motherboard.max_memory_frequency,
        "RAM frequency"
    );
    assert!(
        parts.psu.wattage >= config.required_wattage,
        "PSU {} W below required {} W",
        parts.psu.wattage,
        config.required_wattage
    );

    if let Some(gpu) = &parts.gpu {
        assert!(
            parts.motherboard.interfaces.contains(&gpu.interface),
            "GPU interface"
        );
    }

    if let Some(cooler) = &parts.cooling {
        assert!(cooler.sockets.contains(&parts.cpu.socket), "cooler socket");
        let case = parts.case.as_ref().expect("cooling is only chosen with a case");
        assert!(cooler.fits(case), "cooler fits case");
    }

    if let Some(case) = &parts.case {
        assert!(
            case.motherboard_form_factors
                .contains(&parts.motherboard.form_factor),
            "case form factor"
        );
        if let Some(gpu) = &parts.gpu {
            let max = case.max_gpu_length_mm.expect("case lists GPU clearance");
            assert!(gpu.length_mm <= max, "GPU length");
        }
    }

    let sum: u64 = parts.prices().sum();
    assert_eq!(sum, config.total_price);
}

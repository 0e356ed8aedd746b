//! Catalog queries issued by each resolver stage.
//!
//! Every function here is pure: it turns the current selections and a price
//! ceiling into a [`Query`]. Keeping them apart from the resolver lets each
//! stage's constraint set be tested without a store.

use crate::domain::{
    minimum_budget, Category, Cooler, CoolerKind, Cpu, Field, Gpu, MemoryType, Motherboard,
    Predicate, ProfileRequirements, Query,
};

/// Graphics type a prebuilt system must report when a discrete GPU is
/// required.
pub const DISCRETE_GRAPHICS: &str = "Discrete";

fn price_ceiling(ceiling: u64) -> Predicate {
    Predicate::at_most(Field::Price, ceiling as f64)
}

/// CPUs of one memory generation, strongest first.
pub fn cpu_query(memory: MemoryType, ceiling: u64, brand: Option<&str>) -> Query {
    Query::components(Category::Cpu)
        .filter(price_ceiling(ceiling))
        .filter(Predicate::contains(Field::MemoryType, memory.to_string()))
        .filter_opt(brand.map(|b| Predicate::equals(Field::Manufacturer, b)))
        .descending(Field::Cores)
        .descending(Field::ClockFrequency)
        .ascending(Field::Price)
}

/// Boards sharing the CPU's socket and supporting `memory`.
pub fn motherboard_query(cpu: &Cpu, memory: MemoryType, ceiling: u64) -> Query {
    Query::components(Category::Motherboard)
        .filter(Predicate::equals(Field::Socket, cpu.socket.as_str()))
        .filter(Predicate::contains(Field::MemoryType, memory.to_string()))
        .filter(price_ceiling(ceiling))
        .descending(Field::MaxMemoryFrequency)
        .ascending(Field::Price)
}

/// Largest RAM kit the board can run.
pub fn ram_query(board: &Motherboard, memory: MemoryType, ceiling: u64, max_modules: u32) -> Query {
    Query::components(Category::Ram)
        .filter(Predicate::equals(Field::MemoryType, memory.to_string()))
        .filter(Predicate::at_most(
            Field::Frequency,
            f64::from(board.max_memory_frequency),
        ))
        .filter(price_ceiling(ceiling))
        .filter(Predicate::at_most(Field::Modules, f64::from(max_modules)))
        .descending(Field::Capacity)
        .ascending(Field::Price)
        .limit(1)
}

/// Short-list of coolers able to dissipate `margin` times the CPU's TDP,
/// least capable first.
pub fn cooling_query(cpu: &Cpu, ceiling: u64, margin: f64, shortlist: usize) -> Query {
    Query::components(Category::Cooling)
        .filter(Predicate::contains(Field::Socket, cpu.socket.as_str()))
        .filter(price_ceiling(ceiling))
        .filter(Predicate::at_least(
            Field::Dissipation,
            f64::from(cpu.thermal_output) * margin,
        ))
        .ascending(Field::Dissipation)
        .ascending(Field::Price)
        .limit(shortlist)
}

/// Graphics card on one of the board's expansion interfaces.
pub fn gpu_query(board: &Motherboard, ceiling: u64) -> Query {
    Query::components(Category::Gpu)
        .filter(price_ceiling(ceiling))
        .filter(Predicate::one_of(Field::Interface, board.interfaces.iter().cloned()))
        .descending(Field::VideoMemory)
        .ascending(Field::Price)
        .limit(1)
}

fn drive_query(category: Category, ceiling: u64) -> Query {
    Query::components(category)
        .filter(price_ceiling(ceiling))
        .descending(Field::Capacity)
        .descending(Field::TransferRate)
        .limit(1)
}

pub fn nvme_query(ceiling: u64) -> Query {
    drive_query(Category::Nvme, ceiling)
}

pub fn ssd_query(ceiling: u64) -> Query {
    drive_query(Category::Ssd, ceiling)
}

pub fn hdd_query(ceiling: u64) -> Query {
    Query::components(Category::Hdd)
        .filter(price_ceiling(ceiling))
        .descending(Field::Capacity)
        .limit(1)
}

/// Price ceiling for the PSU: the larger of its allotment and floor, plus
/// half of whatever the rest of the budget leaves above that.
pub fn psu_budget(allotted: u64, remaining: u64) -> u64 {
    let base = allotted.max(minimum_budget(Category::Psu));
    if remaining > base {
        (base + (remaining - base) / 2).min(remaining)
    } else {
        base
    }
}

/// Certified units first, then cheapest.
pub fn psu_query(required_wattage: u32, ceiling: u64) -> Query {
    Query::components(Category::Psu)
        .filter(Predicate::at_least(Field::Wattage, f64::from(required_wattage)))
        .filter(price_ceiling(ceiling))
        .descending(Field::Certified)
        .ascending(Field::Price)
        .limit(1)
}

/// Cheapest PSU meeting the wattage regardless of price.
pub fn psu_fallback_query(required_wattage: u32) -> Query {
    Query::components(Category::Psu)
        .filter(Predicate::at_least(Field::Wattage, f64::from(required_wattage)))
        .ascending(Field::Price)
        .limit(1)
}

/// Case taking the board, the GPU if any, and the best cooling candidate if
/// any.
pub fn case_query(
    board: &Motherboard,
    gpu: Option<&Gpu>,
    best_cooler: Option<&Cooler>,
    ceiling: u64,
) -> Query {
    let cooler_fit = best_cooler.map(|cooler| match cooler.kind {
        CoolerKind::Liquid => Predicate::equals(Field::LiquidCooling, true),
        CoolerKind::Air => Predicate::at_least(Field::CoolerClearance, cooler.height_mm),
    });

    Query::components(Category::Case)
        .filter(price_ceiling(ceiling))
        .filter(Predicate::contains(
            Field::MotherboardFormFactors,
            board.form_factor.as_str(),
        ))
        .filter_opt(gpu.map(|g| Predicate::at_least(Field::MaxGpuLength, g.length_mm)))
        .filter_opt(cooler_fit)
        .descending(Field::Rating)
        .ascending(Field::Price)
        .limit(1)
}

/// Most expensive prebuilt system meeting the profile minimums, skipping
/// names in `excluded`.
pub fn prebuilt_query(requirements: &ProfileRequirements, budget: u64, excluded: &[String]) -> Query {
    let discrete = requirements
        .gpu_required
        .then(|| Predicate::contains(Field::GraphicsType, DISCRETE_GRAPHICS));
    let exclusion =
        (!excluded.is_empty()).then(|| Predicate::not_in(Field::Name, excluded.iter().cloned()));

    Query::prebuilt()
        .filter(Predicate::at_least(
            Field::Cores,
            f64::from(requirements.min_cpu_cores),
        ))
        .filter(Predicate::at_least(
            Field::RamCapacity,
            f64::from(requirements.min_ram_gb),
        ))
        .filter(Predicate::at_least(
            Field::SsdCapacity,
            f64::from(requirements.min_ssd_gb),
        ))
        .filter(price_ceiling(budget))
        .filter_opt(discrete)
        .filter_opt(exclusion)
        .descending(Field::Price)
        .descending(Field::Rating)
        .limit(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Listing, Profile, RecordKind};

    fn listing(price: u64) -> Listing {
        Listing {
            name: "part".to_string(),
            manufacturer: "Acme".to_string(),
            price,
            rating: None,
            link: None,
        }
    }

    fn cpu() -> Cpu {
        Cpu {
            listing: listing(20_000),
            socket: "AM5".to_string(),
            cores: 8,
            threads: Some(16),
            clock_ghz: 4.2,
            memory_types: vec![MemoryType::Ddr5],
            thermal_output: 105,
            power_draw: None,
            integrated_graphics: None,
        }
    }

    fn board() -> Motherboard {
        Motherboard {
            listing: listing(15_000),
            socket: "AM5".to_string(),
            chipset: None,
            form_factor: "ATX".to_string(),
            memory_types: vec![MemoryType::Ddr5],
            max_memory_frequency: 6000,
            memory_slots: None,
            interfaces: vec!["PCIe 4.0".to_string(), "PCIe 5.0".to_string()],
            m2_slots: None,
            sata_ports: None,
            power_draw: None,
        }
    }

    fn cooler(kind: CoolerKind, height_mm: f64) -> Cooler {
        Cooler {
            listing: listing(3_000),
            kind,
            sockets: vec!["AM5".to_string()],
            dissipation: 150.0,
            height_mm,
            power_draw: None,
        }
    }

    #[test]
    fn test_cpu_query_brand_is_optional() {
        let open = cpu_query(MemoryType::Ddr5, 20_000, None);
        assert_eq!(open.predicates.len(), 2);
        assert_eq!(open.kind, RecordKind::Component(Category::Cpu));

        let branded = cpu_query(MemoryType::Ddr4, 20_000, Some("AMD"));
        assert!(branded
            .predicates
            .contains(&Predicate::equals(Field::Manufacturer, "AMD")));
        assert!(branded
            .predicates
            .contains(&Predicate::contains(Field::MemoryType, "DDR4")));
    }

    #[test]
    fn test_cooling_margin_applied_to_tdp() {
        let query = cooling_query(&cpu(), 5_000, 1.2, 3);
        assert!(query
            .predicates
            .contains(&Predicate::at_least(Field::Dissipation, 105.0 * 1.2)));
        assert_eq!(query.limit, Some(3));
    }

    #[test]
    fn test_gpu_limited_to_board_interfaces() {
        let query = gpu_query(&board(), 30_000);
        assert!(query.predicates.contains(&Predicate::one_of(
            Field::Interface,
            ["PCIe 4.0", "PCIe 5.0"]
        )));
    }

    #[test]
    fn test_case_predicates_only_when_relevant() {
        let bare = case_query(&board(), None, None, 6_000);
        assert_eq!(bare.predicates.len(), 2);

        let air = case_query(&board(), None, Some(&cooler(CoolerKind::Air, 158.0)), 6_000);
        assert!(air
            .predicates
            .contains(&Predicate::at_least(Field::CoolerClearance, 158.0)));

        let liquid = case_query(&board(), None, Some(&cooler(CoolerKind::Liquid, 52.0)), 6_000);
        assert!(liquid
            .predicates
            .contains(&Predicate::equals(Field::LiquidCooling, true)));
        assert!(!liquid
            .predicates
            .iter()
            .any(|p| p.field() == Field::CoolerClearance));
    }

    #[test]
    fn test_psu_budget() {
        // Allotment below the floor is raised to it.
        assert_eq!(psu_budget(500, 0), 899);
        assert_eq!(psu_budget(4_000, 3_000), 4_000);
        assert_eq!(psu_budget(4_000, 10_000), 7_000);
        assert_eq!(psu_budget(4_000, 4_001), 4_000);
    }

    #[test]
    fn test_prebuilt_query_exclusions() {
        let requirements = ProfileRequirements {
            profile: Profile::Gaming,
            min_cpu_cores: 6,
            min_ram_gb: 16,
            min_ssd_gb: 512,
            gpu_required: true,
        };

        let first = prebuilt_query(&requirements, 90_000, &[]);
        assert!(!first.predicates.iter().any(|p| p.field() == Field::Name));
        assert!(first
            .predicates
            .contains(&Predicate::contains(Field::GraphicsType, DISCRETE_GRAPHICS)));

        let shown = vec!["Rig One".to_string()];
        let next = prebuilt_query(&requirements, 90_000, &shown);
        assert!(next
            .predicates
            .contains(&Predicate::not_in(Field::Name, ["Rig One"])));
    }
}

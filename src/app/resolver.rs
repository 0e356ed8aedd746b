//! The staged compatibility resolver.
//!
//! Stages run in a fixed order against one [`ResolutionState`]:
//!
//! 1. CPU, motherboard and RAM, tried per memory generation, newest first.
//! 2. Cooling short-list.
//! 3. GPU, for profiles that need discrete graphics.
//! 4. NVMe, SATA SSD and HDD.
//! 5. PSU sized from the accumulated draw.
//! 6. Case, then the first short-listed cooler that fits it.
//!
//! Only stage 1 and a missing PSU can fail a resolution. Everything else
//! records a [`Warning`] and moves on.

use tracing::{debug, info, warn};

use crate::domain::{
    allocate, Budget, BudgetPlan, Case, Category, Configuration, ConfigurationAssembler, Cooler,
    Cpu, Drive, DomainError, Gpu, Hdd, MemoryType, Motherboard, Profile, Psu, Ram,
    ResolutionState, ResolverConfig, Warning,
};
use crate::ports::{fetch, fetch_first, CatalogStore};

use super::stages;

/// Resolves a profile and budget into a compatible [`Configuration`].
pub struct CompatibilityResolver<'a> {
    catalog: &'a dyn CatalogStore,
    config: ResolverConfig,
}

impl<'a> CompatibilityResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogStore, config: ResolverConfig) -> Self {
        Self { catalog, config }
    }

    /// Run every stage and assemble the result.
    ///
    /// Fails with [`DomainError::RequiredComponentMissing`] when no platform
    /// or no PSU can be found, and with [`DomainError::CatalogUnavailable`]
    /// when the store itself fails.
    pub fn resolve(
        &self,
        profile: Profile,
        budget: Budget,
        brand: Option<&str>,
    ) -> Result<Configuration, DomainError> {
        info!(
            profile = %profile,
            budget = budget.amount(),
            brand = brand.unwrap_or("any"),
            "Resolving configuration"
        );

        let plan = allocate(profile, budget);
        let mut state = ResolutionState::new(profile, budget);

        self.select_platform(&mut state, &plan, brand)?;
        self.shortlist_cooling(&mut state, &plan)?;
        if profile.requires_discrete_gpu() {
            self.select_gpu(&mut state, &plan)?;
        }
        self.select_storage(&mut state, &plan)?;
        self.select_psu(&mut state, &plan)?;
        self.select_case(&mut state, &plan)?;

        let configuration = ConfigurationAssembler::assemble(state).inspect_err(|e| {
            warn!(error = %e, "Resolution failed the required-component check");
        })?;

        info!(
            total_price = configuration.total_price,
            budget_used_percent = configuration.budget_used_percent,
            warnings = configuration.warnings.len(),
            "Configuration resolved"
        );
        for warning in &configuration.warnings {
            warn!(slot = %warning.category(), "{}", warning);
        }
        Ok(configuration)
    }

    fn select_platform(
        &self,
        state: &mut ResolutionState,
        plan: &BudgetPlan,
        brand: Option<&str>,
    ) -> Result<(), DomainError> {
        let max_modules = if state.budget() > self.config.dual_module_budget {
            2
        } else {
            1
        };

        for memory in MemoryType::PRIORITY {
            match self.find_platform(memory, plan, state.remaining_budget(), brand, max_modules)? {
                Some((cpu, board, ram)) => {
                    info!(
                        memory = %memory,
                        cpu = %cpu.listing.name,
                        motherboard = %board.listing.name,
                        ram = %ram.listing.name,
                        "Platform selected"
                    );
                    state.commit_platform(cpu, board, ram);
                    return Ok(());
                }
                None => debug!(memory = %memory, "No compatible platform for generation"),
            }
        }

        warn!("No compatible CPU, motherboard and RAM in any memory generation");
        Err(DomainError::RequiredComponentMissing {
            missing: vec![Category::Cpu, Category::Motherboard, Category::Ram],
        })
    }

    /// Walk CPUs and, per CPU, boards in rank order until a RAM kit fits.
    ///
    /// Exhaustive on purpose: giving up after the best CPU alone makes
    /// success non-monotone in the budget, since a richer plan can rank a
    /// CPU first that has no affordable board.
    fn find_platform(
        &self,
        memory: MemoryType,
        plan: &BudgetPlan,
        remaining: u64,
        brand: Option<&str>,
        max_modules: u32,
    ) -> Result<Option<(Cpu, Motherboard, Ram)>, DomainError> {
        let cpu_ceiling = plan.get(Category::Cpu).min(remaining);
        let cpus: Vec<Cpu> = fetch(self.catalog, &stages::cpu_query(memory, cpu_ceiling, brand))?;

        for cpu in cpus {
            let after_cpu = remaining.saturating_sub(cpu.listing.price);
            let board_ceiling = plan.get(Category::Motherboard).min(after_cpu);
            let boards: Vec<Motherboard> = fetch(
                self.catalog,
                &stages::motherboard_query(&cpu, memory, board_ceiling),
            )?;

            for board in boards {
                let after_board = after_cpu.saturating_sub(board.listing.price);
                let ram_ceiling = plan.get(Category::Ram).min(after_board);
                let ram: Option<Ram> = fetch_first(
                    self.catalog,
                    &stages::ram_query(&board, memory, ram_ceiling, max_modules),
                )?;

                if let Some(ram) = ram {
                    return Ok(Some((cpu, board, ram)));
                }
            }
        }

        Ok(None)
    }

    fn shortlist_cooling(
        &self,
        state: &mut ResolutionState,
        plan: &BudgetPlan,
    ) -> Result<(), DomainError> {
        let Some(cpu) = state.cpu() else {
            return Ok(());
        };
        let query = stages::cooling_query(
            cpu,
            plan.get(Category::Cooling),
            self.config.cooling_margin,
            self.config.cooling_shortlist,
        );

        let candidates: Vec<Cooler> = fetch(self.catalog, &query)?;
        debug!(candidates = candidates.len(), "Cooling short-list");
        state.set_cooling_candidates(candidates);
        Ok(())
    }

    fn select_gpu(&self, state: &mut ResolutionState, plan: &BudgetPlan) -> Result<(), DomainError> {
        let Some(board) = state.motherboard() else {
            return Ok(());
        };
        let query = stages::gpu_query(board, plan.get(Category::Gpu));

        match fetch_first::<Gpu>(self.catalog, &query)? {
            Some(gpu) => {
                debug!(gpu = %gpu.listing.name, price = gpu.listing.price, "GPU selected");
                state.commit_gpu(gpu);
            }
            None => state.warn(Warning::NoGpu),
        }
        Ok(())
    }

    fn select_storage(
        &self,
        state: &mut ResolutionState,
        plan: &BudgetPlan,
    ) -> Result<(), DomainError> {
        let nvme_plan = plan.get(Category::Nvme);
        if nvme_plan > 0 {
            let ceiling = nvme_plan.min(state.remaining_budget());
            match fetch_first::<Drive>(self.catalog, &stages::nvme_query(ceiling))? {
                Some(drive) => {
                    debug!(nvme = %drive.listing.name, "NVMe selected");
                    state.commit_nvme(drive);
                }
                None => state.warn(Warning::NoNvme),
            }
        }

        let ssd_plan = plan.get(Category::Ssd);
        if ssd_plan > 0 && state.remaining() > 0 {
            let ceiling = ssd_plan.min(state.remaining_budget());
            match fetch_first::<Drive>(self.catalog, &stages::ssd_query(ceiling))? {
                Some(drive) => {
                    debug!(ssd = %drive.listing.name, "SSD selected");
                    state.commit_ssd(drive);
                }
                None => state.warn(Warning::NoSsd),
            }
        }

        let hdd_plan = plan.get(Category::Hdd);
        if hdd_plan > 0 && state.remaining() > 0 {
            let ceiling = hdd_plan.min(state.remaining_budget());
            match fetch_first::<Hdd>(self.catalog, &stages::hdd_query(ceiling))? {
                Some(hdd) => {
                    debug!(hdd = %hdd.listing.name, "HDD selected");
                    state.commit_hdd(hdd);
                }
                None => state.warn(Warning::NoHdd),
            }
        }

        Ok(())
    }

    fn select_psu(&self, state: &mut ResolutionState, plan: &BudgetPlan) -> Result<(), DomainError> {
        let required = state
            .power()
            .required_wattage(state.profile(), self.config.psu_headroom_watts);
        state.set_required_wattage(required);

        let ceiling = stages::psu_budget(plan.get(Category::Psu), state.remaining_budget());
        debug!(
            draw = state.power().watts(),
            required_wattage = required,
            ceiling,
            "Sizing PSU"
        );

        if let Some(psu) = fetch_first::<Psu>(self.catalog, &stages::psu_query(required, ceiling))? {
            debug!(psu = %psu.listing.name, wattage = psu.wattage, "PSU selected");
            state.commit_psu(psu);
            return Ok(());
        }

        match fetch_first::<Psu>(self.catalog, &stages::psu_fallback_query(required))? {
            Some(psu) => {
                warn!(
                    psu = %psu.listing.name,
                    price = psu.listing.price,
                    ceiling,
                    "PSU selected above its price ceiling"
                );
                state.warn(Warning::PsuOverBudget {
                    price: psu.listing.price,
                    ceiling,
                });
                state.commit_psu(psu);
            }
            None => {
                warn!(required_wattage = required, "No PSU meets the wattage requirement");
                state.warn(Warning::NoPsu {
                    required_wattage: required,
                });
            }
        }
        Ok(())
    }

    fn select_case(&self, state: &mut ResolutionState, plan: &BudgetPlan) -> Result<(), DomainError> {
        let Some(board) = state.motherboard() else {
            return Ok(());
        };
        let query = stages::case_query(
            board,
            state.gpu(),
            state.cooling_candidates().first(),
            plan.get(Category::Case),
        );

        let Some(case) = fetch_first::<Case>(self.catalog, &query)? else {
            state.warn(Warning::NoCase);
            state.warn(Warning::NoCompatibleCooler);
            return Ok(());
        };

        let cooler = state
            .cooling_candidates()
            .iter()
            .find(|cooler| cooler.fits(&case))
            .cloned();

        debug!(case = %case.listing.name, "Case selected");
        state.commit_case(case);

        match cooler {
            Some(cooler) => {
                debug!(cooler = %cooler.listing.name, kind = %cooler.kind, "Cooling selected");
                state.commit_cooling(cooler);
            }
            None => state.warn(Warning::NoCompatibleCooler),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCatalog;
    use crate::domain::{CatalogSnapshot, Listing, Query, Record};

    struct BrokenStore;

    impl CatalogStore for BrokenStore {
        fn query(&self, _query: &Query) -> Result<Vec<Record>, DomainError> {
            Err(DomainError::CatalogUnavailable("connection refused".to_string()))
        }

        fn manufacturers(&self, _category: Category) -> Result<Vec<String>, DomainError> {
            Err(DomainError::CatalogUnavailable("connection refused".to_string()))
        }

        fn profile_requirements(
            &self,
            _profile: Profile,
        ) -> Result<Option<crate::domain::ProfileRequirements>, DomainError> {
            Err(DomainError::CatalogUnavailable("connection refused".to_string()))
        }
    }

    fn listing(name: &str, price: u64) -> Listing {
        Listing {
            name: name.to_string(),
            manufacturer: "Acme".to_string(),
            price,
            rating: None,
            link: None,
        }
    }

    fn ddr4_platform() -> CatalogSnapshot {
        CatalogSnapshot {
            cpus: vec![Cpu {
                listing: listing("Quad", 6_000),
                socket: "AM4".to_string(),
                cores: 4,
                threads: None,
                clock_ghz: 3.6,
                memory_types: vec![MemoryType::Ddr4, MemoryType::Ddr5],
                thermal_output: 65,
                power_draw: None,
                integrated_graphics: None,
            }],
            motherboards: vec![Motherboard {
                listing: listing("Board", 4_000),
                socket: "AM4".to_string(),
                chipset: None,
                form_factor: "mATX".to_string(),
                memory_types: vec![MemoryType::Ddr4],
                max_memory_frequency: 3200,
                memory_slots: None,
                interfaces: vec!["PCIe 4.0".to_string()],
                m2_slots: None,
                sata_ports: None,
                power_draw: None,
            }],
            memory: vec![Ram {
                listing: listing("Stick", 2_000),
                memory_type: MemoryType::Ddr4,
                frequency: 3200,
                modules: 1,
                capacity_gb: 16,
                form_factor: None,
                power_draw: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_store_fault_propagates() {
        let resolver = CompatibilityResolver::new(&BrokenStore, ResolverConfig::default());
        let err = resolver
            .resolve(Profile::Office, Budget::new(40_000).unwrap(), None)
            .unwrap_err();
        assert!(err.is_catalog_fault());
    }

    #[test]
    fn test_falls_back_to_older_generation() {
        let mut snapshot = ddr4_platform();
        snapshot.psus.push(Psu {
            listing: listing("Unit", 3_000),
            wattage: 500,
            certificate: None,
            form_factor: None,
        });
        let catalog = InMemoryCatalog::new(snapshot);
        let resolver = CompatibilityResolver::new(&catalog, ResolverConfig::default());

        let config = resolver
            .resolve(Profile::Office, Budget::new(40_000).unwrap(), None)
            .unwrap();
        assert_eq!(config.components.ram.memory_type, MemoryType::Ddr4);
    }

    #[test]
    fn test_missing_psu_fails_resolution() {
        let catalog = InMemoryCatalog::new(ddr4_platform());
        let resolver = CompatibilityResolver::new(&catalog, ResolverConfig::default());

        let err = resolver
            .resolve(Profile::Office, Budget::new(40_000).unwrap(), None)
            .unwrap_err();
        match err {
            DomainError::RequiredComponentMissing { missing } => {
                assert_eq!(missing, vec![Category::Psu]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_brand_filter_excludes_other_manufacturers() {
        let catalog = InMemoryCatalog::new(ddr4_platform());
        let resolver = CompatibilityResolver::new(&catalog, ResolverConfig::default());

        let err = resolver
            .resolve(Profile::Office, Budget::new(40_000).unwrap(), Some("Intel"))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::RequiredComponentMissing { ref missing } if missing.contains(&Category::Cpu)
        ));
    }
}

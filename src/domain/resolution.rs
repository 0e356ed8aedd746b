//! In-progress accumulator for a single resolution run.
//!
//! Owned by exactly one resolution call and consumed by the assembler.

use super::budget::Budget;
use super::component::{Case, Category, Cooler, Cpu, Drive, Gpu, Hdd, Motherboard, Psu, Ram};
use super::configuration::Warning;
use super::power::PowerEstimator;
use super::profile::Profile;

#[derive(Debug, Clone)]
pub struct ResolutionState {
    profile: Profile,
    budget: u64,
    /// Goes negative only when the PSU fallback overshoots.
    remaining: i64,
    power: PowerEstimator,
    required_wattage: Option<u32>,
    cooling_candidates: Vec<Cooler>,
    parts: ResolvedParts,
}

/// Everything a resolution selected, plus its warnings.
#[derive(Debug, Clone, Default)]
pub struct ResolvedParts {
    pub cpu: Option<Cpu>,
    pub motherboard: Option<Motherboard>,
    pub ram: Option<Ram>,
    pub psu: Option<Psu>,
    pub gpu: Option<Gpu>,
    pub cooling: Option<Cooler>,
    pub nvme: Option<Drive>,
    pub ssd: Option<Drive>,
    pub hdd: Option<Hdd>,
    pub case: Option<Case>,
    pub warnings: Vec<Warning>,
}

impl ResolutionState {
    pub fn new(profile: Profile, budget: Budget) -> Self {
        Self {
            profile,
            budget: budget.amount(),
            remaining: i64::try_from(budget.amount()).unwrap_or(i64::MAX),
            power: PowerEstimator::new(),
            required_wattage: None,
            cooling_candidates: Vec::new(),
            parts: ResolvedParts::default(),
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Remaining budget, zero once overspent.
    pub fn remaining_budget(&self) -> u64 {
        u64::try_from(self.remaining).unwrap_or(0)
    }

    pub fn power(&self) -> &PowerEstimator {
        &self.power
    }

    pub fn required_wattage(&self) -> Option<u32> {
        self.required_wattage
    }

    pub fn set_required_wattage(&mut self, watts: u32) {
        self.required_wattage = Some(watts);
    }

    pub fn warn(&mut self, warning: Warning) {
        self.parts.warnings.push(warning);
    }

    fn charge(&mut self, price: u64) {
        self.remaining = self
            .remaining
            .saturating_sub(i64::try_from(price).unwrap_or(i64::MAX));
    }

    pub fn cpu(&self) -> Option<&Cpu> {
        self.parts.cpu.as_ref()
    }

    pub fn motherboard(&self) -> Option<&Motherboard> {
        self.parts.motherboard.as_ref()
    }

    pub fn gpu(&self) -> Option<&Gpu> {
        self.parts.gpu.as_ref()
    }

    /// Commit the CPU, motherboard and RAM chosen together.
    pub fn commit_platform(&mut self, cpu: Cpu, motherboard: Motherboard, ram: Ram) {
        self.charge(cpu.listing.price + motherboard.listing.price + ram.listing.price);
        self.power.add_cpu(&cpu);
        self.power.add_motherboard(&motherboard);
        self.power.add_ram(&ram);
        self.parts.cpu = Some(cpu);
        self.parts.motherboard = Some(motherboard);
        self.parts.ram = Some(ram);
    }

    pub fn commit_gpu(&mut self, gpu: Gpu) {
        self.charge(gpu.listing.price);
        self.power.add_gpu(&gpu);
        self.parts.gpu = Some(gpu);
    }

    pub fn commit_nvme(&mut self, drive: Drive) {
        self.charge(drive.listing.price);
        self.power.add_drive(&drive);
        self.parts.nvme = Some(drive);
    }

    pub fn commit_ssd(&mut self, drive: Drive) {
        self.charge(drive.listing.price);
        self.power.add_drive(&drive);
        self.parts.ssd = Some(drive);
    }

    pub fn commit_hdd(&mut self, hdd: Hdd) {
        self.charge(hdd.listing.price);
        self.power.add_hdd(&hdd);
        self.parts.hdd = Some(hdd);
    }

    pub fn commit_psu(&mut self, psu: Psu) {
        self.charge(psu.listing.price);
        self.parts.psu = Some(psu);
    }

    pub fn commit_case(&mut self, case: Case) {
        self.charge(case.listing.price);
        self.parts.case = Some(case);
    }

    pub fn commit_cooling(&mut self, cooler: Cooler) {
        self.charge(cooler.listing.price);
        self.parts.cooling = Some(cooler);
    }

    /// Ranked coolers kept open until the case is known.
    pub fn cooling_candidates(&self) -> &[Cooler] {
        &self.cooling_candidates
    }

    pub fn set_cooling_candidates(&mut self, candidates: Vec<Cooler>) {
        self.cooling_candidates = candidates;
    }

    /// Required categories still unfilled, in canonical order.
    pub fn missing_required(&self) -> Vec<Category> {
        Category::REQUIRED
            .into_iter()
            .filter(|category| match category {
                Category::Cpu => self.parts.cpu.is_none(),
                Category::Motherboard => self.parts.motherboard.is_none(),
                Category::Ram => self.parts.ram.is_none(),
                Category::Psu => self.parts.psu.is_none(),
                _ => false,
            })
            .collect()
    }

    pub fn into_parts(self) -> ResolvedParts {
        self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::Listing;

    fn listing(price: u64) -> Listing {
        Listing {
            name: "part".to_string(),
            manufacturer: "Acme".to_string(),
            price,
            rating: None,
            link: None,
        }
    }

    #[test]
    fn test_fresh_state_misses_everything_required() {
        let state = ResolutionState::new(Profile::Office, Budget::new(40_000).unwrap());
        assert_eq!(state.remaining(), 40_000);
        assert_eq!(state.missing_required(), Category::REQUIRED.to_vec());
    }

    #[test]
    fn test_overspend_clamps_remaining_budget() {
        let mut state = ResolutionState::new(Profile::Office, Budget::new(1_000).unwrap());
        state.commit_psu(Psu {
            listing: listing(1_500),
            wattage: 500,
            certificate: None,
            form_factor: None,
        });
        assert_eq!(state.remaining(), -500);
        assert_eq!(state.remaining_budget(), 0);
        assert_eq!(
            state.missing_required(),
            vec![Category::Cpu, Category::Motherboard, Category::Ram]
        );
    }
}

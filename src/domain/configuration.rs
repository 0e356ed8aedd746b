//! The resolver's output value and its assembler.

use serde::{Deserialize, Serialize};

use super::component::{Case, Category, Cooler, Cpu, Drive, Gpu, Hdd, Motherboard, Psu, Ram};
use super::error::DomainError;
use super::profile::Profile;
use super::resolution::ResolutionState;

/// Advisory recorded when a stage could not fill an optional slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Warning {
    NoGpu,
    NoNvme,
    NoSsd,
    NoHdd,
    NoCompatibleCooler,
    NoCase,
    /// The PSU was found only after lifting the price ceiling.
    PsuOverBudget { price: u64, ceiling: u64 },
    /// Recorded before the required-set check turns it into a failure.
    NoPsu { required_wattage: u32 },
}

impl Warning {
    /// Slot the warning concerns.
    pub fn category(&self) -> Category {
        match self {
            Warning::NoGpu => Category::Gpu,
            Warning::NoNvme => Category::Nvme,
            Warning::NoSsd => Category::Ssd,
            Warning::NoHdd => Category::Hdd,
            Warning::NoCompatibleCooler => Category::Cooling,
            Warning::NoCase => Category::Case,
            Warning::PsuOverBudget { .. } | Warning::NoPsu { .. } => Category::Psu,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NoGpu => write!(f, "No compatible graphics card within budget"),
            Warning::NoNvme => write!(f, "No NVMe drive within budget"),
            Warning::NoSsd => write!(f, "No SATA SSD within budget"),
            Warning::NoHdd => write!(f, "No hard drive within budget"),
            Warning::NoCompatibleCooler => write!(f, "No cooling system compatible with the case"),
            Warning::NoCase => write!(f, "No compatible case within budget"),
            Warning::PsuOverBudget { price, ceiling } => write!(
                f,
                "Power supply costs {} which exceeds its {} allotment",
                price, ceiling
            ),
            Warning::NoPsu { required_wattage } => {
                write!(f, "No power supply delivers {} W", required_wattage)
            }
        }
    }
}

/// The selected parts. Required slots are always filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub cpu: Cpu,
    pub motherboard: Motherboard,
    pub ram: Ram,
    pub psu: Psu,
    pub gpu: Option<Gpu>,
    pub cooling: Option<Cooler>,
    pub nvme: Option<Drive>,
    pub ssd: Option<Drive>,
    pub hdd: Option<Hdd>,
    pub case: Option<Case>,
}

impl Components {
    /// Prices of every selected part.
    pub fn prices(&self) -> impl Iterator<Item = u64> + '_ {
        [
            Some(self.cpu.listing.price),
            Some(self.motherboard.listing.price),
            Some(self.ram.listing.price),
            Some(self.psu.listing.price),
            self.gpu.as_ref().map(|p| p.listing.price),
            self.cooling.as_ref().map(|p| p.listing.price),
            self.nvme.as_ref().map(|p| p.listing.price),
            self.ssd.as_ref().map(|p| p.listing.price),
            self.hdd.as_ref().map(|p| p.listing.price),
            self.case.as_ref().map(|p| p.listing.price),
        ]
        .into_iter()
        .flatten()
    }

    pub fn has(&self, category: Category) -> bool {
        match category {
            Category::Cpu | Category::Motherboard | Category::Ram | Category::Psu => true,
            Category::Gpu => self.gpu.is_some(),
            Category::Cooling => self.cooling.is_some(),
            Category::Nvme => self.nvme.is_some(),
            Category::Ssd => self.ssd.is_some(),
            Category::Hdd => self.hdd.is_some(),
            Category::Case => self.case.is_some(),
        }
    }
}

/// A complete, valid recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub profile: Profile,
    pub budget: u64,
    pub components: Components,
    pub warnings: Vec<Warning>,
    pub total_price: u64,
    /// Share of the budget spent, in percent.
    pub budget_used_percent: f64,
    /// Wattage the PSU was sized against.
    pub required_wattage: u32,
}

/// Packages a finished resolution into a [`Configuration`].
pub struct ConfigurationAssembler;

impl ConfigurationAssembler {
    /// Fails with [`DomainError::RequiredComponentMissing`] unless CPU,
    /// motherboard, RAM and PSU are all selected.
    pub fn assemble(state: ResolutionState) -> Result<Configuration, DomainError> {
        let missing = state.missing_required();
        if !missing.is_empty() {
            return Err(DomainError::RequiredComponentMissing { missing });
        }

        let profile = state.profile();
        let budget = state.budget();
        let required_wattage = state.required_wattage().unwrap_or_default();
        let parts = state.into_parts();

        let (Some(cpu), Some(motherboard), Some(ram), Some(psu)) =
            (parts.cpu, parts.motherboard, parts.ram, parts.psu)
        else {
            return Err(DomainError::RequiredComponentMissing {
                missing: Category::REQUIRED.to_vec(),
            });
        };

        let components = Components {
            cpu,
            motherboard,
            ram,
            psu,
            gpu: parts.gpu,
            cooling: parts.cooling,
            nvme: parts.nvme,
            ssd: parts.ssd,
            hdd: parts.hdd,
            case: parts.case,
        };

        let total_price: u64 = components.prices().sum();
        let budget_used_percent = if budget > 0 {
            total_price as f64 / budget as f64 * 100.0
        } else {
            0.0
        };

        Ok(Configuration {
            profile,
            budget,
            components,
            warnings: parts.warnings,
            total_price,
            budget_used_percent,
            required_wattage,
        })
    }
}

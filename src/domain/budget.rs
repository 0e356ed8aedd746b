//! Budget distribution.
//!
//! [`allocate`] turns a profile and a total into per-category spending
//! ceilings. It is pure and deterministic.
//!
//! Steps, in order:
//!
//! 1. Split the total by the profile's share table (basis points, summing
//!    to 10 000 for every table).
//! 2. Raise categories below their floor, funding the shortfall 70% from HDD
//!    and 30% from the case. A donor is never pushed below its own floor.
//! 3. Above 100 000, scale CPU/GPU/RAM/NVMe up by `min(1.5, total / 100 000)`
//!    and shrink HDD/case by 0.8, again not below their floors.
//! 4. Profile caps: office and server cap the GPU at 5 000 and NVMe at
//!    10 000 (half of the NVMe excess moves to SSD); gaming lifts NVMe to at
//!    least 15 000 and trims 3 000 from an SSD allotment above 5 000.
//!
//! After step 2 every category in the share table is at or above its floor.
//! The office/server GPU cap is the one deliberate exception. When the total
//! is below [`minimum_total`], the floors are still honoured and the plan
//! commits more than the total.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::component::Category;
use super::error::DomainError;
use super::profile::Profile;

pub const BASIS_POINTS: u32 = 10_000;

const PREMIUM_THRESHOLD: u64 = 100_000;
const PREMIUM_MAX_SCALE: f64 = 1.5;
const PREMIUM_SHRINK: f64 = 0.8;

const LIGHT_GPU_CAP: u64 = 5_000;
const LIGHT_NVME_CAP: u64 = 10_000;
const GAMING_NVME_FLOOR: u64 = 15_000;
const GAMING_SSD_TRIM_ABOVE: u64 = 5_000;
const GAMING_SSD_TRIM: u64 = 3_000;

/// Shortfall donors with their share, in tenths.
const DONORS: [(Category, u64); 2] = [(Category::Hdd, 7), (Category::Case, 3)];

/// Order in which floors are enforced.
const FLOOR_ORDER: [Category; 10] = [
    Category::Cpu,
    Category::Motherboard,
    Category::Ram,
    Category::Cooling,
    Category::Psu,
    Category::Case,
    Category::Gpu,
    Category::Ssd,
    Category::Nvme,
    Category::Hdd,
];

const GAMING: &[(Category, u32)] = &[
    (Category::Cpu, 2000),
    (Category::Gpu, 3000),
    (Category::Motherboard, 900),
    (Category::Ram, 1000),
    (Category::Cooling, 400),
    (Category::Nvme, 500),
    (Category::Hdd, 500),
    (Category::Psu, 1000),
    (Category::Case, 700),
];

const GRAPHICS: &[(Category, u32)] = &[
    (Category::Cpu, 2500),
    (Category::Gpu, 2500),
    (Category::Motherboard, 900),
    (Category::Ram, 1000),
    (Category::Cooling, 300),
    (Category::Nvme, 600),
    (Category::Hdd, 500),
    (Category::Psu, 1000),
    (Category::Case, 700),
];

const OFFICE: &[(Category, u32)] = &[
    (Category::Cpu, 2000),
    (Category::Gpu, 500),
    (Category::Motherboard, 1000),
    (Category::Ram, 1500),
    (Category::Cooling, 1000),
    (Category::Ssd, 2000),
    (Category::Psu, 1000),
    (Category::Case, 1000),
];

const SERVER: &[(Category, u32)] = &[
    (Category::Cpu, 2100),
    (Category::Gpu, 200),
    (Category::Motherboard, 1000),
    (Category::Ram, 1900),
    (Category::Cooling, 1000),
    (Category::Nvme, 1000),
    (Category::Hdd, 1000),
    (Category::Psu, 1000),
    (Category::Case, 800),
];

const HOME: &[(Category, u32)] = &[
    (Category::Cpu, 1700),
    (Category::Gpu, 1500),
    (Category::Motherboard, 1000),
    (Category::Ram, 1500),
    (Category::Cooling, 800),
    (Category::Nvme, 1000),
    (Category::Hdd, 500),
    (Category::Psu, 1000),
    (Category::Case, 1000),
];

const DEVELOPMENT: &[(Category, u32)] = &[
    (Category::Cpu, 2500),
    (Category::Gpu, 1000),
    (Category::Motherboard, 1000),
    (Category::Ram, 1300),
    (Category::Cooling, 700),
    (Category::Ssd, 1000),
    (Category::Nvme, 1000),
    (Category::Psu, 1000),
    (Category::Case, 500),
];

const DEFAULT: &[(Category, u32)] = &[
    (Category::Cpu, 2000),
    (Category::Gpu, 2000),
    (Category::Motherboard, 1000),
    (Category::Ram, 1000),
    (Category::Cooling, 700),
    (Category::Nvme, 1000),
    (Category::Hdd, 800),
    (Category::Psu, 1000),
    (Category::Case, 500),
];

/// Share table for a profile, in basis points.
pub fn shares(profile: Profile) -> &'static [(Category, u32)] {
    match profile {
        Profile::Gaming => GAMING,
        Profile::Graphics => GRAPHICS,
        Profile::Office => OFFICE,
        Profile::Server => SERVER,
        Profile::Home => HOME,
        Profile::Development => DEVELOPMENT,
        Profile::General => DEFAULT,
    }
}

/// Smallest ceiling worth querying the catalog with.
pub fn minimum_budget(category: Category) -> u64 {
    match category {
        Category::Cpu => 2699,
        Category::Motherboard => 4499,
        Category::Ram => 450,
        Category::Cooling => 299,
        Category::Psu => 899,
        Category::Case => 1899,
        Category::Gpu => 5499,
        Category::Ssd => 950,
        Category::Nvme => 1699,
        Category::Hdd => 4699,
    }
}

/// Sum of the floors of every category in the profile's share table.
pub fn minimum_total(profile: Profile) -> u64 {
    shares(profile)
        .iter()
        .map(|(category, _)| minimum_budget(*category))
        .sum()
}

/// A validated, positive total budget in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Budget(u64);

impl Budget {
    pub fn new(amount: i64) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::InvalidBudget(format!(
                "budget must be positive, got {}",
                amount
            )));
        }
        Ok(Self(amount as u64))
    }

    /// Parse user input such as `"80000"` or `"80 000"`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let amount: i64 = digits
            .parse()
            .map_err(|_| DomainError::InvalidBudget(format!("not a whole number: '{}'", input)))?;
        Self::new(amount)
    }

    pub fn amount(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for Budget {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Budget> for u64 {
    fn from(budget: Budget) -> Self {
        budget.0
    }
}

impl std::str::FromStr for Budget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-category spending ceilings for one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPlan {
    profile: Profile,
    total: u64,
    allocations: BTreeMap<Category, u64>,
}

impl BudgetPlan {
    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Ceiling for `category`; zero when the profile allots nothing.
    pub fn get(&self, category: Category) -> u64 {
        self.allocations.get(&category).copied().unwrap_or(0)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.allocations.contains_key(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.allocations.iter().map(|(c, v)| (*c, *v))
    }

    /// Sum of all ceilings. May exceed the total, see the module docs.
    pub fn committed(&self) -> u64 {
        self.allocations.values().sum()
    }
}

/// Distribute `total` across categories for `profile`.
pub fn allocate(profile: Profile, total: Budget) -> BudgetPlan {
    let total = total.amount();
    let mut allocations: BTreeMap<Category, u64> = shares(profile)
        .iter()
        .map(|&(category, bp)| {
            let amount = u128::from(total) * u128::from(bp) / u128::from(BASIS_POINTS);
            (category, amount as u64)
        })
        .collect();

    enforce_floors(&mut allocations);

    if total > PREMIUM_THRESHOLD {
        apply_premium_scaling(&mut allocations, total);
    }

    apply_profile_caps(&mut allocations, profile);

    BudgetPlan {
        profile,
        total,
        allocations,
    }
}

fn enforce_floors(allocations: &mut BTreeMap<Category, u64>) {
    for category in FLOOR_ORDER {
        let floor = minimum_budget(category);
        let Some(&amount) = allocations.get(&category) else {
            continue;
        };
        if amount >= floor {
            continue;
        }

        let needed = floor - amount;
        for (donor, tenths) in DONORS {
            if donor == category {
                continue;
            }
            if let Some(donor_amount) = allocations.get_mut(&donor) {
                let keep = (*donor_amount).min(minimum_budget(donor));
                *donor_amount = donor_amount
                    .saturating_sub(needed * tenths / 10)
                    .max(keep);
            }
        }
        allocations.insert(category, floor);
    }
}

fn apply_premium_scaling(allocations: &mut BTreeMap<Category, u64>, total: u64) {
    let scale = (total as f64 / PREMIUM_THRESHOLD as f64).min(PREMIUM_MAX_SCALE);

    for category in [Category::Cpu, Category::Gpu, Category::Ram, Category::Nvme] {
        if let Some(amount) = allocations.get_mut(&category) {
            *amount = (*amount as f64 * scale) as u64;
        }
    }

    for category in [Category::Hdd, Category::Case] {
        if let Some(amount) = allocations.get_mut(&category) {
            let keep = (*amount).min(minimum_budget(category));
            *amount = ((*amount as f64 * PREMIUM_SHRINK) as u64).max(keep);
        }
    }
}

fn apply_profile_caps(allocations: &mut BTreeMap<Category, u64>, profile: Profile) {
    match profile {
        Profile::Office | Profile::Server => {
            if let Some(gpu) = allocations.get_mut(&Category::Gpu) {
                *gpu = (*gpu).min(LIGHT_GPU_CAP);
            }
            if let Some(nvme) = allocations.get_mut(&Category::Nvme) {
                if *nvme > LIGHT_NVME_CAP {
                    let excess = *nvme - LIGHT_NVME_CAP;
                    *nvme = LIGHT_NVME_CAP;
                    *allocations.entry(Category::Ssd).or_insert(0) += excess / 2;
                }
            }
        }
        Profile::Gaming => {
            let nvme = allocations.entry(Category::Nvme).or_insert(0);
            *nvme = (*nvme).max(GAMING_NVME_FLOOR);
            if let Some(ssd) = allocations.get_mut(&Category::Ssd) {
                if *ssd > GAMING_SSD_TRIM_ABOVE {
                    *ssd -= GAMING_SSD_TRIM;
                }
            }
        }
        _ => {}
    }
}

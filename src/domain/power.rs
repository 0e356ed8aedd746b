//! Power draw accounting and PSU sizing.
//!
//! The defaults below stand in for draws the catalog does not declare. They
//! only ever feed the wattage requirement, never compatibility decisions.

use serde::{Deserialize, Serialize};

use super::component::{Cpu, Drive, Gpu, Hdd, Motherboard, Ram};
use super::profile::Profile;

pub const DEFAULT_CPU_DRAW: f64 = 65.0;
pub const DEFAULT_MOTHERBOARD_DRAW: f64 = 30.0;
pub const DEFAULT_RAM_MODULE_DRAW: f64 = 5.0;
pub const DEFAULT_GPU_DRAW: f64 = 150.0;
pub const DEFAULT_SSD_DRAW: f64 = 5.0;
pub const DEFAULT_HDD_DRAW: f64 = 7.0;

/// Extra wattage added before rounding.
pub const DEFAULT_HEADROOM_WATTS: u32 = 100;

const ROUNDING_STEP: u32 = 50;

/// Running wattage total for one resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerEstimator {
    watts: f64,
}

impl PowerEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watts(&self) -> f64 {
        self.watts
    }

    pub fn add_cpu(&mut self, cpu: &Cpu) {
        self.watts += cpu.power_draw.unwrap_or(DEFAULT_CPU_DRAW);
    }

    pub fn add_motherboard(&mut self, board: &Motherboard) {
        self.watts += board.power_draw.unwrap_or(DEFAULT_MOTHERBOARD_DRAW);
    }

    pub fn add_ram(&mut self, ram: &Ram) {
        let per_module = ram.power_draw.unwrap_or(DEFAULT_RAM_MODULE_DRAW);
        self.watts += per_module * f64::from(ram.modules.max(1));
    }

    pub fn add_gpu(&mut self, gpu: &Gpu) {
        self.watts += gpu.power_draw.unwrap_or(DEFAULT_GPU_DRAW);
    }

    /// NVMe or SATA SSD.
    pub fn add_drive(&mut self, drive: &Drive) {
        self.watts += drive.power_draw.unwrap_or(DEFAULT_SSD_DRAW);
    }

    pub fn add_hdd(&mut self, hdd: &Hdd) {
        self.watts += hdd.power_draw.unwrap_or(DEFAULT_HDD_DRAW);
    }

    /// PSU wattage needed for the accumulated draw.
    pub fn required_wattage(&self, profile: Profile, headroom: u32) -> u32 {
        required_wattage(self.watts, profile, headroom)
    }
}

/// Round `draw + headroom` up to the next 50 W, then apply the profile's
/// multiplier and minimum. Saturates at `u32::MAX`.
pub fn required_wattage(draw: f64, profile: Profile, headroom: u32) -> u32 {
    // float-to-int `as` saturates; NaN maps to zero
    let base = (draw.max(0.0) + f64::from(headroom)).ceil() as u64;
    let step = u64::from(ROUNDING_STEP);
    let rounded = base.div_ceil(step).saturating_mul(step);
    let (percent, minimum) = profile.psu_sizing();
    let scaled = rounded.saturating_mul(u64::from(percent)).div_ceil(100);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(minimum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::{Listing, MemoryType};

    fn listing() -> Listing {
        Listing {
            name: "part".to_string(),
            manufacturer: "Acme".to_string(),
            price: 1000,
            rating: None,
            link: None,
        }
    }

    #[test]
    fn test_defaults_for_undeclared_draw() {
        let mut power = PowerEstimator::new();
        power.add_ram(&Ram {
            listing: listing(),
            memory_type: MemoryType::Ddr5,
            frequency: 6000,
            modules: 2,
            capacity_gb: 32,
            form_factor: None,
            power_draw: None,
        });
        power.add_hdd(&Hdd {
            listing: listing(),
            capacity_gb: 2000,
            spindle_rpm: None,
            transfer_rate: None,
            power_draw: None,
        });
        assert_eq!(power.watts(), 17.0);
    }

    #[test]
    fn test_declared_draw_wins() {
        let mut power = PowerEstimator::new();
        power.add_gpu(&Gpu {
            listing: listing(),
            interface: "PCIe 4.0".to_string(),
            memory_gb: 12,
            length_mm: 300.0,
            chip: None,
            power_draw: Some(285.0),
        });
        assert_eq!(power.watts(), 285.0);
    }

    #[test]
    fn test_required_wattage_rounds_up() {
        // 401 + 100 = 501 -> 550
        assert_eq!(required_wattage(401.0, Profile::Office, 100), 550);
        // 400 + 100 = 500 stays 500
        assert_eq!(required_wattage(400.0, Profile::Office, 100), 500);
    }

    #[test]
    fn test_required_wattage_saturates_on_absurd_draw() {
        assert_eq!(required_wattage(40.0e6, Profile::Gaming, 100), 52_000_130);
        assert_eq!(required_wattage(1.0e12, Profile::Gaming, 100), u32::MAX);
        assert_eq!(required_wattage(f64::INFINITY, Profile::Office, 100), u32::MAX);
    }

    #[test]
    fn test_required_wattage_profile_rules() {
        // 130 + 100 -> 250, office floor 450
        assert_eq!(required_wattage(130.0, Profile::Office, 100), 450);
        // 130 + 100 -> 250 * 1.3 = 325, gaming floor 650
        assert_eq!(required_wattage(130.0, Profile::Gaming, 100), 650);
        // 520 + 100 -> 650 * 1.3 = 845
        assert_eq!(required_wattage(520.0, Profile::Gaming, 100), 845);
        // 520 + 100 -> 650 * 1.2 = 780
        assert_eq!(required_wattage(520.0, Profile::Graphics, 100), 780);
    }
}

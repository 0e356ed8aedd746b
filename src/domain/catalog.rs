use serde::{Deserialize, Serialize};

use super::component::{
    Case, Category, Cooler, Cpu, Drive, Gpu, Hdd, Motherboard, PrebuiltSystem, Psu, Ram, Record,
    RecordKind,
};
use super::profile::Profile;

/// Minimum specs a pre-assembled system needs for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequirements {
    pub profile: Profile,
    pub min_cpu_cores: u32,
    pub min_ram_gb: u32,
    pub min_ssd_gb: u32,
    #[serde(default)]
    pub gpu_required: bool,
}

/// Serialised catalog contents, one list per table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    /// Format version for compatibility checking.
    pub version: u32,
    pub cpus: Vec<Cpu>,
    pub motherboards: Vec<Motherboard>,
    pub memory: Vec<Ram>,
    pub gpus: Vec<Gpu>,
    pub coolers: Vec<Cooler>,
    pub nvme: Vec<Drive>,
    pub ssd: Vec<Drive>,
    pub hdd: Vec<Hdd>,
    pub psus: Vec<Psu>,
    pub cases: Vec<Case>,
    pub prebuilt: Vec<PrebuiltSystem>,
    pub profiles: Vec<ProfileRequirements>,
}

impl CatalogSnapshot {
    /// Flatten every table into records, preserving table order.
    pub fn into_records(self) -> Vec<Record> {
        let mut records = Vec::new();
        records.extend(self.cpus.into_iter().map(Record::Cpu));
        records.extend(self.motherboards.into_iter().map(Record::Motherboard));
        records.extend(self.memory.into_iter().map(Record::Ram));
        records.extend(self.gpus.into_iter().map(Record::Gpu));
        records.extend(self.coolers.into_iter().map(Record::Cooling));
        records.extend(self.nvme.into_iter().map(Record::Nvme));
        records.extend(self.ssd.into_iter().map(Record::Ssd));
        records.extend(self.hdd.into_iter().map(Record::Hdd));
        records.extend(self.psus.into_iter().map(Record::Psu));
        records.extend(self.cases.into_iter().map(Record::Case));
        records.extend(self.prebuilt.into_iter().map(Record::Prebuilt));
        records
    }

    /// Number of listings of the given kind.
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Component(Category::Cpu) => self.cpus.len(),
            RecordKind::Component(Category::Motherboard) => self.motherboards.len(),
            RecordKind::Component(Category::Ram) => self.memory.len(),
            RecordKind::Component(Category::Gpu) => self.gpus.len(),
            RecordKind::Component(Category::Cooling) => self.coolers.len(),
            RecordKind::Component(Category::Nvme) => self.nvme.len(),
            RecordKind::Component(Category::Ssd) => self.ssd.len(),
            RecordKind::Component(Category::Hdd) => self.hdd.len(),
            RecordKind::Component(Category::Psu) => self.psus.len(),
            RecordKind::Component(Category::Case) => self.cases.len(),
            RecordKind::Prebuilt => self.prebuilt.len(),
        }
    }
}

//! Typed catalog records.
//!
//! Every record is a read-only snapshot of one catalog row. Attributes that
//! take part in compatibility checks are mandatory; attributes that only feed
//! power arithmetic are optional and fall back to the defaults in
//! [`crate::domain::power`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::query::{Field, FieldValue, Queryable};

/// One of the ten hardware slots the resolver fills.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Cooling,
    Nvme,
    Ssd,
    Hdd,
    Psu,
    Case,
}

impl Category {
    /// Categories a configuration cannot exist without.
    pub const REQUIRED: [Category; 4] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Psu,
    ];

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

/// What a catalog query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Component(Category),
    Prebuilt,
}

/// Memory generation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum MemoryType {
    #[serde(rename = "DDR3")]
    #[strum(serialize = "DDR3")]
    Ddr3,
    #[serde(rename = "DDR4")]
    #[strum(serialize = "DDR4")]
    Ddr4,
    #[serde(rename = "DDR5")]
    #[strum(serialize = "DDR5")]
    Ddr5,
}

impl MemoryType {
    /// Order in which platforms are attempted, most recent first.
    pub const PRIORITY: [MemoryType; 3] = [MemoryType::Ddr5, MemoryType::Ddr4, MemoryType::Ddr3];
}

/// Cooler construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CoolerKind {
    Air,
    Liquid,
}

/// Fields shared by every listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub manufacturer: String,
    /// Whole currency units.
    pub price: u64,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Purchase link.
    #[serde(default)]
    pub link: Option<String>,
}

impl Listing {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Name => Some(self.name.as_str().into()),
            Field::Manufacturer => Some(self.manufacturer.as_str().into()),
            Field::Price => Some((self.price as f64).into()),
            Field::Rating => self.rating.map(Into::into),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(flatten)]
    pub listing: Listing,
    pub socket: String,
    pub cores: u32,
    #[serde(default)]
    pub threads: Option<u32>,
    /// Base clock in GHz.
    pub clock_ghz: f64,
    pub memory_types: Vec<MemoryType>,
    /// Rated thermal output (TDP) in watts.
    pub thermal_output: u32,
    #[serde(default)]
    pub power_draw: Option<f64>,
    #[serde(default)]
    pub integrated_graphics: Option<String>,
}

impl Cpu {
    pub fn supports(&self, memory: MemoryType) -> bool {
        self.memory_types.contains(&memory)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motherboard {
    #[serde(flatten)]
    pub listing: Listing,
    pub socket: String,
    #[serde(default)]
    pub chipset: Option<String>,
    pub form_factor: String,
    pub memory_types: Vec<MemoryType>,
    /// Highest memory frequency in MHz.
    pub max_memory_frequency: u32,
    #[serde(default)]
    pub memory_slots: Option<u32>,
    /// Expansion interfaces a graphics card may use, e.g. "PCIe 4.0".
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub m2_slots: Option<u32>,
    #[serde(default)]
    pub sata_ports: Option<u32>,
    #[serde(default)]
    pub power_draw: Option<f64>,
}

impl Motherboard {
    pub fn supports(&self, memory: MemoryType) -> bool {
        self.memory_types.contains(&memory)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ram {
    #[serde(flatten)]
    pub listing: Listing,
    pub memory_type: MemoryType,
    /// MHz.
    pub frequency: u32,
    /// Modules in the kit.
    pub modules: u32,
    /// Total kit capacity in GB.
    pub capacity_gb: u32,
    #[serde(default)]
    pub form_factor: Option<String>,
    /// Draw per module.
    #[serde(default)]
    pub power_draw: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    #[serde(flatten)]
    pub listing: Listing,
    pub interface: String,
    pub memory_gb: u32,
    /// Card length in mm.
    pub length_mm: f64,
    #[serde(default)]
    pub chip: Option<String>,
    #[serde(default)]
    pub power_draw: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cooler {
    #[serde(flatten)]
    pub listing: Listing,
    pub kind: CoolerKind,
    pub sockets: Vec<String>,
    /// Heat the cooler can dissipate, in watts.
    pub dissipation: f64,
    /// Height in mm.
    pub height_mm: f64,
    #[serde(default)]
    pub power_draw: Option<f64>,
}

impl Cooler {
    /// Whether this cooler physically fits the case.
    pub fn fits(&self, case: &Case) -> bool {
        match self.kind {
            CoolerKind::Liquid => case.liquid_cooling,
            CoolerKind::Air => case
                .cooler_clearance_mm
                .is_some_and(|clearance| self.height_mm <= clearance),
        }
    }
}

/// Solid-state drive; NVMe and SATA drives share the record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    #[serde(flatten)]
    pub listing: Listing,
    pub interface: String,
    pub capacity_gb: u32,
    /// MB/s.
    #[serde(default)]
    pub transfer_rate: Option<f64>,
    #[serde(default)]
    pub form_factor: Option<String>,
    #[serde(default)]
    pub power_draw: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hdd {
    #[serde(flatten)]
    pub listing: Listing,
    pub capacity_gb: u32,
    #[serde(default)]
    pub spindle_rpm: Option<u32>,
    #[serde(default)]
    pub transfer_rate: Option<f64>,
    #[serde(default)]
    pub power_draw: Option<f64>,
}

/// Certificates that count as a recognised efficiency rating.
const RECOGNIZED_CERTIFICATES: [&str; 7] = [
    "standard", "standart", "bronze", "silver", "gold", "platinum", "titanium",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Psu {
    #[serde(flatten)]
    pub listing: Listing,
    pub wattage: u32,
    #[serde(default)]
    pub certificate: Option<String>,
    #[serde(default)]
    pub form_factor: Option<String>,
}

impl Psu {
    pub fn is_certified(&self) -> bool {
        self.certificate.as_deref().is_some_and(|cert| {
            let cert = cert.trim().to_ascii_lowercase();
            let cert = cert.strip_prefix("80 plus").unwrap_or(&cert).trim();
            RECOGNIZED_CERTIFICATES.contains(&cert)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(default)]
    pub form_factor: Option<String>,
    pub motherboard_form_factors: Vec<String>,
    #[serde(default)]
    pub max_gpu_length_mm: Option<f64>,
    #[serde(default)]
    pub cooler_clearance_mm: Option<f64>,
    #[serde(default)]
    pub liquid_cooling: bool,
}

/// A pre-assembled computer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrebuiltSystem {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(default)]
    pub os: Option<String>,
    pub processor: String,
    pub cores: u32,
    #[serde(default)]
    pub threads: Option<u32>,
    #[serde(default)]
    pub clock_ghz: Option<f64>,
    /// "Discrete" or "Integrated".
    pub graphics_type: String,
    #[serde(default)]
    pub graphics_model: Option<String>,
    #[serde(default)]
    pub video_memory_gb: Option<u32>,
    pub ram_gb: u32,
    #[serde(default)]
    pub ram_type: Option<String>,
    pub ssd_gb: u32,
    #[serde(default)]
    pub hdd_gb: Option<u32>,
}

/// Any record the catalog can return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Record {
    Cpu(Cpu),
    Motherboard(Motherboard),
    Ram(Ram),
    Gpu(Gpu),
    Cooling(Cooler),
    Nvme(Drive),
    Ssd(Drive),
    Hdd(Hdd),
    Psu(Psu),
    Case(Case),
    Prebuilt(PrebuiltSystem),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Cpu(_) => RecordKind::Component(Category::Cpu),
            Record::Motherboard(_) => RecordKind::Component(Category::Motherboard),
            Record::Ram(_) => RecordKind::Component(Category::Ram),
            Record::Gpu(_) => RecordKind::Component(Category::Gpu),
            Record::Cooling(_) => RecordKind::Component(Category::Cooling),
            Record::Nvme(_) => RecordKind::Component(Category::Nvme),
            Record::Ssd(_) => RecordKind::Component(Category::Ssd),
            Record::Hdd(_) => RecordKind::Component(Category::Hdd),
            Record::Psu(_) => RecordKind::Component(Category::Psu),
            Record::Case(_) => RecordKind::Component(Category::Case),
            Record::Prebuilt(_) => RecordKind::Prebuilt,
        }
    }

    pub fn listing(&self) -> &Listing {
        match self {
            Record::Cpu(r) => &r.listing,
            Record::Motherboard(r) => &r.listing,
            Record::Ram(r) => &r.listing,
            Record::Gpu(r) => &r.listing,
            Record::Cooling(r) => &r.listing,
            Record::Nvme(r) | Record::Ssd(r) => &r.listing,
            Record::Hdd(r) => &r.listing,
            Record::Psu(r) => &r.listing,
            Record::Case(r) => &r.listing,
            Record::Prebuilt(r) => &r.listing,
        }
    }
}

impl Queryable for Record {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match self {
            Record::Cpu(r) => r.field(field),
            Record::Motherboard(r) => r.field(field),
            Record::Ram(r) => r.field(field),
            Record::Gpu(r) => r.field(field),
            Record::Cooling(r) => r.field(field),
            Record::Nvme(r) | Record::Ssd(r) => r.field(field),
            Record::Hdd(r) => r.field(field),
            Record::Psu(r) => r.field(field),
            Record::Case(r) => r.field(field),
            Record::Prebuilt(r) => r.field(field),
        }
    }
}

/// Conversion from a catalog record into one typed record.
pub trait FromRecord: Sized {
    fn from_record(record: Record) -> Option<Self>;
}

macro_rules! from_record {
    ($ty:ty, $($variant:ident)|+) => {
        impl FromRecord for $ty {
            fn from_record(record: Record) -> Option<Self> {
                match record {
                    $(Record::$variant(inner))|+ => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

from_record!(Cpu, Cpu);
from_record!(Motherboard, Motherboard);
from_record!(Ram, Ram);
from_record!(Gpu, Gpu);
from_record!(Cooler, Cooling);
from_record!(Drive, Nvme | Ssd);
from_record!(Hdd, Hdd);
from_record!(Psu, Psu);
from_record!(Case, Case);
from_record!(PrebuiltSystem, Prebuilt);

fn text_list<T: ToString>(items: &[T]) -> FieldValue {
    FieldValue::List(items.iter().map(ToString::to_string).collect())
}

impl Queryable for Cpu {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Socket => Some(self.socket.as_str().into()),
            Field::Cores => Some(self.cores.into()),
            Field::Threads => self.threads.map(Into::into),
            Field::ClockFrequency => Some(self.clock_ghz.into()),
            Field::MemoryType => Some(text_list(&self.memory_types)),
            Field::ThermalOutput => Some(self.thermal_output.into()),
            Field::PowerDraw => self.power_draw.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Motherboard {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Socket => Some(self.socket.as_str().into()),
            Field::Chipset => self.chipset.as_deref().map(Into::into),
            Field::FormFactor => Some(self.form_factor.as_str().into()),
            Field::MemoryType => Some(text_list(&self.memory_types)),
            Field::MaxMemoryFrequency => Some(self.max_memory_frequency.into()),
            Field::Interface => Some(text_list(&self.interfaces)),
            Field::PowerDraw => self.power_draw.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Ram {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::MemoryType => Some(self.memory_type.to_string().into()),
            Field::Frequency => Some(self.frequency.into()),
            Field::Modules => Some(self.modules.into()),
            Field::Capacity => Some(self.capacity_gb.into()),
            Field::FormFactor => self.form_factor.as_deref().map(Into::into),
            Field::PowerDraw => self.power_draw.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Gpu {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Interface => Some(self.interface.as_str().into()),
            Field::VideoMemory => Some(self.memory_gb.into()),
            Field::Length => Some(self.length_mm.into()),
            Field::PowerDraw => self.power_draw.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Cooler {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::CoolerType => Some(self.kind.to_string().into()),
            Field::Socket => Some(text_list(&self.sockets)),
            Field::Dissipation => Some(self.dissipation.into()),
            Field::Height => Some(self.height_mm.into()),
            Field::PowerDraw => self.power_draw.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Drive {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Interface => Some(self.interface.as_str().into()),
            Field::Capacity => Some(self.capacity_gb.into()),
            Field::TransferRate => self.transfer_rate.map(Into::into),
            Field::FormFactor => self.form_factor.as_deref().map(Into::into),
            Field::PowerDraw => self.power_draw.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Hdd {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Capacity => Some(self.capacity_gb.into()),
            Field::SpindleSpeed => self.spindle_rpm.map(Into::into),
            Field::TransferRate => self.transfer_rate.map(Into::into),
            Field::PowerDraw => self.power_draw.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Psu {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Wattage => Some(self.wattage.into()),
            Field::Certificate => self.certificate.as_deref().map(Into::into),
            Field::Certified => Some(self.is_certified().into()),
            Field::FormFactor => self.form_factor.as_deref().map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for Case {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::FormFactor => self.form_factor.as_deref().map(Into::into),
            Field::MotherboardFormFactors => Some(text_list(&self.motherboard_form_factors)),
            Field::MaxGpuLength => self.max_gpu_length_mm.map(Into::into),
            Field::CoolerClearance => self.cooler_clearance_mm.map(Into::into),
            Field::LiquidCooling => Some(self.liquid_cooling.into()),
            _ => self.listing.field(field),
        }
    }
}

impl Queryable for PrebuiltSystem {
    fn field(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::OperatingSystem => self.os.as_deref().map(Into::into),
            Field::Cores => Some(self.cores.into()),
            Field::Threads => self.threads.map(Into::into),
            Field::ClockFrequency => self.clock_ghz.map(Into::into),
            Field::GraphicsType => Some(self.graphics_type.as_str().into()),
            Field::VideoMemory => self.video_memory_gb.map(Into::into),
            Field::RamCapacity => Some(self.ram_gb.into()),
            Field::MemoryType => self.ram_type.as_deref().map(Into::into),
            Field::SsdCapacity => Some(self.ssd_gb.into()),
            Field::HddCapacity => self.hdd_gb.map(Into::into),
            _ => self.listing.field(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, price: u64) -> Listing {
        Listing {
            name: name.to_string(),
            manufacturer: "Acme".to_string(),
            price,
            rating: None,
            link: None,
        }
    }

    fn case(clearance: Option<f64>, liquid: bool) -> Case {
        Case {
            listing: listing("Tower", 3000),
            form_factor: None,
            motherboard_form_factors: vec!["ATX".to_string()],
            max_gpu_length_mm: Some(320.0),
            cooler_clearance_mm: clearance,
            liquid_cooling: liquid,
        }
    }

    fn cooler(kind: CoolerKind, height: f64) -> Cooler {
        Cooler {
            listing: listing("Cooler", 1500),
            kind,
            sockets: vec!["AM5".to_string()],
            dissipation: 180.0,
            height_mm: height,
            power_draw: None,
        }
    }

    #[test]
    fn test_category_strings() {
        assert_eq!(Category::Cooling.to_string(), "cooling");
        assert_eq!("PSU".parse::<Category>().unwrap(), Category::Psu);
        assert!(Category::Ram.is_required());
        assert!(!Category::Gpu.is_required());
    }

    #[test]
    fn test_memory_type_parse() {
        assert_eq!("ddr5".parse::<MemoryType>().unwrap(), MemoryType::Ddr5);
        assert_eq!(MemoryType::Ddr4.to_string(), "DDR4");
    }

    #[test]
    fn test_cooler_fit() {
        let air = cooler(CoolerKind::Air, 158.0);
        assert!(air.fits(&case(Some(160.0), false)));
        assert!(!air.fits(&case(Some(150.0), true)));
        assert!(!air.fits(&case(None, true)));

        let liquid = cooler(CoolerKind::Liquid, 52.0);
        assert!(liquid.fits(&case(None, true)));
        assert!(!liquid.fits(&case(Some(200.0), false)));
    }

    #[test]
    fn test_psu_certificate() {
        let mut psu = Psu {
            listing: listing("PSU", 5000),
            wattage: 650,
            certificate: Some("80 Plus Gold".to_string()),
            form_factor: None,
        };
        assert!(psu.is_certified());
        psu.certificate = Some("N".to_string());
        assert!(!psu.is_certified());
        psu.certificate = None;
        assert!(!psu.is_certified());
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{
            "category": "ssd",
            "name": "Fast SATA",
            "manufacturer": "Acme",
            "price": 3100,
            "interface": "SATA III",
            "capacity_gb": 1000
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind(), RecordKind::Component(Category::Ssd));
        assert_eq!(record.listing().price, 3100);
        let drive = Drive::from_record(record).unwrap();
        assert_eq!(drive.capacity_gb, 1000);
    }
}

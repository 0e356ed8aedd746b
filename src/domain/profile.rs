//! Usage profiles.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Target use of the machine. Drives budget shares, PSU sizing and the
/// minimum specs of pre-assembled systems.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Profile {
    Gaming,
    /// Graphics and video workstation.
    #[strum(to_string = "graphics", serialize = "workstation")]
    Graphics,
    Office,
    Server,
    Home,
    #[strum(to_string = "development", serialize = "dev")]
    Development,
    /// Anything else; uses the default share table.
    #[default]
    General,
}

impl Profile {
    /// Lenient parse: unknown labels fall back to [`Profile::General`].
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Profile::General)
    }

    /// Whether builds for this profile need a discrete graphics card.
    pub fn requires_discrete_gpu(&self) -> bool {
        matches!(self, Profile::Gaming | Profile::Graphics)
    }

    /// PSU sizing rule: percentage applied to the rounded requirement and
    /// the minimum wattage.
    pub fn psu_sizing(&self) -> (u32, u32) {
        match self {
            Profile::Gaming => (130, 650),
            Profile::Graphics => (120, 550),
            _ => (100, 450),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_profile_labels() {
        assert_eq!("Gaming".parse::<Profile>().unwrap(), Profile::Gaming);
        assert_eq!("workstation".parse::<Profile>().unwrap(), Profile::Graphics);
        assert_eq!(Profile::Graphics.to_string(), "graphics");
        assert!("quantum".parse::<Profile>().is_err());
        assert_eq!(Profile::from_label("quantum"), Profile::General);
    }

    #[test]
    fn test_display_parse_roundtrip() {
        for profile in Profile::iter() {
            assert_eq!(profile.to_string().parse::<Profile>().unwrap(), profile);
        }
    }

    #[test]
    fn test_psu_sizing() {
        assert_eq!(Profile::Gaming.psu_sizing(), (130, 650));
        assert_eq!(Profile::Graphics.psu_sizing(), (120, 550));
        assert_eq!(Profile::Server.psu_sizing(), (100, 450));
    }
}

//! Climate categories used as table keys

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Growing climate, matched exactly against the form value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClimateCategory {
    #[serde(rename = "hot_humid")]
    HotHumid,
    #[serde(rename = "hot_dry")]
    HotDry,
    #[serde(rename = "Temperate")]
    Temperate,
    #[serde(rename = "Cold")]
    Cold,
}

impl ClimateCategory {
    pub const ALL: [ClimateCategory; 4] = [
        ClimateCategory::HotHumid,
        ClimateCategory::HotDry,
        ClimateCategory::Temperate,
        ClimateCategory::Cold,
    ];

    /// Form value for this climate
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateCategory::HotHumid => "hot_humid",
            ClimateCategory::HotDry => "hot_dry",
            ClimateCategory::Temperate => "Temperate",
            ClimateCategory::Cold => "Cold",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClimateCategory::HotHumid => "Hot and humid",
            ClimateCategory::HotDry => "Hot and dry",
            ClimateCategory::Temperate => "Temperate",
            ClimateCategory::Cold => "Cold",
        }
    }
}

impl FromStr for ClimateCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClimateCategory::ALL
            .into_iter()
            .find(|climate| climate.as_str() == s)
            .ok_or_else(|| CalcError::InvalidClimate(s.to_string()))
    }
}

impl std::fmt::Display for ClimateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

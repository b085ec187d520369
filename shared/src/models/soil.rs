//! Soil test brackets
//!
//! Each nutrient table is keyed by a bracket of the matching soil measurement.
//! Brackets are half-open and contiguous over `[0, +inf)`; every boundary is a
//! strict `<` comparison and the last bracket catches everything above.

use serde::{Deserialize, Serialize};

/// Common behaviour of the three bracket families
pub trait SoilBracket: Copy + Eq + std::fmt::Debug + 'static {
    /// Brackets in ascending order
    const ALL: &'static [Self];

    /// Bracket containing the measured value
    fn classify(value: f64) -> Self;

    /// Table key label
    fn label(&self) -> &'static str;
}

pub const ORGANIC_CARBON_LOW: f64 = 0.5;
pub const ORGANIC_CARBON_HIGH: f64 = 0.75;

pub const PHOSPHORUS_VERY_LOW: f64 = 5.0;
pub const PHOSPHORUS_LOW: f64 = 10.0;
pub const PHOSPHORUS_MEDIUM: f64 = 12.0;

pub const POTASSIUM_LOW: f64 = 100.0;
pub const POTASSIUM_MEDIUM: f64 = 150.0;

/// Organic carbon (%) bracket for the nitrogen table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NitrogenBracket {
    #[serde(rename = "organic carbon<0.5")]
    Low,
    #[serde(rename = "0.5<=organic carbon<0.75")]
    Medium,
    #[serde(rename = "0.75<organic carbon")]
    High,
}

impl SoilBracket for NitrogenBracket {
    const ALL: &'static [Self] = &[
        NitrogenBracket::Low,
        NitrogenBracket::Medium,
        NitrogenBracket::High,
    ];

    fn classify(organic_carbon: f64) -> Self {
        if organic_carbon < ORGANIC_CARBON_LOW {
            NitrogenBracket::Low
        } else if organic_carbon < ORGANIC_CARBON_HIGH {
            NitrogenBracket::Medium
        } else {
            NitrogenBracket::High
        }
    }

    fn label(&self) -> &'static str {
        match self {
            NitrogenBracket::Low => "organic carbon<0.5",
            NitrogenBracket::Medium => "0.5<=organic carbon<0.75",
            NitrogenBracket::High => "0.75<organic carbon",
        }
    }
}

/// Soil phosphorus bracket for the P2O5 table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhosphorusBracket {
    #[serde(rename = "P2O5<5")]
    VeryLow,
    #[serde(rename = "5<= P2O5<10")]
    Low,
    #[serde(rename = "10<= P2O5<12")]
    Medium,
    #[serde(rename = "12<= P2O5")]
    High,
}

impl SoilBracket for PhosphorusBracket {
    const ALL: &'static [Self] = &[
        PhosphorusBracket::VeryLow,
        PhosphorusBracket::Low,
        PhosphorusBracket::Medium,
        PhosphorusBracket::High,
    ];

    fn classify(phosphorus: f64) -> Self {
        if phosphorus < PHOSPHORUS_VERY_LOW {
            PhosphorusBracket::VeryLow
        } else if phosphorus < PHOSPHORUS_LOW {
            PhosphorusBracket::Low
        } else if phosphorus < PHOSPHORUS_MEDIUM {
            PhosphorusBracket::Medium
        } else {
            PhosphorusBracket::High
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PhosphorusBracket::VeryLow => "P2O5<5",
            PhosphorusBracket::Low => "5<= P2O5<10",
            PhosphorusBracket::Medium => "10<= P2O5<12",
            PhosphorusBracket::High => "12<= P2O5",
        }
    }
}

/// Soil potassium bracket for the K2O table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PotassiumBracket {
    #[serde(rename = "K2O<100")]
    Low,
    #[serde(rename = "100<= K2O <150")]
    Medium,
    #[serde(rename = "150<= K2O")]
    High,
}

impl SoilBracket for PotassiumBracket {
    const ALL: &'static [Self] = &[
        PotassiumBracket::Low,
        PotassiumBracket::Medium,
        PotassiumBracket::High,
    ];

    fn classify(potassium: f64) -> Self {
        if potassium < POTASSIUM_LOW {
            PotassiumBracket::Low
        } else if potassium < POTASSIUM_MEDIUM {
            PotassiumBracket::Medium
        } else {
            PotassiumBracket::High
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PotassiumBracket::Low => "K2O<100",
            PotassiumBracket::Medium => "100<= K2O <150",
            PotassiumBracket::High => "150<= K2O",
        }
    }
}

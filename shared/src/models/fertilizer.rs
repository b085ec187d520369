//! Fertilizer product catalog

use serde::{Deserialize, Serialize};

/// Primary nutrients, expressed as N, P2O5 and K2O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    pub const ALL: [Nutrient; 3] = [Nutrient::Nitrogen, Nutrient::Phosphorus, Nutrient::Potassium];

    /// Name used in form field ids and messages
    pub fn name(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "nitrogen",
            Nutrient::Phosphorus => "phosphorus",
            Nutrient::Potassium => "potassium",
        }
    }

    /// Form in which the dose is expressed
    pub fn oxide_label(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "N",
            Nutrient::Phosphorus => "P2O5",
            Nutrient::Potassium => "K2O",
        }
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mass fraction of each nutrient in a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientContent {
    pub n: f64,
    pub p2o5: f64,
    pub k2o: f64,
}

impl NutrientContent {
    pub fn fraction(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Nitrogen => self.n,
            Nutrient::Phosphorus => self.p2o5,
            Nutrient::Potassium => self.k2o,
        }
    }
}

/// Compound products supply several nutrients, straight products exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FertilizerCategory {
    Compound,
    Straight(Nutrient),
}

/// Products offered on the fertilizer form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FertilizerProduct {
    #[serde(rename = "20-20-20")]
    Npk202020,
    #[serde(rename = "DAP")]
    Dap,
    Urea,
    AmmoniumSulfate,
    AmmoniumNitrate,
    TripleSuperphosphate,
    SimpleSuperphosphate,
    PotassiumSulfate,
    PotassiumChloride,
}

impl FertilizerProduct {
    pub const ALL: [FertilizerProduct; 9] = [
        FertilizerProduct::Npk202020,
        FertilizerProduct::Dap,
        FertilizerProduct::Urea,
        FertilizerProduct::AmmoniumSulfate,
        FertilizerProduct::AmmoniumNitrate,
        FertilizerProduct::TripleSuperphosphate,
        FertilizerProduct::SimpleSuperphosphate,
        FertilizerProduct::PotassiumSulfate,
        FertilizerProduct::PotassiumChloride,
    ];

    /// Form/store identifier
    pub fn id(&self) -> &'static str {
        match self {
            FertilizerProduct::Npk202020 => "20-20-20",
            FertilizerProduct::Dap => "DAP",
            FertilizerProduct::Urea => "urea",
            FertilizerProduct::AmmoniumSulfate => "ammoniumSulfate",
            FertilizerProduct::AmmoniumNitrate => "ammoniumNitrate",
            FertilizerProduct::TripleSuperphosphate => "tripleSuperphosphate",
            FertilizerProduct::SimpleSuperphosphate => "simpleSuperphosphate",
            FertilizerProduct::PotassiumSulfate => "potassiumSulfate",
            FertilizerProduct::PotassiumChloride => "potassiumChloride",
        }
    }

    /// Store key holding the product's percentage share
    pub fn percentage_field(&self) -> &'static str {
        match self {
            FertilizerProduct::Npk202020 => "20-20-20Percentage",
            FertilizerProduct::Dap => "DAPPercentage",
            FertilizerProduct::Urea => "ureaPercentage",
            FertilizerProduct::AmmoniumSulfate => "ammoniumSulfatePercentage",
            FertilizerProduct::AmmoniumNitrate => "ammoniumNitratePercentage",
            FertilizerProduct::TripleSuperphosphate => "tripleSuperphosphatePercentage",
            FertilizerProduct::SimpleSuperphosphate => "simpleSuperphosphatePercentage",
            FertilizerProduct::PotassiumSulfate => "potassiumSulfatePercentage",
            FertilizerProduct::PotassiumChloride => "potassiumChloridePercentage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FertilizerProduct::Npk202020 => "NPK 20-20-20",
            FertilizerProduct::Dap => "Diammonium Phosphate (DAP)",
            FertilizerProduct::Urea => "Urea",
            FertilizerProduct::AmmoniumSulfate => "Ammonium Sulfate",
            FertilizerProduct::AmmoniumNitrate => "Ammonium Nitrate",
            FertilizerProduct::TripleSuperphosphate => "Triple Superphosphate",
            FertilizerProduct::SimpleSuperphosphate => "Simple Superphosphate",
            FertilizerProduct::PotassiumSulfate => "Potassium Sulfate",
            FertilizerProduct::PotassiumChloride => "Potassium Chloride",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|product| product.id() == id)
    }

    pub fn category(&self) -> FertilizerCategory {
        match self {
            FertilizerProduct::Npk202020 | FertilizerProduct::Dap => FertilizerCategory::Compound,
            FertilizerProduct::Urea
            | FertilizerProduct::AmmoniumSulfate
            | FertilizerProduct::AmmoniumNitrate => {
                FertilizerCategory::Straight(Nutrient::Nitrogen)
            }
            FertilizerProduct::TripleSuperphosphate | FertilizerProduct::SimpleSuperphosphate => {
                FertilizerCategory::Straight(Nutrient::Phosphorus)
            }
            FertilizerProduct::PotassiumSulfate | FertilizerProduct::PotassiumChloride => {
                FertilizerCategory::Straight(Nutrient::Potassium)
            }
        }
    }

    pub fn is_compound(&self) -> bool {
        self.category() == FertilizerCategory::Compound
    }

    pub fn content(&self) -> NutrientContent {
        let content = |n, p2o5, k2o| NutrientContent { n, p2o5, k2o };
        match self {
            FertilizerProduct::Npk202020 => content(0.2, 0.2, 0.2),
            FertilizerProduct::Dap => content(0.18, 0.46, 0.0),
            FertilizerProduct::Urea => content(0.46, 0.0, 0.0),
            FertilizerProduct::AmmoniumSulfate => content(0.21, 0.0, 0.0),
            FertilizerProduct::AmmoniumNitrate => content(0.34, 0.0, 0.0),
            FertilizerProduct::TripleSuperphosphate => content(0.0, 0.46, 0.0),
            FertilizerProduct::SimpleSuperphosphate => content(0.0, 0.16, 0.0),
            FertilizerProduct::PotassiumSulfate => content(0.0, 0.0, 0.5),
            FertilizerProduct::PotassiumChloride => content(0.0, 0.0, 0.6),
        }
    }

    pub fn compounds() -> impl Iterator<Item = FertilizerProduct> {
        Self::ALL.into_iter().filter(FertilizerProduct::is_compound)
    }

    /// Straight products supplying the given nutrient
    pub fn straights_for(nutrient: Nutrient) -> impl Iterator<Item = FertilizerProduct> {
        Self::ALL
            .into_iter()
            .filter(move |product| product.category() == FertilizerCategory::Straight(nutrient))
    }
}

impl std::fmt::Display for FertilizerProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

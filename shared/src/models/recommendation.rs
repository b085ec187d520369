//! Recommendation and allocation results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    ClimateCategory, FertilizerProduct, NitrogenBracket, Nutrient, PhosphorusBracket,
    PotassiumBracket, YieldClass,
};

/// Recommended nutrient doses in kg/ha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "recommendedN")]
    pub recommended_n: f64,
    #[serde(rename = "recommendedP2O5")]
    pub recommended_p2o5: f64,
    #[serde(rename = "recommendedK2O")]
    pub recommended_k2o: f64,
}

impl Recommendation {
    pub fn dose(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Nitrogen => self.recommended_n,
            Nutrient::Phosphorus => self.recommended_p2o5,
            Nutrient::Potassium => self.recommended_k2o,
        }
    }
}

/// Table keys a recommendation was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionBasis {
    pub climate: ClimateCategory,
    pub yield_class: YieldClass,
    pub nitrogen_bracket: NitrogenBracket,
    pub phosphorus_bracket: PhosphorusBracket,
    pub potassium_bracket: PotassiumBracket,
}

/// A resolved recommendation together with its lookup keys
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution {
    pub basis: ResolutionBasis,
    pub recommendation: Recommendation,
}

/// Nutrient still to be supplied after compound products
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientBalance {
    pub n: f64,
    pub p2o5: f64,
    pub k2o: f64,
}

impl NutrientBalance {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Nitrogen => self.n,
            Nutrient::Phosphorus => self.p2o5,
            Nutrient::Potassium => self.k2o,
        }
    }

    /// True when compounds already exceed the recommended dose
    pub fn is_oversupplied(&self) -> bool {
        self.n < 0.0 || self.p2o5 < 0.0 || self.k2o < 0.0
    }
}

impl From<&Recommendation> for NutrientBalance {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            n: recommendation.recommended_n,
            p2o5: recommendation.recommended_p2o5,
            k2o: recommendation.recommended_k2o,
        }
    }
}

/// Application amount per product (kg/ha), in catalog order.
///
/// Only products that received an amount are present; unselected products are
/// absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FertilizerAmounts(BTreeMap<FertilizerProduct, f64>);

impl FertilizerAmounts {
    pub fn insert(&mut self, product: FertilizerProduct, amount: f64) {
        self.0.insert(product, amount);
    }

    pub fn get(&self, product: FertilizerProduct) -> Option<f64> {
        self.0.get(&product).copied()
    }

    pub fn contains(&self, product: FertilizerProduct) -> bool {
        self.0.contains_key(&product)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FertilizerProduct, f64)> + '_ {
        self.0.iter().map(|(product, amount)| (*product, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

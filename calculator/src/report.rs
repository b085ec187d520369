//! Display-ready recommendation report

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shared::{Calculation, FertilizerProduct, Nutrient, ResolutionBasis};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Recommended dose for one nutrient
#[derive(Debug, Clone, Serialize)]
pub struct NutrientLine {
    pub nutrient: Nutrient,
    pub label: String,
    pub dose_kg_ha: Decimal,
}

/// Application amount for one product
#[derive(Debug, Clone, Serialize)]
pub struct FertilizerLine {
    pub product: FertilizerProduct,
    pub name: &'static str,
    pub amount_kg_ha: Decimal,
    /// Compounds already cover more than the recommended dose
    pub oversupplied: bool,
}

/// Result of one calculation request, rounded for display
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub basis: ResolutionBasis,
    pub decimal_places: u32,
    pub nutrients: Vec<NutrientLine>,
    pub fertilizers: Vec<FertilizerLine>,
}

impl RecommendationReport {
    /// Round every value for display.
    ///
    /// Fails with [`AppError::ValueOutOfRange`] rather than showing a value the
    /// decimal type cannot hold.
    pub fn new(
        request_id: Uuid,
        calculation: &Calculation,
        decimal_places: u32,
    ) -> AppResult<Self> {
        let nutrients = Nutrient::ALL
            .into_iter()
            .map(|nutrient| {
                Ok(NutrientLine {
                    nutrient,
                    label: nutrient_label(nutrient),
                    dose_kg_ha: round_checked(
                        calculation.recommendation.dose(nutrient),
                        decimal_places,
                    )?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let fertilizers = calculation
            .amounts
            .iter()
            .map(|(product, amount)| {
                Ok(FertilizerLine {
                    product,
                    name: product.display_name(),
                    amount_kg_ha: round_checked(amount, decimal_places)?,
                    oversupplied: amount < 0.0,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            request_id,
            generated_at: Utc::now(),
            basis: calculation.basis,
            decimal_places,
            nutrients,
            fertilizers,
        })
    }

    pub fn nutrient_dose(&self, nutrient: Nutrient) -> Option<Decimal> {
        self.nutrients
            .iter()
            .find(|line| line.nutrient == nutrient)
            .map(|line| line.dose_kg_ha)
    }

    pub fn fertilizer_amount(&self, product: FertilizerProduct) -> Option<Decimal> {
        self.fertilizers
            .iter()
            .find(|line| line.product == product)
            .map(|line| line.amount_kg_ha)
    }

    pub fn has_oversupply(&self) -> bool {
        self.fertilizers.iter().any(|line| line.oversupplied)
    }

    /// Plain-text rendering of the results page
    pub fn render_text(&self) -> String {
        let places = self.decimal_places as usize;
        let mut lines = vec!["Recommended Nutrient Amounts".to_string()];
        for line in &self.nutrients {
            lines.push(format!("{}: {:.*} kg/ha", line.label, places, line.dose_kg_ha));
        }
        lines.push("Fertilizer Amounts".to_string());
        for line in &self.fertilizers {
            lines.push(format!("{}: {:.*} kg/ha", line.product.id(), places, line.amount_kg_ha));
        }
        lines.join("\n")
    }
}

fn nutrient_label(nutrient: Nutrient) -> String {
    let name = match nutrient {
        Nutrient::Nitrogen => "Nitrogen",
        Nutrient::Phosphorus => "Phosphorus",
        Nutrient::Potassium => "Potassium",
    };
    format!("{} ({})", name, nutrient.oxide_label())
}

/// Round half away from zero and pad to exactly `decimal_places`.
///
/// `None` for non-finite values and magnitudes beyond `Decimal::MAX`.
pub fn round(value: f64, decimal_places: u32) -> Option<Decimal> {
    let mut rounded = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    Some(rounded)
}

fn round_checked(value: f64, decimal_places: u32) -> AppResult<Decimal> {
    round(value, decimal_places).ok_or(AppError::ValueOutOfRange(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_pads_and_rounds() {
        assert_eq!(round(130.0, 2).unwrap().to_string(), "130.00");
        assert_eq!(round(138.4 / 0.46, 2), Some(dec("300.87")));
        assert_eq!(round(-40.005, 1).unwrap().to_string(), "-40.0");
        assert_eq!(round(2.5, 0), Some(dec("3")));
    }

    #[test]
    fn test_round_refuses_unrepresentable_values() {
        assert_eq!(round(1e30, 2), None);
        assert_eq!(round(-1e30, 2), None);
        assert_eq!(round(f64::NAN, 2), None);
        assert!(matches!(
            round_checked(1e30, 2),
            Err(AppError::ValueOutOfRange(v)) if v == 1e30
        ));
    }

    #[test]
    fn test_nutrient_labels() {
        assert_eq!(nutrient_label(Nutrient::Phosphorus), "Phosphorus (P2O5)");
        assert_eq!(nutrient_label(Nutrient::Nitrogen), "Nitrogen (N)");
    }
}

//! Validation of form inputs before any computation runs

use crate::allocation::effective_share;
use crate::error::{CalcError, CalcResult};
use crate::models::{FertilizerSelection, Nutrient};
use crate::types::{RawSoilInput, SoilTestInput};

// ============================================================================
// Soil and Climate Inputs
// ============================================================================

/// Parse a numeric form value; blank, malformed and non-finite values are `None`
pub fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Check the soil and climate inputs and parse them once.
///
/// A yield of zero is treated the same as a missing yield.
pub fn validate_inputs(raw: &RawSoilInput) -> CalcResult<SoilTestInput> {
    // Blank is missing; anything else is passed on verbatim and must match a
    // climate exactly.
    let climate = raw
        .climate
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or(CalcError::MissingField { field: "climate" })?;

    let yield_value = parse_number(raw.yield_value.as_deref())
        .filter(|y| *y > 0.0)
        .ok_or(CalcError::MissingField { field: "yield" })?;

    let organic_carbon = parse_number(raw.organic_carbon.as_deref()).ok_or(
        CalcError::MissingField {
            field: "organicCarbon",
        },
    )?;
    let phosphorus = parse_number(raw.phosphorus.as_deref())
        .ok_or(CalcError::MissingField { field: "phosphorus" })?;
    let potassium = parse_number(raw.potassium.as_deref())
        .ok_or(CalcError::MissingField { field: "potassium" })?;

    validate_organic_carbon(organic_carbon)?;
    validate_soil_test("phosphorus", phosphorus)?;
    validate_soil_test("potassium", potassium)?;

    Ok(SoilTestInput {
        climate: climate.to_string(),
        yield_value,
        organic_carbon,
        phosphorus,
        potassium,
    })
}

/// Organic carbon is a percentage
pub fn validate_organic_carbon(organic_carbon: f64) -> CalcResult<()> {
    if !(0.0..=100.0).contains(&organic_carbon) {
        return Err(CalcError::OutOfRange {
            field: "organicCarbon",
            message: "Organic Carbon percentage must be between 0 and 100.",
        });
    }
    Ok(())
}

/// Soil test concentrations cannot be negative
pub fn validate_soil_test(field: &'static str, value: f64) -> CalcResult<()> {
    if value < 0.0 {
        return Err(CalcError::OutOfRange {
            field,
            message: "Phosphorus and Potassium values must be non-negative.",
        });
    }
    Ok(())
}

// ============================================================================
// Fertilizer Percentages
// ============================================================================

/// Every entered straight-product share must be a percentage.
///
/// Applies to products selected alone as well as to shared groups, so
/// offsetting shares such as 150 and -50 cannot pass the total check.
pub fn validate_percentage_shares(selection: &FertilizerSelection) -> CalcResult<()> {
    for nutrient in Nutrient::ALL {
        for (product, entry) in selection.straights_for(nutrient) {
            let Some(percentage) = entry.percentage else {
                continue;
            };
            if !(0.0..=100.0).contains(&percentage) {
                return Err(CalcError::OutOfRange {
                    field: product.percentage_field(),
                    message: "Fertilizer percentages must be between 0 and 100.",
                });
            }
        }
    }
    Ok(())
}

/// Total share entered for each nutrient that has more than one straight
/// product selected and whose total exceeds 100%.
pub fn percentage_overflows(selection: &FertilizerSelection) -> Vec<(Nutrient, f64)> {
    Nutrient::ALL
        .into_iter()
        .filter_map(|nutrient| {
            let selected = selection.straights_for(nutrient);
            if selected.len() <= 1 {
                return None;
            }
            let total: f64 = selected
                .iter()
                .map(|(_, entry)| effective_share(entry, selected.len()))
                .sum();
            (total > 100.0).then_some((nutrient, total))
        })
        .collect()
}

/// Gate run before the fertilizer form is submitted.
///
/// Each share must lie in 0..=100. Under-allocation is allowed; only totals
/// above 100% are rejected.
pub fn validate_fertilizer_percentages(selection: &FertilizerSelection) -> CalcResult<()> {
    validate_percentage_shares(selection)?;
    match percentage_overflows(selection).first() {
        Some(&(nutrient, total)) => Err(CalcError::PercentageOverflow { nutrient, total }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FertilizerProduct;

    fn reference_input() -> RawSoilInput {
        RawSoilInput::new("Temperate", "5", "0.3", "3", "50")
    }

    // ========================================================================
    // Soil Input Tests
    // ========================================================================

    #[test]
    fn test_validate_inputs_valid() {
        let input = validate_inputs(&reference_input()).unwrap();
        assert_eq!(input.climate, "Temperate");
        assert_eq!(input.yield_value, 5.0);
        assert_eq!(input.organic_carbon, 0.3);
        assert_eq!(input.phosphorus, 3.0);
        assert_eq!(input.potassium, 50.0);
    }

    #[test]
    fn test_validate_inputs_trims_numbers_only() {
        let raw = RawSoilInput::new("Cold", " 4.5 ", "0.8", "12", "150 ");
        let input = validate_inputs(&raw).unwrap();
        assert_eq!(input.yield_value, 4.5);
        assert_eq!(input.potassium, 150.0);

        let raw = RawSoilInput::new(" Cold ", "5", "0.3", "3", "50");
        assert_eq!(validate_inputs(&raw).unwrap().climate, " Cold ");
    }

    #[test]
    fn test_blank_climate_is_missing() {
        let mut raw = reference_input();
        raw.climate = Some("   ".to_string());
        assert_eq!(
            validate_inputs(&raw),
            Err(CalcError::MissingField { field: "climate" })
        );
    }

    #[test]
    fn test_missing_climate() {
        let mut raw = reference_input();
        raw.climate = Some(String::new());
        assert_eq!(
            validate_inputs(&raw),
            Err(CalcError::MissingField { field: "climate" })
        );
        raw.climate = None;
        assert!(validate_inputs(&raw).is_err());
    }

    #[test]
    fn test_zero_or_negative_yield_is_missing() {
        for value in ["0", "-2", "", "abc"] {
            let mut raw = reference_input();
            raw.yield_value = Some(value.to_string());
            assert_eq!(
                validate_inputs(&raw),
                Err(CalcError::MissingField { field: "yield" }),
                "yield {value:?}"
            );
        }
    }

    #[test]
    fn test_unparseable_soil_values() {
        let mut raw = reference_input();
        raw.potassium = Some("lots".to_string());
        assert_eq!(
            validate_inputs(&raw),
            Err(CalcError::MissingField { field: "potassium" })
        );

        let mut raw = reference_input();
        raw.organic_carbon = Some("NaN".to_string());
        assert_eq!(
            validate_inputs(&raw),
            Err(CalcError::MissingField {
                field: "organicCarbon"
            })
        );
    }

    #[test]
    fn test_organic_carbon_range() {
        let mut raw = reference_input();
        raw.organic_carbon = Some("100".to_string());
        assert!(validate_inputs(&raw).is_ok());

        raw.organic_carbon = Some("100.5".to_string());
        assert!(matches!(
            validate_inputs(&raw),
            Err(CalcError::OutOfRange {
                field: "organicCarbon",
                ..
            })
        ));

        raw.organic_carbon = Some("-0.1".to_string());
        assert!(validate_inputs(&raw).is_err());
    }

    #[test]
    fn test_negative_phosphorus_is_out_of_range() {
        let mut raw = reference_input();
        raw.phosphorus = Some("-1".to_string());
        assert!(matches!(
            validate_inputs(&raw),
            Err(CalcError::OutOfRange {
                field: "phosphorus",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_climate_passes_validation() {
        // climate membership is checked by the resolver
        let mut raw = reference_input();
        raw.climate = Some("Tropical".to_string());
        assert!(validate_inputs(&raw).is_ok());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("12.5")), Some(12.5));
        assert_eq!(parse_number(Some("  3 ")), Some(3.0));
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(None), None);
    }

    // ========================================================================
    // Percentage Gate Tests
    // ========================================================================

    #[test]
    fn test_percentages_over_100_rejected() {
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::Urea, Some(60.0))
            .with_straight(FertilizerProduct::AmmoniumNitrate, Some(50.0));
        assert_eq!(
            validate_fertilizer_percentages(&selection),
            Err(CalcError::PercentageOverflow {
                nutrient: Nutrient::Nitrogen,
                total: 110.0
            })
        );
    }

    #[test]
    fn test_percentages_at_or_under_100_accepted() {
        let exact = FertilizerSelection::new()
            .with_straight(FertilizerProduct::Urea, Some(70.0))
            .with_straight(FertilizerProduct::AmmoniumSulfate, Some(30.0));
        assert!(validate_fertilizer_percentages(&exact).is_ok());

        let under = FertilizerSelection::new()
            .with_straight(FertilizerProduct::PotassiumSulfate, Some(20.0))
            .with_straight(FertilizerProduct::PotassiumChloride, Some(10.0));
        assert!(validate_fertilizer_percentages(&under).is_ok());
    }

    #[test]
    fn test_single_product_total_is_not_checked() {
        let selection =
            FertilizerSelection::new().with_straight(FertilizerProduct::Urea, Some(80.0));
        assert!(percentage_overflows(&selection).is_empty());
        assert!(validate_fertilizer_percentages(&selection).is_ok());
    }

    #[test]
    fn test_share_above_100_rejected_for_single_product() {
        let selection =
            FertilizerSelection::new().with_straight(FertilizerProduct::Urea, Some(250.0));
        assert_eq!(
            validate_fertilizer_percentages(&selection),
            Err(CalcError::OutOfRange {
                field: "ureaPercentage",
                message: "Fertilizer percentages must be between 0 and 100.",
            })
        );
    }

    #[test]
    fn test_offsetting_shares_rejected() {
        // 150 + -50 totals 100 but neither is a percentage
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::Urea, Some(150.0))
            .with_straight(FertilizerProduct::AmmoniumSulfate, Some(-50.0));
        assert!(percentage_overflows(&selection).is_empty());

        let err = validate_fertilizer_percentages(&selection).unwrap_err();
        assert_eq!(err.field(), Some("ureaPercentage"));

        let negative_only = FertilizerSelection::new()
            .with_straight(FertilizerProduct::Urea, Some(100.0))
            .with_straight(FertilizerProduct::AmmoniumSulfate, Some(-50.0));
        assert_eq!(
            validate_percentage_shares(&negative_only).unwrap_err().field(),
            Some("ammoniumSulfatePercentage")
        );
    }

    #[test]
    fn test_share_bounds_are_inclusive() {
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::TripleSuperphosphate, Some(100.0))
            .with_straight(FertilizerProduct::SimpleSuperphosphate, Some(0.0));
        assert!(validate_percentage_shares(&selection).is_ok());
    }

    #[test]
    fn test_all_overflowing_groups_reported() {
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::TripleSuperphosphate, Some(80.0))
            .with_straight(FertilizerProduct::SimpleSuperphosphate, Some(30.0))
            .with_straight(FertilizerProduct::PotassiumSulfate, Some(100.0))
            .with_straight(FertilizerProduct::PotassiumChloride, Some(1.0));
        let overflows = percentage_overflows(&selection);
        assert_eq!(
            overflows,
            vec![(Nutrient::Phosphorus, 110.0), (Nutrient::Potassium, 101.0)]
        );
        assert!(matches!(
            validate_fertilizer_percentages(&selection),
            Err(CalcError::PercentageOverflow {
                nutrient: Nutrient::Phosphorus,
                ..
            })
        ));
    }
}

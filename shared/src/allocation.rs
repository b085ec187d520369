//! Conversion of nutrient doses into product application rates

use crate::error::{CalcError, CalcResult};
use crate::models::{
    FertilizerAmounts, FertilizerProduct, FertilizerSelection, Nutrient, NutrientBalance,
    Recommendation, SelectionEntry,
};

/// Percentage share a straight product receives.
///
/// A product selected alone for its nutrient defaults to 100%. When several
/// share a nutrient, a missing percentage counts as 0 so the allocation agrees
/// with the percentage gate.
pub fn effective_share(entry: &SelectionEntry, co_selected: usize) -> f64 {
    match entry.percentage {
        Some(percentage) => percentage,
        None if co_selected <= 1 => 100.0,
        None => 0.0,
    }
}

/// Compute the application amount of every selected product.
///
/// Compound products are applied first and their nutrient contribution is
/// subtracted from the recommendation; straight products then split what is
/// left. A negative remainder is passed through as a negative amount.
pub fn allocate(
    recommendation: &Recommendation,
    selection: &FertilizerSelection,
) -> CalcResult<FertilizerAmounts> {
    let mut amounts = FertilizerAmounts::default();
    let remaining = apply_compounds(recommendation, selection, &mut amounts);

    for nutrient in Nutrient::ALL {
        let selected = selection.straights_for(nutrient);
        let remaining_dose = remaining.get(nutrient);

        for (product, entry) in &selected {
            let fraction = product.content().fraction(nutrient);
            if fraction == 0.0 {
                return Err(CalcError::Configuration(format!(
                    "{} has no {} content",
                    product.id(),
                    nutrient.oxide_label()
                )));
            }
            let share = effective_share(entry, selected.len()) / 100.0;
            amounts.insert(*product, (remaining_dose * share) / fraction);
        }
    }

    Ok(amounts)
}

/// Nutrient left for straight products once compounds are applied
pub fn remaining_after_compounds(
    recommendation: &Recommendation,
    selection: &FertilizerSelection,
) -> NutrientBalance {
    apply_compounds(recommendation, selection, &mut FertilizerAmounts::default())
}

fn apply_compounds(
    recommendation: &Recommendation,
    selection: &FertilizerSelection,
    amounts: &mut FertilizerAmounts,
) -> NutrientBalance {
    let mut remaining = NutrientBalance::from(recommendation);

    for (product, entry) in selection.compounds() {
        let amount = compound_amount(&entry);
        if amount <= 0.0 {
            continue;
        }
        let content = product.content();
        remaining.n -= amount * content.n;
        remaining.p2o5 -= amount * content.p2o5;
        remaining.k2o -= amount * content.k2o;
        amounts.insert(product, amount);
    }

    remaining
}

fn compound_amount(entry: &SelectionEntry) -> f64 {
    match entry.amount {
        Some(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}

/// Products whose computed amount is negative, i.e. compounds already supply
/// more than the recommended dose of that nutrient.
pub fn oversupplied_products(amounts: &FertilizerAmounts) -> Vec<FertilizerProduct> {
    amounts
        .iter()
        .filter(|(_, amount)| *amount < 0.0)
        .map(|(product, _)| product)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn reference() -> Recommendation {
        Recommendation {
            recommended_n: 156.4,
            recommended_p2o5: 119.6,
            recommended_k2o: 130.0,
        }
    }

    #[test]
    fn test_dap_reduces_nitrogen_and_phosphorus() {
        let selection = FertilizerSelection::new().with_compound(FertilizerProduct::Dap, 100.0);
        let remaining = remaining_after_compounds(&reference(), &selection);
        assert!((remaining.n - 138.4).abs() < TOLERANCE);
        assert!((remaining.p2o5 - 73.6).abs() < TOLERANCE);
        assert_eq!(remaining.k2o, 130.0);
    }

    #[test]
    fn test_urea_alone_takes_full_remainder() {
        let selection = FertilizerSelection::new()
            .with_compound(FertilizerProduct::Dap, 100.0)
            .with_straight(FertilizerProduct::Urea, None);
        let amounts = allocate(&reference(), &selection).unwrap();

        assert_eq!(amounts.get(FertilizerProduct::Dap), Some(100.0));
        let urea = amounts.get(FertilizerProduct::Urea).unwrap();
        assert!((urea - 138.4 / 0.46).abs() < TOLERANCE);
        assert!((urea - 300.87).abs() < 0.005);
    }

    #[test]
    fn test_npk_subtracts_equally() {
        let selection =
            FertilizerSelection::new().with_compound(FertilizerProduct::Npk202020, 50.0);
        let remaining = remaining_after_compounds(&reference(), &selection);
        assert!((remaining.n - 146.4).abs() < TOLERANCE);
        assert!((remaining.p2o5 - 109.6).abs() < TOLERANCE);
        assert!((remaining.k2o - 120.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_split_between_nitrogen_products() {
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::Urea, Some(60.0))
            .with_straight(FertilizerProduct::AmmoniumSulfate, Some(40.0));
        let amounts = allocate(&reference(), &selection).unwrap();

        let urea = amounts.get(FertilizerProduct::Urea).unwrap();
        let sulfate = amounts.get(FertilizerProduct::AmmoniumSulfate).unwrap();
        assert!((urea - 156.4 * 0.6 / 0.46).abs() < TOLERANCE);
        assert!((sulfate - 156.4 * 0.4 / 0.21).abs() < TOLERANCE);
        assert!((urea * 0.46 + sulfate * 0.21 - 156.4).abs() < TOLERANCE);
    }

    #[test]
    fn test_under_allocation_leaves_nutrient_unapplied() {
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::PotassiumSulfate, Some(30.0))
            .with_straight(FertilizerProduct::PotassiumChloride, Some(20.0));
        let amounts = allocate(&reference(), &selection).unwrap();

        let supplied = amounts.get(FertilizerProduct::PotassiumSulfate).unwrap() * 0.5
            + amounts.get(FertilizerProduct::PotassiumChloride).unwrap() * 0.6;
        assert!((supplied - 65.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_missing_share_with_co_selection_counts_as_zero() {
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::TripleSuperphosphate, Some(100.0))
            .with_straight(FertilizerProduct::SimpleSuperphosphate, None);
        let amounts = allocate(&reference(), &selection).unwrap();
        assert_eq!(amounts.get(FertilizerProduct::SimpleSuperphosphate), Some(0.0));
    }

    #[test]
    fn test_compound_without_positive_amount_is_omitted() {
        let mut selection = FertilizerSelection::new()
            .with_compound(FertilizerProduct::Dap, 0.0)
            .with_compound(FertilizerProduct::Npk202020, -10.0);
        let amounts = allocate(&reference(), &selection).unwrap();
        assert!(amounts.is_empty());

        selection.select(FertilizerProduct::Dap, SelectionEntry::default());
        selection.select(
            FertilizerProduct::Npk202020,
            SelectionEntry {
                amount: Some(f64::NAN),
                percentage: None,
            },
        );
        let amounts = allocate(&reference(), &selection).unwrap();
        assert!(amounts.is_empty());
        assert_eq!(
            remaining_after_compounds(&reference(), &selection),
            NutrientBalance::from(&reference())
        );
    }

    #[test]
    fn test_unselected_products_are_absent() {
        let selection = FertilizerSelection::new().with_straight(FertilizerProduct::Urea, None);
        let amounts = allocate(&reference(), &selection).unwrap();
        assert_eq!(amounts.len(), 1);
        assert!(!amounts.contains(FertilizerProduct::TripleSuperphosphate));
    }

    #[test]
    fn test_compound_oversupply_goes_negative() {
        let selection = FertilizerSelection::new()
            .with_compound(FertilizerProduct::Dap, 300.0)
            .with_straight(FertilizerProduct::TripleSuperphosphate, None);
        let remaining = remaining_after_compounds(&reference(), &selection);
        assert!(remaining.is_oversupplied());

        let amounts = allocate(&reference(), &selection).unwrap();
        let tsp = amounts.get(FertilizerProduct::TripleSuperphosphate).unwrap();
        assert!(tsp < 0.0);
        assert!((tsp - (119.6 - 138.0) / 0.46).abs() < TOLERANCE);
        assert_eq!(
            oversupplied_products(&amounts),
            vec![FertilizerProduct::TripleSuperphosphate]
        );
    }

    #[test]
    fn test_amounts_iterate_in_catalog_order() {
        let selection = FertilizerSelection::new()
            .with_straight(FertilizerProduct::PotassiumChloride, None)
            .with_straight(FertilizerProduct::Urea, None)
            .with_compound(FertilizerProduct::Dap, 50.0);
        let amounts = allocate(&reference(), &selection).unwrap();
        let order: Vec<_> = amounts.iter().map(|(product, _)| product).collect();
        assert_eq!(
            order,
            vec![
                FertilizerProduct::Dap,
                FertilizerProduct::Urea,
                FertilizerProduct::PotassiumChloride
            ]
        );
    }

    #[test]
    fn test_effective_share_defaults() {
        let empty = SelectionEntry::default();
        assert_eq!(effective_share(&empty, 1), 100.0);
        assert_eq!(effective_share(&empty, 2), 0.0);
        let half = SelectionEntry {
            amount: None,
            percentage: Some(50.0),
        };
        assert_eq!(effective_share(&half, 1), 50.0);
    }
}

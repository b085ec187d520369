//! Nutrient recommendation tables for wheat
//!
//! Three tables map a soil bracket, a climate and a yield class to the
//! recommended dose in kg/ha. Values are reproduced exactly from the published
//! recommendation charts; each row lists the doses for yield classes 3 to 7.

use crate::error::{CalcError, CalcResult};
use crate::models::{
    ClimateCategory, NitrogenBracket, Nutrient, PhosphorusBracket, PotassiumBracket, SoilBracket,
    YieldClass,
};

/// One bracket/climate row with doses for yield classes 3..=7
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseRow<B> {
    pub bracket: B,
    pub climate: ClimateCategory,
    pub doses: [f64; 5],
}

const fn row<B>(bracket: B, climate: ClimateCategory, doses: [f64; 5]) -> DoseRow<B> {
    DoseRow {
        bracket,
        climate,
        doses,
    }
}

/// Immutable lookup table for a single nutrient
#[derive(Debug)]
pub struct NutrientTable<B: 'static> {
    nutrient: Nutrient,
    rows: &'static [DoseRow<B>],
}

impl<B> NutrientTable<B> {
    pub const fn new(nutrient: Nutrient, rows: &'static [DoseRow<B>]) -> Self {
        Self { nutrient, rows }
    }

    pub fn nutrient(&self) -> Nutrient {
        self.nutrient
    }

    pub fn rows(&self) -> &'static [DoseRow<B>] {
        self.rows
    }
}

impl<B: SoilBracket> NutrientTable<B> {
    pub fn row(&self, bracket: B, climate: ClimateCategory) -> Option<&'static DoseRow<B>> {
        self.rows
            .iter()
            .find(|row| row.bracket == bracket && row.climate == climate)
    }

    pub fn has_climate(&self, bracket: B, climate: ClimateCategory) -> bool {
        self.row(bracket, climate).is_some()
    }

    pub fn dose(&self, bracket: B, climate: ClimateCategory, class: YieldClass) -> Option<f64> {
        self.row(bracket, climate)
            .and_then(|row| row.doses.get(class.index()).copied())
    }

    /// Check that every bracket/climate pair appears exactly once and every
    /// dose is a finite, non-negative number.
    pub fn validate(&self) -> CalcResult<()> {
        for &bracket in B::ALL {
            for climate in ClimateCategory::ALL {
                let count = self
                    .rows
                    .iter()
                    .filter(|row| row.bracket == bracket && row.climate == climate)
                    .count();
                if count != 1 {
                    return Err(CalcError::Configuration(format!(
                        "{} table has {} rows for '{}' / {}",
                        self.nutrient.oxide_label(),
                        count,
                        bracket.label(),
                        climate
                    )));
                }
            }
        }

        if let Some(row) = self
            .rows
            .iter()
            .find(|row| row.doses.iter().any(|dose| !dose.is_finite() || *dose < 0.0))
        {
            return Err(CalcError::Configuration(format!(
                "{} table has an invalid dose for '{}' / {}",
                self.nutrient.oxide_label(),
                row.bracket.label(),
                row.climate
            )));
        }

        Ok(())
    }
}

pub static NITROGEN: NutrientTable<NitrogenBracket> =
    NutrientTable::new(Nutrient::Nitrogen, NITROGEN_ROWS);

pub static PHOSPHORUS: NutrientTable<PhosphorusBracket> =
    NutrientTable::new(Nutrient::Phosphorus, PHOSPHORUS_ROWS);

pub static POTASSIUM: NutrientTable<PotassiumBracket> =
    NutrientTable::new(Nutrient::Potassium, POTASSIUM_ROWS);

/// Validate all three tables
pub fn validate_all() -> CalcResult<()> {
    NITROGEN.validate()?;
    PHOSPHORUS.validate()?;
    POTASSIUM.validate()
}

// ============================================================================
// Table data
// ============================================================================

// Nitrogen (N), keyed by organic carbon
const NITROGEN_ROWS: &[DoseRow<NitrogenBracket>] = &[
    row(NitrogenBracket::Low, ClimateCategory::HotHumid, [110.4, 133.4, 156.4, 174.8, 193.2]),
    row(NitrogenBracket::Low, ClimateCategory::HotDry, [119.6, 142.6, 165.6, 184.0, 197.8]),
    row(NitrogenBracket::Low, ClimateCategory::Temperate, [110.4, 133.4, 156.4, 174.8, 193.2]),
    row(NitrogenBracket::Low, ClimateCategory::Cold, [96.6, 119.6, 142.6, 161.0, 179.4]),
    row(NitrogenBracket::Medium, ClimateCategory::HotHumid, [96.6, 119.6, 142.6, 161.0, 179.4]),
    row(NitrogenBracket::Medium, ClimateCategory::HotDry, [105.8, 128.8, 151.8, 170.2, 184.0]),
    row(NitrogenBracket::Medium, ClimateCategory::Temperate, [96.6, 119.6, 142.6, 161.0, 179.4]),
    row(NitrogenBracket::Medium, ClimateCategory::Cold, [82.8, 105.8, 128.8, 147.2, 165.6]),
    row(NitrogenBracket::High, ClimateCategory::HotHumid, [82.8, 105.8, 128.8, 147.2, 165.6]),
    row(NitrogenBracket::High, ClimateCategory::HotDry, [92.0, 115.0, 138.0, 156.4, 170.2]),
    row(NitrogenBracket::High, ClimateCategory::Temperate, [82.8, 105.8, 128.8, 147.2, 165.6]),
    row(NitrogenBracket::High, ClimateCategory::Cold, [69.0, 92.0, 115.0, 133.4, 151.8]),
];

// Phosphorus (P2O5), keyed by soil phosphorus
const PHOSPHORUS_ROWS: &[DoseRow<PhosphorusBracket>] = &[
    row(PhosphorusBracket::VeryLow, ClimateCategory::HotHumid, [92.0, 105.8, 119.6, 133.4, 142.6]),
    row(PhosphorusBracket::VeryLow, ClimateCategory::HotDry, [85.1, 98.9, 112.7, 126.5, 135.7]),
    row(PhosphorusBracket::VeryLow, ClimateCategory::Temperate, [92.0, 105.8, 119.6, 133.4, 142.6]),
    row(PhosphorusBracket::VeryLow, ClimateCategory::Cold, [101.2, 115.0, 128.8, 142.6, 151.8]),
    row(PhosphorusBracket::Low, ClimateCategory::HotHumid, [73.6, 87.4, 101.2, 115.0, 124.2]),
    row(PhosphorusBracket::Low, ClimateCategory::HotDry, [66.7, 80.5, 94.3, 108.1, 117.3]),
    row(PhosphorusBracket::Low, ClimateCategory::Temperate, [73.6, 87.4, 101.2, 115.0, 124.2]),
    row(PhosphorusBracket::Low, ClimateCategory::Cold, [82.8, 96.6, 110.4, 124.2, 133.4]),
    row(PhosphorusBracket::Medium, ClimateCategory::HotHumid, [32.2, 46.0, 59.8, 73.6, 82.8]),
    row(PhosphorusBracket::Medium, ClimateCategory::HotDry, [25.3, 39.1, 52.9, 66.7, 75.9]),
    row(PhosphorusBracket::Medium, ClimateCategory::Temperate, [32.2, 46.0, 59.8, 73.6, 82.8]),
    row(PhosphorusBracket::Medium, ClimateCategory::Cold, [41.4, 55.2, 69.0, 82.8, 92.0]),
    row(PhosphorusBracket::High, ClimateCategory::HotHumid, [9.2, 23.0, 36.8, 50.6, 59.8]),
    row(PhosphorusBracket::High, ClimateCategory::HotDry, [9.2, 18.4, 32.2, 46.0, 55.2]),
    row(PhosphorusBracket::High, ClimateCategory::Temperate, [9.2, 23.0, 36.8, 50.6, 59.8]),
    row(PhosphorusBracket::High, ClimateCategory::Cold, [18.4, 32.2, 46.0, 59.8, 73.6]),
];

// Potassium (K2O), keyed by soil potassium
const POTASSIUM_ROWS: &[DoseRow<PotassiumBracket>] = &[
    row(PotassiumBracket::Low, ClimateCategory::HotHumid, [110.0, 120.0, 130.0, 140.0, 150.0]),
    row(PotassiumBracket::Low, ClimateCategory::HotDry, [105.0, 115.0, 125.0, 135.0, 145.0]),
    row(PotassiumBracket::Low, ClimateCategory::Temperate, [110.0, 120.0, 130.0, 140.0, 150.0]),
    row(PotassiumBracket::Low, ClimateCategory::Cold, [115.0, 125.0, 135.0, 145.0, 155.0]),
    row(PotassiumBracket::Medium, ClimateCategory::HotHumid, [75.0, 85.0, 95.0, 105.0, 115.0]),
    row(PotassiumBracket::Medium, ClimateCategory::HotDry, [70.0, 80.0, 90.0, 95.0, 110.0]),
    row(PotassiumBracket::Medium, ClimateCategory::Temperate, [75.0, 85.0, 95.0, 105.0, 115.0]),
    row(PotassiumBracket::Medium, ClimateCategory::Cold, [80.0, 90.0, 100.0, 110.0, 120.0]),
    row(PotassiumBracket::High, ClimateCategory::HotHumid, [25.0, 35.0, 45.0, 55.0, 60.0]),
    row(PotassiumBracket::High, ClimateCategory::HotDry, [20.0, 30.0, 40.0, 50.0, 55.0]),
    row(PotassiumBracket::High, ClimateCategory::Temperate, [25.0, 35.0, 45.0, 55.0, 60.0]),
    row(PotassiumBracket::High, ClimateCategory::Cold, [30.0, 40.0, 50.0, 60.0, 70.0]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn class(value: u8) -> YieldClass {
        YieldClass::new(value).unwrap()
    }

    #[test]
    fn test_tables_are_complete() {
        assert!(validate_all().is_ok());
        assert_eq!(NITROGEN.rows().len(), 12);
        assert_eq!(PHOSPHORUS.rows().len(), 16);
        assert_eq!(POTASSIUM.rows().len(), 12);
    }

    #[test]
    fn test_reference_doses() {
        let temperate = ClimateCategory::Temperate;
        assert_eq!(NITROGEN.dose(NitrogenBracket::Low, temperate, class(5)), Some(156.4));
        assert_eq!(
            PHOSPHORUS.dose(PhosphorusBracket::VeryLow, temperate, class(5)),
            Some(119.6)
        );
        assert_eq!(POTASSIUM.dose(PotassiumBracket::Low, temperate, class(5)), Some(130.0));
    }

    #[test]
    fn test_table_corners() {
        assert_eq!(
            NITROGEN.dose(NitrogenBracket::High, ClimateCategory::Cold, class(3)),
            Some(69.0)
        );
        assert_eq!(
            NITROGEN.dose(NitrogenBracket::Low, ClimateCategory::HotDry, class(7)),
            Some(197.8)
        );
        assert_eq!(
            PHOSPHORUS.dose(PhosphorusBracket::High, ClimateCategory::HotDry, class(4)),
            Some(18.4)
        );
        assert_eq!(
            POTASSIUM.dose(PotassiumBracket::Medium, ClimateCategory::HotDry, class(6)),
            Some(95.0)
        );
        assert_eq!(
            POTASSIUM.dose(PotassiumBracket::High, ClimateCategory::Cold, class(7)),
            Some(70.0)
        );
    }

    #[test]
    fn test_doses_decrease_with_soil_supply() {
        for climate in ClimateCategory::ALL {
            for yield_class in YieldClass::ALL {
                let low = NITROGEN.dose(NitrogenBracket::Low, climate, yield_class);
                let high = NITROGEN.dose(NitrogenBracket::High, climate, yield_class);
                assert!(low > high, "{climate} / {yield_class}");
            }
        }
    }

    #[test]
    fn test_validate_detects_missing_row() {
        const PARTIAL: &[DoseRow<PotassiumBracket>] = &[row(
            PotassiumBracket::Low,
            ClimateCategory::Cold,
            [1.0, 2.0, 3.0, 4.0, 5.0],
        )];
        let table = NutrientTable::new(Nutrient::Potassium, PARTIAL);
        assert!(matches!(table.validate(), Err(CalcError::Configuration(_))));
    }

    #[test]
    fn test_validate_detects_negative_dose() {
        let rows: Vec<DoseRow<NitrogenBracket>> = NITROGEN
            .rows()
            .iter()
            .map(|r| DoseRow {
                doses: [-1.0; 5],
                ..*r
            })
            .collect();
        let table = NutrientTable::new(Nutrient::Nitrogen, Vec::leak(rows));
        assert!(matches!(table.validate(), Err(CalcError::Configuration(_))));
    }
}

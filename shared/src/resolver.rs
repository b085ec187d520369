//! Recommendation resolution
//!
//! Picks the soil bracket for each nutrient, snaps the target yield to the
//! nearest yield class and reads the three doses from the tables.

use std::collections::HashMap;

use crate::error::{CalcError, CalcResult};
use crate::models::{
    ClimateCategory, NitrogenBracket, PhosphorusBracket, PotassiumBracket, Recommendation,
    Resolution, ResolutionBasis, SoilBracket, YieldClass,
};
use crate::tables::{NITROGEN, PHOSPHORUS, POTASSIUM};
use crate::types::SoilTestInput;

/// Resolve the recommended N, P2O5 and K2O doses
pub fn resolve(
    climate: &str,
    yield_value: f64,
    organic_carbon: f64,
    phosphorus: f64,
    potassium: f64,
) -> CalcResult<Recommendation> {
    resolve_detailed(climate, yield_value, organic_carbon, phosphorus, potassium)
        .map(|resolution| resolution.recommendation)
}

/// Resolve doses and report the table keys they were read from
pub fn resolve_detailed(
    climate: &str,
    yield_value: f64,
    organic_carbon: f64,
    phosphorus: f64,
    potassium: f64,
) -> CalcResult<Resolution> {
    let climate = climate.parse::<ClimateCategory>()?;
    resolve_for(climate, yield_value, organic_carbon, phosphorus, potassium)
}

fn resolve_for(
    climate: ClimateCategory,
    yield_value: f64,
    organic_carbon: f64,
    phosphorus: f64,
    potassium: f64,
) -> CalcResult<Resolution> {
    for (field, value) in [
        ("yield", yield_value),
        ("organicCarbon", organic_carbon),
        ("phosphorus", phosphorus),
        ("potassium", potassium),
    ] {
        if !value.is_finite() {
            return Err(CalcError::MissingField { field });
        }
    }

    let nitrogen_bracket = NitrogenBracket::classify(organic_carbon);
    let phosphorus_bracket = PhosphorusBracket::classify(phosphorus);
    let potassium_bracket = PotassiumBracket::classify(potassium);

    if !NITROGEN.has_climate(nitrogen_bracket, climate)
        || !PHOSPHORUS.has_climate(phosphorus_bracket, climate)
        || !POTASSIUM.has_climate(potassium_bracket, climate)
    {
        return Err(CalcError::InvalidClimate(climate.to_string()));
    }

    let yield_class = YieldClass::nearest(yield_value);

    let doses = (
        NITROGEN.dose(nitrogen_bracket, climate, yield_class),
        PHOSPHORUS.dose(phosphorus_bracket, climate, yield_class),
        POTASSIUM.dose(potassium_bracket, climate, yield_class),
    );
    let (Some(recommended_n), Some(recommended_p2o5), Some(recommended_k2o)) = doses else {
        return Err(CalcError::ResolutionFailure(format!(
            "no dose for yield value {}",
            yield_value
        )));
    };

    Ok(Resolution {
        basis: ResolutionBasis {
            climate,
            yield_class,
            nitrogen_bracket,
            phosphorus_bracket,
            potassium_bracket,
        },
        recommendation: Recommendation {
            recommended_n,
            recommended_p2o5,
            recommended_k2o,
        },
    })
}

/// Exact-match cache key; floats are compared by bit pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    climate: ClimateCategory,
    yield_bits: u64,
    organic_carbon_bits: u64,
    phosphorus_bits: u64,
    potassium_bits: u64,
}

impl ResolutionKey {
    pub fn new(
        climate: ClimateCategory,
        yield_value: f64,
        organic_carbon: f64,
        phosphorus: f64,
        potassium: f64,
    ) -> Self {
        Self {
            climate,
            yield_bits: yield_value.to_bits(),
            organic_carbon_bits: organic_carbon.to_bits(),
            phosphorus_bits: phosphorus.to_bits(),
            potassium_bits: potassium.to_bits(),
        }
    }
}

/// Resolver with an optional memo of previous resolutions.
///
/// The input domain is tiny so entries are never evicted. Only successful
/// resolutions are stored.
#[derive(Debug, Default)]
pub struct RecommendationResolver {
    cache: Option<HashMap<ResolutionKey, Resolution>>,
}

impl RecommendationResolver {
    pub fn new(cache_enabled: bool) -> Self {
        Self {
            cache: cache_enabled.then(HashMap::new),
        }
    }

    pub fn cached() -> Self {
        Self::new(true)
    }

    pub fn uncached() -> Self {
        Self::new(false)
    }

    pub fn resolve(&mut self, input: &SoilTestInput) -> CalcResult<Resolution> {
        let climate = input.climate.parse::<ClimateCategory>()?;
        let key = ResolutionKey::new(
            climate,
            input.yield_value,
            input.organic_carbon,
            input.phosphorus,
            input.potassium,
        );

        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            return Ok(*hit);
        }

        let resolution = resolve_for(
            climate,
            input.yield_value,
            input.organic_carbon,
            input.phosphorus,
            input.potassium,
        )?;

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(key, resolution);
        }
        Ok(resolution)
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, HashMap::len)
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

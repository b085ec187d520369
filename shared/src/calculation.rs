//! The complete calculation: validate, resolve, allocate

use serde::Serialize;

use crate::allocation::allocate;
use crate::error::CalcResult;
use crate::models::{FertilizerAmounts, FertilizerSelection, Recommendation, ResolutionBasis};
use crate::resolver::RecommendationResolver;
use crate::store::FormStore;
use crate::types::RawSoilInput;
use crate::validation::{validate_inputs, validate_percentage_shares};

/// Result of one calculation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub recommendation: Recommendation,
    pub amounts: FertilizerAmounts,
    pub basis: ResolutionBasis,
}

/// Run the pipeline; any failure aborts with no partial result
pub fn calculate(
    raw: &RawSoilInput,
    selection: &FertilizerSelection,
    resolver: &mut RecommendationResolver,
) -> CalcResult<Calculation> {
    let input = validate_inputs(raw)?;
    validate_percentage_shares(selection)?;
    let resolution = resolver.resolve(&input)?;
    let amounts = allocate(&resolution.recommendation, selection)?;

    Ok(Calculation {
        recommendation: resolution.recommendation,
        amounts,
        basis: resolution.basis,
    })
}

/// Read both forms from the store and run the pipeline
pub fn calculate_from_store(
    store: &impl FormStore,
    resolver: &mut RecommendationResolver,
) -> CalcResult<Calculation> {
    let raw = RawSoilInput::from_store(store);
    let selection = FertilizerSelection::from_store(store);
    calculate(&raw, &selection, resolver)
}

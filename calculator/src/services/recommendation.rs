//! Recommendation service
//!
//! Reads the form store once per request, runs the shared pipeline and turns
//! the result into a [`RecommendationReport`].

use shared::{
    calculate, oversupplied_products, tables, validate_fertilizer_percentages,
    FertilizerSelection, FormStore, MemoryStore, RawSoilInput, RecommendationResolver,
};
use uuid::Uuid;

use crate::config::CalculatorConfig;
use crate::error::AppResult;
use crate::report::RecommendationReport;

/// Service running fertilizer calculations against a form store
#[derive(Debug)]
pub struct RecommendationService {
    resolver: RecommendationResolver,
    decimal_places: u32,
}

impl RecommendationService {
    /// Build the service, refusing to start on an incomplete lookup table
    pub fn new(config: &CalculatorConfig) -> AppResult<Self> {
        tables::validate_all()?;
        tracing::info!(
            cache_enabled = config.cache_enabled,
            decimal_places = config.decimal_places,
            "Recommendation tables validated"
        );

        Ok(Self {
            resolver: RecommendationResolver::new(config.cache_enabled),
            decimal_places: config.decimal_places,
        })
    }

    /// Store the soil and climate form
    pub fn save_soil_input(&self, store: &mut impl FormStore, input: &RawSoilInput) {
        input.write_to_store(store);
        tracing::debug!(?input, "Soil input saved");
    }

    /// Store the fertilizer form after checking the percentage split.
    ///
    /// The store is left untouched when the split exceeds 100% so the form can
    /// be corrected.
    pub fn submit_fertilizer_form(
        &self,
        store: &mut impl FormStore,
        selection: &FertilizerSelection,
    ) -> AppResult<()> {
        validate_fertilizer_percentages(selection)?;
        selection.write_to_store(store);
        tracing::debug!(?selection, "Fertilizer selection saved");
        Ok(())
    }

    /// Calculate recommendations and product amounts from the stored forms
    pub fn calculate(&mut self, store: &impl FormStore) -> AppResult<RecommendationReport> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("calculate", %request_id);
        let _guard = span.enter();

        let raw = RawSoilInput::from_store(store);
        let selection = FertilizerSelection::from_store(store);
        tracing::debug!(?raw, "Input values");

        let calculation = calculate(&raw, &selection, &mut self.resolver)?;
        tracing::debug!(
            recommendation = ?calculation.recommendation,
            yield_class = %calculation.basis.yield_class,
            "Calculated recommendations"
        );

        let oversupplied = oversupplied_products(&calculation.amounts);
        if !oversupplied.is_empty() {
            tracing::warn!(
                ?oversupplied,
                "Compound fertilizers exceed the recommended dose"
            );
        }

        RecommendationReport::new(request_id, &calculation, self.decimal_places)
    }

    /// Calculate from a JSON snapshot of the store
    pub fn calculate_snapshot(&mut self, snapshot_json: &str) -> AppResult<RecommendationReport> {
        let store = MemoryStore::from_json(snapshot_json)?;
        self.calculate(&store)
    }

    /// Forget every stored form value
    pub fn start_over(&self, store: &mut impl FormStore) {
        store.clear();
        tracing::info!("Form store cleared");
    }

    pub fn cached_resolutions(&self) -> usize {
        self.resolver.cached_entries()
    }
}

//! WebAssembly module for the wheat fertilizer calculator
//!
//! Provides client-side computation for:
//! - Nutrient recommendations and product amounts from the form store
//! - The fertilizer percentage check run before the form is stored
//! - Soil bracket and yield class lookups for the input pages
//!
//! The browser passes its form store as a flat JSON object of strings.

use std::cell::RefCell;

use serde::Serialize;
use shared::{
    calculate, ClimateCategory, FertilizerProduct, FertilizerSelection, MemoryStore,
    NitrogenBracket, PhosphorusBracket, PotassiumBracket, RawSoilInput, RecommendationResolver,
    SoilBracket, YieldClass,
};
use wasm_bindgen::prelude::*;

thread_local! {
    // Lives for the page; identical inputs resolve once.
    static RESOLVER: RefCell<RecommendationResolver> =
        RefCell::new(RecommendationResolver::cached());
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Calculate recommendations and fertilizer amounts from the form store.
///
/// Returns `{recommendation, amounts, basis}` as JSON.
#[wasm_bindgen]
pub fn calculate_recommendations(store_json: &str) -> Result<String, JsValue> {
    calculate_from_snapshot(store_json).map_err(|e| JsValue::from_str(&e))
}

/// Check that straight products sharing a nutrient do not exceed 100%
#[wasm_bindgen]
pub fn validate_fertilizer_percentages(store_json: &str) -> Result<(), JsValue> {
    check_percentages(store_json).map_err(|e| JsValue::from_str(&e))
}

/// Yield class (3-7) nearest to the target yield in t/ha
#[wasm_bindgen]
pub fn nearest_yield_class(yield_value: f64) -> u8 {
    YieldClass::nearest(yield_value).value()
}

#[wasm_bindgen]
pub fn classify_nitrogen_bracket(organic_carbon: f64) -> String {
    NitrogenBracket::classify(organic_carbon).label().to_string()
}

#[wasm_bindgen]
pub fn classify_phosphorus_bracket(phosphorus: f64) -> String {
    PhosphorusBracket::classify(phosphorus).label().to_string()
}

#[wasm_bindgen]
pub fn classify_potassium_bracket(potassium: f64) -> String {
    PotassiumBracket::classify(potassium).label().to_string()
}

/// Climate values accepted by the soil form
#[wasm_bindgen]
pub fn climate_options() -> js_sys::Array {
    ClimateCategory::ALL
        .iter()
        .map(|climate| JsValue::from_str(climate.as_str()))
        .collect()
}

/// Product catalog as `{id, name, nutrient}` JSON objects, compounds first
#[wasm_bindgen]
pub fn fertilizer_catalog() -> js_sys::Array {
    catalog_entries()
        .iter()
        .filter_map(|entry| serde_json::to_string(entry).ok())
        .filter_map(|json| js_sys::JSON::parse(&json).ok())
        .collect()
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    /// `None` for compound products
    nutrient: Option<&'static str>,
}

fn catalog_entries() -> Vec<CatalogEntry> {
    FertilizerProduct::ALL
        .iter()
        .map(|product| CatalogEntry {
            id: product.id(),
            name: product.display_name(),
            nutrient: match product.category() {
                shared::FertilizerCategory::Compound => None,
                shared::FertilizerCategory::Straight(nutrient) => Some(nutrient.name()),
            },
        })
        .collect()
}

fn read_store(store_json: &str) -> Result<MemoryStore, String> {
    MemoryStore::from_json(store_json).map_err(|e| format!("Invalid store JSON: {}", e))
}

fn calculate_from_snapshot(store_json: &str) -> Result<String, String> {
    let store = read_store(store_json)?;
    let raw = RawSoilInput::from_store(&store);
    let selection = FertilizerSelection::from_store(&store);
    console_log(&format!("Input values: {:?}", raw));

    let calculation = RESOLVER
        .with(|resolver| calculate(&raw, &selection, &mut resolver.borrow_mut()))
        .map_err(|e| e.to_string())?;
    console_log(&format!(
        "Calculated recommendations: {:?}",
        calculation.recommendation
    ));

    serde_json::to_string(&calculation).map_err(|e| e.to_string())
}

fn check_percentages(store_json: &str) -> Result<(), String> {
    let store = read_store(store_json)?;
    let selection = FertilizerSelection::from_store(&store);
    shared::validate_fertilizer_percentages(&selection).map_err(|e| e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn console_log(_message: &str) {}

//! Key-value form store boundary
//!
//! The browser keeps every form field in a flat string-to-string store. The
//! pipeline never reads it directly: the store is read once at the start of a
//! request into [`RawSoilInput`] and [`FertilizerSelection`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::allocation::effective_share;
use crate::models::{FertilizerCategory, FertilizerProduct, FertilizerSelection, SelectionEntry};
use crate::types::RawSoilInput;
use crate::validation::parse_number;

/// Store keys for the soil and climate form
pub mod keys {
    pub const CLIMATE: &str = "climate";
    pub const YIELD: &str = "yield";
    pub const ORGANIC_CARBON: &str = "organicCarbon";
    pub const PHOSPHORUS: &str = "phosphorus";
    pub const POTASSIUM: &str = "potassium";

    /// Value marking a product as selected
    pub const SELECTED: &str = "true";

    pub fn amount(product_id: &str) -> String {
        format!("{}Amount", product_id)
    }

    pub fn percentage(product_id: &str) -> String {
        format!("{}Percentage", product_id)
    }
}

/// Minimal string key-value store
pub trait FormStore {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
    fn clear(&mut self);
}

/// In-memory store, serialized as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FormStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl RawSoilInput {
    /// Read the soil and climate fields
    pub fn from_store(store: &impl FormStore) -> Self {
        let read = |key: &str| store.get(key).map(str::to_string);
        Self {
            climate: read(keys::CLIMATE),
            yield_value: read(keys::YIELD),
            organic_carbon: read(keys::ORGANIC_CARBON),
            phosphorus: read(keys::PHOSPHORUS),
            potassium: read(keys::POTASSIUM),
        }
    }

    pub fn write_to_store(&self, store: &mut impl FormStore) {
        let fields = [
            (keys::CLIMATE, &self.climate),
            (keys::YIELD, &self.yield_value),
            (keys::ORGANIC_CARBON, &self.organic_carbon),
            (keys::PHOSPHORUS, &self.phosphorus),
            (keys::POTASSIUM, &self.potassium),
        ];
        for (key, value) in fields {
            match value {
                Some(value) => store.set(key, value.clone()),
                None => store.remove(key),
            }
        }
    }
}

impl FertilizerSelection {
    /// Read every product flagged `"true"` along with its amount/percentage.
    /// Unparseable numbers are read as absent.
    pub fn from_store(store: &impl FormStore) -> Self {
        let mut selection = FertilizerSelection::new();
        for product in FertilizerProduct::ALL {
            let id = product.id();
            if store.get(id) != Some(keys::SELECTED) {
                continue;
            }
            selection.select(
                product,
                SelectionEntry {
                    amount: parse_number(store.get(&keys::amount(id))),
                    percentage: parse_number(store.get(&keys::percentage(id))),
                },
            );
        }
        selection
    }

    /// Record the selection the way the fertilizer form does on submit.
    ///
    /// Keys of every catalog product are cleared first so a product dropped
    /// from the selection does not linger. Straight products without an
    /// entered share are stored at their effective share: 100% when alone
    /// for their nutrient, 0% otherwise.
    pub fn write_to_store(&self, store: &mut impl FormStore) {
        for product in FertilizerProduct::ALL {
            let id = product.id();
            store.remove(id);
            store.remove(&keys::amount(id));
            store.remove(&keys::percentage(id));
        }

        for (product, entry) in self.iter() {
            let id = product.id();
            store.set(id, keys::SELECTED.to_string());
            match product.category() {
                FertilizerCategory::Compound => {
                    if let Some(amount) = entry.amount {
                        store.set(&keys::amount(id), amount.to_string());
                    }
                }
                FertilizerCategory::Straight(nutrient) => {
                    let co_selected = self.straights_for(nutrient).len();
                    let percentage = effective_share(entry, co_selected);
                    store.set(&keys::percentage(id), percentage.to_string());
                }
            }
        }
    }
}

//! Fertilizer products chosen on the form

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FertilizerProduct, Nutrient};

/// Values entered for one selected product
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// Application amount in kg/ha (compound products)
    pub amount: Option<f64>,
    /// Share of the remaining nutrient, 0 to 100 (straight products)
    pub percentage: Option<f64>,
}

/// The set of selected products; a product is selected iff it has an entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FertilizerSelection {
    entries: BTreeMap<FertilizerProduct, SelectionEntry>,
}

impl FertilizerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FertilizerSelection::select_compound`]
    pub fn with_compound(mut self, product: FertilizerProduct, amount: f64) -> Self {
        self.select_compound(product, amount);
        self
    }

    /// Builder form of [`FertilizerSelection::select_straight`]
    pub fn with_straight(mut self, product: FertilizerProduct, percentage: Option<f64>) -> Self {
        self.select_straight(product, percentage);
        self
    }

    pub fn select_compound(&mut self, product: FertilizerProduct, amount: f64) {
        self.entries.insert(
            product,
            SelectionEntry {
                amount: Some(amount),
                percentage: None,
            },
        );
    }

    pub fn select_straight(&mut self, product: FertilizerProduct, percentage: Option<f64>) {
        self.entries.insert(
            product,
            SelectionEntry {
                amount: None,
                percentage,
            },
        );
    }

    pub fn select(&mut self, product: FertilizerProduct, entry: SelectionEntry) {
        self.entries.insert(product, entry);
    }

    pub fn deselect(&mut self, product: FertilizerProduct) {
        self.entries.remove(&product);
    }

    pub fn is_selected(&self, product: FertilizerProduct) -> bool {
        self.entries.contains_key(&product)
    }

    pub fn entry(&self, product: FertilizerProduct) -> Option<&SelectionEntry> {
        self.entries.get(&product)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FertilizerProduct, &SelectionEntry)> + '_ {
        self.entries.iter().map(|(product, entry)| (*product, entry))
    }

    /// Selected compound products in catalog order
    pub fn compounds(&self) -> Vec<(FertilizerProduct, SelectionEntry)> {
        FertilizerProduct::compounds()
            .filter_map(|product| self.entry(product).map(|entry| (product, *entry)))
            .collect()
    }

    /// Selected straight products for one nutrient in catalog order
    pub fn straights_for(&self, nutrient: Nutrient) -> Vec<(FertilizerProduct, SelectionEntry)> {
        FertilizerProduct::straights_for(nutrient)
            .filter_map(|product| self.entry(product).map(|entry| (product, *entry)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use serde::{Deserialize, Serialize};

use super::buyers::domain::BuyerId;

/// Buyers an advisor marked as saved within one project. Adds are
/// idempotent; iteration follows insertion order for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedBuyerSet {
    ids: Vec<BuyerId>,
}

impl SavedBuyerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// No-op when the id is already present.
    pub fn add(&mut self, id: BuyerId) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: &BuyerId) {
        self.ids.retain(|existing| existing != id);
    }

    pub fn contains(&self, id: &BuyerId) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuyerId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::super::criteria::MatchCriterion;
use super::super::domain::BuyerId;

/// Per-criterion assessment produced by the scoring backend: a sub-score in
/// 0..=100 plus the advisor-facing explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionRationale {
    pub score: u8,
    pub summary: String,
}

/// Lookup capability for per-criterion rationale scores. The weighting math
/// in [`super::ScoringEngine`] only sees this trait, so a model-backed
/// service can replace the static table without touching the engine.
pub trait RationaleScoreProvider: Send + Sync {
    fn rationale(&self, buyer: &BuyerId, criterion: MatchCriterion) -> Option<CriterionRationale>;
}

/// Table-backed provider covering the mock rationale data shipped with the
/// buyer directory.
#[derive(Debug, Default, Clone)]
pub struct StaticRationaleProvider {
    entries: HashMap<(BuyerId, MatchCriterion), CriterionRationale>,
}

impl StaticRationaleProvider {
    pub fn insert(
        &mut self,
        buyer: BuyerId,
        criterion: MatchCriterion,
        rationale: CriterionRationale,
    ) {
        self.entries.insert((buyer, criterion), rationale);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RationaleScoreProvider for StaticRationaleProvider {
    fn rationale(&self, buyer: &BuyerId, criterion: MatchCriterion) -> Option<CriterionRationale> {
        self.entries.get(&(buyer.clone(), criterion)).cloned()
    }
}

mod config;
mod rationale;

pub use config::{ScoringConfig, ValidationError};
pub use rationale::{CriterionRationale, RationaleScoreProvider, StaticRationaleProvider};

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::criteria::MatchCriterion;
use super::domain::BuyerRecord;

/// Weighted contribution recorded per enabled criterion so advisors can
/// audit how a composite score came together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion: MatchCriterion,
    pub weight: u8,
    pub score: u8,
    pub summary: String,
}

/// A buyer together with its computed composite score and scoring trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBuyer {
    pub buyer: BuyerRecord,
    pub composite_score: u8,
    pub breakdown: Vec<CriterionContribution>,
}

impl ScoredBuyer {
    /// Ranking order: composite descending, then the buyer's baseline score
    /// descending, then name ascending. Total and deterministic so repeated
    /// passes over the same records produce identical orderings.
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .composite_score
            .cmp(&self.composite_score)
            .then_with(|| other.buyer.baseline_score.cmp(&self.buyer.baseline_score))
            .then_with(|| self.buyer.name.cmp(&other.buyer.name))
    }
}

/// Stateless engine applying the weighted rubric to buyer records. Pure:
/// scoring derives a new [`ScoredBuyer`] and never mutates its input.
pub struct ScoringEngine {
    config: ScoringConfig,
    rationales: Arc<dyn RationaleScoreProvider>,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, rationales: Arc<dyn RationaleScoreProvider>) -> Self {
        Self { config, rationales }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Composite = Σ(weight × sub-score) / Σ(weight) over enabled criteria,
    /// rounded to the nearest integer percentage. With no enabled criteria
    /// (or every enabled weight zero) there is nothing to average, so the
    /// buyer's baseline score stands in.
    pub fn score(&self, buyer: &BuyerRecord) -> ScoredBuyer {
        let mut breakdown = Vec::new();
        let mut weighted_sum: u32 = 0;
        let mut weight_total: u32 = 0;

        for (criterion, weight) in self.config.enabled_criteria() {
            let (score, summary) = match self.rationales.rationale(&buyer.id, criterion) {
                Some(rationale) => (rationale.score.min(100), rationale.summary),
                None => (
                    buyer.baseline_score.min(100),
                    "no rationale on file; baseline score applied".to_string(),
                ),
            };

            weighted_sum += u32::from(weight) * u32::from(score);
            weight_total += u32::from(weight);
            breakdown.push(CriterionContribution {
                criterion,
                weight,
                score,
                summary,
            });
        }

        let composite_score = if weight_total == 0 {
            buyer.baseline_score.min(100)
        } else {
            ((weighted_sum + weight_total / 2) / weight_total) as u8
        };

        ScoredBuyer {
            buyer: buyer.clone(),
            composite_score,
            breakdown,
        }
    }

    pub fn score_all(&self, buyers: &[BuyerRecord]) -> Vec<ScoredBuyer> {
        buyers.iter().map(|buyer| self.score(buyer)).collect()
    }
}

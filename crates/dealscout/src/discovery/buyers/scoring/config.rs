use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::criteria::{CriterionSetting, MatchCriterion};

/// Validation errors raised at the configuration mutation boundary. The
/// scoring and filtering hot paths assume configs passed this gate.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("weight {weight} for criterion '{}' is outside 0..=100", .criterion.id())]
    WeightOutOfRange {
        criterion: MatchCriterion,
        weight: u8,
    },
    #[error("unknown criterion id '{0}'")]
    UnknownCriterion(String),
    #[error("range lower bound {min} exceeds upper bound {max}")]
    InvalidRange { min: u64, max: u64 },
}

/// Per-project weighting of the match criteria. Created with registry
/// defaults, mutated only through the validated setters, never deleted
/// (reset restores defaults).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringConfig {
    criteria: BTreeMap<MatchCriterion, CriterionSetting>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            criteria: MatchCriterion::ALL
                .into_iter()
                .map(|criterion| (criterion, CriterionSetting::default()))
                .collect(),
        }
    }
}

impl ScoringConfig {
    /// Current setting for a criterion; criteria absent from the stored map
    /// (e.g. a partial wire payload) read as the registry default.
    pub fn setting(&self, criterion: MatchCriterion) -> CriterionSetting {
        self.criteria.get(&criterion).copied().unwrap_or_default()
    }

    pub fn set_enabled(&mut self, criterion: MatchCriterion, enabled: bool) {
        let mut setting = self.setting(criterion);
        setting.enabled = enabled;
        self.criteria.insert(criterion, setting);
    }

    pub fn set_weight(
        &mut self,
        criterion: MatchCriterion,
        weight: u8,
    ) -> Result<(), ValidationError> {
        if weight > 100 {
            return Err(ValidationError::WeightOutOfRange { criterion, weight });
        }
        let mut setting = self.setting(criterion);
        setting.weight = weight;
        self.criteria.insert(criterion, setting);
        Ok(())
    }

    /// Restore registry defaults for every criterion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check a config that arrived from outside the setter API (wire
    /// payloads deserialize unchecked).
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (&criterion, setting) in &self.criteria {
            if setting.weight > 100 {
                return Err(ValidationError::WeightOutOfRange {
                    criterion,
                    weight: setting.weight,
                });
            }
        }
        Ok(())
    }

    /// Enabled criteria with their weights, in catalogue order.
    pub fn enabled_criteria(&self) -> impl Iterator<Item = (MatchCriterion, u8)> + '_ {
        MatchCriterion::ALL.into_iter().filter_map(|criterion| {
            let setting = self.setting(criterion);
            setting.enabled.then_some((criterion, setting.weight))
        })
    }
}

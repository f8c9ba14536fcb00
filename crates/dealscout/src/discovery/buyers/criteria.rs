use serde::{Deserialize, Serialize};

/// Dimensions a buyer can be scored on. The catalogue is fixed; per-project
/// weighting lives in [`super::scoring::ScoringConfig`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchCriterion {
    Offering,
    ProblemSolved,
    UseCase,
    CustomerBase,
    Positioning,
    AcquisitionHistory,
}

/// Default weight assigned to every criterion in a fresh configuration.
pub const DEFAULT_WEIGHT: u8 = 100;

impl MatchCriterion {
    pub const ALL: [MatchCriterion; 6] = [
        MatchCriterion::Offering,
        MatchCriterion::ProblemSolved,
        MatchCriterion::UseCase,
        MatchCriterion::CustomerBase,
        MatchCriterion::Positioning,
        MatchCriterion::AcquisitionHistory,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MatchCriterion::Offering => "Offering",
            MatchCriterion::ProblemSolved => "Problem solved",
            MatchCriterion::UseCase => "Use case",
            MatchCriterion::CustomerBase => "Customer base",
            MatchCriterion::Positioning => "Positioning",
            MatchCriterion::AcquisitionHistory => "Acquisition history",
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            MatchCriterion::Offering => "offering",
            MatchCriterion::ProblemSolved => "problem_solved",
            MatchCriterion::UseCase => "use_case",
            MatchCriterion::CustomerBase => "customer_base",
            MatchCriterion::Positioning => "positioning",
            MatchCriterion::AcquisitionHistory => "acquisition_history",
        }
    }

    /// Resolve a criterion from its wire id.
    pub fn from_id(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|criterion| criterion.id() == value.trim())
    }
}

/// Per-criterion dial stored in a scoring configuration. A disabled
/// criterion contributes nothing regardless of its stored weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSetting {
    pub enabled: bool,
    pub weight: u8,
}

impl Default for CriterionSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: DEFAULT_WEIGHT,
        }
    }
}

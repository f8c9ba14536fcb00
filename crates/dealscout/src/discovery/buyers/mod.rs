//! Candidate buyer domain: records, the criterion registry, scoring,
//! keyword queries, the filter pipeline, and the discovery facade.

pub mod criteria;
pub mod directory;
pub mod domain;
pub mod filters;
pub mod query;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use criteria::{CriterionSetting, MatchCriterion, DEFAULT_WEIGHT};
pub use directory::{BuyerDirectory, DirectoryError};
pub use domain::{BuyerId, BuyerKind, BuyerProfile, BuyerRecord, ProjectId, TrackRecordLevel};
pub use filters::{FilterState, NumericRange, SortKey};
pub use query::{BooleanQuery, ClauseField, ClauseOperator, KeywordClause};
pub use router::discovery_router;
pub use scoring::{
    CriterionContribution, CriterionRationale, RationaleScoreProvider, ScoredBuyer, ScoringConfig,
    ScoringEngine, StaticRationaleProvider, ValidationError,
};
pub use service::{BuyerDiscoveryService, DiscoveryRequest, DiscoveryServiceError};

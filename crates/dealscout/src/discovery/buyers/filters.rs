use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::query::BooleanQuery;
use super::scoring::{ScoredBuyer, ValidationError};

/// Inclusive lower bound with an optional inclusive upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: u64,
    pub max: Option<u64>,
}

impl NumericRange {
    pub fn at_least(min: u64) -> Self {
        Self { min, max: None }
    }

    pub fn bounded(min: u64, max: u64) -> Result<Self, ValidationError> {
        if max < min {
            return Err(ValidationError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max: Some(max),
        })
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self.max {
            Some(max) if max < self.min => Err(ValidationError::InvalidRange { min: self.min, max }),
            _ => Ok(()),
        }
    }
}

/// Orderings the advisor can request for the result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    BestMatch,
    NameAsc,
    NameDesc,
}

/// Structured filters for one (project, tab) pair. `Default` is the
/// all-unset state: every stage passes everything through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub hq_countries: BTreeSet<String>,
    pub employee_range: Option<NumericRange>,
    pub revenue_range: Option<NumericRange>,
    pub cash_range: Option<NumericRange>,
    pub min_match_score: u8,
    pub sponsor_backed: Option<bool>,
    pub is_public: Option<bool>,
    pub sort_key: SortKey,
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check filters that arrived from outside the typed constructors.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for range in [&self.employee_range, &self.revenue_range, &self.cash_range]
            .into_iter()
            .flatten()
        {
            range.validate()?;
        }
        Ok(())
    }
}

/// Apply the filter stages in their fixed order, then the keyword query,
/// then the requested sort. Returns a new ordered view — possibly empty,
/// never a missing value — and leaves the inputs untouched.
pub fn apply(
    buyers: &[ScoredBuyer],
    filters: &FilterState,
    query: &BooleanQuery,
) -> Vec<ScoredBuyer> {
    let mut survivors: Vec<ScoredBuyer> = buyers
        .iter()
        .filter(|scored| passes(scored, filters, query))
        .cloned()
        .collect();

    match filters.sort_key {
        SortKey::BestMatch => survivors.sort_by(|a, b| a.ranking_cmp(b)),
        SortKey::NameAsc => survivors.sort_by(|a, b| a.buyer.name.cmp(&b.buyer.name)),
        SortKey::NameDesc => survivors.sort_by(|a, b| b.buyer.name.cmp(&a.buyer.name)),
    }

    survivors
}

fn passes(scored: &ScoredBuyer, filters: &FilterState, query: &BooleanQuery) -> bool {
    let buyer = &scored.buyer;

    if !filters.hq_countries.is_empty()
        && !filters.hq_countries.contains(&buyer.headquarters_country)
    {
        return false;
    }

    // missing numeric fields read as zero, never as "match everything"
    if let Some(range) = &filters.employee_range {
        if !range.contains(buyer.employee_count.unwrap_or(0)) {
            return false;
        }
    }
    if let Some(range) = &filters.revenue_range {
        if !range.contains(buyer.annual_revenue_usd.unwrap_or(0)) {
            return false;
        }
    }
    if let Some(range) = &filters.cash_range {
        if !range.contains(buyer.cash_reserves_usd.unwrap_or(0)) {
            return false;
        }
    }

    if scored.composite_score < filters.min_match_score {
        return false;
    }

    if let Some(expected) = filters.sponsor_backed {
        if buyer.is_sponsor_backed != expected {
            return false;
        }
    }
    if let Some(expected) = filters.is_public {
        if buyer.is_public != expected {
            return false;
        }
    }

    query.matches(buyer)
}

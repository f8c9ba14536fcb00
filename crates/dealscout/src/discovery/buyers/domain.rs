use serde::{Deserialize, Serialize};

/// Identifier wrapper for buyer records surfaced by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuyerId(pub String);

/// Identifier for one sell-side engagement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// The two candidate universes advisors browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuyerKind {
    Strategic,
    FinancialSponsor,
}

impl BuyerKind {
    pub const fn label(self) -> &'static str {
        match self {
            BuyerKind::Strategic => "strategic",
            BuyerKind::FinancialSponsor => "financial-sponsor",
        }
    }
}

/// Kind-specific payload. Scoring and filtering only read the shared fields
/// on [`BuyerRecord`]; these extras exist for rendering collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BuyerProfile {
    Strategic {
        ticker: Option<String>,
        parent_company: Option<String>,
    },
    FinancialSponsor {
        fund_size_usd: Option<u64>,
        dry_powder_usd: Option<u64>,
        portfolio_count: u32,
    },
}

impl BuyerProfile {
    pub const fn kind(&self) -> BuyerKind {
        match self {
            BuyerProfile::Strategic { .. } => BuyerKind::Strategic,
            BuyerProfile::FinancialSponsor { .. } => BuyerKind::FinancialSponsor,
        }
    }
}

/// Coarse signal of how practiced an acquirer is at closing deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackRecordLevel {
    Low,
    Medium,
    High,
}

impl TrackRecordLevel {
    pub const fn label(self) -> &'static str {
        match self {
            TrackRecordLevel::Low => "low",
            TrackRecordLevel::Medium => "medium",
            TrackRecordLevel::High => "high",
        }
    }
}

/// Immutable candidate acquirer, loaded once per session from the buyer
/// directory. The engine derives scored and filtered views from these
/// records and never writes back to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyerRecord {
    pub id: BuyerId,
    pub name: String,
    pub profile: BuyerProfile,
    pub headquarters_country: String,
    pub employee_count: Option<u64>,
    pub annual_revenue_usd: Option<u64>,
    pub cash_reserves_usd: Option<u64>,
    pub is_public: bool,
    pub is_sponsor_backed: bool,
    pub ma_track_record: TrackRecordLevel,
    /// Overall fit supplied by the upstream source, 0..=100. Used as the
    /// fallback when no per-criterion rationale exists and as the ranking
    /// tie-breaker.
    pub baseline_score: u8,
    pub offering_text: String,
    pub sector_text: String,
    pub customer_text: String,
    pub keyword_tags: Vec<String>,
}

impl BuyerRecord {
    pub fn kind(&self) -> BuyerKind {
        self.profile.kind()
    }
}

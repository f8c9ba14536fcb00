use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::discovery::buyers::directory::{BuyerDirectory, DirectoryError};
use crate::discovery::buyers::domain::{
    BuyerId, BuyerKind, BuyerProfile, BuyerRecord, ProjectId, TrackRecordLevel,
};
use crate::discovery::buyers::scoring::{
    CriterionRationale, ScoredBuyer, ScoringConfig, ScoringEngine, StaticRationaleProvider,
};
use crate::discovery::buyers::service::BuyerDiscoveryService;
use crate::discovery::buyers::MatchCriterion;
use crate::discovery::searches::{
    RepositoryError, SavedSearchRecord, SavedSearchRepository, SavedSearchSummary, SearchId,
};

pub(super) fn nimbus() -> BuyerRecord {
    BuyerRecord {
        id: BuyerId("buyer-nimbus".to_string()),
        name: "Nimbus Analytics".to_string(),
        profile: BuyerProfile::Strategic {
            ticker: Some("NMBS".to_string()),
            parent_company: None,
        },
        headquarters_country: "United States".to_string(),
        employee_count: Some(1_200),
        annual_revenue_usd: Some(95_000_000),
        cash_reserves_usd: Some(30_000_000),
        is_public: true,
        is_sponsor_backed: false,
        ma_track_record: TrackRecordLevel::High,
        baseline_score: 84,
        offering_text: "Enterprise cloud SaaS platform for revenue teams".to_string(),
        sector_text: "Healthcare, Financial Services".to_string(),
        customer_text: "Mid-market and enterprise revenue operations teams".to_string(),
        keyword_tags: vec![
            "cloud".to_string(),
            "saas".to_string(),
            "analytics".to_string(),
        ],
    }
}

pub(super) fn ironside() -> BuyerRecord {
    BuyerRecord {
        id: BuyerId("buyer-ironside".to_string()),
        name: "Ironside Manufacturing".to_string(),
        profile: BuyerProfile::Strategic {
            ticker: Some("IRSD".to_string()),
            parent_company: Some("Ironside Holdings".to_string()),
        },
        headquarters_country: "United States".to_string(),
        employee_count: Some(4_000),
        annual_revenue_usd: Some(410_000_000),
        cash_reserves_usd: Some(80_000_000),
        is_public: true,
        is_sponsor_backed: false,
        ma_track_record: TrackRecordLevel::Medium,
        baseline_score: 55,
        offering_text: "On-premise hardware appliances".to_string(),
        sector_text: "Industrial Technology".to_string(),
        customer_text: "Factory operators and OEM integrators".to_string(),
        keyword_tags: vec!["hardware".to_string(), "manufacturing".to_string()],
    }
}

pub(super) fn helio() -> BuyerRecord {
    BuyerRecord {
        id: BuyerId("buyer-helio".to_string()),
        name: "Helio Health Partners".to_string(),
        profile: BuyerProfile::Strategic {
            ticker: None,
            parent_company: None,
        },
        headquarters_country: "Germany".to_string(),
        employee_count: Some(650),
        annual_revenue_usd: Some(48_000_000),
        cash_reserves_usd: None,
        is_public: false,
        is_sponsor_backed: true,
        ma_track_record: TrackRecordLevel::Low,
        baseline_score: 66,
        offering_text: "Clinical scheduling and billing software".to_string(),
        sector_text: "Healthcare IT".to_string(),
        customer_text: "Outpatient clinics across the DACH region".to_string(),
        keyword_tags: vec!["healthcare".to_string(), "scheduling".to_string()],
    }
}

pub(super) fn granite() -> BuyerRecord {
    BuyerRecord {
        id: BuyerId("buyer-granite".to_string()),
        name: "Granite Peak Capital".to_string(),
        profile: BuyerProfile::FinancialSponsor {
            fund_size_usd: Some(900_000_000),
            dry_powder_usd: Some(250_000_000),
            portfolio_count: 14,
        },
        headquarters_country: "United States".to_string(),
        employee_count: Some(45),
        annual_revenue_usd: None,
        cash_reserves_usd: Some(250_000_000),
        is_public: false,
        is_sponsor_backed: false,
        ma_track_record: TrackRecordLevel::High,
        baseline_score: 77,
        offering_text: "Buy-and-build platform investments in vertical software".to_string(),
        sector_text: "Software, Business Services".to_string(),
        customer_text: "Founders seeking majority recapitalizations".to_string(),
        keyword_tags: vec!["private equity".to_string(), "roll-up".to_string()],
    }
}

pub(super) fn directory_buyers() -> Vec<BuyerRecord> {
    vec![nimbus(), ironside(), helio(), granite()]
}

/// Rationale table covering Nimbus on every criterion; the other fixtures
/// deliberately have gaps so baseline fallback paths get exercised.
pub(super) fn rationale_provider() -> StaticRationaleProvider {
    let mut provider = StaticRationaleProvider::default();
    let nimbus_scores = [
        (MatchCriterion::Offering, 92, "near-identical product surface"),
        (MatchCriterion::ProblemSolved, 88, "same pipeline-visibility pain"),
        (MatchCriterion::UseCase, 75, "adjacent deployment model"),
        (MatchCriterion::CustomerBase, 80, "overlapping mid-market accounts"),
        (MatchCriterion::Positioning, 70, "premium pricing tier"),
        (MatchCriterion::AcquisitionHistory, 95, "four tuck-ins in three years"),
    ];
    for (criterion, score, summary) in nimbus_scores {
        provider.insert(
            nimbus().id,
            criterion,
            CriterionRationale {
                score,
                summary: summary.to_string(),
            },
        );
    }
    provider.insert(
        helio().id,
        MatchCriterion::Offering,
        CriterionRationale {
            score: 64,
            summary: "partial workflow overlap".to_string(),
        },
    );
    provider
}

pub(super) fn project() -> ProjectId {
    ProjectId("proj-atlas".to_string())
}

/// Score the standard fixtures with default weights, ready for pipeline
/// scenarios.
pub(super) fn scored_fixtures() -> Vec<ScoredBuyer> {
    let engine = ScoringEngine::new(ScoringConfig::default(), Arc::new(rationale_provider()));
    engine.score_all(&directory_buyers())
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    buyers: Mutex<Vec<BuyerRecord>>,
}

impl MemoryDirectory {
    pub(super) fn with_buyers(buyers: Vec<BuyerRecord>) -> Self {
        Self {
            buyers: Mutex::new(buyers),
        }
    }

    /// Swap the live records, simulating upstream churn after a snapshot.
    pub(super) fn set_buyers(&self, buyers: Vec<BuyerRecord>) {
        *self.buyers.lock().expect("directory mutex poisoned") = buyers;
    }
}

impl BuyerDirectory for MemoryDirectory {
    fn list(&self, kind: BuyerKind) -> Result<Vec<BuyerRecord>, DirectoryError> {
        Ok(self
            .buyers
            .lock()
            .expect("directory mutex poisoned")
            .iter()
            .filter(|buyer| buyer.kind() == kind)
            .cloned()
            .collect())
    }
}

pub(super) struct OfflineDirectory;

impl BuyerDirectory for OfflineDirectory {
    fn list(&self, _kind: BuyerKind) -> Result<Vec<BuyerRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("feed timed out".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemorySearchRepository {
    records: Mutex<HashMap<SearchId, SavedSearchRecord>>,
    snapshots: Mutex<HashMap<SearchId, Vec<ScoredBuyer>>>,
}

impl SavedSearchRepository for MemorySearchRepository {
    fn insert_search(&self, record: &SavedSearchRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("records mutex poisoned")
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn insert_results(&self, id: &SearchId, results: &[ScoredBuyer]) -> Result<(), RepositoryError> {
        self.snapshots
            .lock()
            .expect("snapshot mutex poisoned")
            .insert(id.clone(), results.to_vec());
        Ok(())
    }

    fn list(&self, project_id: &ProjectId) -> Result<Vec<SavedSearchSummary>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("records mutex poisoned")
            .values()
            .filter(|record| &record.project_id == project_id)
            .map(|record| SavedSearchSummary {
                id: record.id.clone(),
                name: record.name.clone(),
                created_at: record.created_at,
            })
            .collect())
    }

    fn fetch_results(&self, id: &SearchId) -> Result<Option<Vec<ScoredBuyer>>, RepositoryError> {
        Ok(self
            .snapshots
            .lock()
            .expect("snapshot mutex poisoned")
            .get(id)
            .cloned())
    }

    fn delete(&self, id: &SearchId) -> Result<(), RepositoryError> {
        let removed_record = self
            .records
            .lock()
            .expect("records mutex poisoned")
            .remove(id);
        let removed_snapshot = self
            .snapshots
            .lock()
            .expect("snapshot mutex poisoned")
            .remove(id);
        if removed_record.is_none() && removed_snapshot.is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

pub(super) fn build_service() -> (
    Arc<BuyerDiscoveryService<MemoryDirectory, MemorySearchRepository>>,
    Arc<MemoryDirectory>,
    Arc<MemorySearchRepository>,
) {
    let directory = Arc::new(MemoryDirectory::with_buyers(directory_buyers()));
    let repository = Arc::new(MemorySearchRepository::default());
    let service = Arc::new(BuyerDiscoveryService::new(
        directory.clone(),
        repository.clone(),
        Arc::new(rationale_provider()),
    ));
    (service, directory, repository)
}

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use dealscout::discovery::buyers::{
    BuyerDirectory, BuyerId, BuyerKind, BuyerProfile, BuyerRecord, CriterionRationale,
    DirectoryError, MatchCriterion, ProjectId, ScoredBuyer, StaticRationaleProvider,
    TrackRecordLevel,
};
use dealscout::discovery::searches::{
    RepositoryError, SavedSearchRecord, SavedSearchRepository, SavedSearchSummary, SearchId,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the remote persistence service. Parent records
/// and result snapshots live in separate tables, matching the two-write
/// save protocol the manager expects.
#[derive(Default)]
pub(crate) struct InMemorySavedSearchRepository {
    records: Mutex<HashMap<SearchId, SavedSearchRecord>>,
    snapshots: Mutex<HashMap<SearchId, Vec<ScoredBuyer>>>,
}

impl SavedSearchRepository for InMemorySavedSearchRepository {
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
        let record = self
            .records
            .lock()
            .expect("records mutex poisoned")
            .remove(id);
        let snapshot = self
            .snapshots
            .lock()
            .expect("snapshot mutex poisoned")
            .remove(id);
        if record.is_none() && snapshot.is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Fixed buyer universe backing `serve` and `demo` until the production
/// buyer feed is connected.
pub(crate) struct StaticBuyerDirectory {
    buyers: Vec<BuyerRecord>,
}

impl BuyerDirectory for StaticBuyerDirectory {
    fn list(&self, kind: BuyerKind) -> Result<Vec<BuyerRecord>, DirectoryError> {
        Ok(self
            .buyers
            .iter()
            .filter(|buyer| buyer.kind() == kind)
            .cloned()
            .collect())
    }
}

fn strategic(
    id: &str,
    name: &str,
    country: &str,
    employees: u64,
    revenue: u64,
    cash: u64,
    is_public: bool,
    sponsor_backed: bool,
    track: TrackRecordLevel,
    baseline: u8,
    offering: &str,
    sector: &str,
    customers: &str,
    tags: &[&str],
) -> BuyerRecord {
    BuyerRecord {
        id: BuyerId(id.to_string()),
        name: name.to_string(),
        profile: BuyerProfile::Strategic {
            ticker: is_public.then(|| id.replace("buyer-", "").to_uppercase()),
            parent_company: None,
        },
        headquarters_country: country.to_string(),
        employee_count: Some(employees),
        annual_revenue_usd: Some(revenue),
        cash_reserves_usd: Some(cash),
        is_public,
        is_sponsor_backed: sponsor_backed,
        ma_track_record: track,
        baseline_score: baseline,
        offering_text: offering.to_string(),
        sector_text: sector.to_string(),
        customer_text: customers.to_string(),
        keyword_tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

pub(crate) fn demo_directory() -> (StaticBuyerDirectory, StaticRationaleProvider) {
    let buyers = vec![
        strategic(
            "buyer-veldt",
            "Veldt Software",
            "United States",
            2_400,
            180_000_000,
            55_000_000,
            true,
            false,
            TrackRecordLevel::High,
            82,
            "Cloud field-service management suite",
            "Software, Field Services",
            "Mid-market service contractors",
            &["cloud", "saas", "field service"],
        ),
        strategic(
            "buyer-quarry",
            "Quarry Dynamics",
            "United States",
            5_600,
            620_000_000,
            140_000_000,
            true,
            false,
            TrackRecordLevel::Medium,
            64,
            "Industrial automation controllers and on-premise SCADA",
            "Industrial Technology",
            "Heavy manufacturing plants",
            &["automation", "hardware"],
        ),
        strategic(
            "buyer-lumen",
            "LumenCare Systems",
            "United Kingdom",
            900,
            70_000_000,
            18_000_000,
            false,
            true,
            TrackRecordLevel::Low,
            71,
            "Patient engagement and clinical messaging software",
            "Healthcare IT",
            "NHS trusts and private clinics",
            &["healthcare", "patient engagement"],
        ),
        strategic(
            "buyer-tidewater",
            "Tidewater Logistics Group",
            "Canada",
            3_100,
            240_000_000,
            32_000_000,
            false,
            false,
            TrackRecordLevel::Medium,
            58,
            "Freight brokerage and dispatch optimization software",
            "Transportation, Logistics",
            "Regional carriers and 3PLs",
            &["logistics", "dispatch"],
        ),
    ];

    let sponsors = vec![
        BuyerRecord {
            id: BuyerId("buyer-copperfield".to_string()),
            name: "Copperfield Equity Partners".to_string(),
            profile: BuyerProfile::FinancialSponsor {
                fund_size_usd: Some(1_200_000_000),
                dry_powder_usd: Some(400_000_000),
                portfolio_count: 19,
            },
            headquarters_country: "United States".to_string(),
            employee_count: Some(60),
            annual_revenue_usd: None,
            cash_reserves_usd: Some(400_000_000),
            is_public: false,
            is_sponsor_backed: false,
            ma_track_record: TrackRecordLevel::High,
            baseline_score: 76,
            offering_text: "Control investments in vertical SaaS platforms".to_string(),
            sector_text: "Software, Business Services".to_string(),
            customer_text: "Founder-led companies at $5-50M ARR".to_string(),
            keyword_tags: vec!["private equity".to_string(), "buy-and-build".to_string()],
        },
        BuyerRecord {
            id: BuyerId("buyer-northbound".to_string()),
            name: "Northbound Growth Capital".to_string(),
            profile: BuyerProfile::FinancialSponsor {
                fund_size_usd: Some(450_000_000),
                dry_powder_usd: Some(120_000_000),
                portfolio_count: 8,
            },
            headquarters_country: "Canada".to_string(),
            employee_count: Some(25),
            annual_revenue_usd: None,
            cash_reserves_usd: Some(120_000_000),
            is_public: false,
            is_sponsor_backed: false,
            ma_track_record: TrackRecordLevel::Medium,
            baseline_score: 63,
            offering_text: "Minority growth investments in B2B software".to_string(),
            sector_text: "Software".to_string(),
            customer_text: "Bootstrapped teams seeking first institutional capital".to_string(),
            keyword_tags: vec!["growth equity".to_string()],
        },
    ];

    let mut records = buyers;
    records.extend(sponsors);

    let mut rationales = StaticRationaleProvider::default();
    let veldt = [
        (MatchCriterion::Offering, 94, "same workflow category, broader suite"),
        (MatchCriterion::ProblemSolved, 90, "identical dispatch pain point"),
        (MatchCriterion::UseCase, 84, "shared deployment model"),
        (MatchCriterion::CustomerBase, 79, "overlapping contractor segment"),
        (MatchCriterion::Positioning, 72, "mid-market pricing parity"),
        (MatchCriterion::AcquisitionHistory, 88, "three software tuck-ins since 2023"),
    ];
    for (criterion, score, summary) in veldt {
        rationales.insert(
            BuyerId("buyer-veldt".to_string()),
            criterion,
            CriterionRationale {
                score,
                summary: summary.to_string(),
            },
        );
    }
    rationales.insert(
        BuyerId("buyer-lumen".to_string()),
        MatchCriterion::CustomerBase,
        CriterionRationale {
            score: 66,
            summary: "adjacent clinical buyer personas".to_string(),
        },
    );
    rationales.insert(
        BuyerId("buyer-copperfield".to_string()),
        MatchCriterion::AcquisitionHistory,
        CriterionRationale {
            score: 91,
            summary: "nineteen platform and add-on deals".to_string(),
        },
    );

    (StaticBuyerDirectory { buyers: records }, rationales)
}

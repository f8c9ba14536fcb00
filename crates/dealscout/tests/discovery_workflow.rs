//! Integration scenarios for the buyer discovery workflow.
//!
//! Scenarios run through the public service facade and HTTP router so
//! scoring, filtering, saved searches, and bookmarks are validated without
//! reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use dealscout::discovery::buyers::{
        BuyerDirectory, BuyerDiscoveryService, BuyerId, BuyerKind, BuyerProfile, BuyerRecord,
        CriterionRationale, DirectoryError, MatchCriterion, ProjectId, ScoredBuyer,
        StaticRationaleProvider, TrackRecordLevel,
    };
    use dealscout::discovery::searches::{
        RepositoryError, SavedSearchRecord, SavedSearchRepository, SavedSearchSummary, SearchId,
    };

    pub(super) fn strategic(
        id: &str,
        name: &str,
        country: &str,
        baseline: u8,
        offering: &str,
        sector: &str,
    ) -> BuyerRecord {
        BuyerRecord {
            id: BuyerId(id.to_string()),
            name: name.to_string(),
            profile: BuyerProfile::Strategic {
                ticker: None,
                parent_company: None,
            },
            headquarters_country: country.to_string(),
            employee_count: Some(800),
            annual_revenue_usd: Some(60_000_000),
            cash_reserves_usd: Some(15_000_000),
            is_public: false,
            is_sponsor_backed: false,
            ma_track_record: TrackRecordLevel::Medium,
            baseline_score: baseline,
            offering_text: offering.to_string(),
            sector_text: sector.to_string(),
            customer_text: "Mid-market operators".to_string(),
            keyword_tags: vec!["software".to_string()],
        }
    }

    pub(super) fn buyers() -> Vec<BuyerRecord> {
        vec![
            strategic(
                "buyer-aster",
                "Aster Systems",
                "United States",
                81,
                "Cloud revenue intelligence platform",
                "Software",
            ),
            strategic(
                "buyer-bluegate",
                "Bluegate Industrial",
                "Canada",
                58,
                "On-premise plant monitoring appliances",
                "Industrial Technology",
            ),
            strategic(
                "buyer-corven",
                "Corven Health",
                "United States",
                73,
                "Clinical data exchange software",
                "Healthcare IT",
            ),
        ]
    }

    pub(super) fn rationales() -> StaticRationaleProvider {
        let mut provider = StaticRationaleProvider::default();
        provider.insert(
            BuyerId("buyer-aster".to_string()),
            MatchCriterion::Offering,
            CriterionRationale {
                score: 90,
                summary: "direct product overlap".to_string(),
            },
        );
        provider.insert(
            BuyerId("buyer-corven".to_string()),
            MatchCriterion::CustomerBase,
            CriterionRationale {
                score: 68,
                summary: "shared provider networks".to_string(),
            },
        );
        provider
    }

    pub(super) fn project() -> ProjectId {
        ProjectId("proj-meridian".to_string())
    }

    #[derive(Default)]
    pub(super) struct MemoryDirectory {
        buyers: Mutex<Vec<BuyerRecord>>,
    }

    impl MemoryDirectory {
        pub(super) fn with_buyers(records: Vec<BuyerRecord>) -> Self {
            Self {
                buyers: Mutex::new(records),
            }
        }

        pub(super) fn set_buyers(&self, records: Vec<BuyerRecord>) {
            *self.buyers.lock().expect("directory mutex poisoned") = records;
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

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<HashMap<SearchId, SavedSearchRecord>>,
        snapshots: Mutex<HashMap<SearchId, Vec<ScoredBuyer>>>,
    }

    impl SavedSearchRepository for MemoryRepository {
        fn insert_search(&self, record: &SavedSearchRecord) -> Result<(), RepositoryError> {
            self.records
                .lock()
                .expect("lock")
                .insert(record.id.clone(), record.clone());
            Ok(())
        }

        fn insert_results(
            &self,
            id: &SearchId,
            results: &[ScoredBuyer],
        ) -> Result<(), RepositoryError> {
            self.snapshots
                .lock()
                .expect("lock")
                .insert(id.clone(), results.to_vec());
            Ok(())
        }

        fn list(&self, project_id: &ProjectId) -> Result<Vec<SavedSearchSummary>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("lock")
                .values()
                .filter(|record| &record.project_id == project_id)
                .map(|record| SavedSearchSummary {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    created_at: record.created_at,
                })
                .collect())
        }

        fn fetch_results(
            &self,
            id: &SearchId,
        ) -> Result<Option<Vec<ScoredBuyer>>, RepositoryError> {
            Ok(self.snapshots.lock().expect("lock").get(id).cloned())
        }

        fn delete(&self, id: &SearchId) -> Result<(), RepositoryError> {
            let record = self.records.lock().expect("lock").remove(id);
            let snapshot = self.snapshots.lock().expect("lock").remove(id);
            if record.is_none() && snapshot.is_none() {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    pub(super) fn build_service() -> (
        Arc<BuyerDiscoveryService<MemoryDirectory, MemoryRepository>>,
        Arc<MemoryDirectory>,
        Arc<MemoryRepository>,
    ) {
        let directory = Arc::new(MemoryDirectory::with_buyers(buyers()));
        let repository = Arc::new(MemoryRepository::default());
        let service = Arc::new(BuyerDiscoveryService::new(
            directory.clone(),
            repository.clone(),
            Arc::new(rationales()),
        ));
        (service, directory, repository)
    }
}

mod matching {
    use super::common::*;
    use dealscout::discovery::buyers::{
        BooleanQuery, BuyerKind, ClauseField, ClauseOperator, DiscoveryRequest, FilterState,
        KeywordClause, ScoringConfig, SortKey,
    };

    fn request() -> DiscoveryRequest {
        DiscoveryRequest {
            kind: BuyerKind::Strategic,
            scoring_config: ScoringConfig::default(),
            filters: FilterState::default(),
            query: BooleanQuery::default(),
        }
    }

    #[test]
    fn ranked_discovery_puts_the_strongest_fit_first() {
        let (service, _, _) = build_service();

        let results = service.discover(&request()).expect("discovery succeeds");

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].buyer.name, "Aster Systems");
        assert!(results
            .windows(2)
            .all(|pair| pair[0].composite_score >= pair[1].composite_score));
    }

    #[test]
    fn keyword_query_and_filters_narrow_the_universe_together() {
        let (service, _, _) = build_service();

        let mut narrowed = request();
        narrowed.filters.hq_countries.insert("United States".to_string());
        narrowed.filters.sort_key = SortKey::NameAsc;
        narrowed.query = BooleanQuery::new(vec![
            KeywordClause {
                field: ClauseField::Offering,
                operator: ClauseOperator::Or,
                text: "cloud clinical".to_string(),
            },
            KeywordClause {
                field: ClauseField::Sector,
                operator: ClauseOperator::Not,
                text: "industrial".to_string(),
            },
        ]);

        let results = service.discover(&narrowed).expect("discovery succeeds");

        let names: Vec<&str> = results
            .iter()
            .map(|entry| entry.buyer.name.as_str())
            .collect();
        assert_eq!(names, vec!["Aster Systems", "Corven Health"]);
    }
}

mod saved_searches {
    use super::common::*;
    use dealscout::discovery::buyers::{
        BuyerKind, DiscoveryRequest, DiscoveryServiceError, ScoringConfig,
    };
    use dealscout::discovery::searches::{RepositoryError, SavedSearchError};

    fn request() -> DiscoveryRequest {
        DiscoveryRequest {
            kind: BuyerKind::Strategic,
            scoring_config: ScoringConfig::default(),
            filters: Default::default(),
            query: Default::default(),
        }
    }

    #[test]
    fn snapshots_outlive_directory_churn() {
        let (service, directory, _) = build_service();
        let results = service.discover(&request()).expect("discovery succeeds");

        let saved = service
            .save_search(&project(), "us strategics", &ScoringConfig::default(), &results)
            .expect("save succeeds");

        directory.set_buyers(Vec::new());

        let reloaded = service
            .load_search_results(&saved.id)
            .expect("snapshot loads");
        assert_eq!(reloaded, results);

        let summaries = service.list_searches(&project()).expect("list succeeds");
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "us strategics");
    }

    #[test]
    fn deleting_twice_then_loading_reports_not_found() {
        let (service, _, _) = build_service();
        let results = service.discover(&request()).expect("discovery succeeds");
        let saved = service
            .save_search(&project(), "scratch", &ScoringConfig::default(), &results)
            .expect("save succeeds");

        service.delete_search(&saved.id).expect("first delete");
        service.delete_search(&saved.id).expect("second delete");

        match service.load_search_results(&saved.id) {
            Err(DiscoveryServiceError::SavedSearch(SavedSearchError::Persistence(
                RepositoryError::NotFound,
            ))) => {}
            other => panic!("expected not-found, got {other:?}"),
        }
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use dealscout::discovery::buyers::discovery_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn discovery_endpoint_serves_the_ranked_list() {
        let (service, _, _) = build_service();
        let router = discovery_router(service);

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/projects/proj-meridian/discovery")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({ "kind": "strategic" })).expect("serialize"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("result_count").and_then(Value::as_u64), Some(3));
        assert_eq!(
            payload
                .pointer("/results/0/buyer/name")
                .and_then(Value::as_str),
            Some("Aster Systems")
        );
    }
}

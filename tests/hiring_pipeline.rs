//! End-to-end scenarios for the hiring pipeline: postings, application
//! intake, status transitions, and the dashboard numbers derived from them.
//! Everything runs through the public service facades and HTTP routers over
//! the in-memory store.

mod common {
    use std::sync::Arc;

    use talentdesk::store::MemoryStore;
    use talentdesk::workflows::applications::{ApplicationDraft, ApplicationService};
    use talentdesk::workflows::candidates::CandidateService;
    use talentdesk::workflows::dashboard::DashboardService;
    use talentdesk::workflows::internships::{
        Internship, InternshipDraft, InternshipService, InternshipStatus, WorkArrangement,
    };

    pub(crate) const COMPANY: &str = "user-acme";

    pub(crate) struct Pipeline {
        pub(crate) store: Arc<MemoryStore>,
        pub(crate) internships: InternshipService<MemoryStore>,
        pub(crate) applications: ApplicationService<MemoryStore>,
        pub(crate) candidates: CandidateService<MemoryStore>,
        pub(crate) dashboard: DashboardService<MemoryStore>,
    }

    pub(crate) fn pipeline() -> Pipeline {
        let store = Arc::new(MemoryStore::default());
        Pipeline {
            internships: InternshipService::new(store.clone()),
            applications: ApplicationService::new(store.clone()),
            candidates: CandidateService::new(store.clone()),
            dashboard: DashboardService::new(store.clone()),
            store,
        }
    }

    pub(crate) fn posting_draft(title: &str) -> InternshipDraft {
        InternshipDraft {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: Some("Remote".to_string()),
            arrangement: WorkArrangement::Remote,
            duration: Some("3 months".to_string()),
            stipend: Some("1200".to_string()),
            description: format!("{title} on the product team"),
            requirements: None,
            responsibilities: None,
            application_deadline: None,
            positions: 2,
            skills: vec!["Rust".to_string()],
            status: Some(InternshipStatus::Open),
        }
    }

    pub(crate) fn application_draft(internship: &Internship, applicant: &str) -> ApplicationDraft {
        ApplicationDraft {
            internship_id: internship.id.clone(),
            applicant_name: applicant.to_string(),
            applicant_email: format!(
                "{}@example.com",
                applicant.to_lowercase().replace(' ', ".")
            ),
            cover_letter: None,
            resume_link: None,
            expected_stipend: Some(1200),
            availability: Some("Immediate".to_string()),
        }
    }
}

mod lifecycle {
    use super::common::*;
    use talentdesk::workflows::applications::{ApplicationError, ApplicationStatus};

    #[test]
    fn the_three_application_scenario_reports_the_expected_stats() {
        let pipeline = pipeline();
        let posting = pipeline
            .internships
            .create(COMPANY, &posting_draft("Frontend Developer Internship"))
            .expect("posting created");
        assert_eq!(posting.applications, 0);

        let mut ids = Vec::new();
        for name in ["Alex Johnson", "Emily Rodriguez", "Sarah Wilson"] {
            let application = pipeline
                .applications
                .submit(&application_draft(&posting, name))
                .expect("submission succeeds");
            ids.push(application.id);
        }

        pipeline
            .applications
            .transition(&ids[0], ApplicationStatus::Accepted)
            .expect("accept");
        pipeline
            .applications
            .transition(&ids[1], ApplicationStatus::Rejected)
            .expect("reject");
        pipeline
            .applications
            .transition(&ids[2], ApplicationStatus::Interview)
            .expect("interview");

        let snapshot = pipeline.dashboard.snapshot(COMPANY).expect("snapshot");
        assert_eq!(snapshot.stats.total_applications, 3);
        assert_eq!(snapshot.stats.interview_stage, 1);
        assert_eq!(snapshot.stats.acceptance_rate, "33%");
        assert_eq!(snapshot.stats.active_internships, 1);

        let refreshed = pipeline.internships.get(&posting.id).expect("posting");
        assert_eq!(refreshed.applications, 3);
        assert_eq!(refreshed.accepted_count, 1);
        assert_eq!(refreshed.rejected_count, 1);
    }

    #[test]
    fn statuses_stay_on_the_permitted_graph() {
        let pipeline = pipeline();
        let posting = pipeline
            .internships
            .create(COMPANY, &posting_draft("Backend Internship"))
            .expect("posting created");
        let application = pipeline
            .applications
            .submit(&application_draft(&posting, "David Lee"))
            .expect("submission succeeds");

        // pending -> rejected -> accepted is the one permitted detour.
        pipeline
            .applications
            .transition(&application.id, ApplicationStatus::Rejected)
            .expect("reject");
        pipeline
            .applications
            .transition(&application.id, ApplicationStatus::Accepted)
            .expect("reconsider");

        // Once accepted, every further move is refused.
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Interview,
            ApplicationStatus::Rejected,
        ] {
            let result = pipeline.applications.transition(&application.id, status);
            assert!(matches!(result, Err(ApplicationError::Transition(_))));
        }

        let stored = pipeline
            .applications
            .get(&application.id)
            .expect("application");
        assert_eq!(stored.status, ApplicationStatus::Accepted);
    }

    #[test]
    fn reconsideration_does_not_double_count() {
        let pipeline = pipeline();
        let posting = pipeline
            .internships
            .create(COMPANY, &posting_draft("Data Internship"))
            .expect("posting created");
        let application = pipeline
            .applications
            .submit(&application_draft(&posting, "Sarah Wilson"))
            .expect("submission succeeds");

        pipeline
            .applications
            .transition(&application.id, ApplicationStatus::Rejected)
            .expect("reject");
        pipeline
            .applications
            .transition(&application.id, ApplicationStatus::Accepted)
            .expect("reconsider");

        let refreshed = pipeline.internships.get(&posting.id).expect("posting");
        assert_eq!(refreshed.accepted_count, 1);
        assert_eq!(refreshed.rejected_count, 0);

        let snapshot = pipeline.dashboard.snapshot(COMPANY).expect("snapshot");
        assert_eq!(snapshot.stats.acceptance_rate, "100%");
    }
}

mod ownership {
    use super::common::*;
    use talentdesk::workflows::applications::ApplicationStatus;
    use talentdesk::workflows::internships::InternshipError;

    #[test]
    fn only_the_poster_may_delete_a_posting() {
        let pipeline = pipeline();
        let posting = pipeline
            .internships
            .create(COMPANY, &posting_draft("Mobile Internship"))
            .expect("posting created");

        let denied = pipeline.internships.delete("someone-else", &posting.id);
        assert!(matches!(denied, Err(InternshipError::NotOwner { .. })));
        assert!(pipeline.internships.get(&posting.id).is_ok());
    }

    #[test]
    fn orphaned_applications_survive_a_posting_delete() {
        let pipeline = pipeline();
        let posting = pipeline
            .internships
            .create(COMPANY, &posting_draft("Design Internship"))
            .expect("posting created");
        let application = pipeline
            .applications
            .submit(&application_draft(&posting, "Emily Rodriguez"))
            .expect("submission succeeds");

        pipeline
            .internships
            .delete(COMPANY, &posting.id)
            .expect("owner deletes");

        let stored = pipeline
            .applications
            .get(&application.id)
            .expect("application survives");
        assert_eq!(stored.status, ApplicationStatus::Pending);

        // Lifecycle still works for the orphan, minus the counter effect.
        pipeline
            .applications
            .transition(&application.id, ApplicationStatus::Accepted)
            .expect("transition succeeds");
    }
}

mod dashboard {
    use super::common::*;
    use talentdesk::workflows::candidates::{CandidateDraft, CandidateStage};

    #[test]
    fn snapshot_composes_feed_loads_and_top_candidates() {
        let pipeline = pipeline();
        let frontend = pipeline
            .internships
            .create(COMPANY, &posting_draft("Frontend Internship"))
            .expect("posting created");
        let data = pipeline
            .internships
            .create(COMPANY, &posting_draft("Data Internship"))
            .expect("posting created");

        for name in ["Alex Johnson", "Emily Rodriguez"] {
            pipeline
                .applications
                .submit(&application_draft(&frontend, name))
                .expect("submission succeeds");
        }
        pipeline
            .applications
            .submit(&application_draft(&data, "Sarah Wilson"))
            .expect("submission succeeds");

        for (name, rating) in [("Emily Johnson", 4.8_f32), ("Michael Brown", 4.7)] {
            pipeline
                .candidates
                .add(
                    COMPANY,
                    &CandidateDraft {
                        name: name.to_string(),
                        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                        position: Some("Frontend Developer".to_string()),
                        status: CandidateStage::Review,
                        rating,
                    },
                )
                .expect("candidate added");
        }

        let snapshot = pipeline.dashboard.snapshot(COMPANY).expect("snapshot");

        assert_eq!(snapshot.board.total_applications, 3);
        assert_eq!(snapshot.loads.len(), 2);
        let frontend_load = snapshot
            .loads
            .iter()
            .find(|load| load.internship_id == frontend.id)
            .expect("frontend load present");
        assert_eq!(frontend_load.applications, 2);

        assert_eq!(snapshot.recent_activity.len(), 3);
        assert_eq!(snapshot.recent_activity[0].candidate, "Sarah Wilson");
        assert!(snapshot.recent_activity[0]
            .title
            .starts_with("New application for"));

        assert_eq!(snapshot.top_candidates.len(), 2);
        assert_eq!(snapshot.top_candidates[0].name, "Emily Johnson");

        let csv = snapshot.to_csv().expect("csv export");
        assert!(csv.contains("totalApplications,3"));
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use talentdesk::workflows::dashboard::{dashboard_router, DashboardService};
    use talentdesk::workflows::internships::{internship_router, InternshipService};
    use tower::ServiceExt;

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn create_route_requires_the_operator_header() {
        let pipeline = pipeline();
        let router = internship_router(Arc::new(InternshipService::new(pipeline.store.clone())));

        let request = Request::post("/api/v1/internships")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&posting_draft("Frontend Internship")).expect("serialize"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn delete_route_maps_ownership_failures_to_forbidden() {
        let pipeline = pipeline();
        let posting = pipeline
            .internships
            .create(COMPANY, &posting_draft("Frontend Internship"))
            .expect("posting created");

        let router = internship_router(Arc::new(InternshipService::new(pipeline.store.clone())));
        let response = router
            .oneshot(
                Request::delete(format!("/api/v1/internships/{}", posting.id))
                    .header("x-operator-id", "someone-else")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let payload = json_body(response).await;
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("not owned"));
    }

    #[tokio::test]
    async fn dashboard_route_serves_json_and_csv() {
        let pipeline = pipeline();
        let posting = pipeline
            .internships
            .create(COMPANY, &posting_draft("Frontend Internship"))
            .expect("posting created");
        pipeline
            .applications
            .submit(&application_draft(&posting, "Alex Johnson"))
            .expect("submission succeeds");

        let router = dashboard_router(Arc::new(DashboardService::new(pipeline.store.clone())));

        let response = router
            .clone()
            .oneshot(
                Request::get(format!("/api/v1/dashboard/{COMPANY}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(
            payload.pointer("/stats/totalApplications"),
            Some(&Value::from(1))
        );

        let csv_response = router
            .oneshot(
                Request::get(format!("/api/v1/dashboard/{COMPANY}?format=csv"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(csv_response.status(), StatusCode::OK);
        assert_eq!(
            csv_response
                .headers()
                .get("content-type")
                .and_then(|value| value.to_str().ok()),
            Some("text/csv")
        );
    }
}

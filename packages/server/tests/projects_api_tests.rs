//! Integration tests for the project listing, submission and health routes.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use common::*;
use desci_core::kernel::{Clock, MockProvider, TestDependencies};

fn harness() -> TestHarness {
    TestHarness::new(TestDependencies::new().mock_provider(lab_provider()))
}

#[tokio::test]
async fn list_defaults_to_all_by_transparency() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/projects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["filters"], json!({"category": "All", "sortBy": "transparency"}));
    assert_eq!(ids(&body), vec![3001, 3002, 3003, 1, 2, 3]);
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn list_serializes_records_in_wire_shape() {
    let ctx = harness();

    let (_, body) = ctx.get("/api/projects?category=Biology").await;
    let lab = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == 1)
        .cloned()
        .unwrap();

    assert_eq!(lab["name"], "Project 1");
    assert_eq!(lab["category"], "Biology");
    assert_eq!(lab["lastUpdated"], "2025-01-01");
    assert_eq!(
        lab["scores"],
        json!({"transparency": 70, "collaboration": 40, "funding": 10, "engagement": 30})
    );
}

#[tokio::test]
async fn list_filters_by_category() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/projects?category=Biology").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3002, 1]);
    assert_eq!(body["count"], 2);
    assert_eq!(body["filters"]["category"], "Biology");
}

#[tokio::test]
async fn list_filters_by_multi_word_category() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/projects?category=Climate%20Science").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3]);
    assert_eq!(body["filters"]["category"], "Climate Science");
}

#[tokio::test]
async fn list_category_without_matches_is_empty() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/projects?category=Materials%20Science").await;

    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn list_sorts_by_requested_score() {
    let ctx = harness();

    let (_, body) = ctx.get("/api/projects?sortBy=engagement").await;
    assert_eq!(ids(&body), vec![3003, 3001, 3002, 3, 2, 1]);
    assert_eq!(body["filters"]["sortBy"], "engagement");

    let (_, body) = ctx.get("/api/projects?category=AI&sortBy=collaboration").await;
    assert_eq!(ids(&body), vec![3003, 2]);
}

#[tokio::test]
async fn list_treats_empty_parameters_as_absent() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/projects?category=&sortBy=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filters"], json!({"category": "All", "sortBy": "transparency"}));
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn list_rejects_unknown_category() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/projects?category=Physics").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unknown category 'Physics'");
}

#[tokio::test]
async fn list_rejects_unknown_sort_key() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/projects?sortBy=stars").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown sort key 'stars'");
}

#[tokio::test]
async fn list_category_match_is_case_sensitive() {
    let ctx = harness();

    let (status, _) = ctx.get("/api/projects?category=biology").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn later_provider_wins_but_first_position_is_kept() {
    let ctx = TestHarness::new(
        TestDependencies::new()
            .mock_provider(lab_provider())
            .mock_provider(overriding_provider()),
    );

    let (_, body) = ctx.get("/api/projects?sortBy=transparency").await;
    let data = body["data"].as_array().unwrap();
    let renamed: Vec<_> = data.iter().filter(|p| p["id"] == 2).collect();

    assert_eq!(renamed.len(), 1);
    assert_eq!(renamed[0]["name"], "Renamed Project 2");
    assert_eq!(renamed[0]["category"], "Materials Science");
    assert_eq!(ids(&body), vec![3001, 3002, 3003, 1, 2, 3]);

    let (_, body) = ctx.get("/api/projects?category=Materials%20Science").await;
    assert_eq!(ids(&body), vec![2]);
}

#[tokio::test]
async fn failing_provider_does_not_break_the_listing() {
    let ctx = TestHarness::new(
        TestDependencies::new()
            .mock_provider(MockProvider::failing("down", "503 from upstream"))
            .mock_provider(lab_provider())
            .mock_provider(MockProvider::panicking("broken")),
    );

    let (status, body) = ctx.get("/api/projects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3001, 3002, 3003, 1, 2, 3]);
}

#[tokio::test]
async fn listing_is_served_from_cache_within_window() {
    let ctx = harness();
    let lab = ctx.deps.providers[0].clone();

    ctx.get("/api/projects").await;
    ctx.get("/api/projects?category=AI").await;
    ctx.deps.clock.advance(Duration::minutes(14));
    ctx.get("/api/projects?sortBy=funding").await;
    assert_eq!(lab.calls(), 1);

    ctx.deps.clock.advance(Duration::minutes(2));
    ctx.get("/api/projects").await;
    assert_eq!(lab.calls(), 2);
}

#[tokio::test]
async fn refreshed_listing_reflects_new_provider_data() {
    let mut changed = lab_projects();
    changed[0].name = "Project 1 v2".into();
    let ctx = TestHarness::new(
        TestDependencies::new().mock_provider(MockProvider::sequence(
            "lab",
            vec![Ok(lab_projects()), Ok(changed)],
        )),
    );

    let (_, body) = ctx.get("/api/projects?category=Biology").await;
    assert_eq!(body["data"][1]["name"], "Project 1");

    ctx.deps.clock.advance(Duration::minutes(15));
    let (_, body) = ctx.get("/api/projects?category=Biology").await;
    assert_eq!(body["data"][1]["name"], "Project 1 v2");
}

#[tokio::test]
async fn submit_creates_enriched_anchored_project() {
    let ctx = harness();

    let (status, body) = ctx
        .post_json(
            "/api/projects",
            json!({
                "name": "Gene Commons",
                "description": "Shared genetic datasets for open labs",
                "url": "https://example.org/gene-commons"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let project = &body["data"]["project"];
    let id = ctx.deps.clock.now().timestamp_millis();
    assert_eq!(project["id"], id);
    assert_eq!(project["name"], "Gene Commons");
    assert_eq!(project["category"], "Biology");
    assert_eq!(
        project["scores"],
        json!({"transparency": 75, "collaboration": 75, "funding": 75, "engagement": 75})
    );
    assert_eq!(project["lastUpdated"], "2025-01-01");

    let ledger = &body["data"]["ledger"];
    assert_eq!(ledger["projectId"], id);
    assert_eq!(ledger["scores"], project["scores"]);
    let hash = ledger["verificationHash"].as_str().unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn submit_applies_defaults_for_missing_fields() {
    let ctx = harness();

    let (status, body) = ctx
        .post_json("/api/projects", json!({"url": "https://example.org/x"}))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["project"]["name"], "Unnamed Project");
    assert_eq!(body["data"]["project"]["description"], "No description provided");
    assert_eq!(body["data"]["project"]["category"], "Open Access Research");
}

#[tokio::test]
async fn submitted_project_is_listed_without_refetch() {
    let ctx = harness();
    let lab = ctx.deps.providers[0].clone();

    ctx.get("/api/projects").await;
    let (_, created) = ctx
        .post_json(
            "/api/projects",
            json!({"name": "Climate Sensors", "description": "Climate sensor network", "url": "https://example.org/cs"}),
        )
        .await;
    let id = created["data"]["project"]["id"].as_i64().unwrap();

    let (_, body) = ctx.get("/api/projects?category=Climate%20Science").await;

    assert_eq!(lab.calls(), 1);
    assert_eq!(ids(&body), vec![id, 3]);
}

#[tokio::test]
async fn submitted_project_survives_cache_refresh() {
    let ctx = harness();

    let (_, created) = ctx
        .post_json(
            "/api/projects",
            json!({"description": "Climate sensor network", "url": "https://example.org/cs"}),
        )
        .await;
    let id = created["data"]["project"]["id"].as_i64().unwrap();

    ctx.deps.clock.advance(Duration::minutes(30));
    let (_, body) = ctx.get("/api/projects").await;

    assert!(ids(&body).contains(&id));
}

#[tokio::test]
async fn submission_during_refresh_is_listed() {
    let ctx = TestHarness::new(
        TestDependencies::new()
            .mock_provider(lab_provider().with_delay(std::time::Duration::from_millis(300))),
    );
    let lab = ctx.deps.providers[0].clone();

    let listing = {
        let router = ctx.router.clone();
        tokio::spawn(async move { TestHarness::send_to(router, get_request("/api/projects")).await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let (status, created) = ctx
        .post_json(
            "/api/projects",
            json!({"name": "Late Lab", "description": "Submitted mid-refresh", "url": "https://example.org/late"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["project"]["id"].as_i64().unwrap();

    let (status, _) = listing.await.unwrap();
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.get("/api/projects").await;
    assert!(ids(&body).contains(&id));
    assert_eq!(lab.calls(), 1);
}

#[tokio::test]
async fn submit_requires_url() {
    let ctx = harness();

    let (status, body) = ctx
        .post_json("/api/projects", json!({"name": "No link", "url": "  "}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Project URL is required");
}

#[tokio::test]
async fn submit_rejects_malformed_json() {
    let ctx = harness();

    let (status, body) = ctx.post_raw("/api/projects", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn health_reports_cache_state() {
    let ctx = harness();

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cache"], json!({"populated": false, "count": 0}));

    ctx.get("/api/projects").await;
    ctx.deps.clock.advance(Duration::seconds(90));

    let (_, body) = ctx.get("/health").await;
    assert_eq!(body["cache"], json!({"populated": true, "age_secs": 90, "count": 6}));
    assert_eq!(body["submissions"], 0);
    assert_eq!(body["anchored"], 0);

    ctx.post_json("/api/projects", json!({"url": "https://example.org/h"}))
        .await;
    let (_, body) = ctx.get("/health").await;
    assert_eq!(body["cache"]["count"], 7);
    assert_eq!(body["submissions"], 1);
    assert_eq!(body["anchored"], 1);
}

#[tokio::test]
async fn arxiv_failure_is_reported_as_server_error() {
    let ctx = harness();

    let (status, body) = ctx.get("/api/arxiv?q=open%20science").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to fetch arXiv papers");
}

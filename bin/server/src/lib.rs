//! flowdex query API.
//!
//! A read-only HTTP façade over the workflow catalog: search with filters
//! and facets, single-record lookup, statistics, integration usage, the
//! category table, and search suggestions.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::get;
use state::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/workflows", get(routes::list_workflows))
        .route("/api/workflows/{filename}", get(routes::get_workflow))
        .route("/api/stats", get(routes::stats))
        .route("/api/integrations", get(routes::integrations))
        .route("/api/categories", get(routes::categories))
        .route("/api/suggestions", get(routes::suggestions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const WORKFLOWS: &[(&str, &str)] = &[
        (
            "1_Slack_Alerts.json",
            r#"{"name": "Slack Alerts", "nodes": [
                {"type": "n8n-nodes-base.webhook"},
                {"type": "n8n-nodes-base.slack"}
            ]}"#,
        ),
        (
            "2_Nightly_Report.json",
            r#"{"name": "Nightly Report", "active": true, "nodes": [
                {"type": "n8n-nodes-base.cron"},
                {"type": "n8n-nodes-base.github"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.slack"}
            ]}"#,
        ),
        (
            "3_Manual_Cleanup.json",
            r#"{"name": "Manual Cleanup", "nodes": [
                {"type": "n8n-nodes-base.manualTrigger"},
                {"type": "n8n-nodes-base.postgres"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"},
                {"type": "n8n-nodes-base.set"}
            ]}"#,
        ),
    ];

    fn app() -> (TempDir, Router) {
        let dir = TempDir::new().expect("tempdir");
        for (name, body) in WORKFLOWS {
            fs::write(dir.path().join(name), body).expect("write");
        }
        let config = ServerConfig {
            workflows_dir: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let state = AppState::from_config(&config);
        state.catalog.rebuild().expect("rebuild");
        (dir, router(Arc::new(state)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    fn filenames(body: &Value) -> Vec<&str> {
        body["workflows"]
            .as_array()
            .expect("workflows")
            .iter()
            .map(|w| w["sourceFilename"].as_str().expect("filename"))
            .collect()
    }

    #[tokio::test]
    async fn trigger_filter_returns_one_record_with_facets() {
        let (_dir, app) = app();
        let (status, body) = get_json(app, "/api/workflows?trigger=scheduled").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(filenames(&body), vec!["2_Nightly_Report.json"]);
        assert_eq!(body["total"], 1);
        assert_eq!(body["hasMore"], false);
        assert_eq!(body["facets"]["complexity"], serde_json::json!({"complex": 1}));
    }

    #[tokio::test]
    async fn unfiltered_listing_keeps_store_order() {
        let (_dir, app) = app();
        let (status, body) = get_json(app, "/api/workflows").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            filenames(&body),
            vec!["1_Slack_Alerts.json", "2_Nightly_Report.json", "3_Manual_Cleanup.json"]
        );
        assert_eq!(body["limit"], 50);
        assert_eq!(body["facets"]["activeStatus"]["active"], 2);
        assert_eq!(body["facets"]["activeStatus"]["inactive"], 1);
    }

    #[tokio::test]
    async fn text_search_and_paging() {
        let (_dir, app) = app();
        let (_, body) = get_json(app.clone(), "/api/workflows?q=slack").await;
        assert_eq!(body["total"], 2);

        let (_, body) = get_json(app, "/api/workflows?q=slack&page=2&per_page=1").await;
        assert_eq!(body["workflows"].as_array().expect("array").len(), 1);
        assert_eq!(body["offset"], 1);
        assert_eq!(body["hasMore"], false);
    }

    #[tokio::test]
    async fn unknown_filter_value_matches_nothing() {
        let (_dir, app) = app();
        let (status, body) = get_json(app, "/api/workflows?complexity=huge").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn malformed_parameter_is_bad_request() {
        let (_dir, app) = app();
        let (status, body) = get_json(app, "/api/workflows?limit=many").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().expect("message").contains("limit"));
    }

    #[tokio::test]
    async fn workflow_lookup() {
        let (_dir, app) = app();
        let (status, body) = get_json(app.clone(), "/api/workflows/3_Manual_Cleanup.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["displayName"], "Manual Cleanup");
        assert_eq!(body["triggerType"], "manual");
        assert_eq!(body["active"], false);

        let (status, _) = get_json(app, "/api/workflows/9_Missing.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn aggregate_routes() {
        let (_dir, app) = app();

        let (_, stats) = get_json(app.clone(), "/api/stats").await;
        assert_eq!(stats["total"], 3);
        assert_eq!(stats["totalNodes"], 17);
        assert_eq!(stats["triggers"]["scheduled"], 1);

        let (_, integrations) = get_json(app.clone(), "/api/integrations").await;
        assert_eq!(integrations[0]["name"], "Slack");
        assert_eq!(integrations[0]["count"], 2);

        let (_, categories) = get_json(app.clone(), "/api/categories").await;
        assert_eq!(categories[0]["name"], "Trigger");

        let (_, suggestions) = get_json(app, "/api/suggestions?limit=2").await;
        assert_eq!(
            suggestions,
            serde_json::json!(["n8n-nodes-base.webhook", "n8n-nodes-base.slack"])
        );
    }
}

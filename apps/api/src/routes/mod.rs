pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers;
use crate::details::handlers as details;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/options", get(handlers::handle_options))
        .route(
            "/api/v1/entries",
            get(handlers::handle_list_entries).post(handlers::handle_create_entry),
        )
        .route(
            "/api/v1/entries/:id",
            get(handlers::handle_get_entry)
                .put(handlers::handle_update_entry)
                .delete(handlers::handle_delete_entry),
        )
        .route("/api/v1/entries/:id/link", get(handlers::handle_open_link))
        // Details panel
        .route(
            "/api/v1/details",
            get(details::handle_get_details).delete(details::handle_close_details),
        )
        .route("/api/v1/details/analysis", post(details::handle_analyze))
        .route("/api/v1/details/:id", post(details::handle_open_details))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::seed::seed_entries;
    use crate::catalog::snapshot::SnapshotStore;
    use crate::catalog::store::Catalog;
    use crate::enrichment::testing::StubEnricher;
    use crate::models::entry::EntryMetadata;

    fn dune_metadata() -> EntryMetadata {
        EntryMetadata {
            year: Some(2021),
            director: Some("Denis Villeneuve".to_string()),
            genre: Some(vec!["科幻".to_string()]),
            synopsis: Some("贵族之子保罗前往沙漠星球。".to_string()),
            style_keywords: Some(vec![
                "宏大".to_string(),
                "沙漠".to_string(),
                "史诗".to_string(),
            ]),
            system_notes: Some("检测到香料信号。".to_string()),
        }
    }

    fn spawn_app() -> (Router, Arc<StubEnricher>) {
        spawn_app_with(None)
    }

    fn spawn_app_with(snapshots: Option<SnapshotStore>) -> (Router, Arc<StubEnricher>) {
        let (app, _, enricher) = spawn_app_with_state(snapshots);
        (app, enricher)
    }

    fn spawn_app_with_state(
        snapshots: Option<SnapshotStore>,
    ) -> (Router, AppState, Arc<StubEnricher>) {
        let enricher = Arc::new(StubEnricher::new(dune_metadata()));
        let catalog = Catalog::from_parts(seed_entries(), 1);
        let state = AppState::new(catalog, enricher.clone(), snapshots);
        (build_router(state.clone()), state, enricher)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        };
        app.clone().oneshot(request.unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        }
    }

    fn group_keys(view: &Value) -> Vec<String> {
        view["groups"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["key"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = spawn_app();
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_options_list_genres_and_countries() {
        let (app, _) = spawn_app();
        let body = json_body(send(&app, Method::GET, "/api/v1/options", None).await).await;
        assert_eq!(body["genres"].as_array().unwrap().len(), 16);
        assert_eq!(body["countries"][0], "美国");
    }

    #[tokio::test]
    async fn test_search_groups_by_title_initial() {
        let (app, _) = spawn_app();
        let response = send(&app, Method::GET, "/api/v1/entries?q=VilleNeuve", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let view = json_body(response).await;
        assert_eq!(view["total"], 2);
        assert_eq!(group_keys(&view), vec!["A", "B"]);
        assert_eq!(view["groups"][0]["entries"][0]["title"], "Arrival");
        assert_eq!(view["groups"][1]["entries"][0]["title"], "Blade Runner 2049");
    }

    #[tokio::test]
    async fn test_genre_filter() {
        let (app, _) = spawn_app();
        // 动作
        let uri = "/api/v1/entries?genre=%E5%8A%A8%E4%BD%9C";
        let view = json_body(send(&app, Method::GET, uri, None).await).await;
        assert_eq!(view["total"], 1);
        assert_eq!(view["groups"][0]["entries"][0]["id"], "M004");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_without_scanning() {
        let (app, enricher) = spawn_app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "   " })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(enricher.metadata_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_while_scanning_is_conflict() {
        let (app, state, enricher) = spawn_app_with_state(None);
        let guard = state.try_begin_ingest().unwrap();

        let response = send(
            &app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "Dune" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["error"]["code"], "CONFLICT");
        assert_eq!(enricher.metadata_calls(), 0);

        drop(guard);
        let response = send(
            &app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "Dune" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_fills_blank_fields_from_metadata() {
        let (app, enricher) = spawn_app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "Dune", "link": "", "country": "", "genres": [] })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let entry = json_body(response).await;
        assert_eq!(entry["id"], "M009");
        assert_eq!(entry["year"], 2021);
        assert_eq!(entry["director"], "Denis Villeneuve");
        assert_eq!(entry["genre"], json!(["科幻"]));
        assert_eq!(entry["styleKeywords"], json!(["宏大", "沙漠", "史诗"]));
        assert_eq!(entry["link"], "#");
        assert_eq!(entry["country"], "未知");
        assert_eq!(enricher.metadata_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_prefers_manual_genres() {
        let (app, _) = spawn_app();
        let entry = json_body(
            send(
                &app,
                Method::POST,
                "/api/v1/entries",
                Some(json!({ "title": "Dune", "genres": ["动作"] })),
            )
            .await,
        )
        .await;
        assert_eq!(entry["genre"], json!(["动作"]));
    }

    #[tokio::test]
    async fn test_created_entry_appears_in_view() {
        let (app, _) = spawn_app();
        send(
            &app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "Dune" })),
        )
        .await;

        let view = json_body(send(&app, Method::GET, "/api/v1/entries?q=villeneuve", None).await).await;
        assert_eq!(view["total"], 3);
        assert_eq!(group_keys(&view), vec!["A", "B", "D"]);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let (app, _) = spawn_app();
        let mut record = json_body(send(&app, Method::GET, "/api/v1/entries/M007", None).await).await;
        record["title"] = json!("Сталкер");

        let response = send(&app, Method::PUT, "/api/v1/entries/M007", Some(record)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let entry = json_body(send(&app, Method::GET, "/api/v1/entries/M007", None).await).await;
        assert_eq!(entry["title"], "Сталкер");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_silent_noop() {
        let (app, _) = spawn_app();
        let mut record = json_body(send(&app, Method::GET, "/api/v1/entries/M001", None).await).await;
        record["title"] = json!("Ghost");

        let response = send(&app, Method::PUT, "/api/v1/entries/M999", Some(record)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let view = json_body(send(&app, Method::GET, "/api/v1/entries", None).await).await;
        assert_eq!(view["total"], 8);
        let response = send(&app, Method::GET, "/api/v1/entries/M999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_trims_title() {
        let (app, _) = spawn_app();
        let mut record = json_body(send(&app, Method::GET, "/api/v1/entries/M001", None).await).await;
        record["title"] = json!("  zed");

        let response = send(&app, Method::PUT, "/api/v1/entries/M001", Some(record)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let entry = json_body(send(&app, Method::GET, "/api/v1/entries/M001", None).await).await;
        assert_eq!(entry["title"], "zed");
        let view = json_body(send(&app, Method::GET, "/api/v1/entries?q=zed", None).await).await;
        assert_eq!(group_keys(&view), vec!["Z"]);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_genre() {
        let (app, _) = spawn_app();
        let original = json_body(send(&app, Method::GET, "/api/v1/entries/M001", None).await).await;
        let mut record = original.clone();
        record["genre"] = json!([]);

        let response = send(&app, Method::PUT, "/api/v1/entries/M001", Some(record)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");

        let entry = json_body(send(&app, Method::GET, "/api/v1/entries/M001", None).await).await;
        assert_eq!(entry["genre"], original["genre"]);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let (app, _) = spawn_app();
        let mut record = json_body(send(&app, Method::GET, "/api/v1/entries/M001", None).await).await;
        record["title"] = json!("");

        let response = send(&app, Method::PUT, "/api/v1/entries/M001", Some(record)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (app, _) = spawn_app();

        let response = send(&app, Method::DELETE, "/api/v1/entries/M999", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::DELETE, "/api/v1/entries/M003", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, Method::DELETE, "/api/v1/entries/M003", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let view = json_body(send(&app, Method::GET, "/api/v1/entries", None).await).await;
        assert_eq!(view["total"], 7);
    }

    #[tokio::test]
    async fn test_open_link_redirects_or_noops() {
        let (app, _) = spawn_app();

        let response = send(&app, Method::GET, "/api/v1/entries/M001/link", None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://drive.google.com/drive"
        );

        let created = json_body(
            send(
                &app,
                Method::POST,
                "/api/v1/entries",
                Some(json!({ "title": "Dune" })),
            )
            .await,
        )
        .await;
        let uri = format!("/api/v1/entries/{}/link", created["id"].as_str().unwrap());
        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, "/api/v1/entries/M999/link", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_details_panel_flow() {
        let (app, enricher) = spawn_app();

        let response = send(&app, Method::GET, "/api/v1/details", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let opened = json_body(send(&app, Method::POST, "/api/v1/details/M002", None).await).await;
        assert_eq!(opened["entry"]["title"], "Arrival");
        assert!(opened["analysis"].is_null());

        let analyzed =
            json_body(send(&app, Method::POST, "/api/v1/details/analysis", None).await).await;
        assert_eq!(analyzed["entryId"], "M002");
        assert_eq!(analyzed["applied"], true);
        assert_eq!(
            analyzed["analysis"]["riskAssessment"],
            enricher.analysis().risk_assessment.as_str()
        );

        let details = json_body(send(&app, Method::GET, "/api/v1/details", None).await).await;
        assert_eq!(
            details["analysis"]["visualMotifs"],
            json!(enricher.analysis().visual_motifs)
        );

        // Opening another entry discards the analysis.
        let opened = json_body(send(&app, Method::POST, "/api/v1/details/M001", None).await).await;
        assert!(opened["analysis"].is_null());
        let details = json_body(send(&app, Method::GET, "/api/v1/details", None).await).await;
        assert!(details["analysis"].is_null());

        let response = send(&app, Method::DELETE, "/api/v1/details", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, Method::POST, "/api/v1/details/analysis", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(enricher.analysis_calls(), 1);
    }

    #[tokio::test]
    async fn test_open_details_for_unknown_entry() {
        let (app, _) = spawn_app();
        let response = send(&app, Method::POST, "/api/v1/details/M999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleting_open_entry_closes_panel() {
        let (app, _) = spawn_app();
        send(&app, Method::POST, "/api/v1/details/M005", None).await;
        send(&app, Method::DELETE, "/api/v1/entries/M005", None).await;

        let response = send(&app, Method::GET, "/api/v1/details", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mutations_are_written_to_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let (app, _) = spawn_app_with(Some(SnapshotStore::new(&path)));

        send(
            &app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "Dune" })),
        )
        .await;
        send(&app, Method::DELETE, "/api/v1/entries/M001", None).await;

        let restored = SnapshotStore::new(&path).load().unwrap().unwrap();
        assert!(restored.get("M009").is_some());
        assert!(restored.get("M001").is_none());
        assert_eq!(restored.next_seq(), 10);
    }
}

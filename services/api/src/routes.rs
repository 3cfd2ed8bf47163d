use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use climate_actions::catalog::StatusLedger;
use climate_actions::dashboard::{catalog_router, CatalogService};
use climate_actions::sources::ActionSource;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_catalog_routes<S, L>(service: Arc<CatalogService<S, L>>) -> axum::Router
where
    S: ActionSource + 'static,
    L: StatusLedger + 'static,
{
    catalog_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryStatusLedger;
    use axum::body::Body;
    use axum::http::Request;
    use climate_actions::loader::Loader;
    use climate_actions::sources::SnapshotSource;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    const SNAPSHOT: &str = r#"[
        {"id":"serra-01","city":"Serra","country":"Brazil","actionName":"Landfill gas capture",
         "category":"Mitigation","sector":"Waste","costTier":"High","status":"Not started",
         "description":"Capture methane","lastUpdated":"2025-01-10"},
        {"id":"recife-01","city":"Recife","country":"Brazil","actionName":"Mangrove restoration",
         "category":"Adaptation","sector":"AFOLU","costTier":"Low","status":"In progress",
         "description":"Restore mangroves","lastUpdated":"2025-02-01"}
    ]"#;

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    fn router(dir: &tempfile::TempDir) -> axum::Router {
        let path = dir.path().join("actions.json");
        std::fs::write(&path, SNAPSHOT).expect("write snapshot");
        let service = CatalogService::new(
            Loader::new(SnapshotSource::new(path)),
            Arc::new(InMemoryStatusLedger::default()),
        );
        with_catalog_routes(Arc::new(service)).layer(Extension(app_state(true)))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = readiness_endpoint(Extension(app_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], "initializing");
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let response = router(&dir)
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn status_update_is_visible_on_next_read() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = router(&dir);

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/update-status")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"actionId":"serra-01","newStatus":"Ready to start"}"#,
                    ))
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let ack = read_json_body(response).await;
        assert_eq!(ack, json!({ "success": true, "message": "Status updated successfully" }));

        let response = app
            .oneshot(Request::get("/api/actions").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        let records = read_json_body(response).await;
        assert_eq!(records[0]["id"], "serra-01");
        assert_eq!(records[0]["status"], "Ready to start");
        assert_eq!(records[0]["status_history"][0]["status"], "Ready to start");
    }
}

use std::sync::Arc;

use axum::{
    extract::{Query, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::service::{CatalogService, CatalogServiceError};
use crate::catalog::export::{export_date, ExportFormat};
use crate::catalog::query::from_query_string;
use crate::catalog::status::{StatusLedger, StatusUpdateRequest};
use crate::sources::ActionSource;

const LOAD_FAILED: &str = "Failed to load actions data";
const UPDATE_FAILED: &str = "Failed to update status";
const EXPORT_FAILED: &str = "Failed to export actions data";

/// Router builder exposing the dashboard's read, update and export endpoints.
pub fn catalog_router<S, L>(service: Arc<CatalogService<S, L>>) -> Router
where
    S: ActionSource + 'static,
    L: StatusLedger + 'static,
{
    Router::new()
        .route("/api/actions", get(actions_handler::<S, L>))
        .route("/api/update-status", post(update_status_handler::<S, L>))
        .route("/api/actions/summary", get(summary_handler::<S, L>))
        .route("/api/actions/export", get(export_handler::<S, L>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportParams {
    #[serde(default)]
    format: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn actions_handler<S, L>(
    State(service): State<Arc<CatalogService<S, L>>>,
) -> Response
where
    S: ActionSource + 'static,
    L: StatusLedger + 'static,
{
    match service.actions().await {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(err) => {
            error!(error = %err, "GET /api/actions failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, LOAD_FAILED)
        }
    }
}

pub(crate) async fn update_status_handler<S, L>(
    State(service): State<Arc<CatalogService<S, L>>>,
    axum::Json(request): axum::Json<StatusUpdateRequest>,
) -> Response
where
    S: ActionSource + 'static,
    L: StatusLedger + 'static,
{
    match service.update_status(request, export_date()) {
        Ok(ack) => (StatusCode::OK, axum::Json(ack)).into_response(),
        Err(err) => {
            error!(error = %err, "POST /api/update-status failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED)
        }
    }
}

pub(crate) async fn summary_handler<S, L>(
    State(service): State<Arc<CatalogService<S, L>>>,
    RawQuery(query): RawQuery,
) -> Response
where
    S: ActionSource + 'static,
    L: StatusLedger + 'static,
{
    let criteria = from_query_string(query.as_deref().unwrap_or_default());
    match service.summary(criteria).await {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => {
            error!(error = %err, "GET /api/actions/summary failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, LOAD_FAILED)
        }
    }
}

pub(crate) async fn export_handler<S, L>(
    State(service): State<Arc<CatalogService<S, L>>>,
    Query(params): Query<ExportParams>,
    RawQuery(query): RawQuery,
) -> Response
where
    S: ActionSource + 'static,
    L: StatusLedger + 'static,
{
    let format = match params.format.as_deref() {
        None => ExportFormat::default(),
        Some(raw) => match raw.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        },
    };
    let criteria = from_query_string(query.as_deref().unwrap_or_default());

    match service
        .export(&criteria, format, export_date())
        .await
    {
        Ok(payload) => {
            let headers = [
                (header::CONTENT_TYPE, payload.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", payload.file_name),
                ),
            ];
            (StatusCode::OK, headers, payload.body).into_response()
        }
        Err(err) => {
            error!(error = %err, "GET /api/actions/export failed");
            let message = match err {
                CatalogServiceError::Export(_) => EXPORT_FAILED,
                _ => LOAD_FAILED,
            };
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

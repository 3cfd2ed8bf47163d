use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryStatusLedger};
use crate::routes::with_catalog_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use climate_actions::config::AppConfig;
use climate_actions::dashboard::CatalogService;
use climate_actions::error::AppError;
use climate_actions::loader::Loader;
use climate_actions::sources::{FallbackSource, SheetsSource, SnapshotSource};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sheets = SheetsSource::with_timeout(&config.data.sheets, config.data.request_timeout)?;
    if !sheets.is_configured() {
        warn!("Google Sheets credentials missing; serving the static snapshot");
    }
    let snapshot = SnapshotSource::new(config.data.snapshot_path.clone());
    let loader = Loader::new(FallbackSource::new(sheets, snapshot));

    let ledger = Arc::new(InMemoryStatusLedger::default());
    let catalog_service = Arc::new(CatalogService::new(loader, ledger));

    let app = with_catalog_routes(catalog_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "climate action dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}

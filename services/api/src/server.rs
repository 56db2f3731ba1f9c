use crate::cli::ServeArgs;
use crate::infra::{load_query_service, AppState};
use crate::routes::with_registry_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use operator_registry::config::AppConfig;
use operator_registry::error::AppError;
use operator_registry::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.dataset.take() {
        config.dataset.path = path;
    }

    telemetry::init(&config.telemetry)?;

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let query_service = Arc::new(load_query_service(&config.dataset, as_of));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_registry_routes(query_service.clone())
        .layer(Extension(app_state))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        available = query_service.is_available(),
        "operator registry ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

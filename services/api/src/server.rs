use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::advisor_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use carmatch::config::AppConfig;
use carmatch::error::AppError;
use carmatch::gateway::CandidateGateway;
use carmatch::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let gateway = Arc::new(CandidateGateway::new(&config.gateway)?);

    let app = advisor_router(gateway)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vehicle purchase advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

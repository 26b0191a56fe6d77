use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemorySessionRepository};
use crate::routes::with_advisor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use stack_advisor::advisor::sessions::{AdvisorSessionService, SessionRepository};
use stack_advisor::config::AppConfig;
use stack_advisor::error::AppError;
use stack_advisor::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

fn idle_limit() -> chrono::Duration {
    chrono::Duration::minutes(30)
}

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.catalog.take() {
        config.catalog.path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(config.catalog.path.as_deref())?);
    let stacks = catalog.len();
    let repository = Arc::new(InMemorySessionRepository::default());
    let advisor_service = Arc::new(AdvisorSessionService::new(repository, Arc::clone(&catalog)));

    spawn_idle_sweeper(Arc::clone(&advisor_service));

    let app = with_advisor_routes(advisor_service)
        .layer(Extension(app_state))
        .layer(Extension(catalog))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, stacks, "stack advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_idle_sweeper<R>(service: Arc<AdvisorSessionService<R>>)
where
    R: SessionRepository + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = service.expire_idle(idle_limit()) {
                warn!(error = %err, "idle session sweep failed");
            }
        }
    });
}

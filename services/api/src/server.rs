use crate::cli::ServeArgs;
use crate::infra::{seed_snapshots, AppState, InMemoryPlaceRepository, InMemorySubmissionRepository};
use crate::routes::with_atlas_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use reform_atlas::catalog::ReformTypeCatalog;
use reform_atlas::config::AppConfig;
use reform_atlas::error::AppError;
use reform_atlas::ingest::import_reforms;
use reform_atlas::places::AtlasService;
use reform_atlas::review::ReviewService;
use reform_atlas::telemetry;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = ReformTypeCatalog::standard();
    let repository = Arc::new(load_places(args.data.as_deref(), &catalog)?);
    let atlas_service = Arc::new(AtlasService::new(repository, catalog));
    let review_service = Arc::new(ReviewService::new(Arc::new(
        InMemorySubmissionRepository::default(),
    )));

    let app = with_atlas_routes(atlas_service, review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "reform atlas ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Loads the place dataset from a reform CSV, or falls back to the built-in
/// seed when no path is given.
pub(crate) fn load_places(
    data: Option<&Path>,
    catalog: &ReformTypeCatalog,
) -> Result<InMemoryPlaceRepository, AppError> {
    match data {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            let report = import_reforms(file, catalog)?;
            if report.skipped_rows > 0 || !report.unknown_codes.is_empty() {
                warn!(
                    skipped = report.skipped_rows,
                    unknown = report.unknown_codes.len(),
                    "reform csv had unusable rows"
                );
            }
            info!(path = %path.display(), reforms = report.imported.len(), "reform csv loaded");
            Ok(InMemoryPlaceRepository::from_imported(report.imported))
        }
        None => Ok(InMemoryPlaceRepository::new(seed_snapshots())),
    }
}

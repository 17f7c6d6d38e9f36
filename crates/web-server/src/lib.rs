use axum::{Router, routing::get};
use configuration::{DashboardConfig, Settings};
use dataset::Dataset;
use i18n::Catalog;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

use error::AppError;

/// The shared application state that all handlers can access.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub catalog: Arc<Catalog>,
    pub dashboard: DashboardConfig,
}

impl AppState {
    /// Loads the snapshot and the label catalogue named in the settings.
    pub async fn load(settings: &Settings) -> Result<Self, AppError> {
        let dataset = dataset::load_snapshot(&settings.data.snapshot_path).await?;
        let catalog = Catalog::load(settings.data.locales_dir.as_deref())?;
        Ok(Self {
            dataset: Arc::new(dataset),
            catalog: Arc::new(catalog),
            dashboard: settings.dashboard.clone(),
        })
    }
}

/// Defines the application routes.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/fund-types", get(handlers::get_fund_types))
        .route("/api/managers", get(handlers::get_managers))
        .route("/api/periods", get(handlers::get_periods))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::load(settings).await?;
    tracing::info!(
        observations = state.dataset.len(),
        fund_types = state.dataset.fund_types().len(),
        "Dataset loaded."
    );
    serve(settings.server.address().parse::<SocketAddr>()?, state).await
}

/// Serves an already loaded state.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use axum::{Router, routing::get};
use chrono::{NaiveDate, Utc};
use configuration::Config;
use core_types::ClassifierId;
use engine::AnalysisService;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub service: AnalysisService,
    /// The classifier used when a request does not name one.
    pub classifier: ClassifierId,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(service: AnalysisService, classifier: ClassifierId) -> Self {
        Self {
            service,
            classifier,
            fixed_today: None,
        }
    }

    /// Pins "today" instead of reading the clock on every request.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Read once per request.
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Builds the application routes around `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/stock/:ticker", get(handlers::get_stock))
        .route("/api/stock/:ticker/insights", get(handlers::get_insights))
        .route("/api/stock/:ticker/backtest", get(handlers::get_backtest))
        .route("/api/compare", get(handlers::get_comparison))
        .route("/api/moon-phase/:date", get(handlers::get_moon_phase))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    // Tracing is initialized by the binary, not here.
    let service = AnalysisService::from_config(&config)?;
    let state = Arc::new(AppState::new(service, config.analysis.classifier));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Web server started and listening.");
    axum::serve(listener, app).await?;

    Ok(())
}

//! Pose Evaluation API Server
//!
//! REST service for batch clip grading and streaming pose sessions.

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;

pub use config::{ApiConfig, LogFormat};
pub use error::ApiError;
pub use rate_limit::{create_governor_config, RateLimitConfig};

use activity::ActivityRegistry;
use realtime::{RealtimeEvaluator, RealtimeSession};
use sequence::SequencePreprocessor;

/// Shared handle passed to every handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Application state shared across handlers
pub struct AppState {
    pub config: ApiConfig,
    pub registry: Arc<ActivityRegistry>,
    pub preprocessor: Arc<SequencePreprocessor>,
    pub realtime: RealtimeEvaluator,
    /// Each stream owns its carry behind its own lock
    pub sessions: HashMap<Uuid, Arc<Mutex<RealtimeSession>>>,
    /// Prometheus renderer, absent when no recorder was installed
    pub metrics: Option<PrometheusHandle>,
    pub version: String,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ApiConfig) -> Self {
        let registry = Arc::new(ActivityRegistry::with_squat_thresholds(config.squat.clone()));
        Self {
            preprocessor: Arc::new(SequencePreprocessor::new(registry.clone(), config.engine.clone())),
            realtime: RealtimeEvaluator::new(registry.clone(), config.realtime.clone()),
            registry,
            sessions: HashMap::new(),
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            config,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

/// Create the application router
pub fn create_router(state: SharedState, rate_limit: &RateLimitConfig) -> Router {
    let evaluation = Router::new()
        .route("/api/v1/evaluate", post(routes::evaluate::post_evaluate))
        .route("/api/v1/summary", post(routes::evaluate::post_summary))
        .route("/api/v1/analysis-request", post(routes::evaluate::post_analysis_request))
        .route("/api/v1/sessions", post(routes::sessions::create_session))
        .route(
            "/api/v1/sessions/:id",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .route("/api/v1/sessions/:id/frames", post(routes::sessions::push_frame))
        .route("/api/v1/sessions/:id/reset", post(routes::sessions::reset_session));

    let evaluation = match create_governor_config(rate_limit) {
        Some(config) => evaluation.layer(GovernorLayer { config }),
        None => evaluation,
    };

    Router::new()
        .route("/api/v1/health", get(routes::health::get_health))
        .route("/api/v1/activities", get(routes::activities::get_activities))
        .route("/metrics", get(metrics_handler))
        .merge(evaluation)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<SharedState>) -> String {
    let state = state.read().await;
    state.metrics.as_ref().map(PrometheusHandle::render).unwrap_or_default()
}

/// Initialize logging
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let level = Level::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", level);
        Level::INFO
    });
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(true);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

/// Run the server
pub async fn run_server(config: ApiConfig) -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    let addr: SocketAddr = config.bind_addr.parse()?;
    let body_limit = config.max_body_bytes;
    let rate_limit = config.rate_limit.clone();
    if !rate_limit.enabled {
        warn!("Rate limiting disabled");
    }

    let state = AppState::new(config).with_metrics(handle).shared();
    let app = create_router(state, &rate_limit).layer(DefaultBodyLimit::max(body_limit));

    info!("Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

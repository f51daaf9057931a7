//! QuickPoll web front
//!
//! Serves the polls site:
//! - Paginated question listing with HTMX fragment loading
//! - Question detail, voting and results
//! - Keyword search with live HTMX results
//! - Health and readiness probes

pub mod handlers;
pub mod middleware;
pub mod views;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use quickpoll_common::{
    config::AppConfig,
    db::{DbPool, Repository},
    errors::Result,
    polls::SearchService,
};
use std::sync::Arc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repo: Repository,
    pub search: SearchService,
}

impl AppState {
    /// Connect to the database and assemble the services
    pub async fn new(config: AppConfig) -> Result<Self> {
        let db = DbPool::new(&config.database).await?;
        Ok(Self::with_pool(config, db))
    }

    pub fn with_pool(config: AppConfig, db: DbPool) -> Self {
        let repo = Repository::new(db);
        let search = SearchService::new(&config.polls, repo.clone());

        Self {
            config: Arc::new(config),
            repo,
            search,
        }
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let mut app = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Polls
        .route("/", get(handlers::polls::root))
        .route("/polls/", get(handlers::polls::index))
        .route("/polls/search/", get(handlers::search::search))
        .route("/polls/{question_id}/", get(handlers::polls::detail))
        .route("/polls/{question_id}/results/", get(handlers::polls::results))
        .route("/polls/{question_id}/vote/", post(handlers::polls::vote))

        .layer(axum::middleware::from_fn(middleware::metrics::track_metrics));

    let limits = &state.config.rate_limit;
    if limits.enabled {
        match middleware::rate_limit::create_rate_limiter(limits.requests_per_second, limits.burst) {
            Some(limiter) => {
                info!(
                    requests_per_second = limits.requests_per_second,
                    burst = limits.burst,
                    "Rate limiting enabled"
                );
                app = app.layer(axum::middleware::from_fn_with_state(
                    limiter,
                    middleware::rate_limit::rate_limit_middleware,
                ));
            }
            None => tracing::warn!("Rate limiting enabled with a zero limit; leaving it off"),
        }
    }

    app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        state.config.request_timeout(),
    ))
        .layer(TraceLayer::new_for_http())
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

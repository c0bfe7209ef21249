use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{MethodRouter, get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod actors;
mod error;
pub mod extract;
mod feedback;
mod movies;
mod observability;
mod reference;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{CatalogService, FeedbackService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn catalog_service(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog_service
    }

    #[must_use]
    pub fn feedback_service(&self) -> &Arc<dyn FeedbackService> {
        &self.shared.feedback_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router())
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Registers `path` both with and without a trailing slash.
fn both(
    router: Router<Arc<AppState>>,
    path: &str,
    handler: MethodRouter<Arc<AppState>>,
) -> Router<Arc<AppState>> {
    let trimmed = path.trim_end_matches('/');
    router
        .route(trimmed, handler.clone())
        .route(&format!("{trimmed}/"), handler)
}

fn api_router() -> Router<Arc<AppState>> {
    let mut router = Router::new().route("/health", get(system::health));

    router = both(router, "/movie", get(movies::list_movies));
    router = both(router, "/movie/{key}", get(movies::get_movie));
    router = both(router, "/review", post(feedback::create_review));
    router = both(router, "/rating", post(feedback::create_rating));
    router = both(router, "/actor", get(actors::list_actors));
    router = both(router, "/actor/{id}", get(actors::get_actor));
    router = both(router, "/category", get(reference::list_categories));
    router = both(router, "/genre", get(reference::list_genres));
    router = both(router, "/star", get(reference::list_rating_stars));

    router
}

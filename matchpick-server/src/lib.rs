//! matchpick-server library - ranked upcoming matches over HTTP
//!
//! Serves the ranking endpoints, the demo upload path and the single-page
//! client that renders the daily picks.

use std::sync::Arc;

use axum::Router;
use matchpick_common::ranking::RankingService;
use matchpick_common::store::FallbackStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Source selection and scoring
    pub ranking: Arc<RankingService>,
    /// Catalog file, target of demo uploads
    pub store: FallbackStore,
}

impl AppState {
    /// Create state serving the catalog held in `store`
    pub fn new(store: FallbackStore) -> Self {
        Self {
            ranking: Arc::new(RankingService::with_store(store.clone())),
            store,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/top-matches", get(api::top_matches))
        .route("/daily-picks", get(api::daily_picks))
        .route("/upload-demo", post(api::upload_demo))
        .route("/build_info", get(api::get_build_info));

    let ui = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(ui)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

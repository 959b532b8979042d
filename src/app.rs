use axum::{
    Router,
    extract::FromRef,
    http::{Method, header},
    middleware,
    routing::get,
};
use time::Duration;
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::{config::Config, db::DbPool, handlers, utils::logging::log_requests};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub bcrypt_cost: u32,
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn build_app(state: AppState, config: &Config) -> Router {
    // Sessions configuration
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::hours(config.session_ttl_hours)))
        .with_secure(config.session_secure);

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/auth", handlers::auth::auth_router(state.clone()))
        .merge(handlers::cards::cards_router(state.clone()))
        .merge(handlers::confidence_levels::confidence_levels_router(state.clone()))
        .merge(handlers::review_schedules::review_schedules_router(state))
        .layer(session_layer)
        .layer(cors)
        .layer(middleware::from_fn(log_requests))
}

pub mod health_service;
pub mod items_service;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::ItemRepository;
use crate::storage::StorageBackend;

/// Shared resources injected into every handler at startup.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub storage: Arc<dyn StorageBackend>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_service::health_check))
        .route(
            "/api/items",
            get(items_service::list_items).post(items_service::create_item),
        )
        .route(
            "/api/items/:id",
            put(items_service::update_item).delete(items_service::delete_item),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

//! HTTP service that stores the weather app's favorite cities.
//!
//! Layers, from the outside in:
//! - `routes`: axum handlers and the JSON envelope
//! - `service`: name validation and id-or-name resolution
//! - `repository`: SQLite storage, where the `UNIQUE` constraint keeps names unique

pub mod config;
pub mod database;
pub mod error;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::{Router, http::HeaderValue};
use sqlx::SqlitePool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::repository::SqliteFavoritesRepository;
use crate::service::FavoritesService;

pub struct AppState {
    pub favorites: FavoritesService,
}

impl AppState {
    pub fn from_pool(pool: SqlitePool) -> Self {
        let repository = Arc::new(SqliteFavoritesRepository::new(pool));
        Self {
            favorites: FavoritesService::new(repository),
        }
    }
}

/// Full application router with CORS and request tracing.
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    routes::routes(Arc::new(state))
        .layer(cors_layer(allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

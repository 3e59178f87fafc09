//! HTTP handlers and router for the favorites API.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{delete, get},
};
use chrono::Utc;
use serde_json::{Value, json};
use weather_core::model::{
    AddFavoriteRequest, AddFavoriteResponse, CheckFavoriteResponse, FavoritesListResponse,
    HealthResponse, RemoveFavoriteResponse,
};

use crate::AppState;
use crate::error::{AppError, Result};

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .route("/api/favorites", get(list_favorites).post(add_favorite))
        .route("/api/favorites/check/{name}", get(check_favorite))
        .route("/api/favorites/city/{name}", delete(remove_favorite_by_name))
        .route("/api/favorites/{key}", delete(remove_favorite))
        .fallback(unknown_route)
        .with_state(state)
}

/// Service banner with the list of endpoints
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Weather App Backend is running!",
        "endpoints": [
            "GET /api/health",
            "GET /api/favorites",
            "GET /api/favorites/check/{name}",
            "POST /api/favorites",
            "DELETE /api/favorites/{id_or_name}",
            "DELETE /api/favorites/city/{name}"
        ]
    }))
}

/// Liveness; reports database reachability but never fails
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let connected = state.favorites.database_connected().await;
    tracing::debug!(connected, "health check requested");

    Json(HealthResponse {
        success: true,
        message: "API is working!".to_string(),
        timestamp: Utc::now(),
        database: Some(if connected { "Connected" } else { "Unavailable" }.to_string()),
    })
}

async fn list_favorites(State(state): State<Arc<AppState>>) -> Result<Json<FavoritesListResponse>> {
    let favorites = state.favorites.list().await?;

    Ok(Json(FavoritesListResponse {
        success: true,
        count: favorites.len(),
        favorites,
    }))
}

async fn check_favorite(
    State(state): State<Arc<AppState>>,
    name: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<CheckFavoriteResponse>> {
    let name = path_param(name)?;
    let is_favorite = state.favorites.check_exists(&name).await?;

    Ok(Json(CheckFavoriteResponse {
        success: true,
        is_favorite,
    }))
}

async fn add_favorite(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddFavoriteResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected add favorite body");
        AppError::Validation("City name is required and must be a valid string".to_string())
    })?;

    let favorite = state.favorites.add(&request.city).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddFavoriteResponse {
            success: true,
            message: format!("{} added to favorites!", favorite.city),
            id: favorite.id,
            city: favorite.city,
        }),
    ))
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    key: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<RemoveFavoriteResponse>> {
    let key = path_param(key)?;
    state.favorites.remove(&key).await?;
    Ok(removed())
}

async fn remove_favorite_by_name(
    State(state): State<Arc<AppState>>,
    name: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<RemoveFavoriteResponse>> {
    let name = path_param(name)?;
    state.favorites.remove_by_name(&name).await?;
    Ok(removed())
}

async fn unknown_route() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

/// Undecodable segments (e.g. `%FF`) become a validation error with the JSON error body.
fn path_param(param: std::result::Result<Path<String>, PathRejection>) -> Result<String> {
    let Path(value) = param.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected path parameter");
        AppError::Validation("City name must be valid UTF-8".to_string())
    })?;
    Ok(value)
}

fn removed() -> Json<RemoveFavoriteResponse> {
    Json(RemoveFavoriteResponse {
        success: true,
        message: "Favorite removed successfully".to_string(),
    })
}

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{
    AddFavoriteRequest, AddFavoriteResponse, CheckFavoriteResponse, ErrorResponse, FavoriteCity,
    FavoritesListResponse, HealthResponse, RemoveFavoriteResponse,
};

pub mod toggle;

pub use toggle::{FavoriteState, FavoriteToggle, Notice, NoticeLevel, ToggleOutcome};

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Favorites service error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Failed to reach favorites service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from favorites service: {0}")]
    Malformed(String),
}

impl FavoritesError {
    /// Build the error for a non-success status from the service's error body.
    fn from_status(status: StatusCode, body: Option<ErrorResponse>) -> Self {
        let (error, message) = match body {
            Some(body) => (body.error, body.message),
            None => (
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
                None,
            ),
        };

        match status {
            StatusCode::BAD_REQUEST => FavoritesError::Validation(error),
            // The conflict message names the city ("Paris is already in your favorites!").
            StatusCode::CONFLICT => FavoritesError::Conflict(message.unwrap_or(error)),
            StatusCode::NOT_FOUND => FavoritesError::NotFound(error),
            other => FavoritesError::Server {
                status: other.as_u16(),
                message: error,
            },
        }
    }
}

/// HTTP client for the favorites service.
#[derive(Debug, Clone)]
pub struct FavoritesClient {
    base_url: String,
    http: Client,
}

impl FavoritesClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthResponse, FavoritesError> {
        let res = self.http.get(self.url("/health")).send().await?;
        parse(res).await
    }

    /// All favorites, most recently added first.
    pub async fn list(&self) -> Result<Vec<FavoriteCity>, FavoritesError> {
        let res = self.http.get(self.url("/favorites")).send().await?;
        let body: FavoritesListResponse = parse(res).await?;
        Ok(body.favorites)
    }

    pub async fn check(&self, city: &str) -> Result<bool, FavoritesError> {
        let path = format!("/favorites/check/{}", urlencoding::encode(city));
        let res = self.http.get(self.url(&path)).send().await?;
        let body: CheckFavoriteResponse = parse(res).await?;
        Ok(body.is_favorite)
    }

    pub async fn add(&self, city: &str) -> Result<AddFavoriteResponse, FavoritesError> {
        let res = self
            .http
            .post(self.url("/favorites"))
            .json(&AddFavoriteRequest {
                city: city.to_string(),
            })
            .send()
            .await?;
        parse(res).await
    }

    /// Remove by city name. Returns the service's confirmation message.
    ///
    /// Goes through the name-only route so a numeric city name is never read as an id.
    pub async fn remove(&self, city: &str) -> Result<String, FavoritesError> {
        let path = format!("/favorites/city/{}", urlencoding::encode(city));
        let res = self.http.delete(self.url(&path)).send().await?;
        let body: RemoveFavoriteResponse = parse(res).await?;
        Ok(body.message)
    }
}

async fn parse<T: DeserializeOwned>(res: Response) -> Result<T, FavoritesError> {
    let status = res.status();
    let bytes = res.bytes().await?;

    if !status.is_success() {
        let body = serde_json::from_slice::<ErrorResponse>(&bytes).ok();
        let err = FavoritesError::from_status(status, body);
        tracing::debug!(status = status.as_u16(), error = %err, "favorites request failed");
        return Err(err);
    }

    serde_json::from_slice(&bytes).map_err(|e| FavoritesError::Malformed(e.to_string()))
}

//! Favorites use cases: validation and key resolution on top of the repository.

use std::sync::Arc;

use weather_core::model::FavoriteCity;

use crate::error::{AppError, Result};
use crate::repository::FavoritesRepository;

const MAX_CITY_LEN: usize = 100;

#[derive(Clone)]
pub struct FavoritesService {
    repository: Arc<dyn FavoritesRepository>,
}

impl FavoritesService {
    pub fn new(repository: Arc<dyn FavoritesRepository>) -> Self {
        Self { repository }
    }

    /// Whether the database answers. Never mutates anything.
    pub async fn database_connected(&self) -> bool {
        self.repository.ping().await
    }

    pub async fn list(&self) -> Result<Vec<FavoriteCity>> {
        self.repository.list().await
    }

    pub async fn check_exists(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        self.repository.exists(name).await
    }

    /// Store a new favorite under its trimmed name.
    pub async fn add(&self, name: &str) -> Result<FavoriteCity> {
        let city = validate_city_name(name)?;
        let favorite = self.repository.insert(city).await?;

        tracing::info!(id = favorite.id, city = %favorite.city, "favorite added");
        Ok(favorite)
    }

    /// Remove by numeric id or by name. An id match is tried first.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Validation(
                "Valid favorite id or city name is required".to_string(),
            ));
        }

        if let Ok(id) = key.parse::<i64>() {
            if self.repository.delete_by_id(id).await? > 0 {
                tracing::info!(id, "favorite removed");
                return Ok(());
            }
        }

        self.remove_by_name(key).await
    }

    pub async fn remove_by_name(&self, name: &str) -> Result<()> {
        let city = validate_city_name(name)?;

        if self.repository.delete_by_name(city).await? == 0 {
            tracing::debug!(city, "favorite not found for removal");
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }

        tracing::info!(city, "favorite removed");
        Ok(())
    }
}

/// Trim and check a city name submitted by a client.
pub fn validate_city_name(raw: &str) -> Result<&str> {
    let city = raw.trim();

    if city.is_empty() {
        return Err(AppError::Validation(
            "City name is required and must be a valid string".to_string(),
        ));
    }
    if city.chars().count() > MAX_CITY_LEN {
        return Err(AppError::Validation(format!(
            "City name must be at most {MAX_CITY_LEN} characters"
        )));
    }

    Ok(city)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one city, as returned by a weather provider.
///
/// Snapshots are fetched per lookup and thrown away after rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: String,
}

impl WeatherSnapshot {
    /// Key used for favorites, e.g. "Tokyo, JP".
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

/// A persisted favorite city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub id: i64,
    pub city: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesListResponse {
    pub success: bool,
    pub favorites: Vec<FavoriteCity>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFavoriteResponse {
    pub success: bool,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteResponse {
    pub success: bool,
    pub id: i64,
    pub city: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFavoriteResponse {
    pub success: bool,
    pub message: String,
}

/// Body returned by the favorites service for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_city_and_country() {
        let snapshot = WeatherSnapshot {
            city: "Tokyo".into(),
            country: "JP".into(),
            temperature: 18.2,
            temp_min: 15.0,
            temp_max: 21.0,
            condition: "Clouds".into(),
        };

        assert_eq!(snapshot.display_name(), "Tokyo, JP");
    }

    #[test]
    fn check_response_uses_camel_case_flag() {
        let json = serde_json::to_value(CheckFavoriteResponse {
            success: true,
            is_favorite: true,
        })
        .unwrap();

        assert_eq!(json["isFavorite"], serde_json::Value::Bool(true));
    }

    #[test]
    fn error_response_omits_missing_message() {
        let json = serde_json::to_value(ErrorResponse::new("Favorite not found")).unwrap();

        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert!(json.get("message").is_none());
    }
}

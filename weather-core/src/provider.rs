use crate::{Config, model::WeatherSnapshot, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Why a weather lookup produced no snapshot.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("City not found")]
    NotFound,

    #[error("Invalid API key")]
    Unauthorized,

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Invalid data received: {0}")]
    Malformed(String),

    #[error("Failed to reach weather service: {0}")]
    Transport(#[from] reqwest::Error),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound)
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a city name.
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, LookupError>;
}

/// Construct the configured provider.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::with_base_url(
        api_key,
        config.weather.base_url.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let mut cfg = Config::default();
        cfg.weather.api_key = None;

        // Only meaningful when the environment does not supply a key.
        if std::env::var(crate::config::API_KEY_ENV).is_err() {
            let err = provider_from_config(&cfg).unwrap_err();
            assert!(err.to_string().contains("No OpenWeather API key configured"));
        }
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.weather.api_key = Some("KEY".into());

        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn lookup_error_messages_match_ui_copy() {
        assert_eq!(LookupError::NotFound.to_string(), "City not found");
        assert_eq!(LookupError::Unauthorized.to_string(), "Invalid API key");
        assert_eq!(LookupError::Status(503).to_string(), "HTTP error! status: 503");
    }
}

//! Core library for the `weather` client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather lookup behind a provider trait
//! - Condition classification and the card view model
//! - The debounced search controller
//! - A client for the favorites service and the favorite-toggle flow
//! - Wire models shared with `favorites-server`
//!
//! It is used by `weather-cli`, and `favorites-server` reuses its models.

pub mod condition;
pub mod config;
pub mod favorites;
pub mod model;
pub mod provider;
pub mod render;
pub mod search;

pub use condition::ConditionCategory;
pub use config::Config;
pub use favorites::{FavoriteState, FavoriteToggle, FavoritesClient, FavoritesError};
pub use model::{FavoriteCity, WeatherSnapshot};
pub use provider::{LookupError, WeatherProvider};
pub use render::{WeatherCard, WeatherView};
pub use search::{SearchController, SearchEvent};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, FavoriteToggle, FavoritesClient, WeatherView, provider::provider_from_config,
};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and service URLs.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Tokyo" or "Paris,FR".
        city: String,
    },

    /// Interactive search: type a city and press Enter; `:fav` toggles the favorite.
    Search,

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Check that the favorites service is reachable.
    Health,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorites, newest first.
    List,
    /// Add a city.
    Add { city: String },
    /// Remove a city by name.
    Remove { city: String },
    /// Tell whether a city is a favorite.
    Check { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config)?,
            Command::Show { city } => show(&config, &city).await?,
            Command::Search => session::run(&config).await?,
            Command::Favorites { action } => favorites(&config, action).await?,
            Command::Health => {
                let client = FavoritesClient::new(&config.favorites.base_url);
                let health = client.health().await.with_context(|| {
                    format!(
                        "Favorites service at {} is not reachable",
                        client.base_url()
                    )
                })?;
                println!(
                    "{} (database: {}, at {})",
                    health.message,
                    health.database.as_deref().unwrap_or("unknown"),
                    health.timestamp
                );
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    config.favorites.base_url = Text::new("Favorites service URL:")
        .with_default(&config.favorites.base_url)
        .prompt()?;

    let debounce = Text::new("Search debounce (ms):")
        .with_default(&config.search.debounce_ms.to_string())
        .prompt()?;
    config.search.debounce_ms = debounce
        .trim()
        .parse()
        .with_context(|| format!("Invalid debounce value: {debounce}"))?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(config: &Config, city: &str) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let outcome = provider.current(city.trim()).await;
    let view = WeatherView::from_outcome(city.trim(), &outcome);
    println!("{view}");

    if let Some(card) = view.card() {
        tracing::debug!(
            city = %card.city,
            category = card.category.css_class(),
            "rendered weather card"
        );
        let toggle = FavoriteToggle::new(FavoritesClient::new(&config.favorites.base_url));
        let state = toggle.refresh(&card.city).await;
        println!("{} {}", state.marker(), state.action_hint());
    }

    Ok(())
}

async fn favorites(config: &Config, action: FavoritesAction) -> anyhow::Result<()> {
    let client = FavoritesClient::new(&config.favorites.base_url);

    match action {
        FavoritesAction::List => {
            let favorites = client.list().await?;
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for fav in favorites {
                println!(
                    "{:>4}  {:<30} {}",
                    fav.id,
                    fav.city,
                    fav.added_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        FavoritesAction::Add { city } => {
            let added = client.add(&city).await?;
            println!("{}", added.message);
        }
        FavoritesAction::Remove { city } => {
            println!("{}", client.remove(&city).await?);
        }
        FavoritesAction::Check { city } => {
            let yes = client.check(&city).await?;
            println!(
                "{} is {}a favorite",
                city.trim(),
                if yes { "" } else { "not " }
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_favorites_commands() {
        let cli = Cli::try_parse_from(["weather", "favorites", "add", "Tokyo, JP"]).unwrap();

        match cli.command {
            Command::Favorites {
                action: FavoritesAction::Add { city },
            } => assert_eq!(city, "Tokyo, JP"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["weather", "show"]).is_err());
    }
}

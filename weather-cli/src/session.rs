//! Interactive search session.
//!
//! Each line read from stdin counts as Enter, so lookups go out immediately and
//! a newer line supersedes a lookup still in flight. Results and keyboard input
//! are multiplexed on the single-threaded runtime.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use weather_core::{
    Config, FavoriteState, FavoriteToggle, FavoritesClient, SearchController, WeatherProvider,
    WeatherView,
    favorites::{Notice, NoticeLevel},
    provider::provider_from_config,
};

const HELP: &str = "Type a city and press Enter. Commands: :fav toggle favorite, :list favorites, :quit";

/// The city on screen and its favorite marker.
struct Displayed {
    city: String,
    state: FavoriteState,
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(config)?);
    let mut search = SearchController::new(provider, config.debounce());
    let toggle = FavoriteToggle::new(FavoritesClient::new(&config.favorites.base_url));

    greet(&toggle).await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut displayed: Option<Displayed> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match line.trim() {
                    ":quit" | ":q" => break,
                    ":help" => println!("{HELP}"),
                    ":list" => list_favorites(toggle.client()).await,
                    ":fav" => match displayed.as_mut() {
                        Some(shown) => {
                            let outcome = toggle.activate(&shown.city, shown.state).await;
                            shown.state = outcome.state;
                            print_notice(&outcome.notice);
                            print_marker(shown.state);
                        }
                        None => println!("No city selected"),
                    },
                    text => {
                        if search.on_enter(text).is_some() {
                            println!("{}", WeatherView::Loading);
                        }
                    }
                }
            }
            Some(event) = search.next_event() => {
                let view = WeatherView::from_outcome(&event.query, &event.outcome);
                println!("\n{view}");

                displayed = match view.card() {
                    Some(card) => {
                        tracing::debug!(
                            city = %card.city,
                            category = card.category.css_class(),
                            "rendered weather card"
                        );
                        let state = toggle.refresh(&card.city).await;
                        print_marker(state);
                        Some(Displayed { city: card.city.clone(), state })
                    }
                    None => None,
                };
            }
        }
    }

    search.cancel();
    Ok(())
}

/// Check the favorites service once at startup.
async fn greet(toggle: &FavoriteToggle) {
    let connected = match toggle.client().health().await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "favorites service not reachable");
            false
        }
    };
    print_notice(&connection_notice(connected));
    if !connected {
        return;
    }

    match toggle.client().list().await {
        Ok(favorites) => {
            tracing::debug!(count = favorites.len(), ?favorites, "loaded favorite cities")
        }
        Err(err) => tracing::warn!(error = %err, "failed to load favorites"),
    }
}

fn connection_notice(connected: bool) -> Notice {
    if connected {
        Notice {
            level: NoticeLevel::Info,
            message: "Connected to favorites service".to_string(),
        }
    } else {
        Notice {
            level: NoticeLevel::Warning,
            message: "Backend server not connected".to_string(),
        }
    }
}

async fn list_favorites(client: &FavoritesClient) {
    match client.list().await {
        Ok(favorites) if favorites.is_empty() => println!("No favorites yet."),
        Ok(favorites) => {
            for fav in favorites {
                println!("  ⭐ {}", fav.city);
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to list favorites");
            print_notice(&Notice {
                level: NoticeLevel::Error,
                message: "Failed to load favorites".to_string(),
            });
        }
    }
}

fn print_marker(state: FavoriteState) {
    println!("{} {} (:fav)", state.marker(), state.action_hint());
}

fn print_notice(notice: &Notice) {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    println!("[{tag}] {}", notice.message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_notice_reports_service_reachability() {
        let up = connection_notice(true);
        assert_eq!(up.level, NoticeLevel::Info);
        assert_eq!(up.message, "Connected to favorites service");

        let down = connection_notice(false);
        assert_eq!(down.level, NoticeLevel::Warning);
        assert_eq!(down.message, "Backend server not connected");
    }
}

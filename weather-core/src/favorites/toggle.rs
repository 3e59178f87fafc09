use super::{FavoritesClient, FavoritesError};

/// Whether the displayed city is currently stored as a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Favorited,
    NotFavorited,
}

impl FavoriteState {
    pub fn marker(&self) -> &'static str {
        match self {
            FavoriteState::Favorited => "⭐",
            FavoriteState::NotFavorited => "☆",
        }
    }

    /// What activating the toggle will do.
    pub fn action_hint(&self) -> &'static str {
        match self {
            FavoriteState::Favorited => "Remove from favorites",
            FavoriteState::NotFavorited => "Add to favorites",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Short message for the user after a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// State read back from the service after the mutation.
    pub state: FavoriteState,
    pub notice: Notice,
}

/// Drives the favorite marker shown next to a weather card.
#[derive(Debug, Clone)]
pub struct FavoriteToggle {
    client: FavoritesClient,
}

impl FavoriteToggle {
    pub fn new(client: FavoritesClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FavoritesClient {
        &self.client
    }

    /// Ask the service for the current state. If the check fails, offer "add".
    pub async fn refresh(&self, city: &str) -> FavoriteState {
        match self.client.check(city).await {
            Ok(true) => FavoriteState::Favorited,
            Ok(false) => FavoriteState::NotFavorited,
            Err(err) => {
                tracing::warn!(city, error = %err, "failed to check favorite status");
                FavoriteState::NotFavorited
            }
        }
    }

    /// Add or remove according to `current`, then read the state back.
    pub async fn activate(&self, city: &str, current: FavoriteState) -> ToggleOutcome {
        if city.trim().is_empty() {
            return ToggleOutcome {
                state: current,
                notice: Notice::new(NoticeLevel::Error, "No city selected"),
            };
        }

        let notice = match current {
            FavoriteState::NotFavorited => match self.client.add(city).await {
                Ok(added) => Notice::new(NoticeLevel::Success, added.message),
                Err(err) => failure_notice(city, err, "Failed to add to favorites"),
            },
            FavoriteState::Favorited => match self.client.remove(city).await {
                Ok(message) => Notice::new(NoticeLevel::Success, message),
                Err(err) => failure_notice(city, err, "Failed to remove from favorites"),
            },
        };

        ToggleOutcome {
            state: self.refresh(city).await,
            notice,
        }
    }
}

fn failure_notice(city: &str, err: FavoritesError, fallback: &str) -> Notice {
    match err {
        FavoritesError::Conflict(msg)
        | FavoritesError::NotFound(msg)
        | FavoritesError::Validation(msg) => Notice::new(NoticeLevel::Warning, msg),
        other => {
            tracing::error!(city, error = %other, "{fallback}");
            Notice::new(NoticeLevel::Error, fallback)
        }
    }
}

//! View model for a weather lookup: what the card shows in each state.

use chrono::{Local, NaiveDate};
use std::fmt;

use crate::{condition::ConditionCategory, model::WeatherSnapshot, provider::LookupError};

/// Everything needed to draw a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    /// "Tokyo, JP"; also the key used for favorites.
    pub city: String,
    pub date: String,
    pub temperature: String,
    pub condition: String,
    pub hi_low: String,
    pub category: ConditionCategory,
}

impl WeatherCard {
    pub fn from_snapshot(snapshot: &WeatherSnapshot, today: NaiveDate) -> Self {
        Self {
            city: snapshot.display_name(),
            date: date_line(today),
            temperature: degrees(snapshot.temperature),
            condition: snapshot.condition.clone(),
            hi_low: format!(
                "{} / {}",
                degrees(snapshot.temp_min),
                degrees(snapshot.temp_max)
            ),
            category: ConditionCategory::classify(&snapshot.condition),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherView {
    Loading,
    Ready(WeatherCard),
    NotFound { query: String },
    Failed { message: String },
}

impl WeatherView {
    /// Build the view for a finished lookup, dated with the local calendar day.
    pub fn from_outcome(query: &str, outcome: &Result<WeatherSnapshot, LookupError>) -> Self {
        Self::from_outcome_on(query, outcome, Local::now().date_naive())
    }

    pub fn from_outcome_on(
        query: &str,
        outcome: &Result<WeatherSnapshot, LookupError>,
        today: NaiveDate,
    ) -> Self {
        match outcome {
            Ok(snapshot) => WeatherView::Ready(WeatherCard::from_snapshot(snapshot, today)),
            Err(LookupError::NotFound) => WeatherView::NotFound {
                query: query.to_string(),
            },
            Err(err) => WeatherView::Failed {
                message: user_message(err),
            },
        }
    }

    pub fn card(&self) -> Option<&WeatherCard> {
        match self {
            WeatherView::Ready(card) => Some(card),
            _ => None,
        }
    }

    /// Category the card background should use.
    pub fn category(&self) -> ConditionCategory {
        self.card().map(|c| c.category).unwrap_or_default()
    }
}

/// Message shown for a failed lookup. Transport details stay in the logs.
fn user_message(err: &LookupError) -> String {
    match err {
        LookupError::Transport(_) => "Unable to reach the weather service".to_string(),
        LookupError::Malformed(_) => "Invalid data received.".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for WeatherView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherView::Loading => {
                writeln!(f, "Loading...")?;
                writeln!(f, "--°c")?;
                writeln!(f, "Fetching weather data")?;
                write!(f, "--°c / --°c")
            }
            WeatherView::Ready(card) => {
                writeln!(f, "{} {}", card.category.glyph(), card.city)?;
                writeln!(f, "{}", card.date)?;
                writeln!(f, "{}", card.temperature)?;
                writeln!(f, "{}", card.condition)?;
                write!(f, "{}", card.hi_low)
            }
            WeatherView::NotFound { query } => {
                writeln!(f, "Error")?;
                write!(f, "City not found: {query}")
            }
            WeatherView::Failed { message } => {
                writeln!(f, "Error")?;
                write!(f, "{message}")
            }
        }
    }
}

/// "Sunday, 18 October 2026"
pub fn date_line(day: NaiveDate) -> String {
    day.format("%A, %-d %B %Y").to_string()
}

fn degrees(value: f64) -> String {
    format!("{}°c", value.round() as i64)
}

use serde::{Deserialize, Serialize};

/// Visual category a weather condition is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    #[default]
    Default,
}

/// Ordered keyword rules; the first keyword found in the label wins.
const RULES: &[(&str, ConditionCategory)] = &[
    ("clear", ConditionCategory::Sunny),
    ("cloud", ConditionCategory::Cloudy),
    ("rain", ConditionCategory::Rain),
    ("snow", ConditionCategory::Snow),
    ("thunder", ConditionCategory::Thunderstorm),
];

impl ConditionCategory {
    /// Classify a provider condition label such as "Clouds" or "light rain".
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();

        RULES
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or_default()
    }

    /// Stable class name, matching the card styles of the web front end.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
            Self::Default => "default-weather",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sunny => "☀",
            Self::Cloudy => "☁",
            Self::Rain => "☂",
            Self::Snow => "❄",
            Self::Thunderstorm => "⚡",
            Self::Default => "•",
        }
    }
}

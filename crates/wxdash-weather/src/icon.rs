//! Forecast text to pictogram mapping.

use serde::{Deserialize, Serialize};

/// Pictogram categories the dashboard can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pictogram {
    Sunny,
    Snow,
    Rain,
    Cloud,
}

// Checked in order, first hit wins. "Rain, then cloudy" must stay Rain.
const RULES: &[(&[&str], Pictogram)] = &[
    (&["sun", "clear"], Pictogram::Sunny),
    (&["snow"], Pictogram::Snow),
    (&["rain"], Pictogram::Rain),
    (&["cloud"], Pictogram::Cloud),
];

impl Pictogram {
    /// Classify free-form forecast text. Absent or unmatched text has no icon.
    pub fn classify(text: Option<&str>) -> Option<Self> {
        let text = text?.to_lowercase();
        if text.is_empty() {
            return None;
        }

        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
            .map(|(_, pictogram)| *pictogram)
    }

    /// Icon-font name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Sunny => "sun",
            Self::Snow => "snowflake",
            Self::Rain => "cloud-rain",
            Self::Cloud => "cloud",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sunny => "☀",
            Self::Snow => "❄",
            Self::Rain => "☔",
            Self::Cloud => "☁",
        }
    }

    /// Plain-text stand-in for terminals without the glyphs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sunny => "[sun]",
            Self::Snow => "[snow]",
            Self::Rain => "[rain]",
            Self::Cloud => "[cloud]",
        }
    }
}

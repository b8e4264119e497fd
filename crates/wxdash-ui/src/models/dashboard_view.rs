use serde::Serialize;
use wxdash_weather::{ForecastPeriod, Pictogram};

use crate::state::{DashboardState, FetchState};

/// The "current conditions" card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentCard {
    /// "Washington county, KS"
    pub location: String,
    /// Period label, e.g. "Friday"
    pub period: String,
    /// "47 degrees F"
    pub temperature: String,
    pub icon: Option<Pictogram>,
    pub coordinate: String,
    pub detail: String,
}

/// One card of the outlook strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripCard {
    pub name: String,
    pub temperature: String,
    pub icon: Option<Pictogram>,
    pub detail: String,
}

impl From<&ForecastPeriod> for StripCard {
    fn from(period: &ForecastPeriod) -> Self {
        Self {
            name: period.name.clone(),
            temperature: period.temperature.to_string(),
            icon: Pictogram::classify(period.detailed_forecast.as_deref()),
            detail: period.detailed_forecast.clone().unwrap_or_default(),
        }
    }
}

/// Presentation of a [`DashboardState`]. Missing data becomes empty text,
/// never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub banner: Option<String>,
    pub current: CurrentCard,
    pub strip: Vec<StripCard>,
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        let zone = state.zone();
        let forecast = state.forecast();
        let first = forecast.and_then(|f| f.current());

        let current = CurrentCard {
            location: zone
                .map(|z| format!("{} {}, {}", z.name, z.zone_type, z.state))
                .unwrap_or_default(),
            period: first.map(|p| p.name.clone()).unwrap_or_default(),
            temperature: first
                .map(|p| format!("{} degrees {}", p.temperature, p.temperature_unit))
                .unwrap_or_default(),
            icon: first.and_then(|p| Pictogram::classify(p.detailed_forecast.as_deref())),
            coordinate: state.coordinate.to_string(),
            detail: first
                .and_then(|p| p.detailed_forecast.clone())
                .unwrap_or_default(),
        };

        let strip = forecast
            .map(|f| f.upcoming().iter().map(StripCard::from).collect())
            .unwrap_or_default();

        Self {
            banner: banner(state),
            current,
            strip,
        }
    }
}

fn banner(state: &DashboardState) -> Option<String> {
    let has_data = state.report.is_some();

    match &state.status {
        FetchState::Ready => None,
        FetchState::Loading if has_data => {
            Some(format!("Updating forecast for {}...", state.coordinate))
        }
        FetchState::Loading => Some(format!("Loading forecast for {}...", state.coordinate)),
        FetchState::Failed { user_message, .. } if has_data => Some(format!(
            "{} Showing the last forecast received.",
            user_message
        )),
        FetchState::Failed { user_message, .. } => Some(user_message.clone()),
    }
}

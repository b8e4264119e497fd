pub mod error_mapping;
pub mod models;
pub mod render;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;

pub use models::{DashboardModel, DashboardView};
pub use render::{render_text, RenderOptions};
pub use state::{CoordinateCell, CoordinateRequest, DashboardState, FetchState};

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use wxdash_core::{Config, WeatherConfig};
use wxdash_weather::{Coordinate, IpLocator, Locator, NwsProvider, ProviderSettings};

use services::DashboardEvent;

/// Inputs of one dashboard session.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Shown until the device position is known
    pub fallback: Coordinate,
    pub locator: Locator,
}

impl RunOptions {
    /// Fallback and position source as configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let locator = if config.location.enabled {
            let timeout = Duration::from_secs(config.weather.timeout_secs);
            Locator::IpLookup(
                IpLocator::new(&config.location.lookup_url, timeout)
                    .context("Failed to create location client")?,
            )
        } else {
            Locator::Disabled
        };

        Ok(Self {
            fallback: Coordinate::new(
                config.weather.fallback_latitude,
                config.weather.fallback_longitude,
            ),
            locator,
        })
    }
}

pub fn provider_settings(config: &WeatherConfig) -> ProviderSettings {
    ProviderSettings {
        base_url: config.api_base_url.clone(),
        user_agent: config.user_agent.clone(),
        timeout: Duration::from_secs(config.timeout_secs),
    }
}

/// Run one dashboard session.
///
/// Starts a forecast run for the fallback coordinate, asks the locator for
/// the device position once, and follows the coordinate if it changes. Returns
/// once the position request has settled and the latest run has completed.
/// `observer` sees every visible state change, including the first loading state.
pub async fn run<F>(config: &Config, options: RunOptions, mut observer: F) -> Result<DashboardState>
where
    F: FnMut(&DashboardState),
{
    let provider = Arc::new(
        NwsProvider::new(&provider_settings(&config.weather))
            .context("Failed to create weather provider")?,
    );

    let cell = CoordinateCell::new(options.fallback);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut model = DashboardModel::new(cell.current());
    observer(model.state());

    let reconciler = services::spawn_reconciler(provider, cell.subscribe(), tx.clone());
    services::request_locate(&tx, options.locator);
    drop(tx);

    let mut locating = true;
    while locating || model.is_loading() {
        let Some(event) = rx.recv().await else {
            tracing::warn!("Dashboard event channel closed early");
            break;
        };

        match event {
            DashboardEvent::Location(Ok(coordinate)) => {
                locating = false;
                match cell.set(coordinate) {
                    Some(request) => {
                        model.begin(request);
                        observer(model.state());
                    }
                    None => tracing::debug!(%coordinate, "Device position matches current coordinate"),
                }
            }
            DashboardEvent::Location(Err(_)) => {
                // Logged by the location service; the fallback stays.
                locating = false;
            }
            DashboardEvent::Weather(message) => {
                if model.apply(message) {
                    observer(model.state());
                }
            }
        }
    }

    reconciler.abort();
    Ok(model.into_state())
}

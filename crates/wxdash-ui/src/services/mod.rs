pub mod location_service;
pub mod weather_service;

pub use location_service::request_locate;
pub use weather_service::{request_fetch, spawn_reconciler, WeatherServiceMessage};

use wxdash_weather::{Coordinate, LocationError};

/// Everything the dashboard loop reacts to.
#[derive(Debug)]
pub enum DashboardEvent {
    /// Outcome of the one-shot position request
    Location(Result<Coordinate, LocationError>),
    Weather(WeatherServiceMessage),
}

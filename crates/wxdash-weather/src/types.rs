use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Geographic position in decimal degrees.
///
/// No range checking: whatever the position source reports is passed on to
/// the weather service, which answers out-of-coverage points with a 404.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Used until the device position is known, and whenever it cannot be.
    pub const FALLBACK: Coordinate = Coordinate {
        latitude: 37.7456,
        longitude: -97.0892,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// `properties` of `GET /points/{lat},{lon}`.
///
/// Only `county` and `forecast` drive the pipeline; the rest is kept for
/// logging and the JSON dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointMetadata {
    /// County zone URL
    pub county: String,
    /// 12-hour period forecast URL
    pub forecast: String,
    #[serde(default)]
    pub forecast_hourly: Option<String>,
    #[serde(default)]
    pub forecast_zone: Option<String>,
    #[serde(default)]
    pub grid_id: Option<String>,
    #[serde(default)]
    pub grid_x: Option<i64>,
    #[serde(default)]
    pub grid_y: Option<i64>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Administrative forecast zone (a county) the point falls in.
///
/// Replaced wholesale on every completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneMetadata {
    #[serde(rename = "@id", deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(rename = "@type", deserialize_with = "null_as_default")]
    pub ld_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// e.g. "county"
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub zone_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub effective_date: Option<DateTime<FixedOffset>>,
    pub expiration_date: Option<DateTime<FixedOffset>>,
    /// Two-letter state code. Null for marine and fire zones.
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cwa: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub forecast_offices: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub time_zone: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub observation_stations: Vec<String>,
    pub radar_station: Option<String>,
}

/// Reads an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One 12-hour forecast window ("Tonight", "Friday", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub number: u32,
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub is_daytime: bool,
    pub temperature: i32,
    pub temperature_unit: String,
    #[serde(default)]
    pub temperature_trend: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_speed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_direction: String,
    /// Image URL supplied by the service. Not used for rendering.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub short_forecast: Option<String>,
    #[serde(default)]
    pub detailed_forecast: Option<String>,
}

/// Forecast periods in the order the service returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSeries {
    #[serde(default)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub generated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

impl ForecastSeries {
    /// First period, shown as current conditions.
    pub fn current(&self) -> Option<&ForecastPeriod> {
        self.periods.first()
    }

    /// Everything after the first period.
    pub fn upcoming(&self) -> &[ForecastPeriod] {
        self.periods.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Output of one completed pipeline run. Zone and forecast travel together
/// so they can only be replaced as a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub point: PointMetadata,
    pub zone: ZoneMetadata,
    pub forecast: ForecastSeries,
}

/// Position lookup errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Position lookup is not available")]
    Unsupported,
    #[error("Location service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Location request timed out")]
    Timeout,
    #[error("Location lookup rejected: {0}")]
    Rejected(String),
    #[error("Location error: {0}")]
    Other(String),
}

/// A single weather service request failure
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid link: {0}")]
    InvalidLink(String),
}

/// The three requests of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Points,
    Zone,
    Forecast,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Points => "points",
            Self::Zone => "zone",
            Self::Forecast => "forecast",
        };
        f.write_str(s)
    }
}

/// A failed pipeline run, tagged with the stage that failed.
#[derive(Debug, thiserror::Error)]
#[error("{stage} request failed: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    pub source: WeatherError,
}

impl PipelineError {
    pub fn new(stage: PipelineStage, source: WeatherError) -> Self {
        Self { stage, source }
    }
}

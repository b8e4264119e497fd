//! National Weather Service API client.
//!
//! A forecast takes three requests: the point lookup names the county zone
//! and the gridpoint forecast, which are then fetched together.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::types::{
    Coordinate, ForecastReport, ForecastSeries, PipelineError, PipelineStage, PointMetadata,
    WeatherError, ZoneMetadata,
};

const NWS_API_BASE: &str = "https://api.weather.gov";
const GEO_JSON: &str = "application/geo+json";

/// Connection settings for [`NwsProvider`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    /// api.weather.gov refuses requests without one
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            user_agent: concat!("wxdash/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// GeoJSON feature envelope; every NWS payload we need lives in `properties`.
#[derive(Debug, Deserialize)]
struct Feature<T> {
    properties: T,
}

#[derive(Debug, Clone)]
pub struct NwsProvider {
    client: Arc<Client>,
    base_url: String,
}

impl NwsProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, WeatherError> {
        Url::parse(&settings.base_url)
            .map_err(|e| WeatherError::InvalidLink(format!("{}: {}", settings.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run the whole pipeline for one coordinate.
    ///
    /// Zone and forecast are requested concurrently once the point lookup
    /// has named them; the report is only produced if both succeed.
    #[instrument(skip_all, fields(coordinate = %coordinate), level = "info")]
    pub async fn fetch_report(&self, coordinate: Coordinate) -> Result<ForecastReport, PipelineError> {
        let point = self
            .fetch_point(coordinate)
            .await
            .map_err(|e| PipelineError::new(PipelineStage::Points, e))?;

        tracing::debug!(county = %point.county, forecast = %point.forecast, "Point resolved");

        let (zone, forecast) = tokio::join!(
            self.fetch_zone(&point.county),
            self.fetch_forecast(&point.forecast)
        );
        let zone = zone.map_err(|e| PipelineError::new(PipelineStage::Zone, e))?;
        let forecast = forecast.map_err(|e| PipelineError::new(PipelineStage::Forecast, e))?;

        tracing::info!(
            zone = %zone.id,
            periods = forecast.periods.len(),
            "Forecast report ready"
        );

        Ok(ForecastReport {
            point,
            zone,
            forecast,
        })
    }

    /// `GET /points/{lat},{lon}`
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_point(&self, coordinate: Coordinate) -> Result<PointMetadata, WeatherError> {
        let url = format!(
            "{}/points/{},{}",
            self.base_url, coordinate.latitude, coordinate.longitude
        );
        self.get_properties(&url).await
    }

    /// Follow the point's `county` link.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_zone(&self, link: &str) -> Result<ZoneMetadata, WeatherError> {
        let url = parse_link(link)?;
        self.get_properties(url.as_str()).await
    }

    /// Follow the point's `forecast` link.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_forecast(&self, link: &str) -> Result<ForecastSeries, WeatherError> {
        let url = parse_link(link)?;
        self.get_properties(url.as_str()).await
    }

    async fn get_properties<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            tracing::warn!(%status, url, "Weather service returned an error");
            return Err(WeatherError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let feature: Feature<T> = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("{}: {}", url, e)))?;

        Ok(feature.properties)
    }
}

fn parse_link(link: &str) -> Result<Url, WeatherError> {
    Url::parse(link).map_err(|e| WeatherError::InvalidLink(format!("{:?}: {}", link, e)))
}

//! Device position sources.
//!
//! A terminal has no geolocation API, so the position comes from IP
//! geolocation (ip-api.com schema), a fixed coordinate, or nowhere.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::Instrument;

use crate::types::{Coordinate, LocationError};

/// Where the one-shot position request goes.
#[derive(Debug, Clone)]
pub enum Locator {
    /// No position capability; every request fails with `Unsupported`.
    Disabled,
    /// Known position, reported immediately.
    Fixed(Coordinate),
    IpLookup(IpLocator),
}

impl Locator {
    pub async fn locate(&self) -> Result<Coordinate, LocationError> {
        match self {
            Locator::Disabled => Err(LocationError::Unsupported),
            Locator::Fixed(coordinate) => Ok(*coordinate),
            Locator::IpLookup(locator) => locator.locate().await,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region_name: Option<String>,
}

/// IP geolocation over HTTP.
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    lookup_url: String,
}

impl IpLocator {
    pub fn new(lookup_url: &str, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::Other(e.to_string()))?;

        Ok(Self {
            client,
            lookup_url: lookup_url.to_string(),
        })
    }

    pub async fn locate(&self) -> Result<Coordinate, LocationError> {
        let span = tracing::info_span!("location.lookup", url = %self.lookup_url);

        async move {
            let response = self.client.get(&self.lookup_url).send().await.map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::ServiceUnavailable(e.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(LocationError::ServiceUnavailable(format!("HTTP {}", status)));
            }

            let body: IpApiResponse = response
                .json()
                .await
                .map_err(|e| LocationError::Other(format!("Unreadable lookup response: {}", e)))?;

            if body.status != "success" {
                return Err(LocationError::Rejected(
                    body.message.unwrap_or_else(|| body.status.clone()),
                ));
            }

            match (body.lat, body.lon) {
                (Some(lat), Some(lon)) => {
                    tracing::info!(
                        lat,
                        lon,
                        city = body.city.as_deref().unwrap_or_default(),
                        region = body.region_name.as_deref().unwrap_or_default(),
                        "Position resolved"
                    );
                    Ok(Coordinate::new(lat, lon))
                }
                _ => Err(LocationError::Other(
                    "Lookup response has no coordinates".to_string(),
                )),
            }
        }
        .instrument(span)
        .await
    }
}

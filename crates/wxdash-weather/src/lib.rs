//! Weather data for wxdash
//!
//! Talks to the National Weather Service API (points, zones, gridpoint
//! forecasts), resolves the device position, and classifies forecast text
//! into pictograms.

pub mod icon;
pub mod location;
pub mod provider;
pub mod types;

pub use icon::Pictogram;
pub use location::{IpLocator, Locator};
pub use provider::{NwsProvider, ProviderSettings};
pub use types::*;

//! Observable dashboard state.

use serde::Serialize;
use tokio::sync::watch;
use wxdash_weather::{Coordinate, ForecastReport, ForecastSeries, PipelineStage, ZoneMetadata};

/// A coordinate tagged with the generation that produced it.
///
/// Every change of coordinate bumps the generation; forecast results are
/// matched against it so only the latest request can update the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateRequest {
    pub generation: u64,
    pub coordinate: Coordinate,
}

/// Single-value cell holding the coordinate the dashboard is showing.
///
/// Subscribers are woken only when the value actually changes.
#[derive(Debug)]
pub struct CoordinateCell {
    tx: watch::Sender<CoordinateRequest>,
}

impl CoordinateCell {
    pub fn new(initial: Coordinate) -> Self {
        let (tx, _rx) = watch::channel(CoordinateRequest {
            generation: 1,
            coordinate: initial,
        });
        Self { tx }
    }

    /// Store a new coordinate. Returns the new request, or `None` when the
    /// coordinate is unchanged and nobody was notified.
    pub fn set(&self, coordinate: Coordinate) -> Option<CoordinateRequest> {
        let mut updated = None;
        self.tx.send_if_modified(|request| {
            if request.coordinate == coordinate {
                return false;
            }
            request.generation += 1;
            request.coordinate = coordinate;
            updated = Some(*request);
            true
        });
        updated
    }

    pub fn current(&self) -> CoordinateRequest {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CoordinateRequest> {
        self.tx.subscribe()
    }
}

/// Progress of the latest forecast run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchState {
    #[default]
    Loading,
    Ready,
    Failed {
        stage: PipelineStage,
        message: String,
        user_message: String,
    },
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub coordinate: Coordinate,
    pub generation: u64,
    /// Last completed report. Zone and forecast only ever change together.
    pub report: Option<ForecastReport>,
    pub status: FetchState,
}

impl DashboardState {
    pub fn zone(&self) -> Option<&ZoneMetadata> {
        self.report.as_ref().map(|r| &r.zone)
    }

    pub fn forecast(&self) -> Option<&ForecastSeries> {
        self.report.as_ref().map(|r| &r.forecast)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_cell_starts_at_generation_one() {
        let cell = CoordinateCell::new(Coordinate::FALLBACK);
        let current = cell.current();
        assert_eq!(current.generation, 1);
        assert_eq!(current.coordinate, Coordinate::FALLBACK);
    }

    #[test]
    fn test_same_coordinate_is_not_a_change() {
        let cell = CoordinateCell::new(Coordinate::FALLBACK);
        let rx = cell.subscribe();

        assert!(cell.set(Coordinate::FALLBACK).is_none());
        assert_eq!(cell.current().generation, 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_new_coordinate_bumps_generation() {
        let cell = CoordinateCell::new(Coordinate::FALLBACK);
        let mut rx = cell.subscribe();
        let seattle = Coordinate::new(47.6062, -122.3321);

        let request = cell.set(seattle).unwrap();
        assert_eq!(request.generation, 2);
        assert_eq!(request.coordinate, seattle);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), request);

        let back = cell.set(Coordinate::FALLBACK).unwrap();
        assert_eq!(back.generation, 3);
    }

    #[test]
    fn test_default_state_is_empty_and_loading() {
        let state = DashboardState::default();
        assert!(state.zone().is_none());
        assert!(state.forecast().is_none());
        assert_eq!(state.status, FetchState::Loading);
    }
}

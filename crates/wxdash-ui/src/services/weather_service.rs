//! Weather backend: forecast runs driven by the coordinate cell.
//! Network work runs on spawned tasks; results come back over the event channel.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wxdash_weather::{Coordinate, ForecastReport, NwsProvider, PipelineError};

use super::DashboardEvent;
use crate::state::CoordinateRequest;

/// Messages sent from forecast runs back to the dashboard loop
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// A run finished. `generation` identifies the coordinate it was for.
    FetchDone {
        generation: u64,
        coordinate: Coordinate,
        result: Result<ForecastReport, PipelineError>,
    },
}

/// Start one forecast run. Sends `FetchDone` unless cancelled first.
pub fn request_fetch(
    tx: &mpsc::UnboundedSender<DashboardEvent>,
    provider: Arc<NwsProvider>,
    request: CoordinateRequest,
    token: CancellationToken,
) -> JoinHandle<()> {
    let tx = tx.clone();

    tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(generation = request.generation, "Forecast run superseded");
            }
            result = provider.fetch_report(request.coordinate) => {
                let _ = tx.send(DashboardEvent::Weather(WeatherServiceMessage::FetchDone {
                    generation: request.generation,
                    coordinate: request.coordinate,
                    result,
                }));
            }
        }
    })
}

/// Watch the coordinate cell and start a run for every value it takes,
/// cancelling the run in flight.
///
/// The current value counts as a change, so the first run starts right away.
pub fn spawn_reconciler(
    provider: Arc<NwsProvider>,
    mut coordinates: watch::Receiver<CoordinateRequest>,
    tx: mpsc::UnboundedSender<DashboardEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut in_flight: Option<CancellationToken> = None;

        loop {
            let request = *coordinates.borrow_and_update();

            if let Some(previous) = in_flight.take() {
                previous.cancel();
            }

            tracing::info!(
                generation = request.generation,
                coordinate = %request.coordinate,
                "Starting forecast run"
            );
            let token = CancellationToken::new();
            request_fetch(&tx, provider.clone(), request, token.clone());
            in_flight = Some(token);

            if coordinates.changed().await.is_err() {
                break;
            }
        }

        if let Some(token) = in_flight {
            token.cancel();
        }
    })
}

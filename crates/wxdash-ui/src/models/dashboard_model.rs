use crate::error_mapping::app_error;
use crate::services::WeatherServiceMessage;
use crate::state::{CoordinateRequest, DashboardState, FetchState};

/// Owns the dashboard state and folds forecast results into it.
///
/// Only the result for the most recent coordinate request is accepted; a
/// late answer for an older coordinate is dropped whatever order runs finish in.
#[derive(Debug, Default)]
pub struct DashboardModel {
    state: DashboardState,
    in_flight: Option<u64>,
}

impl DashboardModel {
    pub fn new(initial: CoordinateRequest) -> Self {
        let mut model = Self::default();
        model.begin(initial);
        model
    }

    /// A run for `request` has been started.
    pub fn begin(&mut self, request: CoordinateRequest) {
        self.state.coordinate = request.coordinate;
        self.state.generation = request.generation;
        self.state.status = FetchState::Loading;
        self.in_flight = Some(request.generation);
    }

    /// Apply a finished run. Returns false when the result was stale and ignored.
    pub fn apply(&mut self, message: WeatherServiceMessage) -> bool {
        let WeatherServiceMessage::FetchDone {
            generation,
            coordinate,
            result,
        } = message;

        if self.in_flight != Some(generation) {
            tracing::debug!(
                generation,
                latest = self.state.generation,
                %coordinate,
                "Discarding stale forecast result"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(report) => {
                self.state.report = Some(report);
                self.state.status = FetchState::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, %coordinate, "Forecast run failed");
                self.state.status = FetchState::Failed {
                    stage: err.stage,
                    message: err.to_string(),
                    user_message: app_error(&err).user_message().to_string(),
                };
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn into_state(self) -> DashboardState {
        self.state
    }
}

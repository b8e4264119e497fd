use wxdash_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError as ServiceError};
use wxdash_weather::{PipelineError, PipelineStage, WeatherError};

/// Classify a failed forecast run for the status banner.
pub fn app_error(err: &PipelineError) -> AppError {
    let detail = err.to_string();

    match (&err.source, err.stage) {
        (WeatherError::Network(e), _) => AppError::Network(e.into_network_error()),
        (WeatherError::Status { status, url }, _) => AppError::Network(NetworkError::ServerError {
            status: *status,
            message: url.clone(),
        }),
        (WeatherError::Parse(_), _) => AppError::Weather(ServiceError::InvalidResponse(detail)),
        (_, PipelineStage::Points) => AppError::Weather(ServiceError::LocationNotCovered(detail)),
        (_, PipelineStage::Zone) => AppError::Weather(ServiceError::ZoneUnavailable(detail)),
        (_, PipelineStage::Forecast) => AppError::Weather(ServiceError::ForecastUnavailable(detail)),
    }
}

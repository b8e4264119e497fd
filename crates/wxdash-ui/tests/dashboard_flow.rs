//! End-to-end dashboard sessions against a mock weather service.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxdash_core::Config;
use wxdash_ui::{render_text, run, DashboardView, FetchState, RenderOptions, RunOptions};
use wxdash_weather::{Coordinate, Locator, Pictogram, PipelineStage};

const SEATTLE: Coordinate = Coordinate {
    latitude: 47.6062,
    longitude: -122.3321,
};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.weather.api_base_url = server.uri();
    config.weather.timeout_secs = 5;
    config
}

fn period(number: u32, name: &str, temperature: i32, detail: &str) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "name": name,
        "startTime": "2022-11-04T06:00:00-05:00",
        "endTime": "2022-11-04T18:00:00-05:00",
        "isDaytime": number % 2 == 1,
        "temperature": temperature,
        "temperatureUnit": "F",
        "temperatureTrend": null,
        "windSpeed": "15 mph",
        "windDirection": "N",
        "icon": "https://api.weather.gov/icons/land/day/tsra,80?size=medium",
        "shortForecast": "",
        "detailedForecast": detail
    })
}

/// Point, zone and forecast mocks for one location. Returns the points mock
/// so callers can set expectations on it.
async fn mount_location(
    server: &MockServer,
    coordinate: Coordinate,
    office: &str,
    zone_id: &str,
    zone_name: &str,
    state: &str,
    periods: Vec<serde_json::Value>,
    point_calls: std::ops::RangeInclusive<u64>,
) {
    let forecast_path = format!("/gridpoints/{}/10,20/forecast", office);
    let zone_path = format!("/zones/county/{}", zone_id);

    Mock::given(method("GET"))
        .and(path(format!(
            "/points/{},{}",
            coordinate.latitude, coordinate.longitude
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "gridId": office,
                "gridX": 10,
                "gridY": 20,
                "county": format!("{}{}", server.uri(), zone_path),
                "forecast": format!("{}{}", server.uri(), forecast_path)
            }
        })))
        .expect(point_calls)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(zone_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "id": zone_id,
                "type": "county",
                "name": zone_name,
                "state": state
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(forecast_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": { "periods": periods }
        })))
        .mount(server)
        .await;
}

async fn mount_washington(server: &MockServer, point_calls: std::ops::RangeInclusive<u64>) {
    mount_location(
        server,
        Coordinate::FALLBACK,
        "ICT",
        "KSC201",
        "Washington",
        "KS",
        vec![
            period(
                1,
                "Friday",
                47,
                "Showers and thunderstorms. Rain could be heavy at times. Cloudy, with a high near 47.",
            ),
            period(2, "Friday Night", 35, "Mostly clear, with a low around 35."),
            period(3, "Saturday", 52, "Sunny, with a high near 52."),
        ],
        point_calls,
    )
    .await;
}

async fn mount_seattle(server: &MockServer, point_calls: std::ops::RangeInclusive<u64>) {
    mount_location(
        server,
        SEATTLE,
        "SEW",
        "WAC033",
        "King",
        "WA",
        vec![
            period(1, "Today", 51, "Rain. Cloudy, with a high near 51."),
            period(2, "Tonight", 44, "Rain likely. Mostly cloudy."),
        ],
        point_calls,
    )
    .await;
}

#[tokio::test]
async fn test_fallback_session_renders_washington_county() {
    let server = MockServer::start().await;
    mount_washington(&server, 1..=1).await;

    let options = RunOptions {
        fallback: Coordinate::FALLBACK,
        locator: Locator::Disabled,
    };
    let state = run(&config_for(&server), options, |_| {}).await.unwrap();

    assert_eq!(state.generation, 1);
    assert_eq!(state.status, FetchState::Ready);

    let view = DashboardView::from_state(&state);
    assert_eq!(view.current.location, "Washington county, KS");
    assert_eq!(view.current.period, "Friday");
    assert_eq!(view.current.temperature, "47 degrees F");
    assert_eq!(view.current.icon, Some(Pictogram::Rain));
    assert_eq!(view.strip.len(), 2);

    let text = render_text(&view, &RenderOptions::default());
    assert!(text.starts_with("Washington county, KS\nFriday\n47 degrees F"));
}

#[tokio::test]
async fn test_located_position_triggers_exactly_one_more_run() {
    let server = MockServer::start().await;
    // The fallback run may be cancelled before it reaches the server.
    mount_washington(&server, 0..=1).await;
    mount_seattle(&server, 1..=1).await;

    let options = RunOptions {
        fallback: Coordinate::FALLBACK,
        locator: Locator::Fixed(SEATTLE),
    };
    let state = run(&config_for(&server), options, |_| {}).await.unwrap();

    assert_eq!(state.generation, 2);
    assert_eq!(state.coordinate, SEATTLE);
    assert_eq!(state.status, FetchState::Ready);
    assert_eq!(state.zone().unwrap().name, "King");

    let view = DashboardView::from_state(&state);
    assert_eq!(view.current.location, "King county, WA");
    assert_eq!(view.current.coordinate, "47.6062,-122.3321");
}

#[tokio::test]
async fn test_slow_lookup_renders_fallback_then_located_position() {
    let server = MockServer::start().await;
    mount_washington(&server, 1..=1).await;
    mount_seattle(&server, 1..=1).await;

    // Answers well after the fallback run has finished.
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "status": "success",
                    "regionName": "Washington",
                    "city": "Seattle",
                    "lat": SEATTLE.latitude,
                    "lon": SEATTLE.longitude
                }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.location.lookup_url = format!("{}/json", server.uri());
    let options = RunOptions::from_config(&config).unwrap();

    let mut seen = Vec::new();
    let state = run(&config, options, |state| {
        seen.push((state.generation, state.status.clone()))
    })
    .await
    .unwrap();

    assert_eq!(
        seen,
        vec![
            (1, FetchState::Loading),
            (1, FetchState::Ready),
            (2, FetchState::Loading),
            (2, FetchState::Ready),
        ]
    );
    assert_eq!(state.coordinate, SEATTLE);
    assert_eq!(state.zone().unwrap().name, "King");

    let mut points: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .map(|request| request.url.path().to_string())
        .filter(|p| p.starts_with("/points/"))
        .collect();
    points.sort();
    assert_eq!(
        points,
        vec!["/points/37.7456,-97.0892", "/points/47.6062,-122.3321"]
    );
}

#[tokio::test]
async fn test_position_equal_to_fallback_adds_no_run() {
    let server = MockServer::start().await;
    mount_washington(&server, 1..=1).await;

    let options = RunOptions {
        fallback: Coordinate::FALLBACK,
        locator: Locator::Fixed(Coordinate::FALLBACK),
    };
    let state = run(&config_for(&server), options, |_| {}).await.unwrap();

    assert_eq!(state.generation, 1);
    assert_eq!(state.status, FetchState::Ready);
}

#[tokio::test]
async fn test_failed_lookup_keeps_fallback() {
    let server = MockServer::start().await;
    mount_washington(&server, 1..=1).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.location.lookup_url = format!("{}/json", server.uri());
    let options = RunOptions::from_config(&config).unwrap();
    assert!(matches!(options.locator, Locator::IpLookup(_)));

    let state = run(&config, options, |_| {}).await.unwrap();

    assert_eq!(state.generation, 1);
    assert_eq!(state.coordinate, Coordinate::FALLBACK);
    assert!(DashboardView::from_state(&state).banner.is_none());
}

#[tokio::test]
async fn test_uncovered_point_shows_banner_without_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/points/51.5,-0.12"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "title": "Data Unavailable For Requested Point"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = RunOptions {
        fallback: Coordinate::new(51.5, -0.12),
        locator: Locator::Disabled,
    };
    let state = run(&config_for(&server), options, |_| {}).await.unwrap();

    match &state.status {
        FetchState::Failed { stage, .. } => assert_eq!(*stage, PipelineStage::Points),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(state.report.is_none());

    let view = DashboardView::from_state(&state);
    assert_eq!(
        view.banner.as_deref(),
        Some("No forecast is available for this location.")
    );
    assert_eq!(view.current.location, "");
    assert!(view.strip.is_empty());
}

#[tokio::test]
async fn test_observer_sees_loading_then_ready() {
    let server = MockServer::start().await;
    mount_washington(&server, 1..=1).await;

    let mut seen = Vec::new();
    let options = RunOptions {
        fallback: Coordinate::FALLBACK,
        locator: Locator::Disabled,
    };
    run(&config_for(&server), options, |state| seen.push(state.status.clone()))
        .await
        .unwrap();

    assert_eq!(seen, vec![FetchState::Loading, FetchState::Ready]);
}

#[test]
fn test_run_options_respect_disabled_location() {
    let mut config = Config::default();
    config.location.enabled = false;
    config.weather.fallback_latitude = 40.0;
    config.weather.fallback_longitude = -100.0;

    let options = RunOptions::from_config(&config).unwrap();
    assert!(matches!(options.locator, Locator::Disabled));
    assert_eq!(options.fallback, Coordinate::new(40.0, -100.0));
}

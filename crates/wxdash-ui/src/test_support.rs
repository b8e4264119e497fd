#![allow(clippy::unwrap_used, clippy::expect_used)]

use wxdash_weather::{ForecastPeriod, ForecastReport, ForecastSeries, PointMetadata, ZoneMetadata};

pub fn period(number: u32, name: &str, temperature: i32, detail: Option<&str>) -> ForecastPeriod {
    serde_json::from_value(serde_json::json!({
        "number": number,
        "name": name,
        "startTime": "2022-11-04T06:00:00-05:00",
        "endTime": "2022-11-04T18:00:00-05:00",
        "isDaytime": true,
        "temperature": temperature,
        "temperatureUnit": "F",
        "temperatureTrend": null,
        "windSpeed": "15 mph",
        "windDirection": "N",
        "shortForecast": "",
        "detailedForecast": detail,
    }))
    .unwrap()
}

pub fn washington_zone() -> ZoneMetadata {
    ZoneMetadata {
        id: "KSC201".into(),
        zone_type: "county".into(),
        name: "Washington".into(),
        state: "KS".into(),
        ..Default::default()
    }
}

pub fn report(periods: Vec<ForecastPeriod>) -> ForecastReport {
    ForecastReport {
        point: PointMetadata {
            county: "https://api.weather.gov/zones/county/KSC201".into(),
            forecast: "https://api.weather.gov/gridpoints/ICT/62,33/forecast".into(),
            forecast_hourly: None,
            forecast_zone: None,
            grid_id: Some("ICT".into()),
            grid_x: Some(62),
            grid_y: Some(33),
            time_zone: None,
        },
        zone: washington_zone(),
        forecast: ForecastSeries {
            periods,
            ..Default::default()
        },
    }
}

pub fn week() -> Vec<ForecastPeriod> {
    vec![
        period(
            1,
            "Friday",
            47,
            Some("Showers and thunderstorms. Rain could be heavy at times. Cloudy, with a high near 47."),
        ),
        period(2, "Friday Night", 35, Some("Mostly clear, with a low around 35.")),
        period(3, "Saturday", 52, Some("Sunny, with a high near 52.")),
        period(4, "Saturday Night", 30, Some("Partly cloudy, with a low around 30.")),
        period(5, "Sunday", 41, Some("Snow likely before noon.")),
    ]
}

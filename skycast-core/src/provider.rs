use chrono::{FixedOffset, Offset, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    aggregate::{daily_slice, hourly_slice, km_from_m, kmh_from_mps, round_temp},
    config::Config,
    error::FetchError,
    model::{CurrentConditions, ForecastSample, ResolvedLocation, WeatherView},
};

/// Typed client for the two upstream endpoints: current conditions
/// (`/weather`) and the 3-hourly multi-point forecast (`/forecast`).
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: String,
    http: Client,
}

impl OpenWeatherClient {
    /// Build a client from config; fails when no API key is set.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.clone(),
            http: Client::new(),
        })
    }

    /// Query parameters for the location: `q` for a city, `lat`/`lon` for
    /// coordinates. Never both.
    fn location_params(location: &ResolvedLocation) -> Vec<(&'static str, String)> {
        match location {
            ResolvedLocation::City(name) => vec![("q", name.clone())],
            ResolvedLocation::Coordinates {
                latitude,
                longitude,
            } => vec![
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ],
        }
    }

    async fn get_body(
        &self,
        endpoint: &str,
        location: &ResolvedLocation,
    ) -> Result<String, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut query = Self::location_params(location);
        query.push(("appid", self.api_key.clone()));
        query.push(("units", self.units.clone()));

        debug!(%url, %location, "requesting weather data");

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }

    /// Current conditions for the location, converted to display units.
    pub async fn fetch_current(
        &self,
        location: &ResolvedLocation,
    ) -> Result<CurrentConditions, FetchError> {
        let body = self.get_body("weather", location).await?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|err| FetchError::Malformed(err.to_string()))?;

        let weather = parsed
            .weather
            .first()
            .ok_or_else(|| FetchError::Malformed("empty weather array".to_string()))?;

        Ok(CurrentConditions {
            city: parsed.name,
            country: parsed.sys.country,
            temperature_c: round_temp(parsed.main.temp),
            condition: weather.main.clone(),
            description: weather.description.clone(),
            humidity_pct: parsed.main.humidity,
            wind_kmh: kmh_from_mps(parsed.wind.speed),
            visibility_km: km_from_m(parsed.visibility),
            icon: weather.icon.clone(),
        })
    }

    /// Raw forecast samples plus the feed's UTC offset, which aggregation
    /// uses to bucket by the location's calendar days.
    pub async fn fetch_forecast(
        &self,
        location: &ResolvedLocation,
    ) -> Result<(Vec<ForecastSample>, FixedOffset), FetchError> {
        let body = self.get_body("forecast", location).await?;

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).map_err(|err| FetchError::Malformed(err.to_string()))?;

        let offset =
            FixedOffset::east_opt(parsed.city.timezone).unwrap_or_else(|| Utc.fix());

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| {
                let weather = entry
                    .weather
                    .into_iter()
                    .next()
                    .ok_or_else(|| FetchError::Malformed("empty weather array".to_string()))?;

                Ok(ForecastSample {
                    timestamp: entry.dt,
                    temperature_c: entry.main.temp,
                    temp_min_c: entry.main.temp_min,
                    temp_max_c: entry.main.temp_max,
                    humidity_pct: entry.main.humidity,
                    wind_mps: entry.wind.speed,
                    icon: weather.icon,
                    condition: weather.main,
                })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok((samples, offset))
    }

    /// One dashboard refresh: both endpoints queried concurrently, joined
    /// before any reduction, so a failure leaves nothing half-applied.
    pub async fn fetch_view(
        &self,
        location: &ResolvedLocation,
    ) -> Result<WeatherView, FetchError> {
        let (current, forecast) = tokio::join!(
            self.fetch_current(location),
            self.fetch_forecast(location)
        );

        let current = current?;
        let (samples, offset) = forecast?;

        Ok(WeatherView {
            current,
            hourly: hourly_slice(&samples, offset),
            daily: daily_slice(&samples, offset),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    /// Meters; the feed caps it at 10 km.
    visibility: i64,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// UTC offset of the queried location, in seconds.
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_an_api_key() {
        let err = OpenWeatherClient::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn from_config_trims_trailing_slash_from_base_url() {
        let config = Config {
            api_key: Some("KEY".to_string()),
            base_url: "http://localhost:9000/".to_string(),
            ..Config::default()
        };
        let client = OpenWeatherClient::from_config(&config).expect("client from config");
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn city_and_coordinates_never_share_a_request() {
        let city = OpenWeatherClient::location_params(&ResolvedLocation::City(
            "Kuala Lumpur".to_string(),
        ));
        assert_eq!(city, vec![("q", "Kuala Lumpur".to_string())]);

        let coords = OpenWeatherClient::location_params(&ResolvedLocation::Coordinates {
            latitude: 3.139,
            longitude: 101.6869,
        });
        assert_eq!(
            coords,
            vec![
                ("lat", "3.139".to_string()),
                ("lon", "101.6869".to_string()),
            ]
        );
        assert!(coords.iter().all(|(key, _)| *key != "q"));
    }

    #[test]
    fn current_payload_parses_with_conversions() {
        let body = r#"{
            "name": "Kuala Lumpur",
            "sys": { "country": "MY" },
            "main": { "temp": 31.4, "temp_min": 28.0, "temp_max": 33.0, "humidity": 66 },
            "weather": [{ "main": "Clouds", "description": "scattered clouds", "icon": "03d" }],
            "wind": { "speed": 5.3 },
            "visibility": 8500,
            "dt": 1721037600
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.sys.country, "MY");
        assert_eq!(round_temp(parsed.main.temp), 31);
        assert_eq!(kmh_from_mps(parsed.wind.speed), 19);
        assert_eq!(km_from_m(parsed.visibility), 9);
    }

    #[test]
    fn missing_expected_field_is_a_parse_error() {
        // No "main" object.
        let body = r#"{
            "name": "Kuala Lumpur",
            "sys": { "country": "MY" },
            "weather": [{ "main": "Clouds", "description": "scattered clouds", "icon": "03d" }],
            "wind": { "speed": 5.3 },
            "visibility": 8500
        }"#;

        let parsed: Result<OwCurrentResponse, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }
}

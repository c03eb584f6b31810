use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{ForecastPeriod, Observation};

const API_BASE: &str = "https://api.weather.gov";
const USER_AGENT: &str = "(skycast weather client)";
const ACCEPT: &str = "application/geo+json";

/// Failure of a single GET-and-decode round trip against the NWS API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Metadata for a latitude/longitude point: the city/state it falls in plus
/// the follow-up URLs the API hands out for forecasts and nearby stations.
#[derive(Debug, Clone)]
pub struct PointInfo {
    pub city: String,
    pub state: String,
    pub forecast_url: String,
    pub stations_url: String,
}

/// An observation station: ICAO-style identifier plus display name.
#[derive(Debug, Clone)]
pub struct StationInfo {
    pub id: String,
    pub name: String,
}

/// Thin client for api.weather.gov. Each method is one GET; there is no
/// retry, caching or pagination beyond what a single response carries.
#[derive(Debug, Clone, Default)]
pub struct NwsClient {
    http: Client,
}

impl NwsClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let res = self
            .http
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Resolves a point to its relative location and follow-up URLs.
    pub async fn point(&self, lat: f64, lon: f64) -> Result<PointInfo> {
        let url = format!("{API_BASE}/points/{lat:.4},{lon:.4}");
        let res: PointsResponse = self
            .fetch(&url)
            .await
            .context("Failed to fetch point metadata")?;

        let location = res.properties.relative_location.properties;
        Ok(PointInfo {
            city: location.city,
            state: location.state,
            forecast_url: res.properties.forecast,
            stations_url: res.properties.observation_stations,
        })
    }

    /// Display name of a single station.
    pub async fn station_name(&self, station_id: &str) -> Result<String> {
        let url = format!("{API_BASE}/stations/{station_id}");
        let res: StationResponse = self
            .fetch(&url)
            .await
            .with_context(|| format!("Failed to fetch info for station {station_id}"))?;
        Ok(res.properties.name)
    }

    /// Stations listed at a point's `observationStations` URL, nearest first.
    pub async fn nearest_stations(&self, stations_url: &str) -> Result<Vec<StationInfo>> {
        let res: StationsResponse = self
            .fetch(stations_url)
            .await
            .context("Failed to fetch observation stations")?;

        Ok(res
            .features
            .into_iter()
            .map(|f| StationInfo {
                id: f.properties.station_identifier,
                name: f.properties.name,
            })
            .collect())
    }

    /// Most recent observation reported by a station.
    pub async fn latest_observation(&self, station_id: &str) -> Result<Observation> {
        let url = format!("{API_BASE}/stations/{station_id}/observations/latest");
        let res: ObservationResponse = self
            .fetch(&url)
            .await
            .with_context(|| format!("Failed to fetch latest observation for {station_id}"))?;
        Ok(res.properties)
    }

    /// One page of recent observations, newest first.
    pub async fn observations(&self, station_id: &str, limit: usize) -> Result<Vec<Observation>> {
        let url = format!("{API_BASE}/stations/{station_id}/observations?limit={limit}");
        let res: ObservationsResponse = self
            .fetch(&url)
            .await
            .with_context(|| format!("Failed to fetch observations for {station_id}"))?;
        Ok(res.features.into_iter().map(|f| f.properties).collect())
    }

    /// Forecast periods from a point's gridpoint forecast URL.
    pub async fn forecast(&self, forecast_url: &str) -> Result<Vec<ForecastPeriod>> {
        let res: ForecastResponse = self
            .fetch(forecast_url)
            .await
            .context("Failed to fetch forecast")?;
        Ok(res.properties.periods)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    relative_location: RelativeLocation,
    forecast: String,
    observation_stations: String,
}

#[derive(Debug, Deserialize)]
struct RelativeLocation {
    properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize)]
struct RelativeLocationProperties {
    city: String,
    state: String,
}

#[derive(Debug, Deserialize)]
struct StationResponse {
    properties: StationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationProperties {
    #[serde(default)]
    station_identifier: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct StationsResponse {
    features: Vec<StationFeature>,
}

#[derive(Debug, Deserialize)]
struct StationFeature {
    properties: StationProperties,
}

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    properties: Observation,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    features: Vec<ObservationFeature>,
}

#[derive(Debug, Deserialize)]
struct ObservationFeature {
    properties: Observation,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_response_decodes() {
        let input = r#"{
            "properties": {
                "relativeLocation": {
                    "properties": {"city": "Erie", "state": "CO"}
                },
                "forecast": "https://api.weather.gov/gridpoints/BOU/60,69/forecast",
                "observationStations": "https://api.weather.gov/gridpoints/BOU/60,69/stations"
            }
        }"#;

        let res: PointsResponse = serde_json::from_str(input).unwrap();
        assert_eq!(res.properties.relative_location.properties.city, "Erie");
        assert_eq!(res.properties.relative_location.properties.state, "CO");
        assert!(res.properties.forecast.ends_with("/forecast"));
        assert!(res.properties.observation_stations.ends_with("/stations"));
    }

    #[test]
    fn stations_response_decodes() {
        let input = r#"{
            "features": [
                {"properties": {"stationIdentifier": "KEIK", "name": "Erie Municipal Airport"}},
                {"properties": {"stationIdentifier": "KBJC", "name": "Rocky Mountain Metro"}}
            ]
        }"#;

        let res: StationsResponse = serde_json::from_str(input).unwrap();
        assert_eq!(res.features.len(), 2);
        assert_eq!(res.features[0].properties.station_identifier, "KEIK");
        assert_eq!(res.features[0].properties.name, "Erie Municipal Airport");
    }

    #[test]
    fn observation_response_decodes() {
        let input = r#"{
            "properties": {
                "timestamp": "2026-02-17T18:15:00+00:00",
                "textDescription": "Clear",
                "temperature": {"value": 11.0},
                "windSpeed": {"value": null}
            }
        }"#;

        let res: ObservationResponse = serde_json::from_str(input).unwrap();
        assert_eq!(res.properties.text_description, "Clear");
        assert_eq!(res.properties.temperature.value(), Some(11.0));
        assert!(!res.properties.wind_speed.is_present());
    }

    #[test]
    fn forecast_response_decodes() {
        let input = r#"{
            "properties": {
                "periods": [{
                    "name": "Tonight",
                    "temperature": 33,
                    "temperatureUnit": "F",
                    "windSpeed": "5 to 10 mph",
                    "windDirection": "SW",
                    "shortForecast": "Partly Cloudy",
                    "detailedForecast": "Partly cloudy, with a low around 33.",
                    "isDaytime": false
                }]
            }
        }"#;

        let res: ForecastResponse = serde_json::from_str(input).unwrap();
        assert_eq!(res.properties.periods.len(), 1);
        assert_eq!(res.properties.periods[0].name, "Tonight");
        assert!(!res.properties.periods[0].is_daytime);
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let got = truncate_body(&long);
        assert_eq!(got.chars().count(), 203);
        assert!(got.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::client::NwsClient;

/// Top-level configuration stored on disk: the preferred station plus the
/// coordinates used for point forecasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station: "KEIK".to_string(),
            latitude: 40.0388,
            longitude: -105.0412,
        }
    }
}

impl Config {
    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Whether a config file has been written yet. Used by the CLI to decide
    /// if the first-run setup should kick in.
    pub fn exists() -> bool {
        Self::config_file_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Load config from disk, or return the defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Auto-detected location info used to pre-fill the setup prompts.
#[derive(Debug, Clone)]
pub struct DetectedLocation {
    pub city: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub station: String,
    pub station_name: String,
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    city: String,
    #[serde(default, rename = "regionName")]
    region_name: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

/// Looks up the user's location by IP and the nearest NWS station for it.
/// Never fails: any step that errors leaves the defaults in place.
pub async fn detect_location(nws: &NwsClient) -> DetectedLocation {
    let defaults = Config::default();
    let mut detected = DetectedLocation {
        city: String::new(),
        region: String::new(),
        latitude: defaults.latitude,
        longitude: defaults.longitude,
        station: defaults.station,
        station_name: String::new(),
    };

    let Ok(geo) = fetch_geo_ip().await else {
        return detected;
    };
    if geo.status != "success" {
        return detected;
    }
    detected.city = geo.city;
    detected.region = geo.region_name;
    detected.latitude = geo.lat;
    detected.longitude = geo.lon;

    let Ok(point) = nws.point(geo.lat, geo.lon).await else {
        return detected;
    };
    let Ok(stations) = nws.nearest_stations(&point.stations_url).await else {
        return detected;
    };
    if let Some(nearest) = stations.into_iter().next() {
        detected.station = nearest.id;
        detected.station_name = nearest.name;
    }

    detected
}

async fn fetch_geo_ip() -> Result<GeoIpResponse> {
    let geo = reqwest::get("http://ip-api.com/json/")
        .await
        .context("Failed to reach IP geolocation service")?
        .json::<GeoIpResponse>()
        .await
        .context("Failed to decode IP geolocation response")?;
    Ok(geo)
}

use anyhow::anyhow;
use chrono::Utc;
use clap::{Parser, Subcommand};
use skycast_core::{Config, NwsClient};

use crate::{report, setup};

/// Observations older than this are dropped from the recent table.
const RECENT_DAYS: i64 = 3;

/// Page size for the observation fetch; roughly three days of reports.
const OBSERVATION_PAGE: usize = 500;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "NWS weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current conditions and short-term forecast for a point.
    Forecast {
        /// Latitude; defaults to the configured value.
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude; defaults to the configured value.
        #[arg(long)]
        lon: Option<f64>,
    },

    /// Recent observations and 3-day wind extremes for a station.
    Recent {
        /// ICAO station identifier (e.g. KEIK, KDEN); defaults to the
        /// configured value.
        #[arg(long)]
        station: Option<String>,

        /// Number of recent observations to display.
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Interactively (re)create the configuration file.
    Setup,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Setup => {
                setup::run_setup().await?;
            }
            Command::Forecast { lat, lon } => {
                let config = setup::load_or_setup().await?;
                run_forecast(&config, lat, lon).await?;
            }
            Command::Recent { station, count } => {
                let config = setup::load_or_setup().await?;
                run_recent(&config, station, count).await?;
            }
        }

        Ok(())
    }
}

async fn run_forecast(config: &Config, lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<()> {
    let lat = lat.unwrap_or(config.latitude);
    let lon = lon.unwrap_or(config.longitude);
    let client = NwsClient::new();

    let point = client.point(lat, lon).await?;

    let stations = client.nearest_stations(&point.stations_url).await?;
    let nearest = stations
        .first()
        .ok_or_else(|| anyhow!("No observation stations found near {lat:.4}, {lon:.4}"))?;

    let observation = client.latest_observation(&nearest.id).await?;
    let periods = client.forecast(&point.forecast_url).await?;

    println!();
    println!("  {}, {}", point.city, point.state);
    println!("  Station: {} ({})", nearest.name, nearest.id);
    println!();
    print!("{}", report::current_conditions(&observation));
    print!("{}", report::forecast_summary(&periods));

    Ok(())
}

async fn run_recent(
    config: &Config,
    station: Option<String>,
    count: usize,
) -> anyhow::Result<()> {
    let station_id = station
        .unwrap_or_else(|| config.station.clone())
        .to_uppercase();
    let client = NwsClient::new();

    let station_name = client.station_name(&station_id).await?;
    let page = client.observations(&station_id, OBSERVATION_PAGE).await?;

    let observations = report::recent_observations(page, Utc::now(), RECENT_DAYS);
    if observations.is_empty() {
        return Err(anyhow!("No observations found for station {station_id}"));
    }

    println!();
    println!("  Station: {station_name} ({station_id})");
    println!();
    print!("{}", report::observation_table(&observations, count));
    println!();
    print!("{}", report::wind_extremes(&observations));
    println!();

    Ok(())
}

//! First-run configuration wizard.

use anyhow::{Context, Result};
use inquire::{CustomType, Text};
use skycast_core::{Config, NwsClient, detect_location};

/// Loads the saved config, or walks the user through setup on first run.
pub async fn load_or_setup() -> Result<Config> {
    if Config::exists() {
        return Config::load();
    }
    run_setup().await
}

/// Detects the user's location, prompts for confirmation and saves the
/// result. Detection failures silently fall back to default values.
pub async fn run_setup() -> Result<Config> {
    println!();
    println!("  ── skycast configuration ──");
    println!();
    println!("  Detecting your location...");

    let detected = detect_location(&NwsClient::new()).await;

    if detected.city.is_empty() {
        println!("  Could not detect a location, using defaults.");
    } else {
        println!("  Found {}, {}", detected.city, detected.region);
    }
    if !detected.station_name.is_empty() {
        println!(
            "  Nearest station: {} ({})",
            detected.station_name, detected.station
        );
    }
    println!();

    let station = Text::new("ICAO station code")
        .with_default(&detected.station)
        .prompt()
        .context("Station prompt aborted")?;
    let latitude = CustomType::<f64>::new("Latitude")
        .with_default(detected.latitude)
        .prompt()
        .context("Latitude prompt aborted")?;
    let longitude = CustomType::<f64>::new("Longitude")
        .with_default(detected.longitude)
        .prompt()
        .context("Longitude prompt aborted")?;

    let config = Config {
        station: station.trim().to_uppercase(),
        latitude,
        longitude,
    };
    config.save().context("Failed to save configuration")?;

    println!();
    println!("  Config saved to {}", Config::config_file_path()?.display());
    println!();

    Ok(config)
}

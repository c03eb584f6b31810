//! Pure rendering of fetched data into terminal text. Everything here
//! returns strings so it can be tested without touching the network.

use chrono::{DateTime, Duration, Utc};
use skycast_core::format;
use skycast_core::model::{ForecastPeriod, Observation};

/// How many forecast periods the forecast report shows.
const FORECAST_PERIODS: usize = 4;

/// Column width for wrapped detailed-forecast text.
const FORECAST_WRAP: usize = 60;

/// Width of the Weather column in the observation table.
const WEATHER_COL: usize = 28;

/// Keeps only observations newer than `days` days before `now`. Entries with
/// unparseable timestamps are dropped.
pub fn recent_observations(
    observations: Vec<Observation>,
    now: DateTime<Utc>,
    days: i64,
) -> Vec<Observation> {
    let cutoff = now - Duration::days(days);
    observations
        .into_iter()
        .filter(|o| {
            DateTime::parse_from_rfc3339(&o.timestamp)
                .is_ok_and(|t| t.with_timezone(&Utc) > cutoff)
        })
        .collect()
}

/// The current-conditions block. Lines for absent measurements are omitted
/// entirely; wind always prints, with "mph" suffixed unless calm.
pub fn current_conditions(obs: &Observation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  ── Current Conditions ({}) ──\n\n",
        format::format_time(&obs.timestamp)
    ));
    out.push_str(&format!("    {}\n", obs.text_description));

    if obs.temperature.is_present() {
        out.push_str(&format!(
            "    Temperature:  {:.0}°F",
            format::c_to_f(obs.temperature.get())
        ));
        if obs.wind_chill.is_present() {
            out.push_str(&format!(
                "  (Wind Chill: {:.0}°F)",
                format::c_to_f(obs.wind_chill.get())
            ));
        }
        out.push('\n');
    }
    if obs.dewpoint.is_present() {
        out.push_str(&format!(
            "    Dewpoint:     {:.0}°F\n",
            format::c_to_f(obs.dewpoint.get())
        ));
    }
    if obs.relative_humidity.is_present() {
        out.push_str(&format!(
            "    Humidity:     {:.0}%\n",
            obs.relative_humidity.get()
        ));
    }

    let mut wind = format::format_wind(
        obs.wind_direction.value(),
        obs.wind_speed.value(),
        obs.wind_gust.value(),
    );
    if wind != "Calm" {
        wind.push_str(" mph");
    }
    out.push_str(&format!("    Wind:         {wind}\n"));

    if obs.visibility.is_present() {
        out.push_str(&format!(
            "    Visibility:   {:.1} mi\n",
            format::meters_to_miles(obs.visibility.get())
        ));
    }
    if obs.barometric_pressure.is_present() {
        out.push_str(&format!(
            "    Barometer:    {:.2} in\n",
            format::pa_to_inhg(obs.barometric_pressure.get())
        ));
    }
    out.push('\n');
    out
}

/// Up to four forecast periods, each with a High/Low label and the detailed
/// text word-wrapped. Empty input renders nothing.
pub fn forecast_summary(periods: &[ForecastPeriod]) -> String {
    let mut out = String::new();
    if periods.is_empty() {
        return out;
    }

    out.push_str("  ── Forecast ───────────────────────────────\n\n");
    for period in periods.iter().take(FORECAST_PERIODS) {
        let label = if period.is_daytime { "High" } else { "Low" };
        out.push_str(&format!(
            "    {:<18} {}: {}°{}  Wind: {} {}\n",
            period.name,
            label,
            period.temperature,
            period.temperature_unit,
            period.wind_direction,
            period.wind_speed
        ));
        for line in format::word_wrap(&period.detailed_forecast, FORECAST_WRAP) {
            out.push_str(&format!("      {line}\n"));
        }
        out.push('\n');
    }
    out
}

/// Box-drawing table of the first `count` observations plus a footer noting
/// how many of the page are shown.
pub fn observation_table(observations: &[Observation], count: usize) -> String {
    let shown = count.min(observations.len());
    let mut out = String::new();

    out.push_str("  ┌────────────────┬────────────────┬────────┬──────┬──────┬────────┬──────────────────────────────┐\n");
    out.push_str("  │ Time           │ Wind           │ Vis mi │ Temp │ Dwpt │ Hum    │ Weather                      │\n");
    out.push_str("  ├────────────────┼────────────────┼────────┼──────┼──────┼────────┼──────────────────────────────┤\n");

    for obs in &observations[..shown] {
        let ts = format::format_time(&obs.timestamp);
        let wind = format::format_wind(
            obs.wind_direction.value(),
            obs.wind_speed.value(),
            obs.wind_gust.value(),
        );
        let vis = obs
            .visibility
            .format_or_dash(|v| format!("{:.1}", format::meters_to_miles(v)));
        let temp = obs
            .temperature
            .format_or_dash(|v| format!("{:.0}", format::c_to_f(v)));
        let dwpt = obs
            .dewpoint
            .format_or_dash(|v| format!("{:.0}", format::c_to_f(v)));
        let hum = obs.relative_humidity.format_or_dash(|v| format!("{v:.0}%"));
        let weather = format::truncate(&obs.text_description, WEATHER_COL);

        out.push_str(&format!(
            "  │ {ts:<14} │ {wind:<14} │ {vis:>6} │ {temp:>4} │ {dwpt:>4} │ {hum:>6} │ {weather:<28} │\n"
        ));
    }

    out.push_str("  └────────────────┴────────────────┴────────┴──────┴──────┴────────┴──────────────────────────────┘\n");
    out.push_str(&format!(
        "  Showing {} of {} observations (3 days)\n",
        shown,
        observations.len()
    ));
    out
}

/// Highest sustained wind and highest gust across the observation page.
pub fn wind_extremes(observations: &[Observation]) -> String {
    let mut out = String::new();
    out.push_str("  ── 3-Day Extremes ─────────────────────────\n");

    let fastest = observations
        .iter()
        .filter_map(|o| o.wind_speed.value().map(|v| (v, o)))
        .filter(|(v, _)| *v > 0.0)
        .max_by(|a, b| a.0.total_cmp(&b.0));
    match fastest {
        Some((speed, obs)) => out.push_str(&format!(
            "  Highest Wind:  {:.0} mph {} ({})\n",
            format::kmh_to_mph(speed),
            format::compass_dir(obs.wind_direction.value()),
            format::format_time(&obs.timestamp)
        )),
        None => out.push_str("  Highest Wind:  No sustained winds recorded\n"),
    }

    let gustiest = observations
        .iter()
        .filter_map(|o| o.wind_gust.value().map(|v| (v, o)))
        .filter(|(v, _)| *v > 0.0)
        .max_by(|a, b| a.0.total_cmp(&b.0));
    match gustiest {
        Some((gust, obs)) => out.push_str(&format!(
            "  Highest Gust:  {:.0} mph {} ({})\n",
            format::kmh_to_mph(gust),
            format::compass_dir(obs.wind_direction.value()),
            format::format_time(&obs.timestamp)
        )),
        None => out.push_str("  Highest Gust:  No gusts recorded\n"),
    }

    out
}

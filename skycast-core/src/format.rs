//! Unit conversions and display formatting.
//!
//! Everything here is a pure function over already-decoded values: metric
//! API units in, terminal-ready text out.

use chrono::{DateTime, Local};

pub fn c_to_f(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * 0.621371
}

pub fn meters_to_miles(m: f64) -> f64 {
    m / 1609.34
}

pub fn pa_to_inhg(pa: f64) -> f64 {
    pa / 3386.39
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Bins a heading in degrees into the 16-point compass rose, or `""` when
/// the heading is absent. 360° wraps around to "N".
pub fn compass_dir(deg: Option<f64>) -> &'static str {
    let Some(deg) = deg else {
        return "";
    };
    let idx = (deg / 22.5).round() as usize % 16;
    COMPASS_POINTS[idx]
}

/// Builds a wind phrase like "W 19", "S 12 G 25" or "Vrbl 6" from optional
/// direction (degrees), sustained speed and gust (both km/h).
///
/// Returns the literal "Calm" when neither speed nor gust carries a positive
/// value; callers append a "mph" suffix to every phrase except "Calm".
pub fn format_wind(dir: Option<f64>, speed: Option<f64>, gust: Option<f64>) -> String {
    let speed = speed.filter(|s| *s > 0.0);
    let gust = gust.filter(|g| *g > 0.0);

    if speed.is_none() && gust.is_none() {
        return "Calm".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let dir_label = compass_dir(dir);
    if !dir_label.is_empty() {
        parts.push(dir_label.to_string());
    } else if speed.is_some() {
        parts.push("Vrbl".to_string());
    }
    if let Some(s) = speed {
        parts.push(format!("{:.0}", kmh_to_mph(s)));
    }
    if let Some(g) = gust {
        parts.push(format!("G {:.0}", kmh_to_mph(g)));
    }
    parts.join(" ")
}

/// Renders an RFC 3339 timestamp as local "Mon DD HH:MM". A string that does
/// not parse is returned unchanged rather than surfaced as an error.
pub fn format_time(ts: &str) -> String {
    match DateTime::parse_from_rfc3339(ts) {
        Ok(t) => t.with_timezone(&Local).format("%b %d %H:%M").to_string(),
        Err(_) => ts.to_string(),
    }
}

/// Caps a string at `max_len` characters, replacing the tail with a single
/// ellipsis. Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_len.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Greedy word-wrap: packs whole words onto lines of at most `width`
/// characters. A single word longer than `width` gets its own overflowing
/// line; words are never split.
pub fn word_wrap(s: &str, width: usize) -> Vec<String> {
    let mut words = s.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        if current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    lines.push(current);
    lines
}

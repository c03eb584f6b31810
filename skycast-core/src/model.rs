use serde::Deserialize;

/// A sensor reading that may legitimately be absent.
///
/// The NWS API encodes measurements as `{"value": <number|null>}`, where
/// `null` means the sensor did not report. Absence is kept distinct from a
/// real zero (calm wind, 0% humidity), so downstream formatting can render a
/// placeholder instead of a misleading number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Measurement {
    value: Option<f64>,
}

impl Measurement {
    pub fn new(value: Option<f64>) -> Self {
        Self { value }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns the reading, panicking if it is absent. Callers must check
    /// [`is_present`](Self::is_present) first; tripping this is a bug, not a
    /// runtime condition.
    pub fn get(&self) -> f64 {
        self.value
            .expect("measurement accessed without checking presence")
    }

    /// Applies `f` to the reading if present, otherwise yields `"-"`.
    pub fn format_or_dash(&self, f: impl Fn(f64) -> String) -> String {
        match self.value {
            Some(v) => f(v),
            None => "-".to_string(),
        }
    }
}

/// One station observation as reported by
/// `/stations/{id}/observations/latest` (and per feature in the observation
/// collection). Immutable snapshot; every measurement is independently
/// optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Observation {
    pub timestamp: String,
    pub text_description: String,
    pub temperature: Measurement,
    pub dewpoint: Measurement,
    pub wind_direction: Measurement,
    pub wind_speed: Measurement,
    pub wind_gust: Measurement,
    pub visibility: Measurement,
    pub relative_humidity: Measurement,
    pub barometric_pressure: Measurement,
    pub wind_chill: Measurement,
}

/// One named forecast period ("Tonight", "Saturday", ...) from the gridpoint
/// forecast endpoint. The API always populates these fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: i64,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    pub is_daytime: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_decodes_value() {
        let m: Measurement = serde_json::from_str(r#"{"value": 42.5}"#).unwrap();
        assert!(m.is_present());
        assert_eq!(m.get(), 42.5);
    }

    #[test]
    fn measurement_decodes_null_as_absent() {
        let m: Measurement = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert!(!m.is_present());
        assert_eq!(m.value(), None);
    }

    #[test]
    fn measurement_keeps_zero_distinct_from_absent() {
        let zero: Measurement = serde_json::from_str(r#"{"value": 0}"#).unwrap();
        assert!(zero.is_present());
        assert_eq!(zero.get(), 0.0);

        let negative: Measurement = serde_json::from_str(r#"{"value": -10.5}"#).unwrap();
        assert!(negative.is_present());
        assert_eq!(negative.get(), -10.5);
    }

    #[test]
    #[should_panic(expected = "without checking presence")]
    fn measurement_get_panics_when_absent() {
        Measurement::new(None).get();
    }

    #[test]
    fn measurement_format_or_dash() {
        let absent = Measurement::new(None);
        assert_eq!(absent.format_or_dash(|v| format!("{v:.0}")), "-");

        let present = Measurement::new(Some(42.0));
        assert_eq!(present.format_or_dash(|v| format!("{v:.0}")), "42");
    }

    #[test]
    fn observation_decodes_mixed_fields() {
        let input = r#"{
            "timestamp": "2026-02-17T18:15:00+00:00",
            "textDescription": "Clear",
            "temperature": {"value": 11.0},
            "dewpoint": {"value": -14.9},
            "windDirection": {"value": 270},
            "windSpeed": {"value": null},
            "windGust": {"value": 63},
            "visibility": {"value": 16090},
            "relativeHumidity": {"value": 14.7},
            "barometricPressure": {"value": 99800},
            "windChill": {"value": null}
        }"#;

        let obs: Observation = serde_json::from_str(input).unwrap();
        assert_eq!(obs.timestamp, "2026-02-17T18:15:00+00:00");
        assert_eq!(obs.text_description, "Clear");
        assert_eq!(obs.temperature.value(), Some(11.0));
        assert_eq!(obs.wind_direction.value(), Some(270.0));
        assert!(!obs.wind_speed.is_present());
        assert_eq!(obs.wind_gust.value(), Some(63.0));
        assert_eq!(obs.barometric_pressure.value(), Some(99800.0));
        assert!(!obs.wind_chill.is_present());
    }

    #[test]
    fn observation_tolerates_missing_fields() {
        // Some stations omit whole fields rather than sending null.
        let obs: Observation =
            serde_json::from_str(r#"{"timestamp": "2026-02-17T18:15:00+00:00"}"#).unwrap();
        assert_eq!(obs.text_description, "");
        assert!(!obs.temperature.is_present());
        assert!(!obs.wind_gust.is_present());
    }

    #[test]
    fn forecast_period_decodes() {
        let input = r#"{
            "name": "Today",
            "temperature": 53,
            "temperatureUnit": "F",
            "windSpeed": "24 to 31 mph",
            "windDirection": "W",
            "shortForecast": "Mostly Sunny",
            "detailedForecast": "Mostly sunny with a high near 53.",
            "isDaytime": true
        }"#;

        let period: ForecastPeriod = serde_json::from_str(input).unwrap();
        assert_eq!(period.name, "Today");
        assert_eq!(period.temperature, 53);
        assert_eq!(period.temperature_unit, "F");
        assert_eq!(period.wind_direction, "W");
        assert!(period.is_daytime);
        assert_eq!(period.detailed_forecast, "Mostly sunny with a high near 53.");
    }
}

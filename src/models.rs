//! Data models shared by the aggregator backend and the monitor client.

use serde::{Deserialize, Serialize};

// ---

/// Offset between the provider's Kelvin scale and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// A configured city: provider identifier plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    // ---
    pub id: u64,
    pub name: &'static str,
}

/// Cities served by `/api/weather`, in declaration order.
pub const CITIES: [Source; 6] = [
    Source {
        id: 1273294,
        name: "Delhi",
    },
    Source {
        id: 1275339,
        name: "Mumbai",
    },
    Source {
        id: 1264527,
        name: "Chennai",
    },
    Source {
        id: 1277333,
        name: "Bangalore",
    },
    Source {
        id: 1275004,
        name: "Kolkata",
    },
    Source {
        id: 1269843,
        name: "Hyderabad",
    },
];

/// Raw current-weather payload from the provider.
///
/// Only the fields the aggregator reads are modelled; everything else in the
/// provider response is ignored.
#[derive(Debug, Deserialize)]
pub struct RawObservation {
    // ---
    pub name: String,
    pub weather: Vec<RawCondition>,
    pub main: RawMain,
    pub wind: RawWind,
    pub dt: i64,
}

#[derive(Debug, Deserialize)]
pub struct RawCondition {
    pub main: String,
}

#[derive(Debug, Deserialize)]
pub struct RawMain {
    // ---
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}

/// Normalized observation for one city, temperatures in °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    // ---
    pub city: String,
    pub main: String,
    pub temp: f64,
    pub feels_like: f64,
    pub dt: i64,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Records from one aggregation pass.
pub type Batch = Vec<Record>;

/// Day-level temperature statistics.
///
/// Served (mocked) by `/api/summary/{date}` and derived for real by the
/// monitor from its history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    // ---
    pub date: String,
    pub average_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_weather: Option<String>,
}

/// Convert a Kelvin reading to Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

impl RawObservation {
    // ---
    /// Normalize into a [`Record`].
    ///
    /// Returns `None` when the provider sent no condition entry, since the
    /// record label comes from `weather[0]`.
    pub fn to_record(&self) -> Option<Record> {
        // ---
        let condition = self.weather.first()?;

        Some(Record {
            city: self.name.clone(),
            main: condition.main.clone(),
            temp: kelvin_to_celsius(self.main.temp),
            feels_like: kelvin_to_celsius(self.main.feels_like),
            dt: self.dt,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
        })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_observation(temp_k: f64, feels_k: f64) -> RawObservation {
        // ---
        RawObservation {
            name: "Delhi".to_string(),
            weather: vec![RawCondition {
                main: "Haze".to_string(),
            }],
            main: RawMain {
                temp: temp_k,
                feels_like: feels_k,
                humidity: 40.0,
            },
            wind: RawWind { speed: 3.6 },
            dt: 1_742_990_700,
        }
    }

    #[test]
    fn test_kelvin_conversion() {
        // ---
        let record = create_test_observation(300.0, 302.5).to_record().unwrap();

        // 300 K is 26.85 °C; stored at full precision
        assert!((record.temp - 26.85).abs() < 1e-9);
        assert!((record.feels_like - 29.35).abs() < 1e-9);
        assert_eq!(format!("{:.2}", record.temp), "26.85");
    }

    #[test]
    fn test_conversion_applied_once() {
        // ---
        let record = create_test_observation(273.15, 273.15).to_record().unwrap();
        assert_eq!(record.temp, 0.0);
        assert_eq!(record.feels_like, 0.0);
    }

    #[test]
    fn test_data_preservation() {
        // ---
        let record = create_test_observation(290.0, 289.0).to_record().unwrap();

        assert_eq!(record.city, "Delhi");
        assert_eq!(record.main, "Haze");
        assert_eq!(record.dt, 1_742_990_700);
        assert_eq!(record.humidity, 40.0);
        assert_eq!(record.wind_speed, 3.6);
    }

    #[test]
    fn test_missing_condition_yields_none() {
        // ---
        let mut raw = create_test_observation(290.0, 289.0);
        raw.weather.clear();
        assert!(raw.to_record().is_none());
    }

    #[test]
    fn test_provider_payload_parses() {
        // ---
        let body = serde_json::json!({
            "coord": { "lon": 77.22, "lat": 28.67 },
            "weather": [{ "id": 721, "main": "Haze", "description": "haze" }],
            "main": { "temp": 305.15, "feels_like": 306.0, "humidity": 33, "pressure": 1008 },
            "wind": { "speed": 2.57, "deg": 290 },
            "dt": 1_742_990_700,
            "name": "Delhi"
        });

        let raw: RawObservation = serde_json::from_value(body).unwrap();
        let record = raw.to_record().unwrap();
        assert!((record.temp - 32.0).abs() < 1e-9);
        assert_eq!(record.wind_speed, 2.57);
    }

    #[test]
    fn test_record_wire_shape() {
        // ---
        let record = create_test_observation(300.0, 300.0).to_record().unwrap();
        let json = serde_json::to_value(&record).unwrap();

        for key in ["city", "main", "temp", "feels_like", "dt", "humidity", "wind_speed"] {
            assert!(json.get(key).is_some(), "missing '{}'", key);
        }
    }

    #[test]
    fn test_summary_uses_camel_case() {
        // ---
        let summary = DailySummary {
            date: "2025-03-26".to_string(),
            average_temp: 25.0,
            max_temp: 30.0,
            min_temp: 20.0,
            dominant_weather: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"averageTemp\":25.0"));
        assert!(!json.contains("dominantWeather"));
    }

    #[test]
    fn test_cities_are_unique() {
        // ---
        for (i, a) in CITIES.iter().enumerate() {
            for b in &CITIES[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.name, b.name);
            }
        }
    }
}

//! Static temperature threshold checks.
//!
//! Every record is compared against a fixed `max`/`min` pair. Each violation
//! becomes its own [`AlertEvent`]; nothing is deduplicated across polls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Record;

// ---

/// Alert bounds in °C. Strict comparison: a reading equal to a bound is fine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub max: f64,
    pub min: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max: 35.0,
            min: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    // ---
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub message: String,
}

impl AlertEvent {
    fn warning(message: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            kind: AlertType::Warning,
            message,
        }
    }
}

/// Check one batch; returns alerts in record order.
pub fn check_alerts(
    batch: &[Record],
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> Vec<AlertEvent> {
    // ---
    let mut alerts = Vec::new();
    for record in batch {
        if record.temp > thresholds.max {
            alerts.push(AlertEvent::warning(
                format!("High temperature alert in {}: {:.1}°C", record.city, record.temp),
                now,
            ));
        }
        if record.temp < thresholds.min {
            alerts.push(AlertEvent::warning(
                format!("Low temperature alert in {}: {:.1}°C", record.city, record.temp),
                now,
            ));
        }
    }
    alerts
}

/// Session alert list with an optional rolling cap.
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    events: Vec<AlertEvent>,
    cap: Option<usize>,
}

impl AlertLog {
    // ---
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            events: Vec::new(),
            cap,
        }
    }

    pub fn extend(&mut self, new_events: impl IntoIterator<Item = AlertEvent>) {
        // ---
        self.events.extend(new_events);
        if let Some(cap) = self.cap {
            if self.events.len() > cap {
                let excess = self.events.len() - cap;
                self.events.drain(0..excess);
            }
        }
    }

    pub fn events(&self) -> &[AlertEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn record(city: &str, temp: f64) -> Record {
        Record {
            city: city.to_string(),
            main: "Clear".to_string(),
            temp,
            feels_like: temp,
            dt: 0,
            humidity: 50.0,
            wind_speed: 1.0,
        }
    }

    /// Check against the default 35 / 10 bounds.
    fn check(batch: &[Record]) -> Vec<AlertEvent> {
        check_alerts(batch, &Thresholds::default(), Utc::now())
    }

    #[test]
    fn test_high_temperature_alert() {
        // ---
        let alerts = check(&[record("Delhi", 36.2)]);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertType::Warning);
        assert!(alerts[0].message.contains("Delhi"));
        assert!(alerts[0].message.contains("36.2"));
        assert!(alerts[0].message.starts_with("High"));
    }

    #[test]
    fn test_low_temperature_alert() {
        let alerts = check(&[record("Bangalore", 8.04)]);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message, "Low temperature alert in Bangalore: 8.0°C");
    }

    #[test]
    fn test_bounds_are_exclusive() {
        // ---
        let batch = [record("A", 35.0), record("B", 10.0), record("C", 22.0)];
        assert!(check(&batch).is_empty());
    }

    #[test]
    fn test_each_violation_is_separate() {
        // ---
        let batch = [record("A", 40.0), record("B", 41.0), record("C", 2.0)];
        let alerts = check(&batch);

        assert_eq!(alerts.len(), 3);
        assert!(alerts[0].message.contains("A"));
        assert!(alerts[2].message.contains("Low"));
        assert_ne!(alerts[0].id, alerts[1].id);
    }

    #[test]
    fn test_inverted_thresholds_fire_both() {
        // A reading can break both bounds when max < min
        let thresholds = Thresholds {
            max: 10.0,
            min: 20.0,
        };
        let alerts = check_alerts(&[record("A", 15.0)], &thresholds, Utc::now());
        assert_eq!(alerts.len(), 2);
    }

    #[test]
    fn test_alert_log_cap() {
        // ---
        let mut log = AlertLog::new(Some(2));
        let batch = [record("A", 40.0), record("B", 41.0), record("C", 42.0)];
        log.extend(check(&batch));

        assert_eq!(log.len(), 2);
        assert!(log.events()[0].message.contains("B"));
    }

    #[test]
    fn test_alert_log_accumulates_without_cap() {
        let mut log = AlertLog::new(None);
        for _ in 0..3 {
            log.extend(check(&[record("A", 40.0)]));
        }
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_alert_wire_shape() {
        let alerts = check(&[record("A", 40.0)]);
        let json = serde_json::to_value(&alerts[0]).unwrap();
        assert_eq!(json["type"], "warning");
    }
}

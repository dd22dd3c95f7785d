//! Plain-text dashboard.

use std::fmt::{self, Write as _};

use crate::models::{DailySummary, Record};

use super::alerts::AlertEvent;

// ---

pub fn render_dashboard(
    current: &[Record],
    summary: Option<&DailySummary>,
    alerts: &[AlertEvent],
) -> String {
    // ---
    let mut out = String::new();
    if let Err(e) = write_dashboard(&mut out, current, summary, alerts) {
        tracing::warn!("Dashboard render stopped early: {}", e);
    }
    out
}

fn write_dashboard(
    out: &mut String,
    current: &[Record],
    summary: Option<&DailySummary>,
    alerts: &[AlertEvent],
) -> fmt::Result {
    // ---
    writeln!(out, "Weather Monitoring Dashboard")?;

    writeln!(out, "\nCurrent Weather")?;
    if current.is_empty() {
        writeln!(out, "  (no data)")?;
    }
    for r in current {
        writeln!(
            out,
            "  {:<12} {:>6.1}°C  feels like {:.1}°C  {}",
            r.city, r.temp, r.feels_like, r.main
        )?;
    }

    if let Some(s) = summary {
        writeln!(out, "\nDaily Summary ({})", s.date)?;
        writeln!(out, "  Average Temperature: {:.1}°C", s.average_temp)?;
        writeln!(out, "  Maximum Temperature: {:.1}°C", s.max_temp)?;
        writeln!(out, "  Minimum Temperature: {:.1}°C", s.min_temp)?;
        if let Some(w) = &s.dominant_weather {
            writeln!(out, "  Dominant Weather:    {}", w)?;
        }
    }

    if !current.is_empty() {
        writeln!(out, "\nTemperature Trends")?;
        for r in current {
            writeln!(
                out,
                "  {:<12} temp {:>6.1}  feels {:>6.1}",
                r.city, r.temp, r.feels_like
            )?;
        }
    }

    writeln!(out, "\nAlerts")?;
    if alerts.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for a in alerts {
        writeln!(out, "  [{}] {}", a.created_at.format("%H:%M:%S"), a.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::monitor::alerts::{check_alerts, Thresholds};
    use chrono::Utc;

    fn record(city: &str, temp: f64) -> Record {
        Record {
            city: city.to_string(),
            main: "Haze".to_string(),
            temp,
            feels_like: temp + 1.26,
            dt: 0,
            humidity: 30.0,
            wind_speed: 2.0,
        }
    }

    #[test]
    fn test_cards_use_one_decimal() {
        let out = render_dashboard(&[record("Delhi", 26.85)], None, &[]);
        assert!(out.contains("Delhi"));
        assert!(out.contains("26.9°C"));
        assert!(out.contains("feels like 28.1°C"));
        assert!(out.contains("Haze"));
    }

    #[test]
    fn test_summary_and_alerts_sections() {
        // ---
        let batch = [record("Chennai", 36.2)];
        let summary = DailySummary {
            date: "2025-03-26".to_string(),
            average_temp: 25.0,
            max_temp: 30.0,
            min_temp: 20.0,
            dominant_weather: Some("Haze".to_string()),
        };
        let alerts = check_alerts(&batch, &Thresholds::default(), Utc::now());

        let out = render_dashboard(&batch, Some(&summary), &alerts);
        assert!(out.contains("Daily Summary (2025-03-26)"));
        assert!(out.contains("Average Temperature: 25.0°C"));
        assert!(out.contains("High temperature alert in Chennai: 36.2°C"));
    }

    #[test]
    fn test_sections_in_order() {
        // ---
        let out = render_dashboard(&[record("Delhi", 30.0)], None, &[]);
        let at = |needle: &str| out.find(needle).unwrap();

        assert!(out.starts_with("Weather Monitoring Dashboard\n"));
        assert!(at("Current Weather") < at("Temperature Trends"));
        assert!(at("Temperature Trends") < at("Alerts"));
        assert!(out.ends_with("  (none)\n"));
    }

    #[test]
    fn test_empty_dashboard() {
        let out = render_dashboard(&[], None, &[]);
        assert!(out.contains("(no data)"));
        assert!(out.contains("(none)"));
        assert!(!out.contains("Daily Summary"));
    }
}

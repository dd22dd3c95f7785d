//! Same-day summary folded from the history log.

use std::collections::BTreeMap;

use chrono::{NaiveDate, SecondsFormat};

use crate::models::DailySummary;

use super::history::HistoryEntry;

// ---

/// ISO calendar-day key, `YYYY-MM-DD`.
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Summarize every record of every entry stamped on `day` (UTC).
///
/// Entries are matched by the ISO-8601 prefix of their timestamp. Returns
/// `None` when the day holds no records. Pure: the same log and day always
/// give the same answer.
pub fn summarize_day(entries: &[HistoryEntry], day: NaiveDate) -> Option<DailySummary> {
    // ---
    let key = day_key(day);

    let records = entries
        .iter()
        .filter(|e| {
            e.timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .starts_with(&key)
        })
        .flat_map(|e| e.data.iter());

    let mut count = 0usize;
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut conditions: BTreeMap<&str, usize> = BTreeMap::new();

    for record in records {
        count += 1;
        sum += record.temp;
        max = max.max(record.temp);
        min = min.min(record.temp);
        *conditions.entry(record.main.as_str()).or_default() += 1;
    }

    if count == 0 {
        return None;
    }

    Some(DailySummary {
        date: key,
        average_temp: sum / count as f64,
        max_temp: max,
        min_temp: min,
        dominant_weather: dominant(&conditions),
    })
}

/// Most frequent label; ties go to the alphabetically first one.
fn dominant(counts: &BTreeMap<&str, usize>) -> Option<String> {
    // ---
    let mut best: Option<(&str, usize)> = None;
    for (&label, &n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((label, n));
        }
    }
    best.map(|(label, _)| label.to_string())
}

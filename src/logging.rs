//! Tracing setup shared by the backend and monitor binaries.

use std::env;

use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

// ---

/// Install the process-wide subscriber for `weatherwatch` and
/// `weatherwatch-monitor`.
///
/// `RUST_LOG` wins when set. Otherwise `AXUM_LOG_LEVEL` picks the level for
/// our own targets while `hyper_util` and `reqwest` stay at `info`, so six
/// concurrent provider fetches per poll do not drown the fetch summaries.
/// `FORCE_COLOR` overrides TTY detection and `AXUM_SPAN_EVENTS` (`full` or
/// `enter_exit`) widens span output beyond close events, which is where the
/// per-city `fetch_one` timings show up.
///
/// Must run after `.env` is loaded and before the first log line.
pub fn init_tracing() {
    // ---
    let span_events = span_events(env::var("AXUM_SPAN_EVENTS").ok().as_deref());
    let use_color = color_override(env::var("FORCE_COLOR").ok().as_deref())
        .unwrap_or_else(|| std::io::stdout().is_terminal());

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_directives(env::var("AXUM_LOG_LEVEL").ok().as_deref()))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}

fn span_events(mode: Option<&str>) -> FmtSpan {
    match mode {
        Some("full") => FmtSpan::FULL,
        Some("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    }
}

/// `Some` when `FORCE_COLOR` decides; `None` falls back to TTY detection.
fn color_override(value: Option<&str>) -> Option<bool> {
    match value {
        Some("1" | "true" | "yes") => Some(true),
        Some("0" | "false" | "no") => Some(false),
        _ => None,
    }
}

/// Filter directives for an `AXUM_LOG_LEVEL` value; HTTP client internals
/// are kept at `info` so per-city fetches stay readable.
fn default_directives(level: Option<&str>) -> String {
    // ---
    let level = match level {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => "debug",
    };
    format!("{level},hyper_util=info,reqwest=info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(None), "debug,hyper_util=info,reqwest=info");
        assert_eq!(default_directives(Some("warn")), "warn,hyper_util=info,reqwest=info");
        assert_eq!(default_directives(Some("loud")), "debug,hyper_util=info,reqwest=info");
    }

    #[test]
    fn test_color_override() {
        assert_eq!(color_override(Some("yes")), Some(true));
        assert_eq!(color_override(Some("0")), Some(false));
        assert_eq!(color_override(Some("auto")), None);
        assert_eq!(color_override(None), None);
    }

    #[test]
    fn test_span_events_default_to_close() {
        assert_eq!(span_events(None), FmtSpan::CLOSE);
        assert_eq!(span_events(Some("full")), FmtSpan::FULL);
        assert_eq!(span_events(Some("verbose")), FmtSpan::CLOSE);
    }
}

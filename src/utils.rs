use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};

pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

/// Shortest text that round-trips the value; integral values carry no fraction.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

pub fn iso_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// UTC day of month followed by UTC hour, unpadded.
pub fn compact_datestring(timestamp: DateTime<Utc>) -> String {
    format!("{}{}", timestamp.day(), timestamp.hour())
}

pub fn hour_index(timestamp: DateTime<Utc>) -> usize {
    timestamp.hour() as usize
}

//! Duration parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "2s", "300ms", "1m", "300" into a Duration.
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Milliseconds suffix: "300ms"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    // "ms" before "m" and "s"
    if let Some(num_str) = s.strip_suffix("ms") {
        let millis: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid milliseconds value: {num_str}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(num_str) = s.strip_suffix('h') {
        return scaled_secs(num_str, "hours", 3600);
    }
    if let Some(num_str) = s.strip_suffix('m') {
        return scaled_secs(num_str, "minutes", 60);
    }
    if let Some(num_str) = s.strip_suffix('s') {
        let secs: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid seconds value: {num_str}"))?;
        return Ok(Duration::from_secs(secs));
    }

    // No suffix - treat as seconds
    let secs: u64 = s
        .parse()
        .with_context(|| format!("Invalid duration value: {s}"))?;
    Ok(Duration::from_secs(secs))
}

fn scaled_secs(num_str: &str, unit: &str, secs_per_unit: u64) -> anyhow::Result<Duration> {
    let value: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid {unit} value: {num_str}"))?;
    let secs = value
        .checked_mul(secs_per_unit)
        .with_context(|| format!("Duration too large: {value} {unit}"))?;
    Ok(Duration::from_secs(secs))
}

//! Staleness duration parsing.

use anyhow::Context;
use serde::{Deserialize, Deserializer};

/// Parse a duration like "15m", "2h", "1d", "300s" or "300" into seconds.
pub fn parse_duration_to_secs(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let (number, unit_secs) = if let Some(days) = s.strip_suffix('d') {
        (days, 86_400)
    } else if let Some(hours) = s.strip_suffix('h') {
        (hours, 3_600)
    } else if let Some(minutes) = s.strip_suffix('m') {
        (minutes, 60)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, 1)
    } else {
        (s, 1)
    };

    let value: u64 = number
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration value: {s}"))?;
    value
        .checked_mul(unit_secs)
        .with_context(|| format!("Duration too large: {s}"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SecondsOrDuration {
    Seconds(u64),
    Duration(String),
}

/// Serde helper accepting either a number of seconds or a duration string.
pub fn deserialize_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match SecondsOrDuration::deserialize(deserializer)? {
        SecondsOrDuration::Seconds(secs) => Ok(secs),
        SecondsOrDuration::Duration(s) => {
            parse_duration_to_secs(&s).map_err(|e| serde::de::Error::custom(format!("{e:#}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration_to_secs("300").unwrap(), 300);
        assert_eq!(parse_duration_to_secs("300s").unwrap(), 300);
        assert_eq!(parse_duration_to_secs("15m").unwrap(), 900);
        assert_eq!(parse_duration_to_secs("2h").unwrap(), 7_200);
        assert_eq!(parse_duration_to_secs(" 1d ").unwrap(), 86_400);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration_to_secs("").is_err());
        assert!(parse_duration_to_secs("-5m").is_err());
        assert!(parse_duration_to_secs("ten minutes").is_err());
        assert!(parse_duration_to_secs("99999999999999999999d").is_err());
    }
}

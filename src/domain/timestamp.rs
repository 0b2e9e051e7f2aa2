// Timestamp parsing for values produced by the assistant service
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse an ISO-8601 timestamp. Values without a zone are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // Python's isoformat() drops the offset for naive datetimes and may
    // use a space separator.
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let parsed = parse_timestamp("2024-01-01T10:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 14, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-05T14:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-05T14:00:00.000000").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-05 14:00:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("tomorrow at 2pm").is_none());
        assert!(parse_timestamp("").is_none());
    }
}

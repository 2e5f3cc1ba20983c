//! Custom serde helpers for backend wire formats.

/// Deserializes a Unix-millis `u64` into `DateTime<Utc>`.
///
/// The backend sends timestamps as epoch milliseconds, not ISO 8601 strings.
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }
}

/// Deserializes an optional Unix-millis field into `Option<DateTime<Utc>>`.
///
/// Absent and `null` both map to `None`; a present value goes through the
/// same validation as [`timestamp_ms`].
pub mod timestamp_ms_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        millis
            .map(|m| {
                DateTime::<Utc>::from_timestamp_millis(m as i64)
                    .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", m)))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct WithOptTs {
        #[serde(default, with = "super::timestamp_ms_opt")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_opt_timestamp_present() {
        let v: WithOptTs = serde_json::from_str(r#"{"at": 1700000000000}"#).unwrap();
        assert_eq!(v.at.unwrap().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_opt_timestamp_null() {
        let v: WithOptTs = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(v.at.is_none());
    }

    #[test]
    fn test_opt_timestamp_absent() {
        let v: WithOptTs = serde_json::from_str(r#"{}"#).unwrap();
        assert!(v.at.is_none());
    }
}

use chrono::{DateTime, Utc};

use crate::error::UtilError;
use crate::Result;

/// A commit timestamp: seconds since the Unix epoch.
///
/// The wire format pins the timezone to `+0000`, so no offset is stored;
/// all rendering is UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    /// Seconds since Unix epoch.
    pub secs: i64,
}

impl Timestamp {
    pub fn new(secs: i64) -> Self {
        Self { secs }
    }

    /// The current time.
    pub fn now() -> Self {
        Self {
            secs: Utc::now().timestamp(),
        }
    }

    /// Format like "Fri Feb 13 23:31:30 2009 +0000" (the log display format).
    pub fn format_default(&self) -> String {
        let dt = DateTime::from_timestamp(self.secs, 0).unwrap_or(DateTime::UNIX_EPOCH);
        dt.format("%a %b %e %H:%M:%S %Y %z").to_string()
    }
}

/// Author/committer identity with timestamp.
///
/// Wire format: `<name> <unix-seconds> +0000`. The name may itself contain
/// spaces, so parsing splits fields off from the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub time: Timestamp,
}

impl Signature {
    pub fn new(name: impl Into<String>, time: Timestamp) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }

    /// Parse from the wire format: `Name 1234567890 +0000`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim_end();

        let (rest, zone) = input
            .rsplit_once(' ')
            .ok_or_else(|| UtilError::DateParse("missing timezone in signature".into()))?;
        if !is_zone(zone) {
            return Err(UtilError::DateParse(format!(
                "invalid timezone in signature: '{}'",
                zone
            )));
        }

        let (name, ts) = rest
            .rsplit_once(' ')
            .ok_or_else(|| UtilError::DateParse("missing timestamp in signature".into()))?;
        let secs: i64 = ts
            .parse()
            .map_err(|_| UtilError::DateParse(format!("invalid timestamp: '{}'", ts)))?;

        Ok(Self {
            name: name.trim().to_string(),
            time: Timestamp::new(secs),
        })
    }

    /// Format in the canonical wire form: `Name 1234567890 +0000`.
    pub fn to_wire(&self) -> String {
        format!("{} {} +0000", self.name, self.time.secs)
    }
}

fn is_zone(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && (bytes[0] == b'+' || bytes[0] == b'-')
        && bytes[1..].iter().all(|b| b.is_ascii_digit())
}

// Small shared value types

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A .NET-style time span as delivered by the API (`[d.]hh:mm:ss[.fffffff]`).
///
/// Kept verbatim; [`TimeSpan::to_duration`] parses on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSpan(pub String);

impl TimeSpan {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a [`Duration`]. Returns `None` for empty or unparsable
    /// values and for negative spans.
    pub fn to_duration(&self) -> Option<Duration> {
        let raw = self.0.trim();
        if raw.is_empty() || raw.starts_with('-') {
            return None;
        }

        let (days, clock) = match raw.split_once('.') {
            // `d.hh:mm:ss` has its day separator before the first colon
            Some((d, rest)) if !d.contains(':') => (d.parse::<u64>().ok()?, rest),
            _ => (0, raw),
        };

        let mut parts = clock.splitn(3, ':');
        let hours: u64 = parts.next()?.parse().ok()?;
        let minutes: u64 = parts.next()?.parse().ok()?;
        let seconds_part = parts.next()?;
        let (secs, frac) = seconds_part.split_once('.').unwrap_or((seconds_part, ""));
        let secs: u64 = secs.parse().ok()?;
        if minutes >= 60 || secs >= 60 {
            return None;
        }

        let nanos = if frac.is_empty() {
            0
        } else {
            if !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let digits: String = frac.chars().chain(std::iter::repeat('0')).take(9).collect();
            digits.parse::<u32>().ok()?
        };

        let whole = days
            .checked_mul(86_400)?
            .checked_add(hours.checked_mul(3_600)?)?
            .checked_add(minutes * 60 + secs)?;
        Some(Duration::new(whole, nanos))
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSpan {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

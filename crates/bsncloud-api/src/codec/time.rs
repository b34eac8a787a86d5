// BSN.cloud timestamp codec
//
// The API mixes RFC 3339 timestamps with bare `YYYY-MM-DDTHH:MM:SS[.mmm]`
// values that carry no offset. Offset-less values are UTC. Empty strings
// and the literal `null` (quoted or not) decode to the zero instant, and
// the zero instant encodes back to a JSON `null`.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Wire layout used when encoding: millisecond precision, UTC, no suffix.
const WIRE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Offset-less layouts tried after RFC 3339 fails, in order.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.3f", "%Y-%m-%dT%H:%M:%S"];

/// A BSN.cloud timestamp.
///
/// `None` is the zero instant. Offsets present on the wire are preserved;
/// use [`BsnTime::utc`] when comparing values from different sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BsnTime(Option<DateTime<FixedOffset>>);

impl BsnTime {
    /// The zero instant.
    pub const ZERO: Self = Self(None);

    /// Decode a raw wire string (without surrounding JSON quotes).
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return Ok(Self::ZERO);
        }

        // `YYYY-MM-DDTHH:MM:SS[.mmm]±HH:MM` and the `Z` form.
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(Some(with_offset)));
        }

        for layout in NAIVE_LAYOUTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
                return Ok(Self(Some(naive.and_utc().fixed_offset())));
            }
        }

        Err(DecodeError::InvalidTimestamp { raw: raw.to_owned() })
    }

    /// Encode for the wire. The zero instant has no string form.
    pub fn encode(&self) -> Option<String> {
        self.utc().map(|t| t.format(WIRE_LAYOUT).to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// The instant with its original offset, if non-zero.
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    /// The instant normalized to UTC, if non-zero.
    pub fn utc(&self) -> Option<DateTime<Utc>> {
        self.0.map(|t| t.with_timezone(&Utc))
    }
}

impl From<DateTime<Utc>> for BsnTime {
    fn from(t: DateTime<Utc>) -> Self {
        Self(Some(t.fixed_offset()))
    }
}

impl From<DateTime<FixedOffset>> for BsnTime {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Self(Some(t))
    }
}

impl fmt::Display for BsnTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.utc() {
            Some(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => f.write_str("-"),
        }
    }
}

impl Serialize for BsnTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.encode() {
            Some(s) => serializer.serialize_str(&s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for BsnTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(s) => Self::decode(&s).map_err(serde::de::Error::custom),
            None => Ok(Self::ZERO),
        }
    }
}

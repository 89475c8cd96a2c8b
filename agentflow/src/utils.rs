//! Small shared helpers.

use chrono::{SecondsFormat, Utc};

/// Returns the current time as an RFC3339 string with microsecond precision.
#[must_use]
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

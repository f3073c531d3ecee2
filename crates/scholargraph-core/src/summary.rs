//! Post-execution metadata.

use std::time::Duration;

use serde::Serialize;

use crate::query::AccessMode;

/// Metadata captured once a result set has been fully consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The statement text as submitted.
    pub query: String,
    pub mode: AccessMode,
    pub record_count: usize,
    /// Time from submission until the cursor was exhausted.
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl Summary {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

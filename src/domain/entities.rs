use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const ID_PREFIX: &str = "session_";
// Second resolution; lexicographic order matches chronological order.
const ID_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const MAX_ID_LEN: usize = 128;

// Record keys owned by the server; client values under these names are dropped.
pub const RESERVED_KEYS: [&str; 2] = ["session_id", "received_at"];

// Sortable identifier of a persisted scan session.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    // Derive the base identifier for a session accepted at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!("{ID_PREFIX}{}", now.format(ID_TIMESTAMP_FORMAT)))
    }

    // Widen an identifier that is already taken. The zero-padded suffix sorts
    // after the bare id and before any id from a later second.
    pub fn with_sequence(&self, sequence: u32) -> Self {
        Self(format!("{}_{sequence:03}", self.0))
    }

    // Accept only names that are safe to use as a file stem.
    pub fn parse(value: &str) -> Option<Self> {
        let valid_len = !value.is_empty() && value.len() <= MAX_ID_LEN;
        let valid_chars = value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));

        (valid_len && valid_chars).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// A stored session as read back from disk. Served verbatim: key order and
// field values are whatever the file holds, including records written by
// older servers that kept a client `session_id` or a `+00:00` offset.
pub type SessionRecord = Map<String, Value>;

// A newly accepted AR scan. The client payload is stored flattened next to the
// server-assigned fields, so the file reads as the client object plus
// `session_id` and `received_at`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Session {
    pub session_id: SessionId,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Session {
    pub fn new(
        session_id: SessionId,
        received_at: DateTime<Utc>,
        mut payload: Map<String, Value>,
    ) -> Self {
        for key in RESERVED_KEYS {
            payload.shift_remove(key);
        }

        Self {
            session_id,
            received_at,
            payload,
        }
    }
}

// One diagnostic line reported by the AR client. Appended as-is to the
// client log of the day it was received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientLogEntry {
    pub level: String,
    pub message: String,
    // Client clock, seconds since the epoch.
    pub timestamp: f64,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

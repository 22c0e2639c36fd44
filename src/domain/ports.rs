use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::{ClientLogEntry, Session, SessionId, SessionRecord};
use crate::domain::errors::{ClientLogError, SessionError};

// Port for durable session storage used by the session use cases.
#[async_trait]
pub trait SessionStore: Send + Sync {
    // Persist a new record without overwriting an existing one. Returns the
    // identifier the record was stored under, which may be a widened form of
    // `session.session_id` when that name is already taken.
    async fn insert(&self, session: Session) -> Result<SessionId, SessionError>;
    // All stored identifiers, newest first.
    async fn list(&self) -> Result<Vec<SessionId>, SessionError>;
    // The stored JSON object exactly as persisted.
    async fn get(&self, session_id: &SessionId) -> Result<SessionRecord, SessionError>;
}

// Port for the append-only client diagnostics log, one stream per day.
#[async_trait]
pub trait ClientLogSink: Send + Sync {
    async fn append(&self, day: NaiveDate, entry: &ClientLogEntry) -> Result<(), ClientLogError>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::domain::entities::{ClientLogEntry, Session, SessionId, SessionRecord};
use crate::domain::errors::{ClientLogError, SessionError};
use crate::domain::ports::{ClientLogSink, Clock, SessionStore};

pub(crate) type SessionTable = Arc<Mutex<BTreeMap<SessionId, Session>>>;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                .single()
                .expect("expected unambiguous utc timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub list: bool,
    pub get: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    sessions: SessionTable,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(BTreeMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_session(&self, session_id: &str, payload: Value) {
        let Value::Object(payload) = payload else {
            panic!("test payload must be a json object");
        };
        let session_id = SessionId::parse(session_id).expect("expected valid test session id");
        let session = Session::new(session_id.clone(), Utc::now(), payload);

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(session_id, session);
    }

    pub(crate) fn get_test_session(&self, session_id: &SessionId) -> Option<Session> {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.get(session_id).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.len()
    }
}

pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected json object, got {other}"),
    }
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn insert(&self, session: Session) -> Result<SessionId, SessionError> {
        if self.failures.insert {
            return Err(io::Error::other("insert failed").into());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        let session_id = session.session_id.clone();
        guard.insert(session_id.clone(), session);
        Ok(session_id)
    }

    async fn list(&self) -> Result<Vec<SessionId>, SessionError> {
        if self.failures.list {
            return Err(io::Error::other("list failed").into());
        }

        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.keys().rev().cloned().collect())
    }

    async fn get(&self, session_id: &SessionId) -> Result<SessionRecord, SessionError> {
        if self.failures.get {
            return Err(io::Error::other("get failed").into());
        }

        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        let session = guard.get(session_id).ok_or(SessionError::NotFound)?;
        Ok(object(
            serde_json::to_value(session).expect("expected test session to serialize"),
        ))
    }
}

// In-memory client log keyed by day, in append order.
#[derive(Clone, Default)]
pub(crate) struct RecordingLogSink {
    entries: Arc<Mutex<Vec<(NaiveDate, ClientLogEntry)>>>,
    fail: bool,
}

impl RecordingLogSink {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn entries(&self) -> Vec<(NaiveDate, ClientLogEntry)> {
        self.entries.lock().expect("log mutex poisoned").clone()
    }
}

#[async_trait]
impl ClientLogSink for RecordingLogSink {
    async fn append(&self, day: NaiveDate, entry: &ClientLogEntry) -> Result<(), ClientLogError> {
        if self.fail {
            return Err(io::Error::other("append failed").into());
        }

        let mut guard = self.entries.lock().expect("log mutex poisoned");
        guard.push((day, entry.clone()));
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::domain::ports::Clock;
use crate::interface_adapters::client_log::FileClientLogSink;
use crate::interface_adapters::file_store::FileSessionStore;

// Application state shared by the HTTP handlers. Everything mutable lives on
// disk behind the store, so no locking is needed here.
#[derive(Clone, Debug)]
pub struct AppState {
    pub sessions: FileSessionStore,
    pub client_logs: FileClientLogSink,
    // Root for the default GET responder (client app assets).
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
}

// System clock adapter used by the use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{Session, SessionId, SessionRecord};
use crate::domain::errors::SessionError;
use crate::domain::ports::SessionStore;

const RECORD_EXTENSION: &str = "json";
// Upper bound on same-second captures before insert gives up.
const MAX_SEQUENCE: u32 = 999;

// Session store keeping one pretty-printed JSON file per session.
//
// Records are staged in a uniquely named temp file and published with a hard
// link, which fails instead of replacing an existing name. Readers therefore
// never see a partial record and same-second captures never clobber each other.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    sessions_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(sessions_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
        }
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    fn record_path(&self, session_id: &SessionId) -> PathBuf {
        self.sessions_dir.join(format!("{session_id}.{RECORD_EXTENSION}"))
    }

    fn staging_path(&self) -> PathBuf {
        self.sessions_dir.join(format!(".{}.tmp", Uuid::new_v4()))
    }

    async fn publish(
        &self,
        mut session: Session,
        staging: &Path,
    ) -> Result<SessionId, SessionError> {
        let base_id = session.session_id.clone();

        for sequence in 0..=MAX_SEQUENCE {
            if sequence > 0 {
                session.session_id = base_id.with_sequence(sequence);
            }

            let contents = serde_json::to_vec_pretty(&session).map_err(io::Error::other)?;
            fs::write(staging, &contents).await?;

            match fs::hard_link(staging, self.record_path(&session.session_id)).await {
                Ok(()) => return Ok(session.session_id),
                Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(session_id = %session.session_id, "session id taken, widening");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free session id left for {base_id}"),
        )
        .into())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn insert(&self, session: Session) -> Result<SessionId, SessionError> {
        fs::create_dir_all(&self.sessions_dir).await?;

        let staging = self.staging_path();
        let result = self.publish(session, &staging).await;

        // The published name is a second link; the staging name must go either way.
        if let Err(error) = fs::remove_file(&staging).await {
            if error.kind() != io::ErrorKind::NotFound {
                warn!(path = %staging.display(), %error, "failed to remove staging file");
            }
        }

        result
    }

    async fn list(&self) -> Result<Vec<SessionId>, SessionError> {
        let mut entries = match fs::read_dir(&self.sessions_dir).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut session_ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            // Foreign files that could never be addressed by id are skipped.
            if let Some(session_id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(SessionId::parse)
            {
                session_ids.push(session_id);
            }
        }

        session_ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(session_ids)
    }

    async fn get(&self, session_id: &SessionId) -> Result<SessionRecord, SessionError> {
        let contents = match fs::read(self.record_path(session_id)).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(SessionError::NotFound);
            }
            Err(error) => return Err(error.into()),
        };

        // Only well-formedness is checked; the record is served as written.
        match serde_json::from_slice(&contents) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(_) => Err(SessionError::CorruptRecord(
                "record is not a JSON object".to_string(),
            )),
            Err(error) => Err(SessionError::CorruptRecord(error.to_string())),
        }
    }
}

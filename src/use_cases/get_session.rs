use crate::domain::entities::{SessionId, SessionRecord};
use crate::domain::errors::SessionError;
use crate::domain::ports::SessionStore;

// Session lookup use case with injected dependencies.
pub struct GetSessionUseCase<S> {
    pub store: S,
}

impl<S> GetSessionUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self, session_id: &str) -> Result<SessionRecord, SessionError> {
        // A name that could never have been issued cannot exist in the store.
        let session_id = SessionId::parse(session_id).ok_or(SessionError::NotFound)?;

        self.store.get(&session_id).await
    }
}

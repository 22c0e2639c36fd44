use serde_json::Value;

use crate::domain::entities::{Session, SessionId};
use crate::domain::errors::SessionError;
use crate::domain::ports::{Clock, SessionStore};

// Session capture use case with injected dependencies.
pub struct CreateSessionUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> CreateSessionUseCase<C, S>
where
    C: Clock,
    S: SessionStore,
{
    pub async fn execute(&self, payload: Value) -> Result<SessionId, SessionError> {
        let Value::Object(payload) = payload else {
            return Err(SessionError::InvalidPayload);
        };

        // One clock reading feeds both the id and the acceptance stamp so the
        // two always agree.
        let now = self.clock.now();
        let session = Session::new(SessionId::generate(now), now, payload);

        self.store.insert(session).await
    }
}

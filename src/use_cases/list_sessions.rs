use crate::domain::entities::SessionId;
use crate::domain::errors::SessionError;
use crate::domain::ports::SessionStore;

// Session listing use case with injected dependencies.
pub struct ListSessionsUseCase<S> {
    pub store: S,
}

impl<S> ListSessionsUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self) -> Result<Vec<SessionId>, SessionError> {
        self.store.list().await
    }
}

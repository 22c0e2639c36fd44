use serde::Serialize;

use crate::domain::entities::SessionId;

// Response payload for the liveness probe.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// Response payload listing stored sessions, newest first.
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionId>,
}

// Response payload returned after a session is captured.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
}

// Response payload acknowledging a client log entry.
#[derive(Debug, Serialize)]
pub struct LogAcceptedResponse {
    pub status: &'static str,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

use crate::domain::entities::SessionRecord;
use crate::domain::errors::{ClientLogError, SessionError};
use crate::interface_adapters::json::PrettyJson;
use crate::interface_adapters::protocol::{
    CreateSessionResponse, ErrorResponse, HealthResponse, LogAcceptedResponse,
    SessionListResponse,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::{
    CreateSessionUseCase, GetSessionUseCase, ListSessionsUseCase, RecordClientLogUseCase,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

pub type ErrorReply = (StatusCode, PrettyJson<ErrorResponse>);

// Handler for the liveness probe.
pub async fn health() -> PrettyJson<HealthResponse> {
    PrettyJson(HealthResponse { status: "ok" })
}

// Handler listing stored session ids, newest first.
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<PrettyJson<SessionListResponse>, ErrorReply> {
    let use_case = ListSessionsUseCase {
        store: state.sessions.clone(),
    };

    let sessions = use_case
        .execute()
        .await
        .map_err(|err| map_session_error(err, SessionErrorContext::List))?;

    Ok(PrettyJson(SessionListResponse { sessions }))
}

// Handler returning one stored session record as written. Anything below
// `/api/sessions/` is taken as the id; ids containing `/` never resolve.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<PrettyJson<SessionRecord>, ErrorReply> {
    let use_case = GetSessionUseCase {
        store: state.sessions.clone(),
    };

    let record = use_case
        .execute(&session_id)
        .await
        .map_err(|err| map_session_error(err, SessionErrorContext::Get))?;

    Ok(PrettyJson(record))
}

// Handler for `/api/sessions/` with an empty id.
pub async fn session_not_found() -> ErrorReply {
    error_response(StatusCode::NOT_FOUND, "session_not_found")
}

// Handler capturing a new scan session from a raw JSON body.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, PrettyJson<CreateSessionResponse>), ErrorReply> {
    // Parse by hand so malformed bodies get the API error envelope rather
    // than the extractor's plain-text rejection.
    let payload: Value = serde_json::from_slice(&body).map_err(|err| {
        warn!(error = %err, body_len = body.len(), "rejected malformed session body");
        error_response(StatusCode::BAD_REQUEST, "invalid_json")
    })?;

    let use_case = CreateSessionUseCase {
        clock: SystemClock,
        store: state.sessions.clone(),
    };

    let session_id = use_case
        .execute(payload)
        .await
        .map_err(|err| map_session_error(err, SessionErrorContext::Create))?;

    info!(%session_id, "session saved");

    Ok((
        StatusCode::CREATED,
        PrettyJson(CreateSessionResponse { session_id }),
    ))
}

// Handler appending one AR client diagnostic to today's log file.
pub async fn record_client_log(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<PrettyJson<LogAcceptedResponse>, ErrorReply> {
    let payload: Value = serde_json::from_slice(&body).map_err(|err| {
        warn!(error = %err, body_len = body.len(), "rejected malformed client log body");
        error_response(StatusCode::BAD_REQUEST, "invalid_json")
    })?;

    let use_case = RecordClientLogUseCase {
        clock: SystemClock,
        sink: state.client_logs.clone(),
    };

    use_case.execute(payload).await.map_err(|err| match err {
        ClientLogError::InvalidEntry(reason) => {
            warn!(%reason, "rejected client log entry");
            error_response(StatusCode::BAD_REQUEST, "invalid_log_entry")
        }
        ClientLogError::IoFailure(io_error) => {
            error!(error = %io_error, "failed to write client log");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
        }
    })?;

    Ok(PrettyJson(LogAcceptedResponse { status: "logged" }))
}

// Handler for any API path or method without a route.
pub async fn not_found() -> ErrorReply {
    error_response(StatusCode::NOT_FOUND, "not_found")
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, code: &str) -> ErrorReply {
    (
        status,
        PrettyJson(ErrorResponse {
            error: code.to_string(),
        }),
    )
}

// Maps domain errors to HTTP responses by endpoint context.
enum SessionErrorContext {
    Create,
    List,
    Get,
}

impl SessionErrorContext {
    fn operation(&self) -> &'static str {
        match self {
            SessionErrorContext::Create => "create",
            SessionErrorContext::List => "list",
            SessionErrorContext::Get => "get",
        }
    }
}

fn map_session_error(err: SessionError, context: SessionErrorContext) -> ErrorReply {
    let operation = context.operation();
    match err {
        // A body that parses but is not an object is still not a session.
        SessionError::InvalidPayload => {
            warn!(operation, "rejected non-object session payload");
            error_response(StatusCode::BAD_REQUEST, "invalid_json")
        }
        SessionError::NotFound => match context {
            SessionErrorContext::Get => error_response(StatusCode::NOT_FOUND, "session_not_found"),
            SessionErrorContext::Create | SessionErrorContext::List => {
                error!(operation, "store reported a missing session outside lookup");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
            }
        },
        SessionError::CorruptRecord(reason) => {
            error!(operation, %reason, "stored session record is corrupt");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "corrupt_record")
        }
        SessionError::IoFailure(io_error) => {
            error!(operation, error = %io_error, "session storage failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
        }
    }
}

// Use cases: session capture, listing, lookup, and client log recording over
// injected ports.

pub mod create_session;
pub mod get_session;
pub mod list_sessions;
pub mod record_client_log;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_session::CreateSessionUseCase;
pub use get_session::GetSessionUseCase;
pub use list_sessions::ListSessionsUseCase;
pub use record_client_log::RecordClientLogUseCase;

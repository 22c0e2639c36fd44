// Interface adapters: HTTP protocol, handlers, routing, and the file-backed
// session store and client log.

pub mod client_log;
pub mod file_store;
pub mod handlers;
pub mod json;
pub mod protocol;
pub mod routes;
pub mod state;

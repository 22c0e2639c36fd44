// Frameworks: configuration loading and server bootstrap.

pub mod config;
pub mod server;

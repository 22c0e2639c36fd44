// Domain: session records, identifiers, and the ports use cases depend on.

pub mod entities;
pub mod errors;
pub mod ports;

// Member Linker - keeps the guild "member" role in sync with clan roles.
//
// Member-update notifications arrive from the gateway bridge over NATS, the
// role_sync domain decides what to grant or revoke, and the Discord REST
// client carries it out.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;

// Business domains
pub mod role_sync;

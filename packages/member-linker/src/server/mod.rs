// Event dispatch (the binary lives in main.rs)
pub mod dispatcher;

pub use dispatcher::*;

//! Role sync domain: clan roles imply the member role.

pub mod errors;
pub mod models;
pub mod policy;

pub use errors::{ErrorKind, PolicyError, RoleOperation};
pub use models::*;
pub use policy::{MemberUpdateHandler, RoleSyncPolicy, GRANT_REASON, REVOKE_REASON};

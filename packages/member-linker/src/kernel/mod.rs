//! Kernel module - infrastructure and dependencies.

pub mod deps;
pub mod events;
pub mod test_dependencies;
pub mod traits;

pub use deps::DiscordDirectory;
pub use events::{decode_member_update, MemberUpdateSource, NatsMemberUpdates};
pub use test_dependencies::{MockDirectoryService, RoleCall};
pub use traits::*;

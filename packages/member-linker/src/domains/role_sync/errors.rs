use thiserror::Error;

use super::models::{CommunityId, MemberId};
use crate::kernel::DirectoryError;

/// Broad classification used when logging a failed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fixable by an administrator editing the guild's roles.
    Configuration,
    /// The linker lacks Manage Roles or sits too low in the hierarchy.
    Permission,
    /// The directory service rejected or failed a call.
    RemoteCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleOperation {
    Grant,
    Revoke,
}

impl std::fmt::Display for RoleOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleOperation::Grant => f.write_str("grant"),
            RoleOperation::Revoke => f.write_str("revoke"),
        }
    }
}

/// Why a member update was not (fully) synchronized.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Member role '{role}' not found in guild {community}")]
    MarkerRoleMissing { community: CommunityId, role: String },

    #[error("Missing 'Manage Roles' permission in guild {community}")]
    MissingManageRoles { community: CommunityId },

    #[error("Top role (position {agent_position}) must be above '{role}' (position {role_position}) to manage it")]
    HierarchyTooLow {
        role: String,
        role_position: i64,
        agent_position: i64,
    },

    #[error("Failed to look up {what} in guild {community}: {source}")]
    Lookup {
        community: CommunityId,
        what: &'static str,
        #[source]
        source: DirectoryError,
    },

    #[error("Failed to {operation} '{role}' for member {member}: {source}")]
    Remote {
        operation: RoleOperation,
        member: MemberId,
        role: String,
        #[source]
        source: DirectoryError,
    },
}

impl PolicyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::MarkerRoleMissing { .. } => ErrorKind::Configuration,
            PolicyError::MissingManageRoles { .. } | PolicyError::HierarchyTooLow { .. } => {
                ErrorKind::Permission
            }
            PolicyError::Lookup { .. } | PolicyError::Remote { .. } => ErrorKind::RemoteCall,
        }
    }
}

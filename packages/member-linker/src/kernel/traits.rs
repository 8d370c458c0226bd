// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The role-sync decision lives in domains::role_sync and only talks to these traits.
//
// Naming convention: Base* for trait names (e.g., BaseDirectoryService)

use async_trait::async_trait;
use thiserror::Error;

use crate::domains::role_sync::{AgentStanding, CommunityId, MemberId, Role};

/// Failure reported by the membership directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transient failure: {0}")]
    Transient(String),
}

// =============================================================================
// Directory Service Trait (Infrastructure - guild roles and membership)
// =============================================================================

#[async_trait]
pub trait BaseDirectoryService: Send + Sync {
    /// Every role defined in the community, fetched fresh on each call.
    async fn community_roles(&self, community: &CommunityId) -> Result<Vec<Role>, DirectoryError>;

    /// The linker's own capability and rank in the community.
    async fn agent_standing(&self, community: &CommunityId)
        -> Result<AgentStanding, DirectoryError>;

    /// Assign `role` to `member`. Granting a role already held must be a no-op.
    async fn grant_role(
        &self,
        community: &CommunityId,
        member: &MemberId,
        role: &Role,
        reason: &str,
    ) -> Result<(), DirectoryError>;

    /// Remove `role` from `member`. Revoking a role not held must be a no-op.
    async fn revoke_role(
        &self,
        community: &CommunityId,
        member: &MemberId,
        role: &Role,
        reason: &str,
    ) -> Result<(), DirectoryError>;
}

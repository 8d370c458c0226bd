//! Production implementations of the kernel traits.

use async_trait::async_trait;
use discord::{permissions, DiscordError, DiscordService};
use std::sync::Arc;

use crate::domains::role_sync::{AgentStanding, CommunityId, MemberId, Role, RoleId};
use crate::kernel::{BaseDirectoryService, DirectoryError};

// =============================================================================
// DiscordService Adapter (implements BaseDirectoryService trait)
// =============================================================================

/// Wrapper around DiscordService that implements BaseDirectoryService.
///
/// `agent_user_id` is the bot's own user id, resolved once at startup.
pub struct DiscordDirectory {
    service: Arc<DiscordService>,
    agent_user_id: String,
}

impl DiscordDirectory {
    pub fn new(service: Arc<DiscordService>, agent_user_id: impl Into<String>) -> Self {
        Self {
            service,
            agent_user_id: agent_user_id.into(),
        }
    }
}

impl From<DiscordError> for DirectoryError {
    fn from(err: DiscordError) -> Self {
        match err {
            DiscordError::Forbidden { .. } => DirectoryError::PermissionDenied(err.to_string()),
            DiscordError::NotFound(path) => DirectoryError::NotFound(path),
            other => DirectoryError::Transient(other.to_string()),
        }
    }
}

#[async_trait]
impl BaseDirectoryService for DiscordDirectory {
    async fn community_roles(&self, community: &CommunityId) -> Result<Vec<Role>, DirectoryError> {
        let roles = self.service.guild_roles(community.as_str()).await?;

        Ok(roles
            .into_iter()
            .map(|role| Role {
                id: RoleId::new(role.id),
                name: role.name,
                position: role.position,
            })
            .collect())
    }

    async fn agent_standing(
        &self,
        community: &CommunityId,
    ) -> Result<AgentStanding, DirectoryError> {
        let guild = self.service.guild(community.as_str()).await?;
        let roles = self.service.guild_roles(community.as_str()).await?;
        let me = self
            .service
            .guild_member(community.as_str(), &self.agent_user_id)
            .await?;

        Ok(AgentStanding {
            can_manage_roles: permissions::can_manage_roles(&guild, &roles, &me),
            top_role_position: permissions::highest_role_position(&roles, &me),
        })
    }

    async fn grant_role(
        &self,
        community: &CommunityId,
        member: &MemberId,
        role: &Role,
        reason: &str,
    ) -> Result<(), DirectoryError> {
        self.service
            .add_member_role(community.as_str(), member.as_str(), role.id.as_str(), reason)
            .await
            .map_err(DirectoryError::from)
    }

    async fn revoke_role(
        &self,
        community: &CommunityId,
        member: &MemberId,
        role: &Role,
        reason: &str,
    ) -> Result<(), DirectoryError> {
        self.service
            .remove_member_role(community.as_str(), member.as_str(), role.id.as_str(), reason)
            .await
            .map_err(DirectoryError::from)
    }
}

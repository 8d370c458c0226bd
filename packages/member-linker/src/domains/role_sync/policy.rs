//! Keeps the member (marker) role in step with clan roles.
//!
//! A member holds the marker role if they hold at least one clan role. When
//! `revoke_marker_when_no_clan` is set the converse is enforced too: losing the
//! last clan role also removes the marker role.

use async_trait::async_trait;
use std::sync::Arc;

use super::errors::{PolicyError, RoleOperation};
use super::models::{CommunityId, MemberUpdate, Role, SyncOutcome};
use crate::config::LinkerConfig;
use crate::kernel::BaseDirectoryService;

pub const GRANT_REASON: &str = "Auto-add Member when clan role selected";
pub const REVOKE_REASON: &str = "Auto-remove Member when no clan roles remain";

/// Reacts to one "member roles changed" notification.
#[async_trait]
pub trait MemberUpdateHandler: Send + Sync {
    async fn on_member_update(&self, update: &MemberUpdate) -> Result<SyncOutcome, PolicyError>;
}

pub struct RoleSyncPolicy {
    directory: Arc<dyn BaseDirectoryService>,
    config: Arc<LinkerConfig>,
}

impl RoleSyncPolicy {
    pub fn new(directory: Arc<dyn BaseDirectoryService>, config: Arc<LinkerConfig>) -> Self {
        Self { directory, config }
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Resolve the marker role by exact name. Re-resolved on every event so a
    /// renamed or deleted role is noticed.
    async fn resolve_marker_role(&self, community: &CommunityId) -> Result<Role, PolicyError> {
        let roles = self
            .directory
            .community_roles(community)
            .await
            .map_err(|source| PolicyError::Lookup {
                community: community.clone(),
                what: "roles",
                source,
            })?;

        roles
            .into_iter()
            .find(|role| role.name == self.config.marker_role_name)
            .ok_or_else(|| PolicyError::MarkerRoleMissing {
                community: community.clone(),
                role: self.config.marker_role_name.clone(),
            })
    }

    async fn ensure_can_manage(
        &self,
        community: &CommunityId,
        marker: &Role,
    ) -> Result<(), PolicyError> {
        let standing = self
            .directory
            .agent_standing(community)
            .await
            .map_err(|source| PolicyError::Lookup {
                community: community.clone(),
                what: "agent standing",
                source,
            })?;

        if !standing.can_manage_roles {
            return Err(PolicyError::MissingManageRoles {
                community: community.clone(),
            });
        }

        if !standing.outranks(marker) {
            return Err(PolicyError::HierarchyTooLow {
                role: marker.name.clone(),
                role_position: marker.position,
                agent_position: standing.top_role_position,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl MemberUpdateHandler for RoleSyncPolicy {
    async fn on_member_update(&self, update: &MemberUpdate) -> Result<SyncOutcome, PolicyError> {
        let before = &update.before.role_names;
        let after = &update.after.role_names;

        if before == after {
            return Ok(SyncOutcome::default());
        }

        let community = &update.community;
        let member = update.member();
        let marker = self.resolve_marker_role(community).await?;
        self.ensure_can_manage(community, &marker).await?;

        let clans = &self.config.clan_role_names;
        let added_clan = after.added_since(before).intersects(clans);
        let removed_clan = after.removed_since(before).intersects(clans);

        tracing::debug!(
            community = %community,
            member = %member.id,
            added_clan,
            removed_clan,
            "Member roles changed"
        );

        let mut outcome = SyncOutcome::default();

        if added_clan && !after.contains(&marker.name) {
            self.directory
                .grant_role(community, &member.id, &marker, GRANT_REASON)
                .await
                .map_err(|source| PolicyError::Remote {
                    operation: RoleOperation::Grant,
                    member: member.id.clone(),
                    role: marker.name.clone(),
                    source,
                })?;
            outcome.granted = true;
            tracing::info!(
                community = %community,
                member = %member.id,
                "Gave {} to {} due to clan role selection",
                marker.name,
                member.display_name
            );
        }

        if removed_clan && self.config.revoke_marker_when_no_clan {
            // Current roles include a grant made above
            let mut current = after.clone();
            if outcome.granted {
                current.insert(marker.name.clone());
            }

            if !current.intersects(clans) && current.contains(&marker.name) {
                self.directory
                    .revoke_role(community, &member.id, &marker, REVOKE_REASON)
                    .await
                    .map_err(|source| PolicyError::Remote {
                        operation: RoleOperation::Revoke,
                        member: member.id.clone(),
                        role: marker.name.clone(),
                        source,
                    })?;
                outcome.revoked = true;
                tracing::info!(
                    community = %community,
                    member = %member.id,
                    "Removed {} from {} (no clan roles left)",
                    marker.name,
                    member.display_name
                );
            }
        }

        Ok(outcome)
    }
}

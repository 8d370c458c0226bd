// TestDependencies - mock implementations for testing
//
// Provides an in-memory directory that can be injected into RoleSyncPolicy for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{BaseDirectoryService, DirectoryError};
use crate::domains::role_sync::{AgentStanding, CommunityId, MemberId, Role, RoleId};

/// A grant or revoke captured by [`MockDirectoryService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleCall {
    Grant {
        community: CommunityId,
        member: MemberId,
        role: String,
        reason: String,
    },
    Revoke {
        community: CommunityId,
        member: MemberId,
        role: String,
        reason: String,
    },
}

impl RoleCall {
    pub fn role(&self) -> &str {
        match self {
            RoleCall::Grant { role, .. } | RoleCall::Revoke { role, .. } => role,
        }
    }

    pub fn is_grant(&self) -> bool {
        matches!(self, RoleCall::Grant { .. })
    }
}

pub struct MockDirectoryService {
    roles: Arc<Mutex<Vec<Role>>>,
    standing: Arc<Mutex<AgentStanding>>,
    calls: Arc<Mutex<Vec<RoleCall>>>,
    grant_failure: Arc<Mutex<Option<DirectoryError>>>,
    revoke_failure: Arc<Mutex<Option<DirectoryError>>>,
    lookup_failure: Arc<Mutex<Option<DirectoryError>>>,
}

impl MockDirectoryService {
    /// Empty guild; the agent can manage roles and sits at position 100.
    pub fn new() -> Self {
        Self {
            roles: Arc::new(Mutex::new(Vec::new())),
            standing: Arc::new(Mutex::new(AgentStanding {
                can_manage_roles: true,
                top_role_position: 100,
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
            grant_failure: Arc::new(Mutex::new(None)),
            revoke_failure: Arc::new(Mutex::new(None)),
            lookup_failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a role to the guild's role list. Ids are assigned in order.
    pub fn with_role(self, name: &str, position: i64) -> Self {
        {
            let mut roles = self.roles.lock().unwrap();
            let id = RoleId::new(format!("role-{}", roles.len() + 1));
            roles.push(Role {
                id,
                name: name.to_string(),
                position,
            });
        }
        self
    }

    pub fn with_standing(self, can_manage_roles: bool, top_role_position: i64) -> Self {
        *self.standing.lock().unwrap() = AgentStanding {
            can_manage_roles,
            top_role_position,
        };
        self
    }

    pub fn failing_grants(self, error: DirectoryError) -> Self {
        *self.grant_failure.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_revokes(self, error: DirectoryError) -> Self {
        *self.revoke_failure.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_lookups(self, error: DirectoryError) -> Self {
        *self.lookup_failure.lock().unwrap() = Some(error);
        self
    }

    /// Every grant and revoke, in the order issued.
    pub fn calls(&self) -> Vec<RoleCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn grants(&self) -> Vec<RoleCall> {
        self.calls().into_iter().filter(RoleCall::is_grant).collect()
    }

    pub fn revokes(&self) -> Vec<RoleCall> {
        self.calls().into_iter().filter(|c| !c.is_grant()).collect()
    }

    fn check_lookup(&self) -> Result<(), DirectoryError> {
        match self.lookup_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockDirectoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseDirectoryService for MockDirectoryService {
    async fn community_roles(&self, _community: &CommunityId) -> Result<Vec<Role>, DirectoryError> {
        self.check_lookup()?;
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn agent_standing(
        &self,
        _community: &CommunityId,
    ) -> Result<AgentStanding, DirectoryError> {
        self.check_lookup()?;
        Ok(*self.standing.lock().unwrap())
    }

    async fn grant_role(
        &self,
        community: &CommunityId,
        member: &MemberId,
        role: &Role,
        reason: &str,
    ) -> Result<(), DirectoryError> {
        // Record the call even when it fails
        self.calls.lock().unwrap().push(RoleCall::Grant {
            community: community.clone(),
            member: member.clone(),
            role: role.name.clone(),
            reason: reason.to_string(),
        });

        match self.grant_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn revoke_role(
        &self,
        community: &CommunityId,
        member: &MemberId,
        role: &Role,
        reason: &str,
    ) -> Result<(), DirectoryError> {
        self.calls.lock().unwrap().push(RoleCall::Revoke {
            community: community.clone(),
            member: member.clone(),
            role: role.name.clone(),
            reason: reason.to_string(),
        });

        match self.revoke_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

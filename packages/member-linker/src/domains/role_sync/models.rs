use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

snowflake_id!(
    /// Guild id.
    CommunityId
);
snowflake_id!(MemberId);
snowflake_id!(RoleId);

/// A role as seen in the community's role list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Higher is more privileged.
    pub position: i64,
}

/// What the linker itself is allowed to do in a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentStanding {
    pub can_manage_roles: bool,
    pub top_role_position: i64,
}

impl AgentStanding {
    /// Roles can only be managed strictly below the agent's highest role.
    pub fn outranks(&self, role: &Role) -> bool {
        self.top_role_position > role.position
    }
}

/// Unordered set of role names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Names present here but not in `before`.
    pub fn added_since(&self, before: &RoleSet) -> RoleSet {
        RoleSet(self.0.difference(&before.0).cloned().collect())
    }

    /// Names present in `before` but no longer here.
    pub fn removed_since(&self, before: &RoleSet) -> RoleSet {
        RoleSet(before.0.difference(&self.0).cloned().collect())
    }

    pub fn intersects(&self, names: &BTreeSet<String>) -> bool {
        self.0.iter().any(|name| names.contains(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RoleSet(iter.into_iter().map(Into::into).collect())
    }
}

/// A member's state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: MemberId,
    pub display_name: String,
    #[serde(rename = "roles", default)]
    pub role_names: RoleSet,
}

/// "Member roles changed" notification published by the gateway bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUpdate {
    #[serde(rename = "guild_id")]
    pub community: CommunityId,
    pub before: MemberSnapshot,
    pub after: MemberSnapshot,
}

impl MemberUpdate {
    pub fn member(&self) -> &MemberSnapshot {
        &self.after
    }
}

/// Which remote commands an invocation issued successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub granted: bool,
    pub revoked: bool,
}

impl SyncOutcome {
    pub fn is_noop(&self) -> bool {
        !self.granted && !self.revoked
    }
}

use serde::Deserialize;

/// A Discord user (`GET /users/@me`, nested in guild members).
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// The subset of a guild object the linker needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
    pub owner_id: String,
}

/// A role as returned by `GET /guilds/{guild.id}/roles`.
///
/// `permissions` is a bitset serialized as a decimal string.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildRole {
    pub id: String,
    pub name: String,
    pub position: i64,
    pub permissions: String,
}

impl GuildRole {
    /// Parse the permission bitset. Malformed values grant nothing.
    pub fn permission_bits(&self) -> u64 {
        self.permissions.parse().unwrap_or(0)
    }
}

/// A guild member. `roles` holds role ids, never the implicit base role.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

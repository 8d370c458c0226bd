//! Guild-level permission arithmetic (channel overwrites are not relevant to
//! role management and are ignored).

use crate::models::{Guild, GuildMember, GuildRole};

pub const ADMINISTRATOR: u64 = 1 << 3;
pub const MANAGE_ROLES: u64 = 1 << 28;

/// Guild permissions of `member`: the base role (id == guild id) OR'd with
/// every role the member holds. Owners and administrators hold everything.
pub fn member_permissions(guild: &Guild, roles: &[GuildRole], member: &GuildMember) -> u64 {
    let is_owner = member
        .user
        .as_ref()
        .map(|u| u.id == guild.owner_id)
        .unwrap_or(false);
    if is_owner {
        return u64::MAX;
    }

    let bits = roles
        .iter()
        .filter(|role| role.id == guild.id || member.roles.contains(&role.id))
        .fold(0u64, |acc, role| acc | role.permission_bits());

    if bits & ADMINISTRATOR != 0 {
        u64::MAX
    } else {
        bits
    }
}

pub fn can_manage_roles(guild: &Guild, roles: &[GuildRole], member: &GuildMember) -> bool {
    member_permissions(guild, roles, member) & MANAGE_ROLES != 0
}

/// Position of the member's highest role; 0 (the base role) when it holds none.
pub fn highest_role_position(roles: &[GuildRole], member: &GuildMember) -> i64 {
    roles
        .iter()
        .filter(|role| member.roles.contains(&role.id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn guild() -> Guild {
        Guild {
            id: "100".to_string(),
            name: "Alliance".to_string(),
            owner_id: "1".to_string(),
        }
    }

    fn role(id: &str, position: i64, permissions: u64) -> GuildRole {
        GuildRole {
            id: id.to_string(),
            name: format!("role-{}", id),
            position,
            permissions: permissions.to_string(),
        }
    }

    fn member(user_id: &str, roles: &[&str]) -> GuildMember {
        GuildMember {
            user: Some(User {
                id: user_id.to_string(),
                username: "bot".to_string(),
                global_name: None,
            }),
            nick: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_manage_roles_from_assigned_role() {
        let roles = vec![role("100", 0, 0), role("7", 5, MANAGE_ROLES)];
        assert!(can_manage_roles(&guild(), &roles, &member("2", &["7"])));
        assert!(!can_manage_roles(&guild(), &roles, &member("2", &[])));
    }

    #[test]
    fn test_base_role_permissions_apply_to_everyone() {
        let roles = vec![role("100", 0, MANAGE_ROLES)];
        assert!(can_manage_roles(&guild(), &roles, &member("2", &[])));
    }

    #[test]
    fn test_administrator_implies_manage_roles() {
        let roles = vec![role("100", 0, 0), role("9", 2, ADMINISTRATOR)];
        assert!(can_manage_roles(&guild(), &roles, &member("2", &["9"])));
    }

    #[test]
    fn test_owner_has_every_permission() {
        let roles = vec![role("100", 0, 0)];
        assert_eq!(member_permissions(&guild(), &roles, &member("1", &[])), u64::MAX);
    }

    #[test]
    fn test_highest_role_position() {
        let roles = vec![role("100", 0, 0), role("3", 4, 0), role("4", 9, 0), role("5", 12, 0)];
        assert_eq!(highest_role_position(&roles, &member("2", &["3", "4"])), 9);
        assert_eq!(highest_role_position(&roles, &member("2", &[])), 0);
    }
}

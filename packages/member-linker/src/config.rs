use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::collections::BTreeSet;
use std::env;

pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";
pub const DEFAULT_MEMBER_UPDATES_SUBJECT: &str = "discord.guild_member_update";
pub const DEFAULT_CLAN_ROLE_NAMES: &str = "Main,HaG,Wolverines,Dynasty,Phoenix,Blast,Asylum,Ravens";
pub const DEFAULT_MEMBER_ROLE_NAME: &str = "Knight";

/// Role-sync policy settings. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerConfig {
    /// Case-sensitive, exactly as shown in the guild's role settings.
    pub clan_role_names: BTreeSet<String>,
    pub marker_role_name: String,
    /// When false the marker role stays even after every clan role is gone.
    pub revoke_marker_when_no_clan: bool,
}

impl LinkerConfig {
    pub fn is_clan_role(&self, name: &str) -> bool {
        self.clan_role_names.contains(name)
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_api_base: String,
    pub nats_url: String,
    pub member_updates_subject: String,
    pub linker: LinkerConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("DISCORD_TOKEN must be set")?;

        let clan_role_names = parse_role_names(
            &lookup("CLAN_ROLE_NAMES").unwrap_or_else(|| DEFAULT_CLAN_ROLE_NAMES.to_string()),
        );
        if clan_role_names.is_empty() {
            bail!("CLAN_ROLE_NAMES must name at least one role");
        }

        let marker_role_name = lookup("MEMBER_ROLE_NAME")
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| DEFAULT_MEMBER_ROLE_NAME.to_string());
        if marker_role_name.is_empty() {
            bail!("MEMBER_ROLE_NAME must not be empty");
        }

        let revoke_marker_when_no_clan = match lookup("REMOVE_MEMBER_WHEN_NO_CLAN") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("REMOVE_MEMBER_WHEN_NO_CLAN is not a boolean: {}", raw))?,
            None => false,
        };

        Ok(Self {
            discord_token,
            discord_api_base: lookup("DISCORD_API_BASE")
                .unwrap_or_else(|| discord::DEFAULT_API_BASE.to_string()),
            nats_url: lookup("NATS_URL").unwrap_or_else(|| DEFAULT_NATS_URL.to_string()),
            member_updates_subject: lookup("MEMBER_UPDATES_SUBJECT")
                .unwrap_or_else(|| DEFAULT_MEMBER_UPDATES_SUBJECT.to_string()),
            linker: LinkerConfig {
                clan_role_names,
                marker_role_name,
                revoke_marker_when_no_clan,
            },
        })
    }
}

/// Comma-separated role names; entries are trimmed and empties dropped.
fn parse_role_names(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

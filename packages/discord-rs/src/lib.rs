// Minimal Discord REST client: the guild, role and member endpoints needed to
// grant and revoke roles.
// https://discord.com/developers/docs/resources/guild

use std::time::Duration;

pub mod error;
pub mod models;
pub mod permissions;

use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;

pub use crate::error::DiscordError;
use crate::models::{Guild, GuildMember, GuildRole, User};

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

const AUDIT_LOG_REASON: &str = "X-Audit-Log-Reason";

#[derive(Debug, Clone)]
pub struct DiscordOptions {
    pub token: String,
    pub api_base: String,
}

impl DiscordOptions {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct DiscordService {
    options: DiscordOptions,
    client: Client,
}

impl DiscordService {
    pub fn new(options: DiscordOptions) -> Result<Self, DiscordError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { options, client })
    }

    /// The bot's own user.
    pub async fn current_user(&self) -> Result<User, DiscordError> {
        self.get_json("/users/@me").await
    }

    pub async fn guild(&self, guild_id: &str) -> Result<Guild, DiscordError> {
        self.get_json(&format!("/guilds/{}", guild_id)).await
    }

    pub async fn guild_roles(&self, guild_id: &str) -> Result<Vec<GuildRole>, DiscordError> {
        self.get_json(&format!("/guilds/{}/roles", guild_id)).await
    }

    pub async fn guild_member(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<GuildMember, DiscordError> {
        self.get_json(&format!("/guilds/{}/members/{}", guild_id, user_id))
            .await
    }

    /// Add a role to a guild member. Adding a role the member already holds is a no-op.
    pub async fn add_member_role(
        &self,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
        reason: &str,
    ) -> Result<(), DiscordError> {
        let path = format!("/guilds/{}/members/{}/roles/{}", guild_id, user_id, role_id);
        self.send(Method::PUT, &path, Some(reason)).await?;
        Ok(())
    }

    /// Remove a role from a guild member. Removing a role the member lacks is a no-op.
    pub async fn remove_member_role(
        &self,
        guild_id: &str,
        user_id: &str,
        role_id: &str,
        reason: &str,
    ) -> Result<(), DiscordError> {
        let path = format!("/guilds/{}/members/{}/roles/{}", guild_id, user_id, role_id);
        self.send(Method::DELETE, &path, Some(reason)).await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DiscordError> {
        let response = self.send(Method::GET, path, None).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        reason: Option<&str>,
    ) -> Result<Response, DiscordError> {
        let url = format!("{}{}", self.options.api_base.trim_end_matches('/'), path);

        let mut request = self
            .client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bot {}", self.options.token));

        if let Some(reason) = reason {
            request = request.header(AUDIT_LOG_REASON, urlencoding::encode(reason).into_owned());
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => DiscordError::Forbidden {
                status: status.as_u16(),
                body,
            },
            404 => DiscordError::NotFound(path.to_string()),
            429 => DiscordError::RateLimited {
                retry_after: retry_after(&body),
            },
            code => DiscordError::Http { status: code, body },
        })
    }
}

fn retry_after(body: &str) -> f64 {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("retry_after").and_then(|r| r.as_f64()))
        .unwrap_or(0.0)
}

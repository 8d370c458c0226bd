// Main entry point for the member linker bot

use anyhow::{Context, Result};
use discord::{DiscordOptions, DiscordService};
use linker_core::{
    domains::role_sync::RoleSyncPolicy,
    kernel::{DiscordDirectory, NatsMemberUpdates},
    server::dispatch,
    Config,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,linker_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        member_role = %config.linker.marker_role_name,
        clan_roles = config.linker.clan_role_names.len(),
        remove_when_no_clan = config.linker.revoke_marker_when_no_clan,
        "Configuration loaded"
    );

    // Resolve our own identity
    let discord = Arc::new(
        DiscordService::new(
            DiscordOptions::new(config.discord_token.clone())
                .with_api_base(config.discord_api_base.clone()),
        )
        .context("Failed to create Discord client")?,
    );
    let me = discord
        .current_user()
        .await
        .context("Failed to authenticate with Discord")?;
    tracing::info!("Logged in as {} (ID: {})", me.username, me.id);

    let directory = Arc::new(DiscordDirectory::new(discord, me.id));
    let policy = RoleSyncPolicy::new(directory, Arc::new(config.linker.clone()));

    // Subscribe to member updates from the gateway bridge
    tracing::info!("Connecting to NATS at {}", config.nats_url);
    let nats = async_nats::connect(config.nats_url.as_str())
        .await
        .context("Failed to connect to NATS")?;
    let mut updates = NatsMemberUpdates::subscribe(&nats, &config.member_updates_subject).await?;
    tracing::info!(
        subject = %config.member_updates_subject,
        "Bot is ready. Monitoring role changes..."
    );

    tokio::select! {
        summary = dispatch(&mut updates, &policy) => {
            tracing::warn!(received = summary.received, "Member update subscription ended");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

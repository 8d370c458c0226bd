//! Inbound member-update notifications.
//!
//! The gateway bridge publishes one JSON `MemberUpdate` per role change on a
//! NATS subject. Tests and embedders feed updates through an mpsc channel.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::domains::role_sync::MemberUpdate;

/// A stream of member-update notifications.
#[async_trait]
pub trait MemberUpdateSource: Send {
    /// Next notification, or `None` once the stream is closed.
    async fn next_update(&mut self) -> Option<MemberUpdate>;
}

#[async_trait]
impl MemberUpdateSource for mpsc::Receiver<MemberUpdate> {
    async fn next_update(&mut self) -> Option<MemberUpdate> {
        self.recv().await
    }
}

/// Member updates read from a NATS subscription.
pub struct NatsMemberUpdates {
    subject: String,
    subscriber: async_nats::Subscriber,
}

impl NatsMemberUpdates {
    pub async fn subscribe(client: &async_nats::Client, subject: &str) -> Result<Self> {
        let subscriber = client
            .subscribe(subject.to_string())
            .await
            .with_context(|| format!("Failed to subscribe to {}", subject))?;

        Ok(Self {
            subject: subject.to_string(),
            subscriber,
        })
    }
}

#[async_trait]
impl MemberUpdateSource for NatsMemberUpdates {
    async fn next_update(&mut self) -> Option<MemberUpdate> {
        while let Some(message) = self.subscriber.next().await {
            match decode_member_update(&message.payload) {
                Ok(update) => return Some(update),
                Err(e) => {
                    tracing::warn!(subject = %self.subject, error = %e, "Skipping malformed member update");
                }
            }
        }
        None
    }
}

pub fn decode_member_update(payload: &[u8]) -> Result<MemberUpdate, serde_json::Error> {
    serde_json::from_slice(payload)
}

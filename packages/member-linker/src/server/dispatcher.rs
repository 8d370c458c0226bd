//! Feeds member updates to a handler one at a time.
//!
//! This is the outermost error boundary: a failed event is logged and the
//! next notification is processed as usual.

use crate::domains::role_sync::{ErrorKind, MemberUpdate, MemberUpdateHandler, PolicyError};
use crate::kernel::MemberUpdateSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub received: u64,
    /// Events that issued at least one grant or revoke.
    pub synced: u64,
    pub failed: u64,
}

/// Run until `source` closes.
pub async fn dispatch<S, H>(source: &mut S, handler: &H) -> DispatchSummary
where
    S: MemberUpdateSource + ?Sized,
    H: MemberUpdateHandler + ?Sized,
{
    let mut summary = DispatchSummary::default();

    while let Some(update) = source.next_update().await {
        summary.received += 1;

        match handler.on_member_update(&update).await {
            Ok(outcome) => {
                if !outcome.is_noop() {
                    summary.synced += 1;
                }
            }
            Err(e) => {
                summary.failed += 1;
                log_failure(&update, &e);
            }
        }
    }

    tracing::info!(
        received = summary.received,
        synced = summary.synced,
        failed = summary.failed,
        "Member update stream closed"
    );
    summary
}

fn log_failure(update: &MemberUpdate, error: &PolicyError) {
    let community = &update.community;
    let member = &update.member().id;

    match error.kind() {
        ErrorKind::Configuration | ErrorKind::Permission => {
            tracing::warn!(community = %community, member = %member, "{}", error);
        }
        ErrorKind::RemoteCall => {
            tracing::error!(
                community = %community,
                member = %member,
                display_name = %update.member().display_name,
                error = ?error,
                "{}",
                error
            );
        }
    }
}

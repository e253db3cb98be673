// src/controllers/mutation.rs

use crate::{
    api::{Ack, ApiClient},
    controllers::notify::Notifier,
    error::AppError,
};

/// Blocking yes/no prompt gating destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt with the same value (`--yes` flags, tests).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Asks for confirmation, then issues a single DELETE.
///
/// Returns `Ok(false)` without touching the network when the user declines.
/// There is no optimistic removal; callers refetch on `Ok(true)`.
pub async fn delete_record(
    client: &ApiClient,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
    noun: &str,
    path: &str,
) -> Result<bool, AppError> {
    if !confirm.confirm(&format!("Are you sure you want to delete this {noun}?")) {
        tracing::debug!("Delete of {} declined", path);
        return Ok(false);
    }

    match client.delete(path).await {
        Ok(Ack { message, .. }) => {
            tracing::info!("Deleted {} at {}", noun, path);
            notifier.success(&message.unwrap_or_else(|| format!("{} deleted successfully", capitalize(noun))));
            Ok(true)
        }
        Err(e) => {
            tracing::error!("Failed to delete {}: {:?}", noun, e);
            notifier.error(&e.toast_message());
            Err(e)
        }
    }
}

pub(crate) fn capitalize(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

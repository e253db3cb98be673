// src/controllers/discussions.rs

use validator::Validate;

use crate::{
    api::{ApiClient, endpoints},
    controllers::{notify::Notifier, pagination::PagedList},
    error::AppError,
    models::discussion::{Discussion, ReplyForm},
};

/// Paginated admin view over every course discussion.
pub fn discussion_board(page_size: u32) -> PagedList<Discussion> {
    PagedList::new(endpoints::DISCUSSIONS_ALL, page_size)
}

/// Posts an admin reply, then reloads the current page of the board.
pub async fn reply(
    board: &mut PagedList<Discussion>,
    client: &ApiClient,
    notifier: &dyn Notifier,
    discussion_id: &str,
    message: &str,
) -> Result<(), AppError> {
    let form = ReplyForm::new(message);
    if let Err(errors) = form.validate() {
        let err = AppError::from(errors);
        notifier.error(&err.toast_message());
        return Err(err);
    }

    match client.post(&endpoints::discussion_reply(discussion_id), &form).await {
        Ok(ack) => {
            tracing::info!("Replied to discussion {}", discussion_id);
            notifier.success(ack.message.as_deref().unwrap_or("Reply posted"));
        }
        Err(e) => {
            tracing::error!("Failed to reply to {}: {:?}", discussion_id, e);
            notifier.error(&e.toast_message());
            return Err(e);
        }
    }

    board.load(client, notifier).await
}

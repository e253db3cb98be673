// src/controllers/companies.rs

use validator::Validate;

use crate::{
    api::{ApiClient, endpoints},
    controllers::notify::Notifier,
    error::AppError,
    models::company::{Company, ExamSection, PatternUpdate},
};

/// Loads one company with its full exam pattern.
pub async fn load_company(client: &ApiClient, id: &str) -> Result<Company, AppError> {
    client.get::<Company>(&endpoints::company(id), &[]).await
}

/// Replaces a company's default exam pattern via `PUT /companies/:id/pattern`.
pub async fn save_pattern(
    client: &ApiClient,
    notifier: &dyn Notifier,
    company_id: &str,
    sections: &[ExamSection],
) -> Result<(), AppError> {
    let payload = PatternUpdate::new(sections);
    if let Err(errors) = payload.validate() {
        let err = AppError::from(errors);
        notifier.error(&err.toast_message());
        return Err(err);
    }

    match client.put(&endpoints::company_pattern(company_id), &payload).await {
        Ok(ack) => {
            tracing::info!(
                "Updated pattern of company {} ({} sections)",
                company_id,
                payload.default_pattern.len()
            );
            notifier.success(
                ack.message
                    .as_deref()
                    .unwrap_or("Exam pattern updated successfully"),
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to update pattern of {}: {:?}", company_id, e);
            notifier.error(&e.toast_message());
            Err(e)
        }
    }
}

// src/controllers/analytics.rs

use crate::{
    api::{ApiClient, endpoints},
    error::AppError,
    models::{
        dashboard::{DashboardStats, PaidTestsByCompany},
        mock_test::Attempt,
    },
};

pub async fn load_dashboard(client: &ApiClient) -> Result<DashboardStats, AppError> {
    let stats = client
        .get::<DashboardStats>(endpoints::ADMIN_DASHBOARD, &[])
        .await?;
    tracing::info!(
        "Dashboard: {} students, {} attempts",
        stats.total_students,
        stats.total_attempts
    );
    Ok(stats)
}

/// Paid test sales grouped by company, highest revenue first.
pub async fn paid_tests_by_company(client: &ApiClient) -> Result<Vec<PaidTestsByCompany>, AppError> {
    let mut rows = client
        .get::<Vec<PaidTestsByCompany>>(endpoints::PAID_TESTS_BY_COMPANY, &[])
        .await?;
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    Ok(rows)
}

/// Detailed result of one attempt (student view).
pub async fn attempt_result(client: &ApiClient, attempt_id: &str) -> Result<Attempt, AppError> {
    client
        .get::<Attempt>(&endpoints::student_attempt(attempt_id), &[])
        .await
}

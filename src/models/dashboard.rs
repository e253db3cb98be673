// src/models/dashboard.rs

use serde::{Deserialize, Serialize};

use super::mock_test::ResultRow;
use crate::export::CsvRow;

/// Headline counters of `GET /admin/dashboard`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_tests: u64,
    pub total_attempts: u64,
    pub total_companies: u64,
    pub total_courses: u64,
    pub total_enrollments: u64,
    pub total_revenue: f64,
    pub recent_attempts: Vec<ResultRow>,
}

/// Row of `GET /admin/analytics/paid-tests-by-company`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaidTestsByCompany {
    pub company_name: String,
    pub paid_tests: u32,
    pub purchases: u64,
    pub revenue: f64,
}

impl CsvRow for PaidTestsByCompany {
    fn headers() -> Vec<&'static str> {
        vec!["Company", "Paid Tests", "Purchases", "Revenue"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.company_name.clone(),
            self.paid_tests.to_string(),
            self.purchases.to_string(),
            format!("{:.2}", self.revenue),
        ]
    }
}

/// Sums the revenue column of the analytics table.
pub fn total_paid_revenue(rows: &[PaidTestsByCompany]) -> f64 {
    rows.iter().map(|r| r.revenue).sum()
}

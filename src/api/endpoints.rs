// src/api/endpoints.rs

//! Path conventions of the backend REST API.

use std::fmt;

pub const ALUMNI: &str = "/alumni";
pub const COMPANIES: &str = "/companies";
pub const TESTS: &str = "/tests";
pub const COURSES: &str = "/courses";
pub const COURSES_ADMIN_ALL: &str = "/courses/admin/all";
pub const DISCUSSIONS_ALL: &str = "/courses/discussions/all";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const ADMIN_RESULTS: &str = "/admin/results";
pub const ADMIN_RESULTS_EXPORT: &str = "/admin/results/export";
pub const PAID_TESTS_BY_COMPANY: &str = "/admin/analytics/paid-tests-by-company";

pub fn alumni(id: &str) -> String {
    format!("{ALUMNI}/{id}")
}

pub fn company(id: &str) -> String {
    format!("{COMPANIES}/{id}")
}

/// Default exam section layout of a company.
pub fn company_pattern(id: &str) -> String {
    format!("{COMPANIES}/{id}/pattern")
}

pub fn test(id: &str) -> String {
    format!("{TESTS}/{id}")
}

pub fn course(id: &str) -> String {
    format!("{COURSES}/{id}")
}

pub fn discussion_reply(id: &str) -> String {
    format!("/courses/discussions/{id}/reply")
}

pub fn student_attempt(id: &str) -> String {
    format!("/students/attempts/{id}")
}

/// The two enrollment listings an admin can inspect per course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentKind {
    Courses,
    Recordings,
}

impl fmt::Display for EnrollmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentKind::Courses => write!(f, "courses"),
            EnrollmentKind::Recordings => write!(f, "recordings"),
        }
    }
}

pub fn enrollments(kind: EnrollmentKind, course_id: &str) -> String {
    format!("/enrollments/admin/{kind}/{course_id}")
}

pub fn enrollments_export(kind: EnrollmentKind, course_id: &str) -> String {
    format!("{}/export", enrollments(kind, course_id))
}

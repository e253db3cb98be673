// src/controllers/enrollments.rs

use crate::{
    api::endpoints::{self, EnrollmentKind},
    controllers::pagination::PagedList,
    models::enrollment::Enrollment,
};

/// Enrollments of one course, paged and status-filtered by the server.
pub fn enrollment_board(kind: EnrollmentKind, course_id: &str, page_size: u32) -> PagedList<Enrollment> {
    PagedList::new(endpoints::enrollments(kind, course_id), page_size)
}

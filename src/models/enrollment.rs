// src/models/enrollment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CourseSummary, Identified, PersonSummary, Ref, UNKNOWN_STUDENT, person_email, ref_title, wire_name};
use crate::{controllers::filter::Searchable, export::CsvRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

/// A student's enrollment in a course or in its recordings.
///
/// `student` and `course` arrive populated on admin listings but as bare ids on
/// some older endpoints; both shapes decode. A deleted student comes back as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub student: Option<Ref<PersonSummary>>,
    pub course: Ref<CourseSummary>,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn student_name(&self) -> &str {
        match self.student.as_ref().and_then(Ref::populated) {
            Some(p) if !p.name.is_empty() => &p.name,
            _ => UNKNOWN_STUDENT,
        }
    }

    pub fn student_email(&self) -> &str {
        person_email(self.student.as_ref())
    }

    pub fn student_id(&self) -> Option<&str> {
        self.student.as_ref().map(|s| s.id())
    }
}

impl Identified for Enrollment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Enrollment {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.student_name(), self.student_email()]
    }
}

impl CsvRow for Enrollment {
    fn headers() -> Vec<&'static str> {
        vec!["Student", "Email", "Course", "Status", "Enrolled At"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.student_name().to_string(),
            self.student_email().to_string(),
            ref_title(&self.course).to_string(),
            wire_name(&self.status),
            self.created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]
    }
}

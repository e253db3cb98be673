// src/models/discussion.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{CourseSummary, Identified, PersonSummary, Ref, not_blank, person_email, person_name};
use crate::controllers::filter::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Student,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default)]
    pub user_id: Option<Ref<PersonSummary>>,
    pub user_type: UserType,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A student question on a course, with its reply thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub student_id: Option<Ref<PersonSummary>>,
    pub course_id: Ref<CourseSummary>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Reply {
    pub fn author_name(&self) -> &str {
        person_name(self.user_id.as_ref())
    }
}

impl Discussion {
    pub fn student_name(&self) -> &str {
        person_name(self.student_id.as_ref())
    }

    pub fn student_email(&self) -> &str {
        person_email(self.student_id.as_ref())
    }

    /// True once an admin has answered in the thread.
    pub fn is_answered(&self) -> bool {
        self.replies.iter().any(|r| r.user_type == UserType::Admin)
    }
}

impl Identified for Discussion {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Discussion {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.message.as_str(),
            self.student_name(),
            self.student_email(),
        ]
    }
}

/// Body of `POST /courses/discussions/:id/reply`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Validate)]
pub struct ReplyForm {
    #[validate(
        custom(function = not_blank, message = "Reply message is required"),
        length(max = 2000, message = "Reply must be at most 2000 characters")
    )]
    pub message: String,
}

impl ReplyForm {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.trim().to_string(),
        }
    }
}

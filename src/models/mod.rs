// src/models/mod.rs

pub mod alumni;
pub mod company;
pub mod course;
pub mod dashboard;
pub mod discussion;
pub mod enrollment;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use validator::ValidationError;

/// Pagination metadata returned next to `data` by paginated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}

fn first_page() -> u32 {
    1
}

/// A reference to another entity.
/// The backend sends either the populated object or just its id, depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Populated(T),
    Id(String),
}

/// Anything carrying a backend `_id`.
pub trait Identified {
    fn id(&self) -> &str;
}

impl<T: Identified> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Populated(inner) => inner.id(),
            Ref::Id(id) => id,
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Populated(inner) => Some(inner),
            Ref::Id(_) => None,
        }
    }
}

/// Student, admin or any other user as embedded in other records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Identified for PersonSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ref<PersonSummary> {
    /// Display name, falling back to the bare id when the reference was not populated.
    pub fn display_name(&self) -> &str {
        match self {
            Ref::Populated(p) if !p.name.is_empty() => &p.name,
            other => other.id(),
        }
    }

    pub fn email(&self) -> &str {
        self.populated().map(|p| p.email.as_str()).unwrap_or("")
    }
}

/// Shown wherever the referenced person no longer exists.
pub const UNKNOWN_STUDENT: &str = "Unknown student";

/// Name of a person reference the backend may send as `null` (deleted account).
pub fn person_name(person: Option<&Ref<PersonSummary>>) -> &str {
    person.map_or(UNKNOWN_STUDENT, |p| p.display_name())
}

pub fn person_email(person: Option<&Ref<PersonSummary>>) -> &str {
    person.map_or("", |p| p.email())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl Identified for CourseSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Identified for CompanySummary {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl Identified for TestSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Title of a referenced entity, or its id when only the id was sent.
pub fn ref_title<'a>(r: &'a Ref<CourseSummary>) -> &'a str {
    match r {
        Ref::Populated(c) if !c.title.is_empty() => &c.title,
        other => other.id(),
    }
}

/// Parses a wire-format enum value (e.g. `"auto-submitted"`) through its serde representation.
pub fn parse_wire<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string())).ok()
}

/// Renders an enum through its serde representation.
pub fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Required field check: the trimmed value must not be empty.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Trims a required string.
pub(crate) fn tidy(value: &str) -> String {
    value.trim().to_string()
}

/// Trims an optional string; blank becomes `None`.
pub(crate) fn tidy_opt(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

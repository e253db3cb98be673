// src/models/alumni.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Identified, not_blank, tidy, tidy_opt};
use crate::{
    api::endpoints,
    controllers::{filter::Searchable, form::FormModel, list::Resource},
    export::CsvRow,
};

pub const TESTIMONIAL_MAX_CHARS: usize = 500;

/// An alumni testimonial shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumni {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub testimonial: String,
    pub rating: i32,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn active_by_default() -> bool {
    true
}

impl Identified for Alumni {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Alumni {
    const NOUN: &'static str = "alumni";

    fn list_path() -> String {
        endpoints::ALUMNI.to_string()
    }

    fn item_path(id: &str) -> String {
        endpoints::alumni(id)
    }
}

impl Searchable for Alumni {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.company.as_str(),
            self.position.as_str(),
        ]
    }
}

impl CsvRow for Alumni {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Email", "Company", "Position", "Rating", "Featured", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.company.clone(),
            self.position.clone(),
            self.rating.to_string(),
            self.featured.to_string(),
            self.is_active.to_string(),
        ]
    }
}

/// Draft for creating or editing an alumni entry.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlumniForm {
    #[validate(custom(function = not_blank, message = "Name is required"))]
    pub name: String,

    #[validate(
        custom(function = not_blank, message = "Email is required"),
        email(message = "Email must be a valid address")
    )]
    pub email: String,

    #[validate(custom(function = not_blank, message = "Company is required"))]
    pub company: String,

    #[validate(custom(function = not_blank, message = "Position is required"))]
    pub position: String,

    #[validate(
        custom(function = not_blank, message = "Testimonial is required"),
        length(max = 500, message = "Testimonial must be at most 500 characters")
    )]
    pub testimonial: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(url(message = "Photo URL must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    pub featured: bool,

    pub is_active: bool,
}

impl Default for AlumniForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            company: String::new(),
            position: String::new(),
            testimonial: String::new(),
            rating: 5,
            photo_url: None,
            featured: false,
            is_active: true,
        }
    }
}

impl FormModel for AlumniForm {
    type Record = Alumni;

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(record: &Alumni) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            company: record.company.clone(),
            position: record.position.clone(),
            testimonial: record.testimonial.clone(),
            rating: record.rating,
            photo_url: record.photo_url.clone(),
            featured: record.featured,
            is_active: record.is_active,
        }
    }

    fn normalized(&self) -> Self {
        Self {
            name: tidy(&self.name),
            email: tidy(&self.email).to_lowercase(),
            company: tidy(&self.company),
            position: tidy(&self.position),
            testimonial: tidy(&self.testimonial),
            rating: self.rating,
            photo_url: tidy_opt(&self.photo_url),
            featured: self.featured,
            is_active: self.is_active,
        }
    }
}

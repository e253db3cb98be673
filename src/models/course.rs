// src/models/course.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Identified, not_blank, tidy, tidy_opt};
use crate::{
    api::endpoints,
    controllers::{filter::Searchable, form::FormModel, list::Resource},
    error::AppError,
    utils::html::render_rich_text,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub week_number: u32,
    pub title: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub phase_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub expertise: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub curriculum: Vec<Phase>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Course {
    /// Description with `**bold**` markers rendered as sanitized HTML.
    pub fn description_html(&self) -> String {
        render_rich_text(&self.description)
    }

    pub fn week_count(&self) -> usize {
        self.curriculum.iter().map(|p| p.weeks.len()).sum()
    }

    pub fn price_label(&self) -> String {
        if self.is_paid {
            format!("{} {:.2}", self.currency, self.price)
        } else {
            "Free".to_string()
        }
    }
}

impl Identified for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Course {
    const NOUN: &'static str = "course";

    /// Admin listing includes inactive courses.
    fn list_path() -> String {
        endpoints::COURSES_ADMIN_ALL.to_string()
    }

    fn create_path() -> String {
        endpoints::COURSES.to_string()
    }

    fn item_path(id: &str) -> String {
        endpoints::course(id)
    }
}

impl Searchable for Course {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    #[validate(custom(function = not_blank, message = "Course title is required"))]
    pub title: String,
    #[validate(custom(function = not_blank, message = "Course description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(custom(function = not_blank, message = "Currency is required"))]
    pub currency: String,
    pub is_paid: bool,
    pub curriculum: Vec<Phase>,
    pub instructors: Vec<Instructor>,
    pub is_active: bool,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: 0.0,
            currency: default_currency(),
            is_paid: false,
            curriculum: Vec::new(),
            instructors: Vec::new(),
            is_active: true,
        }
    }
}

impl FormModel for CourseForm {
    type Record = Course;

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(record: &Course) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            price: record.price,
            currency: record.currency.clone(),
            is_paid: record.is_paid,
            curriculum: record.curriculum.clone(),
            instructors: record.instructors.clone(),
            is_active: record.is_active.unwrap_or(true),
        }
    }

    fn normalized(&self) -> Self {
        Self {
            title: tidy(&self.title),
            description: tidy(&self.description),
            price: if self.is_paid { self.price } else { 0.0 },
            currency: tidy(&self.currency).to_uppercase(),
            is_paid: self.is_paid,
            curriculum: self.curriculum.clone(),
            instructors: self
                .instructors
                .iter()
                .map(|i| Instructor {
                    name: tidy(&i.name),
                    bio: tidy(&i.bio),
                    experience: tidy(&i.experience),
                    expertise: tidy(&i.expertise),
                    photo_url: tidy_opt(&i.photo_url),
                })
                .collect(),
            is_active: self.is_active,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if self.is_paid && self.price <= 0.0 {
            return Err(AppError::Validation(
                "Paid courses need a price greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

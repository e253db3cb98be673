// src/models/company.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{Identified, not_blank, tidy, tidy_opt};
use crate::{
    api::endpoints,
    controllers::{filter::Searchable, form::FormModel, list::Resource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyCategory {
    ItServices,
    Product,
    Consulting,
    Banking,
    Government,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One section of a company's exam pattern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSection {
    pub section_name: String,
    pub question_count: u32,
    /// Minutes.
    pub duration: u32,
    /// Marks deducted per wrong answer.
    #[serde(default)]
    pub negative_marking: f64,
    #[serde(default = "one_mark")]
    pub marks_per_question: f64,
}

fn one_mark() -> f64 {
    1.0
}

impl ExamSection {
    fn tidied(&self) -> Self {
        Self {
            section_name: tidy(&self.section_name),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMetadata {
    #[validate(range(min = 0.0, max = 100.0, message = "Cutoff percentage must be between 0 and 100"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_criteria: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: CompanyCategory,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_pattern: Vec<ExamSection>,
    #[serde(default)]
    pub metadata: CompanyMetadata,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Company {
    pub fn total_questions(&self) -> u32 {
        self.default_pattern.iter().map(|s| s.question_count).sum()
    }

    /// Total exam duration in minutes.
    pub fn total_duration(&self) -> u32 {
        self.default_pattern.iter().map(|s| s.duration).sum()
    }
}

impl Identified for Company {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Company {
    const NOUN: &'static str = "company";

    fn list_path() -> String {
        endpoints::COMPANIES.to_string()
    }

    fn item_path(id: &str) -> String {
        endpoints::company(id)
    }
}

impl Searchable for Company {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

/// Checks each section of an exam pattern.
pub fn validate_pattern(sections: &[ExamSection]) -> Result<(), ValidationError> {
    for section in sections {
        if section.section_name.trim().is_empty() {
            return Err(ValidationError::new("section_name_required")
                .with_message("Every section needs a name".into()));
        }
        if section.question_count == 0 || section.duration == 0 {
            return Err(ValidationError::new("section_empty")
                .with_message("Sections need at least one question and one minute".into()));
        }
        if section.negative_marking < 0.0 || section.marks_per_question <= 0.0 {
            return Err(ValidationError::new("section_marking")
                .with_message("Marks per question must be positive and negative marking non-negative".into()));
        }
    }
    Ok(())
}

/// Body of `PUT /companies/:id/pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatternUpdate {
    #[validate(custom(function = validate_pattern))]
    pub default_pattern: Vec<ExamSection>,
}

impl PatternUpdate {
    pub fn new(sections: &[ExamSection]) -> Self {
        Self {
            default_pattern: sections.iter().map(ExamSection::tidied).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForm {
    #[validate(custom(function = not_blank, message = "Company name is required"))]
    pub name: String,
    pub category: CompanyCategory,
    pub difficulty: Difficulty,
    #[validate(url(message = "Logo URL must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub description: String,
    #[validate(custom(function = validate_pattern))]
    pub default_pattern: Vec<ExamSection>,
    #[validate(nested)]
    pub metadata: CompanyMetadata,
}

impl FormModel for CompanyForm {
    type Record = Company;

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(record: &Company) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category,
            difficulty: record.difficulty,
            logo_url: record.logo_url.clone(),
            description: record.description.clone(),
            default_pattern: record.default_pattern.clone(),
            metadata: record.metadata.clone(),
        }
    }

    fn normalized(&self) -> Self {
        Self {
            name: tidy(&self.name),
            category: self.category,
            difficulty: self.difficulty,
            logo_url: tidy_opt(&self.logo_url),
            description: tidy(&self.description),
            default_pattern: self.default_pattern.iter().map(ExamSection::tidied).collect(),
            metadata: CompanyMetadata {
                cutoff_percentage: self.metadata.cutoff_percentage,
                passing_criteria: tidy_opt(&self.metadata.passing_criteria),
            },
        }
    }
}

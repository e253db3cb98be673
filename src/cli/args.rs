//! Command-line arguments of the admin console.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use prep_console::api::endpoints::EnrollmentKind;
use prep_console::models::alumni::TESTIMONIAL_MAX_CHARS;

#[derive(Debug, Parser)]
#[command(
    name = "prep-console",
    version,
    about = "Admin console for the test-preparation platform"
)]
pub struct Cli {
    /// API root (overrides API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory CSV exports are written to (overrides EXPORT_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage alumni testimonials.
    Alumni {
        #[command(subcommand)]
        action: AlumniAction,
    },
    /// Manage companies and their exam patterns.
    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },
    /// Manage courses, curriculum and instructors.
    Courses {
        #[command(subcommand)]
        action: CourseAction,
    },
    /// Manage mock tests.
    Tests {
        #[command(subcommand)]
        action: TestAction,
    },
    /// Read and answer course discussions.
    Discussions {
        #[command(subcommand)]
        action: DiscussionAction,
    },
    /// Inspect and export course enrollments.
    Enrollments {
        #[command(subcommand)]
        action: EnrollmentAction,
    },
    /// Browse and export test results.
    Results {
        #[command(subcommand)]
        action: ResultAction,
    },
    /// Show the admin dashboard and paid test analytics.
    Dashboard,
    /// Show one attempt's detailed result.
    Attempt {
        #[arg(value_name = "ATTEMPT_ID")]
        id: String,
        /// Also download the section-wise scores as CSV
        #[arg(long)]
        export: bool,
    },
}

/// Options shared by every listing.
#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Case-insensitive search text
    #[arg(short, long, default_value = "")]
    pub search: String,
}

/// Confirmation bypass for destructive commands.
#[derive(Debug, clap::Args)]
pub struct DeleteArgs {
    #[arg(value_name = "ID")]
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Toggle {
    All,
    Yes,
    No,
}

impl Toggle {
    pub fn as_option(self) -> Option<bool> {
        match self {
            Toggle::All => None,
            Toggle::Yes => Some(true),
            Toggle::No => Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Courses,
    Recordings,
}

impl From<KindArg> for EnrollmentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Courses => Self::Courses,
            KindArg::Recordings => Self::Recordings,
        }
    }
}

/// Mirrors the form's `maxLength` on the testimonial input.
fn testimonial_input(raw: &str) -> Result<String, String> {
    let chars = raw.chars().count();
    if chars > TESTIMONIAL_MAX_CHARS {
        return Err(format!(
            "testimonial is {chars} characters, the limit is {TESTIMONIAL_MAX_CHARS}"
        ));
    }
    Ok(raw.to_string())
}

#[derive(Debug, clap::Args)]
pub struct AlumniFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long, value_parser = testimonial_input)]
    pub testimonial: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub rating: Option<i32>,
    #[arg(long)]
    pub photo_url: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum AlumniAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, value_enum, default_value_t = Toggle::All)]
        featured: Toggle,
        #[arg(long, value_enum, default_value_t = Toggle::All)]
        active: Toggle,
    },
    Add {
        #[command(flatten)]
        fields: AlumniFields,
    },
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: AlumniFields,
    },
    Delete(DeleteArgs),
    /// Write the (filtered) list to CSV.
    Export {
        #[command(flatten)]
        list: ListArgs,
    },
}

/// Company form inputs; on edit, omitted flags keep the stored value.
#[derive(Debug, clap::Args)]
pub struct CompanyFields {
    #[arg(long)]
    pub name: Option<String>,
    /// it-services, product, consulting, banking, government or other
    #[arg(long)]
    pub category: Option<String>,
    /// easy, medium or hard
    #[arg(long)]
    pub difficulty: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub logo_url: Option<String>,
    /// Cutoff percentage, 0-100
    #[arg(long, allow_negative_numbers = true)]
    pub cutoff: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum CompanyAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// it-services, product, consulting, banking, government, other or all
        #[arg(long, default_value = "all")]
        category: String,
        /// easy, medium, hard or all
        #[arg(long, default_value = "all")]
        difficulty: String,
    },
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    Add {
        #[command(flatten)]
        fields: CompanyFields,
    },
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: CompanyFields,
    },
    Delete(DeleteArgs),
    /// Replace the default exam pattern.
    Pattern {
        #[arg(value_name = "ID")]
        id: String,
        /// NAME:QUESTIONS:MINUTES[:NEGATIVE[:MARKS]], repeatable
        #[arg(long = "section", value_name = "SECTION", num_args = 1.., required = true)]
        sections: Vec<String>,
    },
}

/// Course form inputs; on edit, omitted flags keep the stored value.
#[derive(Debug, clap::Args)]
pub struct CourseFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Makes the course paid at this price
    #[arg(long, allow_negative_numbers = true, conflicts_with = "free")]
    pub price: Option<f64>,
    /// Makes the course free
    #[arg(long)]
    pub free: bool,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum CourseAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, value_enum, default_value_t = Toggle::All)]
        paid: Toggle,
    },
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    Add {
        #[command(flatten)]
        fields: CourseFields,
    },
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    Delete(DeleteArgs),
    /// Add (or with --edit, rewrite) a curriculum phase.
    Phase {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
        #[arg(long)]
        number: u32,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Edit the phase currently at this phase number instead of adding one
        #[arg(long, value_name = "PHASE_NUMBER")]
        edit: Option<u32>,
    },
    /// Add a week to a phase.
    Week {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
        /// Phase number the week belongs to
        #[arg(long)]
        phase: u32,
        #[arg(long)]
        number: u32,
        #[arg(long)]
        title: String,
        /// TITLE[::DESCRIPTION], repeatable
        #[arg(long = "topic", value_name = "TOPIC")]
        topics: Vec<String>,
    },
    /// Remove a phase (no confirmation).
    RemovePhase {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
        #[arg(long)]
        number: u32,
    },
    /// Add an instructor.
    Instructor {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long, default_value = "")]
        experience: String,
        #[arg(long, default_value = "")]
        expertise: String,
        #[arg(long)]
        photo_url: Option<String>,
    },
}

/// Mock test form inputs; on edit, omitted flags keep the stored value.
#[derive(Debug, clap::Args)]
pub struct TestFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, value_name = "COMPANY_ID")]
    pub company: Option<String>,
    /// Total question count (defaults to the sum of --section counts)
    #[arg(long)]
    pub questions: Option<u32>,
    /// Minutes
    #[arg(long)]
    pub duration: Option<u32>,
    /// Makes the test paid at this price
    #[arg(long, allow_negative_numbers = true, conflicts_with = "free")]
    pub price: Option<f64>,
    /// Makes the test free
    #[arg(long)]
    pub free: bool,
    /// NAME:QUESTIONS:MINUTES, repeatable; replaces all sections
    #[arg(long = "section", value_name = "SECTION")]
    pub sections: Vec<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum TestAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// free, paid or all
        #[arg(long = "type", default_value = "all")]
        test_type: String,
    },
    Add {
        #[command(flatten)]
        fields: TestFields,
    },
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: TestFields,
    },
    Delete(DeleteArgs),
}

#[derive(Debug, Subcommand)]
pub enum DiscussionAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only discussions of this course
        #[arg(long, value_name = "COURSE_ID")]
        course: Option<String>,
    },
    Reply {
        #[arg(value_name = "DISCUSSION_ID")]
        id: String,
        #[arg(long)]
        message: String,
        /// Board page the thread is listed on
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, value_name = "COURSE_ID")]
        course: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EnrollmentAction {
    List {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
        #[command(flatten)]
        list: ListArgs,
        #[arg(long, value_enum, default_value_t = KindArg::Courses)]
        kind: KindArg,
        /// pending, active, completed, cancelled or all
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Export {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
        #[arg(long, value_enum, default_value_t = KindArg::Courses)]
        kind: KindArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResultAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// in-progress, submitted, auto-submitted or all
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Download results as CSV.
    Export {
        /// Build the CSV locally from JSON instead of asking the server
        #[arg(long)]
        local: bool,
    },
}

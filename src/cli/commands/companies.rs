//! `companies` subcommand.

use prep_console::{
    AppError, ConsoleState,
    controllers::{
        companies::{load_company, save_pattern},
        form::MutationForm,
        list::ResourceList,
        mutation::{AutoConfirm, Confirm},
    },
    models::{
        company::{Company, CompanyCategory, CompanyForm, Difficulty, ExamSection},
        parse_wire, wire_name,
    },
};

use super::parse_choice;
use crate::cli::{
    args::{CompanyAction, CompanyFields, ListArgs},
    output::{StdinConfirm, announce, clip, print_table},
};

pub async fn run(action: CompanyAction, state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();
    let mut list = ResourceList::<Company>::new();

    match action {
        CompanyAction::List {
            list: ListArgs { search },
            category,
            difficulty,
        } => {
            let category = parse_choice::<CompanyCategory>(&category, "category")?;
            let difficulty = parse_choice::<Difficulty>(&difficulty, "difficulty")?;
            list.refresh(&state.client, notifier).await?;
            list.set_search(&search);
            list.filter_by("category", category, |c: &Company| c.category);
            list.filter_by("difficulty", difficulty, |c: &Company| c.difficulty);
            print_companies(&list);
        }
        CompanyAction::Show { id } => {
            let company = load_company(&state.client, &id).await.inspect_err(|e| {
                notifier.error(&e.toast_message());
            })?;
            print_company(&company);
        }
        CompanyAction::Add { fields } => {
            let mut form = MutationForm::<CompanyForm>::new();
            form.open_create();
            fill(form.draft_mut(), fields)?;
            form.submit_and_refresh(&mut list, &state.client, notifier).await?;
            print_companies(&list);
        }
        CompanyAction::Edit { id, fields } => {
            list.refresh(&state.client, notifier).await?;
            let record = list
                .find(&id)
                .cloned()
                .ok_or_else(|| AppError::Validation(format!("No company with id {id}")))?;

            let mut form = MutationForm::<CompanyForm>::new();
            form.open_edit(&record);
            fill(form.draft_mut(), fields)?;
            form.submit_and_refresh(&mut list, &state.client, notifier).await?;
            print_companies(&list);
        }
        CompanyAction::Delete(args) => {
            let confirm: Box<dyn Confirm> = if args.yes {
                Box::new(AutoConfirm(true))
            } else {
                Box::new(StdinConfirm)
            };
            if list.remove(&state.client, confirm.as_ref(), notifier, &args.id).await? {
                print_companies(&list);
            }
        }
        CompanyAction::Pattern { id, sections } => {
            let sections = sections
                .iter()
                .map(|raw| parse_section(raw))
                .collect::<Result<Vec<_>, _>>()?;
            save_pattern(&state.client, notifier, &id, &sections).await?;
            let company = load_company(&state.client, &id).await?;
            print_company(&company);
        }
    }
    Ok(())
}

fn fill(draft: &mut CompanyForm, fields: CompanyFields) -> Result<(), AppError> {
    let CompanyFields {
        name,
        category,
        difficulty,
        description,
        logo_url,
        cutoff,
    } = fields;

    if let Some(v) = name {
        draft.name = v;
    }
    if let Some(raw) = category {
        draft.category =
            parse_wire(&raw).ok_or_else(|| AppError::Validation(format!("Unknown category '{raw}'")))?;
    }
    if let Some(raw) = difficulty {
        draft.difficulty =
            parse_wire(&raw).ok_or_else(|| AppError::Validation(format!("Unknown difficulty '{raw}'")))?;
    }
    if let Some(v) = description {
        draft.description = v;
    }
    if logo_url.is_some() {
        draft.logo_url = logo_url;
    }
    if cutoff.is_some() {
        draft.metadata.cutoff_percentage = cutoff;
    }
    Ok(())
}

/// `NAME:QUESTIONS:MINUTES[:NEGATIVE[:MARKS]]`
fn parse_section(raw: &str) -> Result<ExamSection, AppError> {
    let invalid = || AppError::Validation(format!("Invalid section '{raw}', expected NAME:QUESTIONS:MINUTES[:NEGATIVE[:MARKS]]"));
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    if !(3..=5).contains(&parts.len()) {
        return Err(invalid());
    }

    let mut section = ExamSection {
        section_name: parts[0].to_string(),
        question_count: parts[1].parse().map_err(|_| invalid())?,
        duration: parts[2].parse().map_err(|_| invalid())?,
        negative_marking: 0.0,
        marks_per_question: 1.0,
    };
    if let Some(neg) = parts.get(3) {
        section.negative_marking = neg.parse().map_err(|_| invalid())?;
    }
    if let Some(marks) = parts.get(4) {
        section.marks_per_question = marks.parse().map_err(|_| invalid())?;
    }
    Ok(section)
}

fn print_companies(list: &ResourceList<Company>) {
    if !announce(list.view_state(), "companies") {
        return;
    }
    let rows: Vec<Vec<String>> = list
        .visible()
        .into_iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                wire_name(&c.category),
                wire_name(&c.difficulty),
                c.default_pattern.len().to_string(),
                clip(&c.description, 40),
            ]
        })
        .collect();
    print_table(
        &["ID", "Name", "Category", "Difficulty", "Sections", "Description"],
        &rows,
    );
}

fn print_company(company: &Company) {
    println!("{} ({}, {})", company.name, wire_name(&company.category), wire_name(&company.difficulty));
    if !company.description.is_empty() {
        println!("{}", company.description);
    }
    if let Some(cutoff) = company.metadata.cutoff_percentage {
        println!("Cutoff: {cutoff}%");
    }
    println!();

    if company.default_pattern.is_empty() {
        println!("No exam pattern defined.");
        return;
    }
    let rows: Vec<Vec<String>> = company
        .default_pattern
        .iter()
        .map(|s| {
            vec![
                s.section_name.clone(),
                s.question_count.to_string(),
                format!("{} min", s.duration),
                s.negative_marking.to_string(),
                s.marks_per_question.to_string(),
            ]
        })
        .collect();
    print_table(&["Section", "Questions", "Duration", "Negative", "Marks"], &rows);
    println!(
        "\nTotal: {} questions, {} minutes",
        company.total_questions(),
        company.total_duration()
    );
}

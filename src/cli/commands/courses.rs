//! `courses` subcommand, including the curriculum and instructor editors.

use prep_console::{
    AppError, ConsoleState,
    controllers::{
        curriculum::CurriculumEditor,
        filter::Choice,
        form::MutationForm,
        list::{Resource, ResourceList},
        mutation::{AutoConfirm, Confirm},
    },
    models::course::{Course, CourseForm},
    utils::html::strip_rich_text,
};

use crate::cli::{
    args::{CourseAction, CourseFields, ListArgs},
    output::{StdinConfirm, announce, clip, print_table},
};

pub async fn run(action: CourseAction, state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();
    let mut list = ResourceList::<Course>::new();

    match action {
        CourseAction::List {
            list: ListArgs { search },
            paid,
        } => {
            list.refresh(&state.client, notifier).await?;
            list.set_search(&search);
            let choice = match paid.as_option() {
                Some(v) => Choice::Only(v),
                None => Choice::All,
            };
            list.filter_by("paid", choice, |c: &Course| c.is_paid);
            print_courses(&list);
        }
        CourseAction::Show { id } => {
            let course = load_course(state, &id).await?;
            print_course(&course);
        }
        CourseAction::Add { fields } => {
            let mut form = MutationForm::<CourseForm>::new();
            form.open_create();
            fill(form.draft_mut(), fields);
            form.submit_and_refresh(&mut list, &state.client, notifier).await?;
            print_courses(&list);
        }
        CourseAction::Edit { id, fields } => {
            list.refresh(&state.client, notifier).await?;
            let record = list
                .find(&id)
                .cloned()
                .ok_or_else(|| AppError::Validation(format!("No course with id {id}")))?;

            let mut form = MutationForm::<CourseForm>::new();
            form.open_edit(&record);
            fill(form.draft_mut(), fields);
            form.submit_and_refresh(&mut list, &state.client, notifier).await?;
            print_courses(&list);
        }
        CourseAction::Delete(args) => {
            let confirm: Box<dyn Confirm> = if args.yes {
                Box::new(AutoConfirm(true))
            } else {
                Box::new(StdinConfirm)
            };
            if list.remove(&state.client, confirm.as_ref(), notifier, &args.id).await? {
                print_courses(&list);
            }
        }
        CourseAction::Phase {
            course_id,
            number,
            title,
            description,
            edit,
        } => {
            edit_curriculum(state, &course_id, |editor| {
                match edit {
                    Some(current) => {
                        let index = phase_index(editor, current)?;
                        editor.begin_edit_phase(index)?;
                    }
                    None => editor.begin_add_phase(),
                }
                let draft = editor.phase_draft_mut();
                draft.phase_number = number;
                draft.title = title;
                draft.description = description;
                editor.commit_phase().map(|_| ())
            })
            .await?;
        }
        CourseAction::Week {
            course_id,
            phase,
            number,
            title,
            topics,
        } => {
            edit_curriculum(state, &course_id, |editor| {
                let index = phase_index(editor, phase)?;
                editor.begin_add_week(index)?;
                let draft = editor.week_draft_mut();
                draft.week_number = number;
                draft.title = title;
                for topic in &topics {
                    let (title, description) =
                        topic.split_once("::").unwrap_or((topic.as_str(), ""));
                    editor.add_topic(title, description)?;
                }
                editor.commit_week().map(|_| ())
            })
            .await?;
        }
        CourseAction::RemovePhase { course_id, number } => {
            edit_curriculum(state, &course_id, |editor| {
                let index = phase_index(editor, number)?;
                editor.remove_phase(index);
                Ok(())
            })
            .await?;
        }
        CourseAction::Instructor {
            course_id,
            name,
            bio,
            experience,
            expertise,
            photo_url,
        } => {
            edit_curriculum(state, &course_id, |editor| {
                editor.begin_add_instructor();
                let draft = editor.instructor_draft_mut();
                draft.name = name;
                draft.bio = bio;
                draft.experience = experience;
                draft.expertise = expertise;
                draft.photo_url = photo_url;
                editor.commit_instructor().map(|_| ())
            })
            .await?;
        }
    }
    Ok(())
}

fn fill(draft: &mut CourseForm, fields: CourseFields) {
    let CourseFields {
        title,
        description,
        price,
        free,
        currency,
        active,
    } = fields;

    if let Some(v) = title {
        draft.title = v;
    }
    if let Some(v) = description {
        draft.description = v;
    }
    if let Some(v) = price {
        draft.is_paid = true;
        draft.price = v;
    }
    if free {
        draft.is_paid = false;
    }
    if let Some(v) = currency {
        draft.currency = v;
    }
    if let Some(v) = active {
        draft.is_active = v;
    }
}

async fn load_course(state: &ConsoleState, id: &str) -> Result<Course, AppError> {
    state
        .client
        .get::<Course>(&Course::item_path(id), &[])
        .await
        .inspect_err(|e| state.notifier.error(&e.toast_message()))
}

/// Opens the course for editing, applies `edit` to its curriculum, and saves the whole course.
async fn edit_curriculum<F>(state: &ConsoleState, course_id: &str, edit: F) -> Result<(), AppError>
where
    F: FnOnce(&mut CurriculumEditor) -> Result<(), AppError>,
{
    let course = load_course(state, course_id).await?;
    let mut form = MutationForm::<CourseForm>::new();
    form.open_edit(&course);

    let mut editor = CurriculumEditor::from_form(form.draft());
    edit(&mut editor)?;
    editor.apply_to(form.draft_mut());

    form.submit(&state.client, state.notifier.as_ref()).await?;
    let saved = load_course(state, course_id).await?;
    print_course(&saved);
    Ok(())
}

fn phase_index(editor: &CurriculumEditor, number: u32) -> Result<usize, AppError> {
    editor
        .phases()
        .iter()
        .position(|p| p.phase_number == number)
        .ok_or_else(|| AppError::Validation(format!("Phase {number} does not exist")))
}

fn print_courses(list: &ResourceList<Course>) {
    if !announce(list.view_state(), "courses") {
        return;
    }
    let rows: Vec<Vec<String>> = list
        .visible()
        .into_iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.title.clone(),
                c.price_label(),
                c.curriculum.len().to_string(),
                c.week_count().to_string(),
                clip(&strip_rich_text(&c.description), 40),
            ]
        })
        .collect();
    print_table(&["ID", "Title", "Price", "Phases", "Weeks", "Description"], &rows);
}

fn print_course(course: &Course) {
    println!("{} [{}]", course.title, course.price_label());
    println!("{}\n", strip_rich_text(&course.description));

    if course.curriculum.is_empty() {
        println!("No curriculum yet.");
    }
    for phase in &course.curriculum {
        println!("Phase {}: {}", phase.phase_number, phase.title);
        for week in &phase.weeks {
            println!("  Week {}: {}", week.week_number, week.title);
            for topic in &week.topics {
                if topic.description.is_empty() {
                    println!("    - {}", topic.title);
                } else {
                    println!("    - {}: {}", topic.title, topic.description);
                }
            }
        }
    }

    if !course.instructors.is_empty() {
        println!("\nInstructors:");
        for instructor in &course.instructors {
            println!("  {} ({})", instructor.name, instructor.expertise);
        }
    }
}

//! `alumni` subcommand: testimonials list, create/edit, delete and export.

use prep_console::{
    AppError, ConsoleState,
    controllers::{
        filter::Choice,
        form::{MutationForm, SuccessPolicy},
        list::ResourceList,
        mutation::{AutoConfirm, Confirm},
    },
    models::alumni::{Alumni, AlumniForm},
};

use crate::cli::{
    args::{AlumniAction, AlumniFields, ListArgs, Toggle},
    output::{StdinConfirm, announce, clip, print_table},
};

pub async fn run(action: AlumniAction, state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();
    let mut list = ResourceList::<Alumni>::new();

    match action {
        AlumniAction::List {
            list: ListArgs { search },
            featured,
            active,
        } => {
            list.refresh(&state.client, notifier).await?;
            apply_filters(&mut list, &search, featured, active);
            print_alumni(&list);
        }
        AlumniAction::Add { fields } => {
            let mut form = alumni_form();
            form.open_create();
            fill(form.draft_mut(), fields);
            form.submit_and_refresh(&mut list, &state.client, notifier).await?;
            print_alumni(&list);
        }
        AlumniAction::Edit { id, fields } => {
            list.refresh(&state.client, notifier).await?;
            let record = list
                .find(&id)
                .cloned()
                .ok_or_else(|| AppError::Validation(format!("No alumni with id {id}")))?;

            let mut form = alumni_form();
            form.open_edit(&record);
            fill(form.draft_mut(), fields);
            form.submit_and_refresh(&mut list, &state.client, notifier).await?;
            print_alumni(&list);
        }
        AlumniAction::Delete(args) => {
            let confirm: Box<dyn Confirm> = if args.yes {
                Box::new(AutoConfirm(true))
            } else {
                Box::new(StdinConfirm)
            };
            if list.remove(&state.client, confirm.as_ref(), notifier, &args.id).await? {
                print_alumni(&list);
            }
        }
        AlumniAction::Export {
            list: ListArgs { search },
        } => {
            list.refresh(&state.client, notifier).await?;
            list.set_search(&search);
            let rows: Vec<Alumni> = list.visible().into_iter().cloned().collect();
            let path = state
                .exporter()
                .rows_csv(notifier, "alumni", &rows, "alumni")
                .await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// The alumni backend has reported successful saves with `success: false`.
fn alumni_form() -> MutationForm<AlumniForm> {
    MutationForm::new().with_policy(SuccessPolicy::AcceptOkStatus)
}

fn fill(draft: &mut AlumniForm, fields: AlumniFields) {
    let AlumniFields {
        name,
        email,
        company,
        position,
        testimonial,
        rating,
        photo_url,
        featured,
        active,
    } = fields;

    if let Some(v) = name {
        draft.name = v;
    }
    if let Some(v) = email {
        draft.email = v;
    }
    if let Some(v) = company {
        draft.company = v;
    }
    if let Some(v) = position {
        draft.position = v;
    }
    if let Some(v) = testimonial {
        draft.testimonial = v;
    }
    if let Some(v) = rating {
        draft.rating = v;
    }
    if photo_url.is_some() {
        draft.photo_url = photo_url;
    }
    if let Some(v) = featured {
        draft.featured = v;
    }
    if let Some(v) = active {
        draft.is_active = v;
    }
}

fn apply_filters(list: &mut ResourceList<Alumni>, search: &str, featured: Toggle, active: Toggle) {
    list.set_search(search);
    list.filter_by("featured", toggle_choice(featured), |a: &Alumni| a.featured);
    list.filter_by("active", toggle_choice(active), |a: &Alumni| a.is_active);
}

fn toggle_choice(toggle: Toggle) -> Choice<bool> {
    match toggle.as_option() {
        Some(v) => Choice::Only(v),
        None => Choice::All,
    }
}

fn print_alumni(list: &ResourceList<Alumni>) {
    if !announce(list.view_state(), "alumni") {
        return;
    }
    let rows: Vec<Vec<String>> = list
        .visible()
        .into_iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.name.clone(),
                a.email.clone(),
                format!("{} @ {}", a.position, a.company),
                "★".repeat(a.rating.clamp(0, 5) as usize),
                if a.featured { "yes" } else { "" }.to_string(),
                if a.is_active { "" } else { "inactive" }.to_string(),
                clip(&a.testimonial, 40),
            ]
        })
        .collect();
    print_table(
        &["ID", "Name", "Email", "Role", "Rating", "Featured", "Status", "Testimonial"],
        &rows,
    );
}

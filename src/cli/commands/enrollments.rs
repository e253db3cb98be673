//! `enrollments` subcommand.

use prep_console::{
    AppError, ConsoleState,
    api::endpoints::{self, EnrollmentKind},
    controllers::{enrollments::enrollment_board, filter::Choice, pagination::PagedList},
    models::{
        enrollment::{Enrollment, EnrollmentStatus},
        wire_name,
    },
};

use super::{parse_choice, when};
use crate::cli::{
    args::{EnrollmentAction, ListArgs},
    output::{page_footer, print_table},
};

pub async fn run(action: EnrollmentAction, state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();

    match action {
        EnrollmentAction::List {
            course_id,
            list: ListArgs { search },
            kind,
            status,
            page,
        } => {
            let mut board = enrollment_board(kind.into(), &course_id, state.config.page_size)
                .starting_at(page);
            if let Choice::Only(status) = parse_choice::<EnrollmentStatus>(&status, "status")? {
                board = board.with_param("status", wire_name(&status));
            }
            board.load(&state.client, notifier).await?;
            board.set_search(&search);
            print_board(&board);
        }
        EnrollmentAction::Export { course_id, kind } => {
            let kind: EnrollmentKind = kind.into();
            let path = state
                .exporter()
                .server_csv(
                    &state.client,
                    notifier,
                    &format!("enrollments-{kind}-{course_id}"),
                    &endpoints::enrollments_export(kind, &course_id),
                    &[],
                    &format!("{kind}-enrollments"),
                )
                .await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_board(board: &PagedList<Enrollment>) {
    if board.items().is_empty() {
        println!("No enrollments yet.");
        return;
    }
    let visible = board.visible();
    if visible.is_empty() {
        println!("No enrollments match the current search.");
        return;
    }

    let rows: Vec<Vec<String>> = visible
        .into_iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.student_name().to_string(),
                e.student_email().to_string(),
                wire_name(&e.status),
                when(e.created_at),
            ]
        })
        .collect();
    print_table(&["ID", "Student", "Email", "Status", "Enrolled"], &rows);

    let page = board.state();
    page_footer(page.page(), page.pages(), page.total());
}

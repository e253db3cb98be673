//! `discussions` subcommand.

use prep_console::{
    AppError, ConsoleState,
    controllers::{
        discussions::{discussion_board, reply},
        pagination::PagedList,
    },
    models::{discussion::Discussion, ref_title},
};

use super::when;
use crate::cli::{
    args::{DiscussionAction, ListArgs},
    output::{clip, page_footer, print_table},
};

pub async fn run(action: DiscussionAction, state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();

    match action {
        DiscussionAction::List {
            list: ListArgs { search },
            page,
            course,
        } => {
            let mut board = board_at(state, page, course);
            board.load(&state.client, notifier).await?;
            board.set_search(&search);
            print_board(&board);
        }
        DiscussionAction::Reply {
            id,
            message,
            page,
            course,
        } => {
            let mut board = board_at(state, page, course);
            reply(&mut board, &state.client, notifier, &id, &message).await?;
            match board.items().iter().find(|d| d.id == id) {
                Some(thread) => print_thread(thread),
                None => println!(
                    "Thread {} is not on page {}; pass --page to show it.",
                    id,
                    board.state().page()
                ),
            }
        }
    }
    Ok(())
}

fn board_at(state: &ConsoleState, page: u32, course: Option<String>) -> PagedList<Discussion> {
    let board = discussion_board(state.config.page_size).starting_at(page);
    match course {
        Some(course_id) => board.with_param("courseId", course_id),
        None => board,
    }
}

fn print_board(board: &PagedList<Discussion>) {
    let visible = board.visible();
    if board.items().is_empty() {
        println!("No discussions yet.");
        return;
    }
    if visible.is_empty() {
        println!("No discussions match the current search.");
        return;
    }

    let rows: Vec<Vec<String>> = visible
        .into_iter()
        .map(|d| {
            vec![
                d.id.clone(),
                d.student_name().to_string(),
                ref_title(&d.course_id).to_string(),
                clip(&d.message, 50),
                d.replies.len().to_string(),
                if d.is_answered() { "answered" } else { "open" }.to_string(),
                when(d.created_at),
            ]
        })
        .collect();
    print_table(
        &["ID", "Student", "Course", "Message", "Replies", "State", "Asked"],
        &rows,
    );

    let page = board.state();
    page_footer(page.page(), page.pages(), page.total());
}

fn print_thread(thread: &Discussion) {
    println!(
        "{} on {}: {}",
        thread.student_name(),
        ref_title(&thread.course_id),
        thread.message
    );
    for r in &thread.replies {
        println!("  ↳ {} ({:?}): {}", r.author_name(), r.user_type, r.message);
    }
}

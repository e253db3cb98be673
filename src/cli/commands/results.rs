//! `results` subcommand.

use prep_console::{
    AppError, ConsoleState,
    api::endpoints,
    controllers::{filter::Choice, list::ResourceList},
    models::{
        mock_test::{AttemptStatus, ResultRow},
        wire_name,
    },
};

use super::{parse_choice, when};
use crate::cli::{
    args::{ListArgs, ResultAction},
    output::{announce, print_table},
};

pub async fn run(action: ResultAction, state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();

    match action {
        ResultAction::List {
            list: ListArgs { search },
            status,
        } => {
            let mut list = ResourceList::<ResultRow>::new();
            let status = match parse_choice::<AttemptStatus>(&status, "status")? {
                Choice::Only(s) => Some(wire_name(&s)),
                Choice::All => None,
            };
            list.set_param("status", status);
            list.sync(&state.client, notifier).await?;
            list.set_search(&search);
            print_results(&list);
        }
        ResultAction::Export { local } => {
            let exporter = state.exporter();
            let path = if local {
                exporter
                    .client_csv::<ResultRow>(
                        &state.client,
                        notifier,
                        "results",
                        endpoints::ADMIN_RESULTS,
                        &[],
                        "results",
                    )
                    .await?
            } else {
                exporter
                    .server_csv(
                        &state.client,
                        notifier,
                        "results",
                        endpoints::ADMIN_RESULTS_EXPORT,
                        &[],
                        "results",
                    )
                    .await?
            };
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_results(list: &ResourceList<ResultRow>) {
    if !announce(list.view_state(), "results") {
        return;
    }
    let rows: Vec<Vec<String>> = list.visible().into_iter().map(result_cells).collect();
    print_table(
        &["ID", "Student", "Test", "Score", "Correct", "Rank", "Status", "Submitted"],
        &rows,
    );
}

pub(super) fn result_cells(r: &ResultRow) -> Vec<String> {
    vec![
        r.id.clone(),
        r.student_name().to_string(),
        r.test_title().to_string(),
        format!("{:.2}", r.score),
        r.correct_answers.to_string(),
        r.rank.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
        wire_name(&r.status),
        when(r.submitted_at),
    ]
}

//! `dashboard` and `attempt` subcommands.

use prep_console::{
    AppError, ConsoleState,
    controllers::analytics::{attempt_result, load_dashboard, paid_tests_by_company},
    models::{dashboard::total_paid_revenue, mock_test::Attempt, wire_name},
};

use super::{results::result_cells, when};
use crate::cli::output::print_table;

pub async fn run(state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();

    let stats = load_dashboard(&state.client)
        .await
        .inspect_err(|e| notifier.error(&e.toast_message()))?;

    println!("Students     {}", stats.total_students);
    println!("Tests        {}", stats.total_tests);
    println!("Attempts     {}", stats.total_attempts);
    println!("Companies    {}", stats.total_companies);
    println!("Courses      {}", stats.total_courses);
    println!("Enrollments  {}", stats.total_enrollments);
    println!("Revenue      {:.2}", stats.total_revenue);

    println!("\nRecent attempts");
    if stats.recent_attempts.is_empty() {
        println!("No attempts yet.");
    } else {
        let rows: Vec<Vec<String>> = stats.recent_attempts.iter().map(result_cells).collect();
        print_table(
            &["ID", "Student", "Test", "Score", "Correct", "Rank", "Status", "Submitted"],
            &rows,
        );
    }

    let paid = paid_tests_by_company(&state.client)
        .await
        .inspect_err(|e| notifier.error(&e.toast_message()))?;

    println!("\nPaid tests by company");
    if paid.is_empty() {
        println!("No paid test sales yet.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = paid
        .iter()
        .map(|r| {
            vec![
                r.company_name.clone(),
                r.paid_tests.to_string(),
                r.purchases.to_string(),
                format!("{:.2}", r.revenue),
            ]
        })
        .collect();
    print_table(&["Company", "Paid Tests", "Purchases", "Revenue"], &rows);
    println!("\nTotal {:.2}", total_paid_revenue(&paid));
    Ok(())
}

pub async fn attempt(id: &str, export: bool, state: &ConsoleState) -> Result<(), AppError> {
    let notifier = state.notifier.as_ref();

    let attempt = {
        let _guard = state.inflight.acquire(id)?;
        attempt_result(&state.client, id)
            .await
            .inspect_err(|e| notifier.error(&e.toast_message()))?
    };
    print_attempt(&attempt);

    if export {
        let path = state
            .exporter()
            .rows_csv(
                notifier,
                &format!("attempt-{id}"),
                &attempt.section_wise_score,
                &format!("attempt-{id}-sections"),
            )
            .await?;
        println!("{}", path.display());
    }
    Ok(())
}

fn print_attempt(attempt: &Attempt) {
    let title = attempt
        .test_id
        .as_ref()
        .and_then(|t| t.populated())
        .map(|t| t.title.as_str())
        .unwrap_or("Attempt");
    println!("{title} ({})", wire_name(&attempt.status));
    println!(
        "Score {:.2}, {} of {} correct ({:.1}% accuracy)",
        attempt.score,
        attempt.correct_answers,
        attempt.total_questions,
        attempt.accuracy()
    );
    if let Some(rank) = attempt.rank {
        println!("Rank {rank}");
    }
    if let Some(percentile) = attempt.percentile {
        println!("Percentile {percentile:.2}");
    }
    println!("Started {}, submitted {}", when(attempt.started_at), when(attempt.submitted_at));

    if !attempt.section_wise_score.is_empty() {
        println!();
        let rows: Vec<Vec<String>> = attempt
            .section_wise_score
            .iter()
            .map(|s| {
                vec![
                    s.section_name.clone(),
                    format!("{:.2}", s.score),
                    s.correct_answers.to_string(),
                    s.total_questions.to_string(),
                ]
            })
            .collect();
        print_table(&["Section", "Score", "Correct", "Questions"], &rows);
    }

    if !attempt.violations.is_empty() {
        println!("\n{} proctoring violation(s)", attempt.violations.len());
        for v in &attempt.violations {
            println!(
                "  {} at {}{}",
                v.kind,
                when(v.timestamp),
                v.details.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
            );
        }
    }
}

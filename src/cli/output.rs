//! Terminal-side implementations of the console's prompts, toasts and tables.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use prep_console::controllers::{
    list::ViewState,
    mutation::Confirm,
    notify::{LogNotifier, Notifier, Toast, ToastLevel},
};

/// Prints toasts to stderr and forwards them to the log.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    raised_error: AtomicBool,
}

impl TerminalNotifier {
    /// Whether an error toast was already shown to the user.
    pub fn raised_error(&self) -> bool {
        self.raised_error.load(Ordering::Relaxed)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => eprintln!("✓ {}", toast.message),
            ToastLevel::Error => {
                self.raised_error.store(true, Ordering::Relaxed);
                eprintln!("✗ {}", toast.message);
            }
        }
        LogNotifier.notify(toast);
    }
}

/// Asks on stdin; anything other than `y`/`yes` declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Prints the empty-state line for a listing. Returns true when rows should be printed.
pub fn announce(state: ViewState, plural: &str) -> bool {
    match state {
        ViewState::Loading => {
            println!("Loading {plural}...");
            false
        }
        ViewState::Failed => {
            println!("Could not load {plural}.");
            false
        }
        ViewState::NoData => {
            println!("No {plural} yet.");
            false
        }
        ViewState::NoMatches => {
            println!("No {plural} match the current search or filters.");
            false
        }
        ViewState::Populated(_) => true,
    }
}

/// Left-aligned columns sized to their widest cell.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(headers.to_vec()));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", rule.join("  "));
    for row in rows {
        println!("{}", render(row.iter().map(String::as_str).collect()));
    }
}

/// Shortens long text to `max` characters for table cells.
pub fn clip(text: &str, max: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

pub fn page_footer(page: u32, pages: u32, total: u64) {
    println!("\nPage {page} of {pages} ({total} total)");
}

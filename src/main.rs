// src/main.rs

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use prep_console::{AppError, ConsoleState, config::Config};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::args::{Cli, Command};
use cli::commands;
use cli::output::TerminalNotifier;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "console.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    // stdout carries command output
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Using API at {}", config.api_base_url);

    let notifier = Arc::new(TerminalNotifier::default());
    let state = ConsoleState::new(config, notifier.clone());

    match dispatch(args.command, &state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            if !notifier.raised_error() {
                eprintln!("✗ {}", e.toast_message());
            }
            ExitCode::FAILURE
        }
    }
}

/// Environment first, then command-line overrides.
fn load_config(args: &Cli) -> Result<Config, AppError> {
    let mut config = match (&args.api_url, Config::from_env()) {
        (Some(url), Ok(mut config)) => {
            config.api_base_url = Config::parse_base_url(url)?;
            config
        }
        (Some(url), Err(_)) => Config::for_base_url(url)?,
        (None, result) => result?,
    };
    if let Some(dir) = &args.export_dir {
        config.export_dir = dir.clone();
    }
    Ok(config)
}

async fn dispatch(command: Command, state: &ConsoleState) -> Result<(), AppError> {
    match command {
        Command::Alumni { action } => commands::alumni::run(action, state).await,
        Command::Companies { action } => commands::companies::run(action, state).await,
        Command::Courses { action } => commands::courses::run(action, state).await,
        Command::Tests { action } => commands::tests::run(action, state).await,
        Command::Discussions { action } => commands::discussions::run(action, state).await,
        Command::Enrollments { action } => commands::enrollments::run(action, state).await,
        Command::Results { action } => commands::results::run(action, state).await,
        Command::Dashboard => commands::dashboard::run(state).await,
        Command::Attempt { id, export } => commands::dashboard::attempt(&id, export, state).await,
    }
}

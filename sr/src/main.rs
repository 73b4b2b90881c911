//! studentroster - terminal client for a student records REST service
//!
//! CLI entry point: the TUI by default, or one-shot subcommands.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use studentroster::cli::{Cli, Command, OutputFormat, generate_after_help};
use studentroster::config::Config;
use studentroster::domain::{Student, StudentId};
use studentroster::error::ClientError;
use studentroster::session::Session;
use studentroster::state::ListStatus;
use studentroster::{create_client, tui};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studentroster")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("studentroster.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .with_base_url(cli.base_url);
    info!("studentroster loaded config: base-url={}", config.backend.base_url);

    let api = create_client(&config.backend).context("Invalid backend configuration")?;

    match cli.command {
        None => tui::run(&config, api).await,
        Some(command) => {
            let mut session = Session::new(api);
            let result = run_command(&mut session, command).await;
            session.close().await;
            result
        }
    }
}

async fn run_command(session: &mut Session, command: Command) -> Result<()> {
    debug!(?command, "run_command: called");
    match command {
        Command::List { format } => cmd_list(session, format).await,
        Command::Add { name, address } => {
            let result = session.add(&name, &address).await;
            report(session, result)
        }
        Command::Update { id, name, address } => cmd_update(session, id, name, address).await,
        Command::Delete { id } => {
            let result = session.remove(id).await;
            report(session, result)
        }
    }
}

/// Print the current student list
async fn cmd_list(session: &mut Session, format: OutputFormat) -> Result<()> {
    let result = session.refresh().await;
    if let Err(e) = result {
        return Err(fail(session, e));
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(session.students())?);
        }
        OutputFormat::Text => print_students(session.students()),
    }
    Ok(())
}

/// Edit a student; the list is loaded first so the record can be found
async fn cmd_update(
    session: &mut Session,
    id: StudentId,
    name: Option<String>,
    address: Option<String>,
) -> Result<()> {
    if let Err(e) = session.refresh().await {
        return Err(fail(session, e));
    }
    let result = session.update(id, name.as_deref(), address.as_deref()).await;
    report(session, result)
}

/// Print the outcome of a mutation and the refreshed list
fn report(session: &Session, result: Result<(), ClientError>) -> Result<()> {
    if let Err(e) = result {
        return Err(fail(session, e));
    }

    let state = session.state();

    if let Some(message) = &state.success_message {
        println!("{} {}", "✓".green(), message);
    }

    match &state.list.status {
        ListStatus::Loaded => {
            println!();
            print_students(session.students());
        }
        ListStatus::Failed(message) => eprintln!("{} {}", "!".yellow(), message),
        ListStatus::Loading => {}
    }
    Ok(())
}

/// Print the failure text the form or list would show, then hand the error up
fn fail(session: &Session, error: ClientError) -> eyre::Report {
    debug!(error = %error, "fail: operation failed");
    if let Some(message) = session.state().failure_text() {
        eprintln!("{} {}", "✗".red(), message);
    }
    error.into()
}

fn print_students(students: &[Student]) {
    if students.is_empty() {
        println!("No students found.");
        return;
    }

    let id_width = students
        .iter()
        .map(|s| s.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = students
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    // Pad before coloring so escape codes do not count toward the width
    println!(
        "{}  {}  {}",
        format!("{:<id_width$}", "ID").bold(),
        format!("{:<name_width$}", "NAME").bold(),
        "ADDRESS".bold()
    );
    for student in students {
        println!(
            "{}  {:<name_width$}  {}",
            format!("{:<id_width$}", student.id.to_string()).cyan(),
            student.name,
            student.address
        );
    }
}

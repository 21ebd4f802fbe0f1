mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::io;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind as ClapErrorKind};
use expensetrack_client::{ClientError, ErrorKind};
use stdout_io::write_stdout_text;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const ROOT_HELP: &str = "Expensetrack - income and expense tracker

Usage:
  expensetrack <command>

Start here:
  expensetrack add --title Salary --amount 50000 --category Income --income
  expensetrack add --title Groceries --amount 1500 --category Food
  expensetrack list
  expensetrack summary
  expensetrack delete <id>

Run `expensetrack <command> --help` for command usage.
";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(code) => code,
        Err(code) => code,
    }
}

/// Logs go to stderr so stdout stays parseable in `--json` mode.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

async fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ClapErrorKind::DisplayHelp
                    | ClapErrorKind::DisplayVersion
                    | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if write_stdout_text(&err.to_string()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                parse_error_with_command_hint(&clean_message, command_from_args(&raw_args));
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli).await {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Strips clap's trailing Usage line and "For more information" hint so the
/// "What to do next" section is the only guidance printed.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    raw_args
        .iter()
        .skip(1)
        .find_map(|value| match value.as_str() {
            "add" => Some("add"),
            "delete" => Some("delete"),
            "list" => Some("list"),
            "summary" => Some("summary"),
            _ => None,
        })
}

fn parse_error_with_command_hint(clean_message: &str, command: Option<&str>) -> ClientError {
    match command {
        Some(command) => ClientError::new(
            "invalid_argument",
            clean_message,
            vec![format!(
                "Run `expensetrack {command} --help` for command usage."
            )],
        ),
        None => ClientError::invalid_argument(clean_message),
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    match error.kind() {
        ErrorKind::Validation | ErrorKind::NotFound => ExitCode::from(1),
        ErrorKind::Persistence | ErrorKind::Internal => ExitCode::from(2),
    }
}

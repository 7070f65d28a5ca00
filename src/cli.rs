use crate::server;
use clap::{Args, Parser, Subcommand};
use user_management_mock::emails::{check_email, EmailValidationRequest, RequestValidationError};
use user_management_mock::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "User Management mock API",
    about = "Serve or exercise the email domain allowlist mock",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Check a single address and print the JSON the service would answer with
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Email address to validate
    email: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
    }
}

fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let report = check_report(args.email)?;
    println!("{}", report.json);
    match report.rejection {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// What `check` prints, plus the rejection that makes it exit non-zero.
#[derive(Debug)]
struct CheckReport {
    json: String,
    rejection: Option<RequestValidationError>,
}

fn check_report(email: String) -> Result<CheckReport, AppError> {
    let report = match EmailValidationRequest::parse(email) {
        Ok(request) => CheckReport {
            json: serde_json::to_string_pretty(&check_email(&request))?,
            rejection: None,
        },
        Err(err) => CheckReport {
            json: serde_json::to_string_pretty(&err.body())?,
            rejection: Some(err),
        },
    };
    Ok(report)
}

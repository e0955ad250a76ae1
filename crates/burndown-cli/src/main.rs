#![forbid(unsafe_code)]

mod cmd;
mod output;

use burndown_core::config::load_user_config;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "burndown: milestone completion forecasts from issue labels",
    long_about = None
)]
struct Cli {
    /// Log at debug level (ignored when `BURNDOWN_LOG` is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output (shorthand for `--format json`).
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Overrides `FORMAT` and the user config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Forecast",
        about = "Forecast when a milestone will be done",
        long_about = "Tally open, test, and closed hours from an issue export and project \
                      completion dates under optimistic, moderate, and conservative rates.",
        after_help = "EXAMPLES:\n    # Use burndown.toml in the current directory\n    burndown report\n\n    # Everything on the command line\n    burndown report --items issues.json --start 2015-05-11 --milestone \"Sprint 19\"\n\n    # Read the export from stdin\n    gh api repos/o/r/issues | burndown report --items - --start 2015-05-11\n\n    # Emit machine-readable output\n    burndown report --json"
    )]
    Report(cmd::report::ReportArgs),

    #[command(
        next_help_heading = "Calendar",
        about = "Count business days between two dates",
        long_about = "Count weekdays from --from (inclusive) up to --to (exclusive).",
        after_help = "EXAMPLES:\n    # Two working weeks\n    burndown days --from 2015-05-11 --to 2015-05-25"
    )]
    Days(cmd::calendar::DaysArgs),

    #[command(
        next_help_heading = "Calendar",
        about = "Add business days to a date",
        long_about = "Step forward over weekdays only. Fractional counts round up to the next whole day.",
        after_help = "EXAMPLES:\n    # Friday plus one business day lands on Monday\n    burndown add-days --from 2015-05-15 --days 1\n\n    # Emit machine-readable output\n    burndown add-days --from 2015-05-25 --days 12.5 --json"
    )]
    AddDays(cmd::calendar::AddDaysArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    burndown completions bash > ~/.local/share/bash-completion/completions/burndown\n\n    # Zsh\n    burndown completions zsh > ~/.zfunc/_burndown"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Filter used when `BURNDOWN_LOG` is unset.
const fn default_log_directive(verbose: bool, debug_env: bool) -> &'static str {
    if verbose || debug_env {
        "burndown=debug,info"
    } else {
        "burndown=info,warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("BURNDOWN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_log_directive(verbose, env::var("DEBUG").is_ok()))
    });

    let format = env::var("BURNDOWN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs go to stderr.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let user_config = load_user_config().unwrap_or_else(|err| {
        warn!("ignoring user config: {err:#}");
        burndown_core::config::UserConfig::default()
    });
    let output = resolve_output_mode(cli.format, cli.json, user_config.output.as_deref());
    debug!(?output, "resolved output mode");

    let command_result = match env::current_dir() {
        Ok(project_root) => match cli.command {
            Commands::Report(ref args) => cmd::report::run_report(args, output, &project_root),
            Commands::Days(ref args) => cmd::calendar::run_days(args, output),
            Commands::AddDays(ref args) => cmd::calendar::run_add_days(args, output),
            Commands::Completions(ref args) => {
                let mut command = Cli::command();
                cmd::completions::run_completions(args.shell, &mut command)
            }
        },
        Err(err) => Err(anyhow::Error::new(err).context("failed to resolve working directory")),
    };

    match command_result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(render_err) = render_error(output, &CliError::from_anyhow(&err)) {
                eprintln!("error: {err:#} (and failed to render it: {render_err})");
            }
            ExitCode::FAILURE
        }
    }
}

//! CLI definitions and entry point

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::commands;
use piped::core::services::EnvironmentPolicy;
use piped::output::OutputMode;
use piped::paths;

/// piped - run a project's lint, format, test and publish sessions
#[derive(Parser, Debug)]
#[command(
    name = "piped",
    version,
    about = "Run a project's lint, format, test and publish sessions",
    long_about = "Run a project's lint, format, test and publish sessions.\n\n\
                  Sessions are configured in the [tool.piped] table of pyproject.toml.\n\
                  Arguments after -- are passed to every selected session, e.g.\n\
                  `piped test -- --skip-install` or `piped generate-docs -- -o ./public`."
)]
pub struct Cli {
    /// Sessions to run (defaults to `default_sessions`)
    #[arg(value_name = "SESSION")]
    pub sessions: Vec<String>,

    /// Additional session to run
    #[arg(short = 's', long = "session", value_name = "SESSION")]
    pub session: Vec<String>,

    /// Only run sessions carrying one of these tags
    #[arg(short = 't', long = "tags", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// List available sessions and exit
    #[arg(short, long)]
    pub list: bool,

    /// Manifest to read `[tool.piped]` from
    #[arg(long, default_value = paths::MANIFEST)]
    pub manifest: PathBuf,

    /// Stop after the first failing session
    #[arg(short = 'x', long)]
    pub stop_on_first_error: bool,

    /// Reuse existing session environments
    #[arg(short = 'r', long)]
    pub reuse_existing: bool,

    /// Run every session without an isolated environment
    #[arg(long)]
    pub no_venv: bool,

    /// Print commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Arguments passed to every selected session
    #[arg(last = true, value_name = "POSARGS")]
    pub posargs: Vec<String>,
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    if cli.list {
        commands::list(&cli.manifest, output_mode)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut sessions = cli.sessions;
    sessions.extend(cli.session);

    let request = commands::RunRequest {
        manifest: cli.manifest,
        sessions,
        tags: cli.tags,
        posargs: cli.posargs,
        stop_on_first_error: cli.stop_on_first_error,
        environment: EnvironmentPolicy {
            reuse_existing: cli.reuse_existing,
            no_venv: cli.no_venv,
        },
        dry_run: cli.dry_run,
    };
    let code = commands::run(request, output_mode)?;
    Ok(ExitCode::from(code))
}

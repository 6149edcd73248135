//! cpbench: browse benchmark results of consensus protocol implementations

mod commands;
mod config;
mod interactive;
mod link;
mod output;

use clap::{Parser, Subcommand};
use commands::{Context, ResultsArgs};
use config::{ConfigErrors, DashboardConfig};
use cpbench_analysis::ProjectionError;
use cpbench_ingest::{LoadError, SessionError, SessionStore};
use link::LinkError;
use std::{io, path::PathBuf, process::ExitCode};
use thiserror::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("No results are loaded, there is nothing to show")]
    NoData,
    #[error("Failed to write output")]
    Io(#[from] io::Error),
}

/// Benchmark results dashboard for consensus protocol implementations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Results location, an http(s) URL or a local path (overrides the config)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Directory the session is persisted in (overrides the config)
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Top implementations per consistency category
    Overview {
        /// Workload to rank, the first one in the data by default
        #[arg(short, long)]
        workload: Option<String>,

        /// Entries per category (overrides the config)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Filtered results table and chart series
    Results(ResultsArgs),

    /// Selectable workloads, filter values and metric groups
    Options {
        #[arg(short, long)]
        workload: Option<String>,
    },

    /// Load a local results file into the session
    Import { file: PathBuf },

    /// Line driven session on the results view
    Interactive {
        #[arg(short, long)]
        workload: Option<String>,
    },

    /// Manage the persisted session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    /// Drop the cached results
    Clear,
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let mut config = config.with_overrides(cli.data.as_deref(), cli.session_dir)?;

    if config.preflight_checks() {
        return Err(ConfigErrors::Preflight.into());
    }

    let persistent;
    let store = match &config.session.path {
        Some(directory) => {
            persistent = SessionStore::persistent(directory);
            &persistent
        }
        None => SessionStore::global(),
    };

    let context = Context {
        config,
        store,
        use_color: std::env::var_os("NO_COLOR").is_none(),
    };
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Overview { workload, top } => {
            commands::overview(&context, workload.as_deref(), top, &mut stdout)
        }
        Commands::Results(args) => commands::results(&context, args, &mut stdout),
        Commands::Options { workload } => {
            commands::options(&context, workload.as_deref(), &mut stdout)
        }
        Commands::Import { file } => commands::import(&context, &file, &mut stdout),
        Commands::Interactive { workload } => {
            let stdin = io::stdin().lock();
            commands::interactive(&context, workload.as_deref(), stdin, &mut stdout)
        }
        Commands::Session {
            action: SessionAction::Clear,
        } => commands::clear_session(&context, &mut stdout),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(error = ?error, "{error}");
            ExitCode::FAILURE
        }
    }
}

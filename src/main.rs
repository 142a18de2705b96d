use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use liftlog::config::StudioSettings;
use liftlog::programs::{run_create, run_list, run_show};
use liftlog::studio::run_studio;

#[derive(Debug, Parser)]
#[command(name = "liftlog", about = "Desktop and CLI client for a workout-program backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Launch the native studio shell.
    Studio,
    /// Print the program collection.
    List,
    /// Print one program with its days and exercises.
    Show { id: String },
    /// Create a program from a YAML draft file.
    Create {
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_tracing()?;

    let cli = Cli::parse();
    let settings = StudioSettings::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Studio => run_studio(&settings)?,
        Commands::List => run_list(&settings).await?,
        Commands::Show { id } => run_show(&settings, &id).await?,
        Commands::Create { file } => run_create(&settings, &file).await?,
    }

    Ok(())
}

fn init_tracing() -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,liftlog=debug"));
    let stderr_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    let registry = tracing_subscriber::registry().with(stderr_layer);

    // Optional rolling file log, enabled by LIFTLOG_LOG_DIR and filtered
    // independently by LIFTLOG_FILE_LOG.
    if let Ok(log_dir) = env::var("LIFTLOG_LOG_DIR") {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "liftlog.log");
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        let file_filter = EnvFilter::new(
            env::var("LIFTLOG_FILE_LOG").unwrap_or_else(|_| "info".to_owned()),
        );
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(file_writer)
            .with_filter(file_filter);

        registry
            .with(file_layer)
            .try_init()
            .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;
        return Ok(Some(guard));
    }

    registry
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;
    Ok(None)
}

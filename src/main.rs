use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::{load_config, Settings};
use core_types::QueryParameters;
// Import database types directly from the database crate
use database::{
    connect, connect_lazy, run_migrations, ConnectionOptions, DbRepository, InMemorySource,
    ResultsSource,
};
use engine::{ResultsFetcher, ViewSession, ViewState};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod browse;
mod render;
mod telemetry;

/// The main entry point for the Liftboard results viewer.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = telemetry::init(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Show(args) => handle_show(args, &settings).await,
        Commands::Browse(args) => {
            let source = open_source(&args.source, &settings)?;
            let initial = settings.table.initial_parameters();
            browse::run(source, initial).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Migrate => {
            handle_migrate(&settings).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Search weightlifting competition results and see per-lift success rates.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults to ./config.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one page of results and print it as a table.
    Show(ShowArgs),
    /// Interactively change the athlete filter and page size.
    Browse(BrowseArgs),
    /// Create the lifting_results table in the database at DATABASE_URL.
    Migrate,
}

#[derive(Args)]
struct SourceArgs {
    /// Read results from a JSON file instead of the database.
    #[arg(long)]
    fixture: Option<PathBuf>,
}

#[derive(Args)]
struct ShowArgs {
    /// Only show results for this exact athlete name.
    #[arg(long)]
    name: Option<String>,

    /// Rows per page: 50, 100, 500 or 1000.
    #[arg(long)]
    rows: Option<String>,

    /// Print the snapshot and success rates as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct BrowseArgs {
    #[command(flatten)]
    source: SourceArgs,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles a single fetch-and-render.
async fn handle_show(args: ShowArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let params = show_parameters(
        args.name.as_deref(),
        args.rows.as_deref(),
        &settings.table.initial_parameters(),
    )?;

    let source = open_source(&args.source, settings)?;
    let session = ViewSession::new(ResultsFetcher::new(source));

    let spinner = render::spinner();
    let snapshot = session.apply(params).await;
    spinner.finish_and_clear();

    if args.json {
        let view = serde_json::json!({
            "snapshot": snapshot,
            "success_rates": snapshot.success_rates(),
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::describe(&snapshot));
        println!("{}", render::render(&snapshot));
    }

    Ok(match snapshot.state {
        ViewState::Failed { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

/// Combines `--name`/`--rows` with the configured defaults. An unsupported
/// `--rows` value fails here, before any source is opened.
fn show_parameters(
    name: Option<&str>,
    rows: Option<&str>,
    defaults: &QueryParameters,
) -> anyhow::Result<QueryParameters> {
    let name = name.unwrap_or(defaults.name_filter());
    match rows {
        Some(raw) => QueryParameters::parse(name, raw)
            .context("Rows per page must be one of 50, 100, 500 or 1000"),
        None => Ok(defaults.with_name_filter(name)),
    }
}

/// Applies the bundled migration to the configured database.
async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    let pool = connect(&connection_options(settings))
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied.");
    Ok(())
}

/// Picks the results source: a fixture file when given, otherwise the database.
fn open_source(args: &SourceArgs, settings: &Settings) -> anyhow::Result<Arc<dyn ResultsSource>> {
    match &args.fixture {
        Some(path) => {
            let source = InMemorySource::from_json_file(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            Ok(Arc::new(source))
        }
        None => {
            let pool = connect_lazy(&connection_options(settings))
                .context("Failed to configure the database connection")?;
            Ok(Arc::new(DbRepository::new(pool)))
        }
    }
}

fn connection_options(settings: &Settings) -> ConnectionOptions {
    ConnectionOptions {
        max_connections: settings.database.max_connections,
        acquire_timeout: settings.database.acquire_timeout(),
    }
}

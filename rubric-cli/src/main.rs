//! rubric CLI - survey score and feedback backend
//!
//! - `rubric serve`: run the HTTP API (PostgreSQL, or in-memory with `--ephemeral`)
//! - `rubric init-db`: create the survey tables and exit

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod env;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "rubric",
    author,
    version,
    about = "Persistence backend for survey scores and reader feedback"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// TOML config file (default: ~/.rubric/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the survey tables if they do not exist
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Before tracing so RUST_LOG from a .env file applies
    let env_files = env::load_dotenv();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    for path in &env_files {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config_path).await?,
        Commands::InitDb(args) => commands::run_init_db(args, config_path).await?,
    }
    Ok(())
}

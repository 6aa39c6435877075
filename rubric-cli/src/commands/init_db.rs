//! Create the survey tables and exit

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use rubric_server::db::create_pool;
use rubric_server::{PgStore, ServerConfig, SurveyStore};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (overrides config file and DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Ensure `users`, `user_scores` and `feedbacks` exist
pub async fn run_init_db(args: InitDbArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = ServerConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }

    let pool = create_pool(&config.database_url, 1)
        .await
        .context("Failed to connect to database")?;

    let store = PgStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("Failed to create survey tables")?;
    store.close().await;

    println!("Survey tables are ready");
    Ok(())
}

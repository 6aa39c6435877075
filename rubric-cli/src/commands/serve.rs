//! HTTP server command
//!
//! Resolves configuration, opens the store and runs the API until shutdown.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use rubric_server::db::create_pool;
use rubric_server::{run_server, MemoryStore, PgStore, ServerConfig, SurveyStore};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config file and DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allowed CORS origin; repeat or comma-separate for several (replaces configured list)
    #[arg(long = "cors-origin", value_name = "ORIGIN", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep data in process memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub ephemeral: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        if !self.cors_origins.is_empty() {
            config.cors_origins = self
                .cors_origins
                .iter()
                .flat_map(|raw| rubric_server::config::split_origins(raw))
                .collect();
        }
        if self.cors_permissive {
            config.cors_permissive = true;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = ServerConfig::load(config_path).context("Failed to load configuration")?;
    args.apply_to(&mut config);

    tracing::info!("Starting rubric server on {}", config.bind_addr);

    let store: Arc<dyn SurveyStore> = if args.ephemeral {
        tracing::warn!("Ephemeral mode: submissions are kept in memory and lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let pool = create_pool(&config.database_url, config.max_connections)
            .await
            .context("Failed to create database pool. Set DATABASE_URL, --database-url, or database_url in the config file")?;
        Arc::new(PgStore::new(pool))
    };

    // Run server (blocks until shutdown)
    run_server(store, &config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = ServeArgs {
            bind: Some("0.0.0.0:9999".parse().unwrap()),
            database_url: Some("postgres://elsewhere/db".into()),
            max_connections: Some(20),
            cors_origins: vec!["https://a.test,https://b.test/".into(), "http://c.test".into()],
            cors_permissive: false,
            ephemeral: false,
        };

        let mut config = ServerConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.bind_addr.port(), 9999);
        assert_eq!(config.database_url, "postgres://elsewhere/db");
        assert_eq!(config.max_connections, 20);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.test", "https://b.test", "http://c.test"]
        );
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = ServerConfig::default();
        ServeArgs::default().apply_to(&mut config);
        assert_eq!(config, ServerConfig::default());
    }
}

//! `.env` loading
//!
//! Priority order (highest to lowest):
//! 1. Variables already set in the environment
//! 2. Current directory .env
//! 3. ~/.rubric/.env
//!
//! dotenvy never overwrites an existing variable, so loading the current
//! directory first gives it precedence over the home file.

use std::path::PathBuf;

use tracing::debug;

/// Get the rubric config directory path (~/.rubric)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rubric"))
}

/// Load environment variables from .env files, returning where they came from.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded .env from current directory: {}", path.display());
            loaded_from.push(path);
        }
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Failed to load ./.env: {}", e),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.rubric: {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.rubric)");
    }

    loaded_from
}

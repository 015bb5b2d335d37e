//! Menu Admin Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: handlers behind the admin UI's invoke calls

pub mod config;
pub mod domain;
pub mod repository;
pub mod commands;

use config::AppConfig;
use repository::{init_db, DbState, MenuItemRepository, MenuRepository};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub menu_repo: MenuRepository,
    pub item_repo: MenuItemRepository,
    pub config: AppConfig,
}

impl AppState {
    /// Open the database and build the repositories
    pub async fn open(config: AppConfig) -> Result<Self, String> {
        let db_state = init_db(&config.db_path()).await.map_err(|e| e.to_string())?;
        Ok(Self {
            menu_repo: MenuRepository::new(db_state.connection()),
            item_repo: MenuItemRepository::new(db_state.connection()),
            db_state,
            config,
        })
    }
}

/// Install the rolling file logger for this configuration
pub fn init_logging(config: &AppConfig) -> Result<(), String> {
    rolling_logger::init_logger(config.log_dir.clone(), &config.app_name)
}

/// Logging first, then the database
pub async fn setup(config: AppConfig) -> Result<AppState, String> {
    if let Err(e) = init_logging(&config) {
        eprintln!("Logger init failed, continuing without file logs: {}", e);
    }
    log::info!("Menu admin starting, data dir {}", config.data_dir.display());

    match AppState::open(config).await {
        Ok(state) => {
            let _ = rolling_logger::info("DB init success");
            Ok(state)
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_logs_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_file: ":memory:".to_string(),
            ..AppConfig::new(dir.path())
        };
        let state = setup(config).await.unwrap();
        assert!(state.db_state.is_initialized().await);
        assert!(dir.path().join("logs").is_dir());
        assert!(rolling_logger::recent_lines(50).iter().any(|line| line.contains("DB init success")));
    }
}

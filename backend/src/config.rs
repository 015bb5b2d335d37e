//! Backend Configuration
//!
//! Where the database and log files live.

use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "MENU_ADMIN_DATA_DIR";

const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// File name inside `data_dir`, or ":memory:"
    pub db_file: String,
    pub log_dir: PathBuf,
    /// Log file prefix
    pub app_name: String,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            log_dir: data_dir.join("logs"),
            data_dir,
            db_file: "menu_admin.db".to_string(),
            app_name: "MenuAdmin".to_string(),
        }
    }

    /// `$MENU_ADMIN_DATA_DIR`, falling back to `./.menu-admin`
    pub fn from_env() -> Result<Self, String> {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Ok(Self::new(dir)),
            _ => {
                let cwd = std::env::current_dir().map_err(|e| format!("Failed to read current dir: {}", e))?;
                Ok(Self::new(cwd.join(".menu-admin")))
            }
        }
    }

    /// In-memory database, logs under the temp dir
    pub fn in_memory() -> Self {
        Self {
            db_file: IN_MEMORY.to_string(),
            ..Self::new(std::env::temp_dir().join("menu-admin"))
        }
    }

    pub fn db_path(&self) -> PathBuf {
        if self.db_file == IN_MEMORY {
            PathBuf::from(IN_MEMORY)
        } else {
            self.data_dir.join(&self.db_file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let config = AppConfig::new("/var/lib/menus");
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/menus/menu_admin.db"));
        assert_eq!(config.log_dir, PathBuf::from("/var/lib/menus/logs"));
        assert_eq!(AppConfig::in_memory().db_path(), PathBuf::from(":memory:"));
    }
}

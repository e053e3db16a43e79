//! File system operations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod config;

pub use config::{BackendConfiguration, BackendEntry, CONFIG_FILE, load_config, save_config};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TICKETSUM_CONFIG_DIR";

/// Base directory variable from the XDG base directory specification.
const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";

/// Directory name used under `$XDG_CONFIG_HOME`.
const XDG_DIR_NAME: &str = "ticketsum";

/// Directory name used under the home directory when XDG is not set.
const HOME_DIR_NAME: &str = ".ticketsum";

/// Holds all ticketsum paths derived from a base directory.
///
/// Tests build this from a temporary directory so they never touch the
/// user's real configuration.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use ticketsum::fs::ConfigPaths;
///
/// let paths = ConfigPaths::new(Path::new("/tmp/test"));
/// assert_eq!(paths.config_file(), Path::new("/tmp/test/config.json"));
/// assert_eq!(paths.logs_dir(), Path::new("/tmp/test/logs"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    base: PathBuf,
}

impl ConfigPaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
        }
    }

    /// Resolves the configuration directory from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set and the home directory
    /// cannot be determined.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Resolves the configuration directory from `lookup` and `home`.
    ///
    /// Order: `$TICKETSUM_CONFIG_DIR`, `$XDG_CONFIG_HOME/ticketsum`,
    /// `<home>/.ticketsum`. Empty variables count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set and `home` is `None`.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(dir) = non_empty(CONFIG_DIR_ENV) {
            return Ok(Self::new(Path::new(&dir)));
        }
        if let Some(xdg) = non_empty(XDG_CONFIG_HOME) {
            return Ok(Self::new(&Path::new(&xdg).join(XDG_DIR_NAME)));
        }
        let home = home.context("Failed to determine home directory")?;
        Ok(Self::new(&home.join(HOME_DIR_NAME)))
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the configuration file path.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.base.join(CONFIG_FILE)
    }

    /// Returns the log directory path.
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }

    /// Ensures the configuration directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base)
            .with_context(|| format!("Failed to create directory: {}", self.base.display()))
    }

    /// Ensures the log directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_logs_dir(&self) -> Result<()> {
        let dir = self.logs_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))
    }

    /// Loads the backend configuration (defaults if no file exists).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_config(&self) -> Result<BackendConfiguration> {
        load_config(&self.config_file())
    }

    /// Saves the backend configuration, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_config(&self, config: &BackendConfiguration) -> Result<()> {
        self.ensure_config_dir()?;
        save_config(&self.config_file(), config)
    }
}

//! Backend configuration persistence.
//!
//! The configuration is stored as pretty-printed JSON keyed by backend
//! identifier. Loading never fails for a missing file: built-in defaults are
//! returned instead, and a loaded file is back-filled with any default entry
//! it lacks.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{ProviderFamily, WireDialect, self_hosted};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.json";

/// Settings for one configured backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendEntry {
    pub provider: ProviderFamily,
    #[serde(default)]
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Only meaningful for self-hosted entries.
    #[serde(default)]
    pub dialect: WireDialect,
}

impl BackendEntry {
    /// Creates an entry with the family's default model and nothing else set.
    #[must_use]
    pub fn new(provider: ProviderFamily) -> Self {
        Self {
            provider,
            model_name: provider.default_model().to_string(),
            api_key: None,
            api_base_url: None,
            dialect: WireDialect::Auto,
        }
    }

    /// Current value of the credential-or-address field for this family.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        let value = if self.provider.uses_api_key() {
            self.api_key.as_deref()
        } else {
            self.api_base_url.as_deref()
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Returns true when the entry has what its family needs to make a request.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.credential().is_some()
    }
}

/// All configured backends plus the active selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfiguration {
    /// Identifier of the active entry; empty when none was chosen yet.
    #[serde(default)]
    pub active_backend: String,
    #[serde(default)]
    pub backends: BTreeMap<String, BackendEntry>,
}

impl Default for BackendConfiguration {
    fn default() -> Self {
        let mut ollama = BackendEntry::new(ProviderFamily::SelfHosted);
        ollama.api_base_url = Some(self_hosted::DEFAULT_BASE_URL.to_string());

        let backends = BTreeMap::from([
            ("anthropic".to_string(), BackendEntry::new(ProviderFamily::Anthropic)),
            ("ollama".to_string(), ollama),
            ("openai".to_string(), BackendEntry::new(ProviderFamily::OpenAi)),
        ]);

        Self {
            active_backend: String::new(),
            backends,
        }
    }
}

impl BackendConfiguration {
    /// Adds every default entry that is missing. Existing entries are untouched.
    pub fn backfill_defaults(&mut self) {
        for (id, entry) in Self::default().backends {
            self.backends.entry(id).or_insert(entry);
        }
    }

    /// Backend identifiers in display order.
    #[must_use]
    pub fn backend_ids(&self) -> Vec<&str> {
        self.backends.keys().map(String::as_str).collect()
    }

    /// Returns the active entry, if one is selected and exists.
    #[must_use]
    pub fn active_entry(&self) -> Option<&BackendEntry> {
        self.backends.get(&self.active_backend)
    }

    /// Mutable access to the active entry.
    pub fn active_entry_mut(&mut self) -> Option<&mut BackendEntry> {
        self.backends.get_mut(&self.active_backend)
    }

    /// Returns true when an existing entry is marked active.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.active_entry().is_some()
    }
}

/// Loads the configuration from `path`.
///
/// Returns defaults if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<BackendConfiguration> {
    if !path.exists() {
        return Ok(BackendConfiguration::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: BackendConfiguration = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config.backfill_defaults();
    Ok(config)
}

/// Saves the configuration to `path`, readable only by the owner on Unix.
///
/// The parent directory must exist (caller should ensure this).
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_config(path: &Path, config: &BackendConfiguration) -> Result<()> {
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    restrict_permissions(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_have_three_families_and_no_active() {
        let config = BackendConfiguration::default();
        assert!(config.active_backend.is_empty());
        assert!(!config.has_active());
        assert_eq!(config.backend_ids(), vec!["anthropic", "ollama", "openai"]);
        assert_eq!(
            config.backends["ollama"].api_base_url.as_deref(),
            Some("http://localhost:11434")
        );
        assert_eq!(config.backends["openai"].model_name, "gpt-3.5-turbo");
    }

    #[test]
    fn default_ollama_is_complete_but_hosted_are_not() {
        let config = BackendConfiguration::default();
        assert!(config.backends["ollama"].is_complete());
        assert!(!config.backends["openai"].is_complete());
        assert!(!config.backends["anthropic"].is_complete());
    }

    #[test]
    fn blank_credential_is_incomplete() {
        let mut entry = BackendEntry::new(ProviderFamily::OpenAi);
        entry.api_key = Some("   ".to_string());
        assert!(!entry.is_complete());
    }

    #[test]
    fn load_missing_file_returns_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let config = load_config(&dir.path().join(CONFIG_FILE))?;
        assert_eq!(config, BackendConfiguration::default());
        Ok(())
    }

    #[test]
    fn save_then_load_preserves_entries() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);

        let mut config = BackendConfiguration::default();
        config.active_backend = "openai".to_string();
        if let Some(entry) = config.active_entry_mut() {
            entry.api_key = Some("sk-1".to_string());
            entry.model_name = "gpt-4o".to_string();
        }
        save_config(&path, &config)?;

        let loaded = load_config(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn load_backfills_missing_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{"active_backend":"work","backends":{"work":{"provider":"openai","model_name":"gpt-4o","api_key":"sk"}}}"#,
        )?;

        let config = load_config(&path)?;
        assert_eq!(config.active_backend, "work");
        assert_eq!(
            config.backend_ids(),
            vec!["anthropic", "ollama", "openai", "work"]
        );
        assert_eq!(config.backends["work"].dialect, WireDialect::Auto);
        Ok(())
    }

    #[test]
    fn backfill_does_not_overwrite_existing_entry() {
        let mut config = BackendConfiguration::default();
        if let Some(entry) = config.backends.get_mut("ollama") {
            entry.model_name = "mistral".to_string();
        }
        config.backfill_defaults();
        assert_eq!(config.backends["ollama"].model_name, "mistral");
    }

    #[test]
    fn corrupt_file_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{not json")?;
        assert!(load_config(&path).is_err());
        Ok(())
    }

    #[test]
    fn absent_optional_fields_are_not_serialized() -> Result<()> {
        let json = serde_json::to_string(&BackendEntry::new(ProviderFamily::Anthropic))?;
        assert!(!json.contains("api_key"));
        assert!(!json.contains("api_base_url"));
        assert!(json.contains("\"provider\":\"claude\""));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        save_config(&path, &BackendConfiguration::default())?;
        let mode = std::fs::metadata(&path)?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }
}

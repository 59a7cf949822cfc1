//! Client configuration
//!
//! Loaded from an optional TOML file, then overridden by environment:
//!
//! ```toml
//! [enclave]
//! url = "http://localhost:7101"
//!
//! [contract]
//! save_file = "integer-key.pdo"
//!
//! [logging]
//! profile = "production"
//! ```

use crate::errors::{IntKeyError, Result};
use crate::logging_facility::Profile;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Overrides `enclave.url`
pub const ENV_ENCLAVE_URL: &str = "INTKEY_ENCLAVE_URL";
/// Overrides `contract.save_file`
pub const ENV_SAVE_FILE: &str = "INTKEY_SAVE_FILE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub enclave: EnclaveConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Enclave service used when a command gives no `--enclave`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnclaveConfig {
    pub url: Option<String>,
}

/// Contract state file used when a command gives no `--save-file`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    pub save_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Option<Profile>,
}

impl ClientConfig {
    /// Parse configuration text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| IntKeyError::Config {
            reason: e.to_string(),
        })
    }

    /// Read a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| IntKeyError::Config {
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from an optional file and apply process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply overrides from a variable source
    pub fn with_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_ENCLAVE_URL).filter(|v| !v.is_empty()) {
            self.enclave.url = Some(url);
        }
        if let Some(file) = var(ENV_SAVE_FILE).filter(|v| !v.is_empty()) {
            self.contract.save_file = Some(PathBuf::from(file));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let cfg = ClientConfig::from_toml_str(
            r#"
            [enclave]
            url = "http://localhost:7101"

            [contract]
            save_file = "ikey.pdo"

            [logging]
            profile = "production"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.enclave.url.as_deref(), Some("http://localhost:7101"));
        assert_eq!(cfg.contract.save_file, Some(PathBuf::from("ikey.pdo")));
        assert_eq!(cfg.logging.profile, Some(Profile::Production));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ClientConfig::from_toml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ClientConfig::from_toml_str("[enclave]\nport = 1\n").unwrap_err();
        assert!(matches!(err, IntKeyError::Config { .. }));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let cfg = ClientConfig::from_toml_str("[enclave]\nurl = \"http://file\"\n")
            .unwrap()
            .with_overrides(|name| match name {
                ENV_ENCLAVE_URL => Some("http://env".to_string()),
                ENV_SAVE_FILE => Some(String::new()),
                _ => None,
            });

        assert_eq!(cfg.enclave.url.as_deref(), Some("http://env"));
        assert_eq!(cfg.contract.save_file, None);
    }
}

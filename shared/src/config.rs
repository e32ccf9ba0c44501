use serde::{Deserialize, Serialize};
use thiserror::Error;

// ===== CONFIG TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExplorerConfig {
    pub app: AppSection,
    pub api: ApiSection,
    pub ui: UiSection,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid explorer config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported config version '{0}'")]
    UnsupportedVersion(String),
}

impl ExplorerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ExplorerConfig = toml::from_str(content)?;
        if !config.app.is_supported_version() {
            return Err(ConfigError::UnsupportedVersion(config.app.version));
        }
        Ok(config)
    }
}

// Version field kept for config migrations
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSection {
    pub version: String,
}

impl AppSection {
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn is_supported_version(&self) -> bool {
        self.version == Self::CURRENT_VERSION
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSection {
    /// Base URL of the files router, e.g. `https://api.example.com/files`
    pub base_url: String,
    /// Local storage key holding the bearer token
    pub token_storage_key: String,
    pub request_timeout_ms: u32,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "/api/files".to_string(),
            token_storage_key: "token".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UiSection {
    pub toast_dismiss_ms: u32,
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub log_level: String,
    /// Root label when no project is selected
    pub root_label: String,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            toast_dismiss_ms: 3000,
            log_level: "info".to_string(),
            root_label: "My Files".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(ExplorerConfig::from_toml_str("").unwrap(), ExplorerConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ExplorerConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://api.example.com/files"

            [ui]
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/files");
        assert_eq!(config.api.request_timeout_ms, 30_000);
        assert_eq!(config.ui.log_level, "debug");
        assert_eq!(config.ui.toast_dismiss_ms, 3000);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let error = ExplorerConfig::from_toml_str("[app]\nversion = \"0.1.0\"").unwrap_err();
        assert!(matches!(error, ConfigError::UnsupportedVersion(version) if version == "0.1.0"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            ExplorerConfig::from_toml_str("[api\nbase_url = 1"),
            Err(ConfigError::Parse(_))
        ));
    }
}

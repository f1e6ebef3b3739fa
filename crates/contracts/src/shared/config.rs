use serde::Deserialize;
use thiserror::Error;

use crate::shared::pagination::DEFAULT_WINDOW_RADIUS;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub modal: ModalConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin, e.g. `http://127.0.0.1:8000`. Empty means same origin as the page.
    pub base_url: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub window_radius: usize,
    pub search_debounce_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Delay before focusing the first input, long enough to outlast the open transition.
    pub focus_delay_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            window_radius: DEFAULT_WINDOW_RADIUS,
            search_debounce_ms: 300,
        }
    }
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self { focus_delay_ms: 150 }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
csrf_cookie = "csrftoken"
csrf_header = "X-CSRFToken"

[list]
page_size = 10
page_size_options = [10, 25, 50, 100]
window_radius = 2
search_debounce_ms = 300

[modal]
focus_delay_ms = 150
"#;

impl AppConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Uses `override_toml` when given, the embedded default otherwise.
    pub fn load(override_toml: Option<&str>) -> Result<Self, ConfigError> {
        match override_toml {
            Some(contents) if !contents.trim().is_empty() => Self::from_toml(contents),
            _ => Self::from_toml(DEFAULT_CONFIG),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list.page_size == 0 {
            return Err(ConfigError::Invalid("list.page_size must be > 0".into()));
        }
        if self.list.page_size_options.iter().any(|&size| size == 0) {
            return Err(ConfigError::Invalid("list.page_size_options must be > 0".into()));
        }
        if self.list.window_radius == 0 {
            return Err(ConfigError::Invalid("list.window_radius must be > 0".into()));
        }
        if self.api.csrf_header.trim().is_empty() {
            return Err(ConfigError::Invalid("api.csrf_header must not be empty".into()));
        }
        Ok(())
    }

    /// Page size options with the configured default always present, ascending.
    pub fn page_size_options(&self) -> Vec<usize> {
        let mut options = self.list.page_size_options.clone();
        if !options.contains(&self.list.page_size) {
            options.push(self.list.page_size);
        }
        options.sort_unstable();
        options.dedup();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.csrf_header, "X-CSRFToken");
        assert_eq!(config.list.window_radius, 2);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = AppConfig::load(Some("[api]\nbase_url = \"http://127.0.0.1:8000\"\n")).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.csrf_cookie, "csrftoken");
        assert_eq!(config.list.page_size, 10);
    }

    #[test]
    fn empty_override_falls_back_to_default() {
        assert_eq!(AppConfig::load(Some("  ")).unwrap(), AppConfig::default());
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = AppConfig::from_toml("[list]\npage_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn broken_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[list\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn page_size_options_include_default() {
        let mut config = AppConfig::default();
        config.list.page_size = 20;
        assert_eq!(config.page_size_options(), vec![10, 20, 25, 50, 100]);
    }
}

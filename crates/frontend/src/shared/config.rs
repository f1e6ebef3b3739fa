//! Runtime configuration, parsed once from the embedded TOML.

use contracts::shared::config::AppConfig;
use once_cell::sync::Lazy;

static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    match AppConfig::load(option_env!("ERP_CONFIG")) {
        Ok(config) => config,
        Err(e) => {
            log::error!("ERP_CONFIG rejected, using defaults: {}", e);
            AppConfig::default()
        }
    }
});

pub fn config() -> &'static AppConfig {
    &CONFIG
}

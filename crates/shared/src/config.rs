//! Application configuration management.

use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Transaction coordinator configuration.
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
    /// Ledger history read configuration.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Transaction coordinator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinatorConfig {
    /// Maximum time to wait for the full ordered lock acquisition, in
    /// milliseconds. A transaction that cannot acquire all of its product
    /// locks within this bound aborts with a Busy error.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,
}

fn default_lock_wait_ms() -> u64 {
    5000
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            lock_wait_ms: default_lock_wait_ms(),
        }
    }
}

/// Ledger history read configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Default page size for movement history queries.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    20
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Layering: `config/default.toml`, then `config/{RUN_MODE}.toml`,
    /// then `KARDEX__` environment variables (e.g.
    /// `KARDEX__COORDINATOR__LOCK_WAIT_MS=250`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KARDEX").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coordinator: CoordinatorConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.coordinator.lock_wait_ms, 5000);
        assert_eq!(cfg.history.per_page, 20);
    }

    #[test]
    fn test_deserialize_partial() {
        // Missing sections fall back to defaults.
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.coordinator.lock_wait_ms, 5000);

        let cfg: EngineConfig =
            serde_json::from_str(r#"{"coordinator": {"lock_wait_ms": 250}}"#).unwrap();
        assert_eq!(cfg.coordinator.lock_wait_ms, 250);
        assert_eq!(cfg.history.per_page, 20);
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::solver::RouteOptions;
use crate::textgen::TextServiceConfig;

/// Top-level configuration. Every section and field has a default, so an
/// empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub route: RouteOptions,
    pub text_service: TextServiceConfig,
}

impl PlannerConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let toml_str = std::fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.route.validate()?;
        if self.text_service.timeout_secs == 0 {
            return Err(ConfigError::Invalid("text_service.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_example_config() {
        let toml_str = r#"
[route]
visit_minutes_per_stop = 15
total_break_minutes = 60
average_speed_kmh = 30
total_workday_minutes = 480

[text_service]
base_url = "http://localhost:8080"
model = "gemini-2.5-pro"
timeout_secs = 10
api_key_env = "TEXT_API_KEY"
"#;
        let config = PlannerConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.route.visit_minutes_per_stop, 15.0);
        assert_eq!(config.route.available_minutes(), 420.0);
        assert_eq!(config.text_service.model, "gemini-2.5-pro");
        assert_eq!(config.text_service.api_key_env, "TEXT_API_KEY");
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.route.total_workday_minutes, 540.0);
        assert_eq!(config.route.total_break_minutes, 75.0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = PlannerConfig::from_toml_str("[route]\naverage_speed_kmh = 40.0\n").unwrap();
        assert_eq!(config.route.average_speed_kmh, 40.0);
        assert_eq!(config.route.visit_minutes_per_stop, 20.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = PlannerConfig::from_toml_str("[route]\naverage_speed_kmh = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PlannerConfig::from_toml_str("[route]\ntotal_break_minutes = 600\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PlannerConfig::from_toml_str("[text_service]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = PlannerConfig::from_toml_str("[route\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_roundtrip_config() {
        let config = PlannerConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = PlannerConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}

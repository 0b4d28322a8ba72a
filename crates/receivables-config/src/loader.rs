//! Loading configuration from TOML and JSON.

use std::path::Path;

use crate::error::{ConfigError, ConfigResult, Validate};
use crate::schedule::ScheduleConfig;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl ScheduleConfig {
    /// Parses a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parses a document in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> ConfigResult<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml_str(content),
            ConfigFormat::Json => Self::from_json_str(content),
        }
    }

    /// Loads and validates a configuration file, choosing the format by
    /// extension.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&content, format)?;
        config.validate_or_error()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to a pretty JSON document.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receivables_schedule::FeePolicy;
    use std::path::PathBuf;

    #[test]
    fn test_empty_documents_are_defaults() {
        assert_eq!(ScheduleConfig::from_toml_str("").unwrap(), ScheduleConfig::default());
        assert_eq!(ScheduleConfig::from_json_str("{}").unwrap(), ScheduleConfig::default());
    }

    #[test]
    fn test_toml_document() {
        let config = ScheduleConfig::from_toml_str(
            r#"
            fee_policy = "linear"
            include_transaction_date = false
            max_rollover_days = 30
            holidays_file = "holidays.json"
            holidays = ["2024-12-25"]
            "#,
        )
        .unwrap();
        assert_eq!(config.fee_policy, FeePolicy::Linear);
        assert!(!config.include_transaction_date);
        assert_eq!(config.max_rollover_days, 30);
        assert_eq!(config.holidays_file, Some(PathBuf::from("holidays.json")));
        assert_eq!(config.holidays, vec!["2024-12-25".to_string()]);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = ScheduleConfig::from_toml_str(r#"fee_policy = "progressive""#).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));

        let err = ScheduleConfig::from_json_str(r#"{"fee_policy": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/receivables.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(Path::new("config.yaml")).is_err());
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = ScheduleConfig::default().with_fee_policy(FeePolicy::Linear);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("fee_policy = \"linear\""));
        assert_eq!(ScheduleConfig::from_toml_str(&text).unwrap(), config);
    }
}

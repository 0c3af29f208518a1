//! Application settings persisted as JSON in the data directory.

use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    core::utils::{app_data_dir, config_dir_in, config_file_in, ensure_dir},
    currency::{CurrencyFormat, DigitGrouping},
    ledger::Context,
};

const TMP_SUFFIX: &str = "tmp";

/// Environment variables consulted for the advice credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["RUPEEWISE_API_KEY", "API_KEY"];

pub const DEFAULT_ADVICE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ADVICE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_ADVICE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("invalid value for `{key}`: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdviceSettings {
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_ADVICE_MODEL.into(),
            endpoint: DEFAULT_ADVICE_ENDPOINT.into(),
            timeout_secs: DEFAULT_ADVICE_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    pub table_layout: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            export_dir: None,
            table_layout: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub active_context: Context,
    pub currency: CurrencyFormat,
    pub advice: AdviceSettings,
    pub report: ReportSettings,
}

impl Config {
    /// Setting names accepted by [`Config::set`].
    pub const KEYS: [&'static str; 9] = [
        "context",
        "currency.symbol",
        "currency.grouping",
        "advice.model",
        "advice.endpoint",
        "advice.timeout",
        "advice.api_key",
        "report.dir",
        "report.tables",
    ];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        match key {
            "context" => {
                self.active_context = value
                    .parse()
                    .map_err(|_| invalid("expected home or school"))?;
            }
            "currency.symbol" => self.currency.symbol = value.to_string(),
            "currency.grouping" => {
                self.currency.grouping = match value.to_ascii_lowercase().as_str() {
                    "indian" => DigitGrouping::Indian,
                    "western" => DigitGrouping::Western,
                    _ => return Err(invalid("expected indian or western")),
                }
            }
            "advice.model" => self.advice.model = value.to_string(),
            "advice.endpoint" => self.advice.endpoint = value.trim_end_matches('/').to_string(),
            "advice.timeout" => {
                self.advice.timeout_secs = value
                    .parse()
                    .map_err(|_| invalid("expected a number of seconds"))?;
            }
            "advice.api_key" => {
                self.advice.api_key = Some(value.trim().to_string()).filter(|key| !key.is_empty());
            }
            "report.dir" => {
                self.report.export_dir = Some(PathBuf::from(value)).filter(|_| !value.is_empty());
            }
            "report.tables" => {
                self.report.table_layout = value
                    .parse()
                    .map_err(|_| invalid("expected true or false"))?;
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Advice credential: environment first, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env::var(name).ok())
            .chain(self.advice.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&config_dir_in(&base))?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.advice.model, DEFAULT_ADVICE_MODEL);
        assert!(config.report.table_layout);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("context", "school").unwrap();
        config.set("advice.model", "gemini-2.0-flash").unwrap();
        config.set("report.tables", "false").unwrap();
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"active_context":"School"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.active_context, Context::School);
        assert_eq!(config.advice, AdviceSettings::default());
    }

    #[test]
    fn currency_without_symbol_still_loads() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(
            manager.path(),
            r#"{"active_context":"School","currency":{"grouping":"western"}}"#,
        )
        .unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.active_context, Context::School);
        assert_eq!(config.currency.symbol, crate::currency::RUPEE_SYMBOL);
        assert_eq!(config.currency.grouping, DigitGrouping::Western);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("advice.timeout", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("context", "office"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn blank_api_key_clears_setting() {
        let mut config = Config::default();
        config.set("advice.api_key", "secret").unwrap();
        assert_eq!(config.advice.api_key.as_deref(), Some("secret"));
        config.set("advice.api_key", "  ").unwrap();
        assert_eq!(config.advice.api_key, None);
    }
}

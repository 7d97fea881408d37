use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config as config_rs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::caching::CachingSqlObfuscator;
use crate::dialect::SqlDialect;
use crate::metrics::Metrics;
use crate::obfuscator::{
    raw_sql_obfuscator, suppressing_sql_obfuscator, DefaultSqlObfuscator, SqlObfuscator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObfuscationMode {
    #[default]
    Obfuscated,
    Raw,
    Off,
}

impl fmt::Display for ObfuscationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObfuscationMode::Obfuscated => write!(f, "obfuscated"),
            ObfuscationMode::Raw => write!(f, "raw"),
            ObfuscationMode::Off => write!(f, "off"),
        }
    }
}

impl FromStr for ObfuscationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "obfuscated" => Ok(ObfuscationMode::Obfuscated),
            "raw" => Ok(ObfuscationMode::Raw),
            "off" => Ok(ObfuscationMode::Off),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscatorConfig {
    pub mode: ObfuscationMode,
    pub dialect: SqlDialect,
    pub cache: bool,
}

impl Default for ObfuscatorConfig {
    fn default() -> Self {
        Self {
            mode: ObfuscationMode::Obfuscated,
            dialect: SqlDialect::Any,
            cache: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
    #[error("invalid obfuscation mode: {0:?}")]
    InvalidMode(String),
    #[error("invalid sql dialect: {0:?}")]
    InvalidDialect(String),
}

/// Load obfuscator settings.
///
/// Later sources win: built-in defaults, then `path` if given, then
/// `SQL_OBFUSCATOR_*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<ObfuscatorConfig, ConfigError> {
    let defaults = ObfuscatorConfig::default();
    let mut builder = config_rs::Config::builder()
        .set_default("mode", defaults.mode.to_string())?
        .set_default("dialect", defaults.dialect.to_string())?
        .set_default("cache", defaults.cache)?;

    if let Some(path) = path {
        builder = builder.add_source(config_rs::File::from(path));
    }
    builder = builder.add_source(config_rs::Environment::with_prefix("SQL_OBFUSCATOR"));

    let cfg = builder.build()?;

    // Parsed by hand so a bad token names itself instead of a serde variant list.
    let loaded = ObfuscatorConfig {
        mode: cfg.get_string("mode")?.parse()?,
        dialect: cfg.get_string("dialect")?.parse()?,
        cache: cfg.get_bool("cache")?,
    };
    info!(
        mode = %loaded.mode,
        dialect = %loaded.dialect,
        cache = loaded.cache,
        "sql obfuscation configured"
    );
    Ok(loaded)
}

pub fn build_obfuscator(cfg: &ObfuscatorConfig, metrics: Option<Metrics>) -> Box<dyn SqlObfuscator> {
    match cfg.mode {
        ObfuscationMode::Raw => Box::new(raw_sql_obfuscator()),
        ObfuscationMode::Off => Box::new(suppressing_sql_obfuscator()),
        ObfuscationMode::Obfuscated => {
            let mut obfuscator = DefaultSqlObfuscator::with_dialect(cfg.dialect);
            if let Some(metrics) = metrics.clone() {
                obfuscator = obfuscator.with_metrics(metrics);
            }
            if !cfg.cache {
                return Box::new(obfuscator);
            }
            let mut caching = CachingSqlObfuscator::wrap(obfuscator);
            if let Some(metrics) = metrics {
                caching = caching.with_metrics(metrics);
            }
            Box::new(caching)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tokens_are_case_sensitive() {
        assert_eq!("obfuscated".parse::<ObfuscationMode>().unwrap(), ObfuscationMode::Obfuscated);
        assert_eq!("raw".parse::<ObfuscationMode>().unwrap(), ObfuscationMode::Raw);
        assert_eq!("off".parse::<ObfuscationMode>().unwrap(), ObfuscationMode::Off);
        assert!(matches!(
            "Raw".parse::<ObfuscationMode>(),
            Err(ConfigError::InvalidMode(token)) if token == "Raw"
        ));
    }

    #[test]
    fn build_respects_mode_and_cache_flag() {
        let masked = build_obfuscator(&ObfuscatorConfig::default(), None);
        assert!(masked.is_obfuscating());
        assert_eq!(masked.obfuscate_sql("a = 'x'").as_deref(), Some("a = ?"));

        let uncached = ObfuscatorConfig {
            cache: false,
            ..ObfuscatorConfig::default()
        };
        assert_eq!(build_obfuscator(&uncached, None).obfuscate_sql("a = 2").as_deref(), Some("a = ?"));

        let off = ObfuscatorConfig {
            mode: ObfuscationMode::Off,
            ..ObfuscatorConfig::default()
        };
        assert_eq!(build_obfuscator(&off, None).obfuscate_sql("a = 2"), None);
    }
}

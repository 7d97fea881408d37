//! SQL obfuscation: masks literal values in statement text before it is logged

pub mod caching;
pub mod config;
pub mod dialect;
pub mod errors;
pub mod guard;
pub mod logger;
pub mod matcher;
pub mod metrics;
pub mod obfuscator;
pub mod patterns;

// Re-exports
pub use caching::CachingSqlObfuscator;
pub use config::{build_obfuscator, load_config, ConfigError, ObfuscationMode, ObfuscatorConfig};
pub use dialect::SqlDialect;
pub use errors::AppError;
pub use guard::UnmatchedDelimiterGuard;
pub use matcher::{CombinedPattern, LiteralSpan, PLACEHOLDER};
pub use metrics::Metrics;
pub use obfuscator::{
    caching_sql_obfuscator, default_sql_obfuscator, raw_sql_obfuscator, sql_obfuscator_for_mode,
    suppressing_sql_obfuscator, DefaultSqlObfuscator, ObfuscationError, RawSqlObfuscator,
    SqlObfuscator, SuppressingSqlObfuscator,
};
pub use patterns::LiteralKind;

use prometheus::Registry;
use std::path::Path;

/// Load configuration and build the matching obfuscator.
pub fn load_obfuscator(
    path: Option<&Path>,
    registry: Option<&Registry>,
) -> Result<Box<dyn SqlObfuscator>, AppError> {
    let cfg = load_config(path)?;
    let metrics = registry.map(Metrics::new).transpose()?;
    Ok(build_obfuscator(&cfg, metrics))
}

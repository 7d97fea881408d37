use crate::caching::CachingSqlObfuscator;
use crate::config::ObfuscationMode;
use crate::dialect::SqlDialect;
use crate::guard::UnmatchedDelimiterGuard;
use crate::matcher::{CombinedPattern, PLACEHOLDER};
use crate::metrics::Metrics;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ObfuscationError {
    #[error("caching requires an obfuscating delegate")]
    NotObfuscating,
}

pub trait SqlObfuscator: Send + Sync {
    /// `None` means the statement must not be reported at all.
    fn obfuscate_sql(&self, sql: &str) -> Option<String>;

    fn obfuscate_sql_opt(&self, sql: Option<&str>) -> Option<String> {
        sql.and_then(|sql| self.obfuscate_sql(sql))
    }

    fn is_obfuscating(&self) -> bool {
        false
    }
}

impl<T: SqlObfuscator + ?Sized> SqlObfuscator for Box<T> {
    fn obfuscate_sql(&self, sql: &str) -> Option<String> {
        (**self).obfuscate_sql(sql)
    }

    fn is_obfuscating(&self) -> bool {
        (**self).is_obfuscating()
    }
}

impl<T: SqlObfuscator + ?Sized> SqlObfuscator for Arc<T> {
    fn obfuscate_sql(&self, sql: &str) -> Option<String> {
        (**self).obfuscate_sql(sql)
    }

    fn is_obfuscating(&self) -> bool {
        (**self).is_obfuscating()
    }
}

#[derive(Clone)]
pub struct DefaultSqlObfuscator {
    dialect: SqlDialect,
    pattern: CombinedPattern,
    guard: UnmatchedDelimiterGuard,
    metrics: Option<Metrics>,
}

impl DefaultSqlObfuscator {
    pub fn new() -> Self {
        Self::with_dialect(SqlDialect::Any)
    }

    pub fn with_dialect(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            pattern: dialect.combined_pattern(),
            guard: dialect.guard(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }
}

impl Default for DefaultSqlObfuscator {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlObfuscator for DefaultSqlObfuscator {
    fn obfuscate_sql(&self, sql: &str) -> Option<String> {
        if sql.is_empty() {
            return Some(String::new());
        }

        let masked = self.pattern.mask(sql);
        if self.guard.has_residue(&masked) {
            debug!(
                dialect = %self.dialect,
                statement_len = sql.len(),
                "unmatched delimiter after masking, replacing whole statement"
            );
            if let Some(metrics) = &self.metrics {
                metrics.fallbacks.inc();
            }
            return Some(PLACEHOLDER.to_string());
        }
        Some(masked.into_owned())
    }

    fn is_obfuscating(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RawSqlObfuscator;

impl SqlObfuscator for RawSqlObfuscator {
    fn obfuscate_sql(&self, sql: &str) -> Option<String> {
        Some(sql.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SuppressingSqlObfuscator;

impl SqlObfuscator for SuppressingSqlObfuscator {
    fn obfuscate_sql(&self, _sql: &str) -> Option<String> {
        None
    }
}

pub fn default_sql_obfuscator() -> DefaultSqlObfuscator {
    DefaultSqlObfuscator::new()
}

pub fn raw_sql_obfuscator() -> RawSqlObfuscator {
    RawSqlObfuscator
}

pub fn suppressing_sql_obfuscator() -> SuppressingSqlObfuscator {
    SuppressingSqlObfuscator
}

pub fn sql_obfuscator_for_mode(mode: ObfuscationMode) -> Box<dyn SqlObfuscator> {
    match mode {
        ObfuscationMode::Obfuscated => Box::new(default_sql_obfuscator()),
        ObfuscationMode::Raw => Box::new(raw_sql_obfuscator()),
        ObfuscationMode::Off => Box::new(suppressing_sql_obfuscator()),
    }
}

pub fn caching_sql_obfuscator(obfuscator: Box<dyn SqlObfuscator>) -> Box<dyn SqlObfuscator> {
    if obfuscator.is_obfuscating() {
        Box::new(CachingSqlObfuscator::wrap(obfuscator))
    } else {
        obfuscator
    }
}

use crate::metrics::Metrics;
use crate::obfuscator::{ObfuscationError, SqlObfuscator};
use dashmap::DashMap;
use tracing::trace;

/// Caches obfuscation results keyed by the exact statement text.
///
/// Entries are never evicted, so memory grows with the number of distinct
/// statements seen. Safe to share between threads; two threads missing on the
/// same statement may both call the delegate and store the same result.
pub struct CachingSqlObfuscator<O> {
    delegate: O,
    cache: DashMap<String, Option<String>>,
    metrics: Option<Metrics>,
}

impl<O: SqlObfuscator> CachingSqlObfuscator<O> {
    pub fn new(delegate: O) -> Result<Self, ObfuscationError> {
        if !delegate.is_obfuscating() {
            return Err(ObfuscationError::NotObfuscating);
        }
        Ok(Self::wrap(delegate))
    }

    pub(crate) fn wrap(delegate: O) -> Self {
        Self {
            delegate,
            cache: DashMap::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn cached_statements(&self) -> usize {
        self.cache.len()
    }

    pub fn delegate(&self) -> &O {
        &self.delegate
    }
}

impl<O: SqlObfuscator> SqlObfuscator for CachingSqlObfuscator<O> {
    fn obfuscate_sql(&self, sql: &str) -> Option<String> {
        if let Some(cached) = self.cache.get(sql) {
            if let Some(metrics) = &self.metrics {
                metrics.cache_hits.inc();
            }
            return cached.value().clone();
        }

        trace!(statement_len = sql.len(), "obfuscation cache miss");
        if let Some(metrics) = &self.metrics {
            metrics.cache_misses.inc();
        }
        let obfuscated = self.delegate.obfuscate_sql(sql);
        self.cache.insert(sql.to_string(), obfuscated.clone());
        obfuscated
    }

    fn is_obfuscating(&self) -> bool {
        self.delegate.is_obfuscating()
    }
}

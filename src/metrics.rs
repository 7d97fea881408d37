use prometheus::{IntCounter, Registry};

#[derive(Clone)]
pub struct Metrics {
    pub fallbacks: IntCounter,
    pub cache_hits: IntCounter,
    pub cache_misses: IntCounter,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let fallbacks = IntCounter::new(
            "sql_obfuscation_fallbacks_total",
            "Statements replaced by a single placeholder after unmatched delimiters",
        )?;
        let cache_hits = IntCounter::new(
            "sql_obfuscation_cache_hits_total",
            "Statements served from the obfuscation cache",
        )?;
        let cache_misses = IntCounter::new(
            "sql_obfuscation_cache_misses_total",
            "Statements obfuscated on a cache miss",
        )?;

        registry.register(Box::new(fallbacks.clone()))?;
        registry.register(Box::new(cache_hits.clone()))?;
        registry.register(Box::new(cache_misses.clone()))?;

        Ok(Self {
            fallbacks,
            cache_hits,
            cache_misses,
        })
    }
}

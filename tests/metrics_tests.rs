use prometheus::Registry;
use sql_obfuscator::config::{build_obfuscator, ObfuscatorConfig};
use sql_obfuscator::metrics::Metrics;
use sql_obfuscator::SqlObfuscator;

#[test]
fn counts_cache_hits_misses_and_fallbacks() {
    let registry = Registry::new();
    let metrics = Metrics::new(&registry).unwrap();
    let obfuscator = build_obfuscator(&ObfuscatorConfig::default(), Some(metrics.clone()));

    obfuscator.obfuscate_sql("SELECT 1");
    obfuscator.obfuscate_sql("SELECT 1");
    obfuscator.obfuscate_sql("SELECT 'open");

    assert_eq!(metrics.cache_hits.get(), 1);
    assert_eq!(metrics.cache_misses.get(), 2);
    assert_eq!(metrics.fallbacks.get(), 1);
}

#[test]
fn uncached_obfuscator_counts_only_fallbacks() {
    let registry = Registry::new();
    let metrics = Metrics::new(&registry).unwrap();
    let cfg = ObfuscatorConfig {
        cache: false,
        ..ObfuscatorConfig::default()
    };
    let obfuscator = build_obfuscator(&cfg, Some(metrics.clone()));

    obfuscator.obfuscate_sql("SELECT \"open");
    obfuscator.obfuscate_sql("SELECT \"open");

    assert_eq!(metrics.fallbacks.get(), 2);
    assert_eq!(metrics.cache_hits.get(), 0);
    assert_eq!(metrics.cache_misses.get(), 0);
}

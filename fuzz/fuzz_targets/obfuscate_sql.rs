#![no_main]

use libfuzzer_sys::fuzz_target;
use sql_obfuscator::obfuscator::{default_sql_obfuscator, DefaultSqlObfuscator, SqlObfuscator};
use sql_obfuscator::{SqlDialect, UnmatchedDelimiterGuard};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, handling invalid UTF-8 gracefully
    let input = String::from_utf8_lossy(data);

    if input.len() > 100_000 {
        return;
    }

    let masked = default_sql_obfuscator()
        .obfuscate_sql(&input)
        .expect("default obfuscator always returns a statement");
    assert!(masked == "?" || !UnmatchedDelimiterGuard::default().has_residue(&masked));

    for dialect in [SqlDialect::Mysql, SqlDialect::Postgres, SqlDialect::Oracle] {
        let _ = DefaultSqlObfuscator::with_dialect(dialect).obfuscate_sql(&input);
    }
});

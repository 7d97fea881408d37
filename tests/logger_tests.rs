use sql_obfuscator::logger::init_logging;
use sql_obfuscator::obfuscator::{default_sql_obfuscator, SqlObfuscator};

#[test]
fn installs_subscriber_once() {
    assert!(init_logging().is_ok());
    assert!(init_logging().is_err());

    // Fallback logging must not break obfuscation.
    assert_eq!(default_sql_obfuscator().obfuscate_sql("SELECT 'x").as_deref(), Some("?"));
}

use crate::guard::{GuardDelimiters, UnmatchedDelimiterGuard};
use crate::matcher::CombinedPattern;
use crate::patterns::LiteralKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MYSQL_KINDS: [LiteralKind; 8] = [
    LiteralKind::SingleQuote,
    LiteralKind::DoubleQuote,
    LiteralKind::Comment,
    LiteralKind::MultilineComment,
    LiteralKind::Uuid,
    LiteralKind::Hex,
    LiteralKind::Boolean,
    LiteralKind::Number,
];

// Double quotes delimit identifiers in PostgreSQL.
const POSTGRES_KINDS: [LiteralKind; 8] = [
    LiteralKind::SingleQuote,
    LiteralKind::DollarQuote,
    LiteralKind::Comment,
    LiteralKind::MultilineComment,
    LiteralKind::Uuid,
    LiteralKind::Hex,
    LiteralKind::Boolean,
    LiteralKind::Number,
];

const ORACLE_KINDS: [LiteralKind; 8] = [
    LiteralKind::SingleQuote,
    LiteralKind::OracleQuote,
    LiteralKind::Comment,
    LiteralKind::MultilineComment,
    LiteralKind::Uuid,
    LiteralKind::Hex,
    LiteralKind::Boolean,
    LiteralKind::Number,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Any,
    Mysql,
    #[serde(alias = "postgresql")]
    Postgres,
    Oracle,
}

impl SqlDialect {
    pub fn combined_pattern(self) -> CombinedPattern {
        match self {
            SqlDialect::Any => CombinedPattern::new(&LiteralKind::ALL),
            SqlDialect::Mysql => CombinedPattern::new(&MYSQL_KINDS),
            SqlDialect::Postgres => CombinedPattern::new(&POSTGRES_KINDS),
            SqlDialect::Oracle => CombinedPattern::new(&ORACLE_KINDS),
        }
    }

    pub fn guard(self) -> UnmatchedDelimiterGuard {
        UnmatchedDelimiterGuard::new(match self {
            SqlDialect::Any => GuardDelimiters::All,
            SqlDialect::Mysql => GuardDelimiters::NoDollar,
            SqlDialect::Postgres => GuardDelimiters::NoDoubleQuote,
            SqlDialect::Oracle => GuardDelimiters::SingleQuoteAndComments,
        })
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::Any => write!(f, "any"),
            SqlDialect::Mysql => write!(f, "mysql"),
            SqlDialect::Postgres => write!(f, "postgres"),
            SqlDialect::Oracle => write!(f, "oracle"),
        }
    }
}

impl FromStr for SqlDialect {
    type Err = crate::config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(SqlDialect::Any),
            "mysql" => Ok(SqlDialect::Mysql),
            "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "oracle" => Ok(SqlDialect::Oracle),
            other => Err(crate::config::ConfigError::InvalidDialect(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_kinds_keep_library_order() {
        for dialect in [SqlDialect::Mysql, SqlDialect::Postgres, SqlDialect::Oracle] {
            let positions: Vec<usize> = dialect
                .combined_pattern()
                .kinds()
                .iter()
                .map(|kind| LiteralKind::ALL.iter().position(|k| k == kind).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{dialect} out of order");
        }
    }

    #[test]
    fn postgres_leaves_quoted_identifiers() {
        let masked = SqlDialect::Postgres
            .combined_pattern()
            .mask("SELECT \"Name\" FROM t WHERE body = $$x$$")
            .into_owned();
        assert_eq!(masked, "SELECT \"Name\" FROM t WHERE body = ?");
        assert!(!SqlDialect::Postgres.guard().has_residue(&masked));
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("postgresql".parse::<SqlDialect>().unwrap(), SqlDialect::Postgres);
        assert_eq!("any".parse::<SqlDialect>().unwrap(), SqlDialect::Any);
        assert!("MySQL".parse::<SqlDialect>().is_err());
        assert_eq!(SqlDialect::Oracle.to_string(), "oracle");
    }
}

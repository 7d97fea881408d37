use once_cell::sync::Lazy;
use regex::Regex;

static ALL_UNMATCHED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"'|"|/\*|\*/|\$"#).unwrap());

static SINGLE_DOUBLE_COMMENT_UNMATCHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'|"|/\*|\*/"#).unwrap());

// `$?` is a positional parameter whose number was already masked.
static SINGLE_COMMENT_DOLLAR_UNMATCHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'|/\*|\*/|\$(?:[^?]|$)").unwrap());

static SINGLE_COMMENT_UNMATCHED: Lazy<Regex> = Lazy::new(|| Regex::new(r"'|/\*|\*/").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDelimiters {
    All,
    NoDollar,
    NoDoubleQuote,
    SingleQuoteAndComments,
}

#[derive(Debug, Clone, Copy)]
pub struct UnmatchedDelimiterGuard {
    pattern: &'static Lazy<Regex>,
}

impl UnmatchedDelimiterGuard {
    pub fn new(delimiters: GuardDelimiters) -> Self {
        let pattern = match delimiters {
            GuardDelimiters::All => &ALL_UNMATCHED,
            GuardDelimiters::NoDollar => &SINGLE_DOUBLE_COMMENT_UNMATCHED,
            GuardDelimiters::NoDoubleQuote => &SINGLE_COMMENT_DOLLAR_UNMATCHED,
            GuardDelimiters::SingleQuoteAndComments => &SINGLE_COMMENT_UNMATCHED,
        };
        Self { pattern }
    }

    pub fn has_residue(&self, masked: &str) -> bool {
        self.pattern.is_match(masked)
    }
}

impl Default for UnmatchedDelimiterGuard {
    fn default() -> Self {
        Self::new(GuardDelimiters::All)
    }
}

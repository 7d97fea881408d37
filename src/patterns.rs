//! Literal recognizers for SQL statement text

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    SingleQuote,
    DoubleQuote,
    DollarQuote,
    OracleQuote,
    Comment,
    MultilineComment,
    Uuid,
    Hex,
    Boolean,
    Number,
}

impl LiteralKind {
    /// Every kind, in the order the combined matcher tries them.
    ///
    /// The order decides ambiguous spans: `0x1f` is a hex literal and never a
    /// number followed by garbage because `Hex` comes before `Number`.
    pub const ALL: [LiteralKind; 10] = [
        LiteralKind::SingleQuote,
        LiteralKind::DoubleQuote,
        LiteralKind::DollarQuote,
        LiteralKind::OracleQuote,
        LiteralKind::Comment,
        LiteralKind::MultilineComment,
        LiteralKind::Uuid,
        LiteralKind::Hex,
        LiteralKind::Boolean,
        LiteralKind::Number,
    ];

    /// Returns the byte offset one past the end of a span starting exactly at
    /// `start`. Spans are never empty.
    pub fn match_at(self, text: &str, start: usize) -> Option<usize> {
        Scan::new(text).match_kind(self, start)
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::SingleQuote => write!(f, "SINGLE_QUOTE"),
            LiteralKind::DoubleQuote => write!(f, "DOUBLE_QUOTE"),
            LiteralKind::DollarQuote => write!(f, "DOLLAR_QUOTE"),
            LiteralKind::OracleQuote => write!(f, "ORACLE_QUOTE"),
            LiteralKind::Comment => write!(f, "COMMENT"),
            LiteralKind::MultilineComment => write!(f, "MULTILINE_COMMENT"),
            LiteralKind::Uuid => write!(f, "UUID"),
            LiteralKind::Hex => write!(f, "HEX"),
            LiteralKind::Boolean => write!(f, "BOOLEAN"),
            LiteralKind::Number => write!(f, "NUMBER"),
        }
    }
}

/// Recognizer state for one pass over a text.
///
/// Failed walks are remembered, so a run of openers that never close costs
/// one walk in total rather than one walk per opener.
pub(crate) struct Scan<'t> {
    text: &'t str,
    line_end: Option<(usize, usize)>,
    comment_dead: (usize, usize),
    oracle_dead: [(usize, usize); 4],
    block_dead: Vec<bool>,
    dollar_pairs: Option<HashMap<&'t str, Vec<usize>>>,
}

impl<'t> Scan<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self {
            text,
            line_end: None,
            comment_dead: (0, 0),
            oracle_dead: [(0, 0); 4],
            block_dead: Vec::new(),
            dollar_pairs: None,
        }
    }

    pub(crate) fn text(&self) -> &'t str {
        self.text
    }

    pub(crate) fn match_kind(&mut self, kind: LiteralKind, start: usize) -> Option<usize> {
        let text = self.text;
        match kind {
            LiteralKind::SingleQuote => quoted(text, start, b'\''),
            LiteralKind::DoubleQuote => quoted(text, start, b'"'),
            LiteralKind::DollarQuote => self.dollar_quoted(start),
            LiteralKind::OracleQuote => self.oracle_quoted(start),
            LiteralKind::Comment => self.line_comment(start),
            LiteralKind::MultilineComment => self.block_comment(start),
            LiteralKind::Uuid => uuid(text, start),
            LiteralKind::Hex => hex(text, start),
            LiteralKind::Boolean => boolean(text, start),
            LiteralKind::Number => number(text, start),
        }
    }

    fn line_end(&mut self, pos: usize) -> usize {
        if let Some((from, at)) = self.line_end {
            if from <= pos && pos <= at {
                return at;
            }
        }
        let at = end_of_line(self.text, pos);
        self.line_end = Some((pos, at));
        at
    }

    fn dollar_quoted(&mut self, start: usize) -> Option<usize> {
        let text = self.text;
        let bytes = text.as_bytes();
        if bytes.get(start) != Some(&b'$') {
            return None;
        }
        // `$1` is a positional parameter, not a tag.
        if bytes.get(start + 1).is_some_and(u8::is_ascii_digit) {
            return None;
        }

        let close = start + 1 + text[start + 1..].find('$')?;
        let tag_len = close + 1 - start;
        let body_end = self.line_end(close + 1);

        // A closing tag starts at a `$` whose next `$` encloses the same text.
        let closing = self
            .dollar_pairs()
            .get(&text[start + 1..close])
            .and_then(|openers| openers.get(openers.partition_point(|&p| p <= close)).copied());

        match closing {
            Some(p) if p < body_end => Some(p + tag_len),
            _ => at_end_anchor(text, body_end).then_some(body_end),
        }
    }

    fn dollar_pairs(&mut self) -> &HashMap<&'t str, Vec<usize>> {
        let text = self.text;
        self.dollar_pairs.get_or_insert_with(|| {
            let dollars: Vec<usize> = text.match_indices('$').map(|(i, _)| i).collect();
            let mut pairs: HashMap<&'t str, Vec<usize>> = HashMap::new();
            for pair in dollars.windows(2) {
                pairs
                    .entry(&text[pair[0] + 1..pair[1]])
                    .or_default()
                    .push(pair[0]);
            }
            pairs
        })
    }

    fn oracle_quoted(&mut self, start: usize) -> Option<usize> {
        let text = self.text;
        let rest = text.get(start..)?;
        if !rest.starts_with("q'") {
            return None;
        }
        let (bracket, close) = match rest.as_bytes().get(2)? {
            b'[' => (0, "]'"),
            b'{' => (1, "}'"),
            b'<' => (2, ">'"),
            b'(' => (3, ")'"),
            _ => return None,
        };
        let (from, until) = self.oracle_dead[bracket];
        if from <= start && start < until {
            return None;
        }

        let mut pos = start + 3;
        loop {
            if text[pos..].starts_with(close) {
                return Some(pos + close.len());
            }
            if at_end_anchor(text, pos) {
                return Some(pos);
            }
            match char_at(text, pos) {
                Some(c) if !is_line_terminator(c) => pos += c.len_utf8(),
                _ => {
                    // Any later opener before `pos` walks the same tail.
                    self.oracle_dead[bracket] = (start, pos);
                    return None;
                }
            }
        }
    }

    fn line_comment(&mut self, start: usize) -> Option<usize> {
        let text = self.text;
        let rest = text.get(start..)?;
        let mut pos = if rest.starts_with('#') {
            start + 1
        } else if rest.starts_with("--") {
            start + 2
        } else {
            return None;
        };
        let (from, until) = self.comment_dead;
        if from <= start && start < until {
            return None;
        }

        loop {
            match char_at(text, pos) {
                Some('\r' | '\n') => return Some(pos),
                _ if at_end_anchor(text, pos) => return Some(pos),
                // Other line terminators end neither the comment nor the line.
                Some(c) if !is_line_terminator(c) => pos += c.len_utf8(),
                _ => {
                    self.comment_dead = (start, pos);
                    return None;
                }
            }
        }
    }

    fn block_comment(&mut self, start: usize) -> Option<usize> {
        let text = self.text;
        if !text.get(start..)?.starts_with("/*") {
            return None;
        }

        let from = start + 2;
        let mut pos = from;
        loop {
            if self.block_dead.get(pos) == Some(&true) {
                break;
            }
            match block_step(text, pos) {
                BlockStep::Next(next) => pos = next,
                BlockStep::Done(Some(end)) => return Some(end),
                BlockStep::Done(None) => break,
            }
        }

        // The walk depends only on the offset, so every offset it passed
        // through fails the same way.
        if self.block_dead.is_empty() {
            self.block_dead = vec![false; text.len() + 1];
        }
        let mut pos = from;
        while !self.block_dead[pos] {
            self.block_dead[pos] = true;
            match block_step(text, pos) {
                BlockStep::Next(next) => pos = next,
                BlockStep::Done(_) => break,
            }
        }
        None
    }
}

fn char_at(text: &str, pos: usize) -> Option<char> {
    text.get(pos..).and_then(|rest| rest.chars().next())
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// Judged on the original text, never on partially masked output.
fn is_word_boundary(text: &str, pos: usize) -> bool {
    let before = text[..pos].chars().next_back().is_some_and(is_word_char);
    let after = char_at(text, pos).is_some_and(is_word_char);
    before != after
}

// End of input, or just before a single trailing line terminator.
fn at_end_anchor(text: &str, pos: usize) -> bool {
    matches!(
        &text[pos..],
        "" | "\n" | "\r" | "\r\n" | "\u{85}" | "\u{2028}" | "\u{2029}"
    )
}

fn end_of_line(text: &str, pos: usize) -> usize {
    text[pos..]
        .find(is_line_terminator)
        .map_or(text.len(), |offset| pos + offset)
}

// '...' and "..." with doubled-quote escapes. A backslash-escaped quote gives
// up on finding the close and swallows the rest of the line.
fn quoted(text: &str, start: usize, quote: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(start) != Some(&quote) {
        return None;
    }

    let mut pos = start + 1;
    loop {
        match bytes.get(pos) {
            None => return None,
            Some(b'\\') if bytes.get(pos + 1) == Some(&quote) => {
                return Some(end_of_line(text, pos + 2));
            }
            Some(&b) if b == quote => {
                if bytes.get(pos + 1) == Some(&quote) {
                    pos += 2;
                } else {
                    return Some(pos + 1);
                }
            }
            // Continuation bytes never equal an ASCII quote or backslash.
            Some(_) => pos += 1,
        }
    }
}

enum BlockStep {
    Next(usize),
    Done(Option<usize>),
}

fn block_step(text: &str, pos: usize) -> BlockStep {
    let bytes = text.as_bytes();
    match (bytes.get(pos), bytes.get(pos + 1)) {
        (Some(b'*'), Some(b'/')) => BlockStep::Done(Some(pos + 2)),
        // A nested opener ends the scan at the end of its line.
        (Some(b'/'), Some(b'*')) => BlockStep::Done(Some(end_of_line(text, pos + 2))),
        (Some(b'/'), Some(_)) => match char_at(text, pos + 1) {
            Some(next) => BlockStep::Next(pos + 1 + next.len_utf8()),
            None => BlockStep::Done(None),
        },
        (Some(b'/'), None) | (None, _) => BlockStep::Done(None),
        (Some(_), _) => BlockStep::Next(pos + 1),
    }
}

fn uuid(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = start;
    if bytes.get(pos) == Some(&b'{') {
        pos += 1;
    }

    for _ in 0..32 {
        if !bytes.get(pos)?.is_ascii_hexdigit() {
            return None;
        }
        pos += 1;
        while bytes.get(pos) == Some(&b'-') {
            pos += 1;
        }
    }

    if bytes.get(pos) == Some(&b'}') {
        pos += 1;
    }
    Some(pos)
}

fn hex(text: &str, start: usize) -> Option<usize> {
    let digits = text.get(start..)?.strip_prefix("0x")?;
    let len = digits.bytes().take_while(u8::is_ascii_hexdigit).count();
    (len > 0).then_some(start + 2 + len)
}

fn boolean(text: &str, start: usize) -> Option<usize> {
    if !is_word_boundary(text, start) {
        return None;
    }
    let rest = text.get(start..)?;
    ["true", "false", "null"].iter().find_map(|word| {
        let end = start + word.len();
        let candidate = rest.get(..word.len())?;
        (candidate.eq_ignore_ascii_case(word) && is_word_boundary(text, end)).then_some(end)
    })
}

fn number(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = start;
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }
    if !is_word_boundary(text, pos) {
        return None;
    }

    let digits_from = |from: usize| {
        from + bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit() || **b == b'_')
            .count()
    };

    let int_end = digits_from(pos);
    if int_end == pos {
        return None;
    }
    pos = int_end;

    if bytes.get(pos) == Some(&b'.') {
        let frac_end = digits_from(pos + 1);
        if frac_end > pos + 1 {
            pos = frac_end;
        }
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            pos = exp_end;
        }
    }

    Some(pos)
}

use crate::patterns::{LiteralKind, Scan};
use std::borrow::Cow;

pub const PLACEHOLDER: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralSpan {
    pub kind: LiteralKind,
    pub start: usize,
    pub end: usize,
}

/// Priority-ordered alternation of literal kinds.
///
/// At every offset the kinds are tried in order and the first one that
/// matches wins, whatever the length of the other candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedPattern {
    kinds: &'static [LiteralKind],
}

impl CombinedPattern {
    pub const fn new(kinds: &'static [LiteralKind]) -> Self {
        Self { kinds }
    }

    pub fn kinds(&self) -> &'static [LiteralKind] {
        self.kinds
    }

    /// Returns the input borrowed when nothing was recognized.
    pub fn mask<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut masked: Option<String> = None;
        let mut copied = 0;
        for span in self.spans(text) {
            let out = masked.get_or_insert_with(|| String::with_capacity(text.len()));
            out.push_str(&text[copied..span.start]);
            out.push(PLACEHOLDER);
            copied = span.end;
        }

        match masked {
            Some(mut out) => {
                out.push_str(&text[copied..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(text),
        }
    }

    pub fn find_spans(&self, text: &str) -> Vec<LiteralSpan> {
        self.spans(text).collect()
    }

    fn spans<'p, 't>(&'p self, text: &'t str) -> Spans<'p, 't> {
        Spans {
            kinds: self.kinds,
            scan: Scan::new(text),
            pos: 0,
        }
    }
}

impl Default for CombinedPattern {
    fn default() -> Self {
        Self::new(&LiteralKind::ALL)
    }
}

struct Spans<'p, 't> {
    kinds: &'p [LiteralKind],
    scan: Scan<'t>,
    pos: usize,
}

impl Iterator for Spans<'_, '_> {
    type Item = LiteralSpan;

    fn next(&mut self) -> Option<LiteralSpan> {
        let text = self.scan.text();
        while let Some(c) = text[self.pos..].chars().next() {
            let start = self.pos;
            let found = self
                .kinds
                .iter()
                .find_map(|&kind| self.scan.match_kind(kind, start).map(|end| (kind, end)));
            if let Some((kind, end)) = found {
                self.pos = end;
                return Some(LiteralSpan { kind, start, end });
            }
            self.pos += c.len_utf8();
        }
        None
    }
}

//! Anchor matching over a line buffer.
//!
//! Matching is lexical and case-sensitive. Lines are compared with leading and
//! trailing whitespace stripped; nothing inside a line is normalized.
use regex::Regex;

/// Contiguous range of document lines, `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn line(index: usize) -> Self {
        Self { start: index, end: index + 1 }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The three anchor kinds the engine understands.
#[derive(Debug, Clone)]
pub enum AnchorSpec {
    /// A whole line, compared with surrounding whitespace stripped.
    Literal(String),
    /// A regex tested against each raw line.
    Pattern(Regex),
    /// A function-header prefix; the span covers the header and the body that
    /// follows it, found by a delimiter-depth scan.
    FnHeader(String),
}

impl AnchorSpec {
    pub fn describe(&self) -> String {
        match self {
            AnchorSpec::Literal(lit) => format!("literal line `{}`", lit.trim()),
            AnchorSpec::Pattern(re) => format!("pattern `{}`", re.as_str()),
            AnchorSpec::FnHeader(prefix) => format!("function header `{}`", prefix.trim()),
        }
    }
}

/// Find the first occurrence of `spec` in `lines`.
///
/// For `FnHeader` anchors the returned span runs from the header line through
/// the line on which delimiter depth returns to the header's starting depth.
/// If no balanced terminator exists before end-of-document this returns
/// `None` rather than a truncated span.
pub fn find(lines: &[String], spec: &AnchorSpec) -> Option<Span> {
    match spec {
        AnchorSpec::Literal(lit) => {
            let wanted = lit.trim();
            lines.iter().position(|l| l.trim() == wanted).map(Span::line)
        }
        AnchorSpec::Pattern(re) => lines.iter().position(|l| re.is_match(l)).map(Span::line),
        AnchorSpec::FnHeader(prefix) => {
            let wanted = prefix.trim();
            let start = lines.iter().position(|l| l.trim_start().starts_with(wanted))?;
            let end = scan_body_end(lines, start)?;
            Some(Span { start, end })
        }
    }
}

/// Best-effort body-end detection: count `{}`/`()`/`[]` nesting from the
/// header line forward and stop at the first line after which depth drops back
/// to zero. The counter is blind to delimiters inside string and comment
/// literals; that is a known limitation of the lexical approach, and such
/// input can produce a misplaced terminator. An unterminated body yields
/// `None`.
fn scan_body_end(lines: &[String], start: usize) -> Option<usize> {
    let mut depth: i64 = 0;
    let mut body_opened = false;
    for (idx, line) in lines.iter().enumerate().skip(start) {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    body_opened = true;
                }
                '(' | '[' => depth += 1,
                '}' | ')' | ']' => depth -= 1,
                _ => {}
            }
        }
        // A balanced signature line alone does not end the span; the body's
        // opening brace must have been seen first.
        if body_opened && depth <= 0 {
            return Some(idx + 1);
        }
    }
    None
}

//! Anchor-based list injection: a tagged block of entries that lives
//! immediately after a marker line, exactly once, no matter how often the
//! injector runs.
use regex::Regex;

use crate::document::TargetDocument;
use crate::error::EngineError;
use crate::matcher::{self, AnchorSpec};

/// A marker line plus the tagged entry block that belongs after it.
#[derive(Debug, Clone)]
pub struct Anchor {
    /// Name of the entry set, used in reporting.
    pub tag: String,
    /// Where the block goes; the entries land directly after this line.
    pub marker: AnchorSpec,
    /// The entries, in insertion order, given without indentation.
    pub entries: Vec<String>,
    /// Pattern recognizing lines injected under this tag by any prior run,
    /// including entries no longer in the current set. Matched against
    /// trimmed lines. When absent, only the current entries are retired.
    pub retire: Option<Regex>,
}

/// Inject `anchor` into `doc`. Returns whether the document changed.
///
/// Existing tagged lines are stripped first, wherever they appear, so a
/// second application (or an application with a smaller entry set) converges
/// instead of duplicating or leaking stale entries. A missing marker is an
/// error; there is no safe fallback location.
pub fn inject(doc: &mut TargetDocument, anchor: &Anchor) -> Result<bool, EngineError> {
    let before = doc.text();

    let entries: Vec<&str> = anchor.entries.iter().map(|e| e.trim()).collect();
    doc.retain_lines(|line| {
        let trimmed = line.trim();
        let tagged = anchor.retire.as_ref().is_some_and(|re| re.is_match(trimmed));
        !(tagged || entries.contains(&trimmed))
    });

    let span = matcher::find(doc.lines(), &anchor.marker).ok_or_else(|| EngineError::AnchorNotFound {
        anchor: anchor.marker.describe(),
    })?;

    let marker_line = &doc.lines()[span.start];
    let marker_indent: String = marker_line.chars().take_while(|c| c.is_whitespace()).collect();
    let block: Vec<String> = entries
        .iter()
        .map(|entry| format!("{marker_indent}    {entry}"))
        .collect();
    doc.insert_lines(span.end, block);

    Ok(doc.text() != before)
}

//! The mutable target of a patch run: an owned line buffer with a
//! load → transform → persist lifecycle.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::matcher::Span;

/// A target file held in memory as a line buffer.
///
/// Lines are stored without their terminating `\n`; the original trailing
/// newline (or its absence) is remembered so that an untouched document
/// round-trips byte-for-byte.
#[derive(Debug, Clone)]
pub struct TargetDocument {
    path: PathBuf,
    lines: Vec<String>,
    trailing_newline: bool,
}

impl TargetDocument {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            return Err(EngineError::TargetFileMissing(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        Ok(Self::from_text(path, &text))
    }

    pub fn from_text(path: &Path, text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if trailing_newline {
            lines.pop();
        }
        Self { path: path.to_path_buf(), lines, trailing_newline }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Reassemble the document text exactly as it would be written to disk.
    pub fn text(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    /// Replace the lines covered by `span` with `new_text`, leaving every
    /// line outside the span untouched. Exactly one splice per call.
    pub fn splice(&mut self, span: Span, new_text: &str) {
        let mut replacement: Vec<String> = if new_text.is_empty() {
            Vec::new()
        } else {
            new_text.split('\n').map(str::to_string).collect()
        };
        if new_text.ends_with('\n') {
            replacement.pop();
        }
        self.lines.splice(span.start..span.end, replacement);
    }

    /// Insert `lines` so that the first inserted line lands at `index`.
    pub fn insert_lines<I>(&mut self, index: usize, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        for (offset, line) in lines.into_iter().enumerate() {
            self.lines.insert(index + offset, line);
        }
    }

    /// Drop every line for which `keep` returns false.
    pub fn retain_lines<F>(&mut self, keep: F)
    where
        F: FnMut(&String) -> bool,
    {
        self.lines.retain(keep);
    }

    /// Overwrite the line at `index` in place.
    pub fn set_line(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    /// Write the document back to its path, atomically: the text goes to a
    /// sibling temp file first and is renamed over the target only once the
    /// write has fully succeeded.
    pub fn persist(&self) -> Result<(), EngineError> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "target".to_string());
        let tmp = self.path.with_file_name(format!("{file_name}.splice-tmp"));
        fs::write(&tmp, self.text()).map_err(|e| EngineError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(EngineError::io(&self.path, e));
        }
        Ok(())
    }
}

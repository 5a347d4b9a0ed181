//! Named pass builders for the transformations the engine ships.
//!
//! Each builder returns a `PatchPass` that is a fixed point of itself, so a
//! recipe can be re-run against an already patched file without damage.
use std::path::PathBuf;

use anyhow::Result;
use regex::Regex;

use crate::error::EngineError;
use crate::inject::{self, Anchor};
use crate::locate;
use crate::matcher::{self, AnchorSpec, Span};
use crate::pass::{PassStatus, PatchPass};

/// Rewrite every `use ...::<symbol>;` line in the target to the canonical
/// path of the symbol's declaring file, collapsing duplicates to a single
/// import. When nothing in the tree declares the symbol the caller-supplied
/// `fallback_module` is used and the outcome notes the fallback.
pub fn fix_imports(root: PathBuf, symbol: String, fallback_module: String) -> Result<PatchPass> {
    let import_re = Regex::new(&format!(
        r"^use\s+(?:\w+::)+{}\s*;$",
        regex::escape(&symbol)
    ))?;
    let name = format!("fix-imports:{symbol}");
    Ok(PatchPass::new(name, move |doc| {
        // SymbolNotFound is recoverable by contract: proceed with the fallback.
        let (module, note) = match locate::locate(&root, &symbol) {
            Ok(reference) => (reference.module_path, None),
            Err(EngineError::SymbolNotFound { .. }) => (
                fallback_module.clone(),
                Some(format!("`{symbol}` not declared under tree root; fell back to `{fallback_module}`")),
            ),
            Err(other) => return Err(other),
        };
        let canonical = format!("use {module}::{symbol};");

        let matched: Vec<usize> = doc
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| import_re.is_match(line.trim()))
            .map(|(idx, _)| idx)
            .collect();
        let Some(&first) = matched.first() else {
            return Ok(PassStatus::skipped(format!("no `use ...::{symbol};` line in target")));
        };

        let indent: String = doc.lines()[first].chars().take_while(|c| c.is_whitespace()).collect();
        let new_line = format!("{indent}{canonical}");
        let changed = doc.lines()[first] != new_line || matched.len() > 1;
        doc.set_line(first, new_line);
        // Extra imports of the same symbol collapse into the first one.
        for &idx in matched.iter().skip(1).rev() {
            doc.splice(Span::line(idx), "");
        }

        if !changed {
            return Ok(PassStatus::skipped("import already canonical"));
        }
        Ok(match note {
            Some(n) => PassStatus::applied_with(n),
            None => PassStatus::applied(),
        })
    }))
}

/// Inject a tagged entry block after a marker line; see `inject::inject` for
/// the exactly-once and stale-retirement guarantees.
pub fn inject_block(anchor: Anchor) -> PatchPass {
    let name = format!("inject:{}", anchor.tag);
    PatchPass::new(name, move |doc| {
        let changed = inject::inject(doc, &anchor)?;
        if changed {
            Ok(PassStatus::applied())
        } else {
            Ok(PassStatus::skipped("entries already in place"))
        }
    })
}

/// Replace the function whose header starts with `header` (and the body found
/// by the delimiter-depth scan) with `replacement`.
///
/// For the pass to stay idempotent, `replacement` must itself begin with a
/// line matching `header`, so that a second run finds the new text and
/// compares equal.
pub fn replace_function(header: String, replacement: String) -> PatchPass {
    let name = format!("replace-function:{}", header.trim());
    PatchPass::new(name, move |doc| {
        let spec = AnchorSpec::FnHeader(header.clone());
        let span = matcher::find(doc.lines(), &spec)
            .ok_or_else(|| EngineError::SpanNotFound { anchor: spec.describe() })?;
        let current = doc.lines()[span.start..span.end].join("\n");
        if current == replacement.trim_end_matches('\n') {
            return Ok(PassStatus::skipped("function already replaced"));
        }
        doc.splice(span, &replacement);
        Ok(PassStatus::applied())
    })
}

/// Delete the region matched by `spec`. An absent region is the converged
/// state, so it reports as skipped rather than failed.
pub fn strip_block(spec: AnchorSpec) -> PatchPass {
    let name = format!("strip-block:{}", spec.describe());
    PatchPass::new(name, move |doc| match matcher::find(doc.lines(), &spec) {
        Some(span) => {
            doc.splice(span, "");
            Ok(PassStatus::applied())
        }
        None => Ok(PassStatus::skipped("no matching block")),
    })
}

/// Replace a single line matched by `stale` with `replacement`, preserving
/// the line's indentation. If the stale line is gone but the replacement is
/// already present the pass reports the converged state.
pub fn replace_line(stale: AnchorSpec, replacement: String) -> PatchPass {
    let name = format!("replace-line:{}", stale.describe());
    PatchPass::new(name, move |doc| {
        if let Some(span) = matcher::find(doc.lines(), &stale) {
            let line = &doc.lines()[span.start];
            let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
            let new_line = format!("{indent}{}", replacement.trim());
            if *line == new_line {
                return Ok(PassStatus::skipped("already applied"));
            }
            doc.set_line(span.start, new_line);
            return Ok(PassStatus::applied());
        }
        if doc.lines().iter().any(|l| l.trim() == replacement.trim()) {
            return Ok(PassStatus::skipped("already applied"));
        }
        Err(EngineError::SpanNotFound { anchor: stale.describe() })
    })
}

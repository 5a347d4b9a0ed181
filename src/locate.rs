//! Symbol location over a source tree and canonical module-path derivation.
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::EngineError;

/// Where a symbol lives and how to refer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolReference {
    pub symbol: String,
    pub declaring_file: PathBuf,
    /// Module path of the declaring file, e.g. `crate::models`.
    pub module_path: String,
}

impl SymbolReference {
    /// Fully-qualified reference, e.g. `crate::models::User`.
    pub fn canonical_path(&self) -> String {
        format!("{}::{}", self.module_path, self.symbol)
    }
}

/// Find the file declaring `symbol` under `root` and derive its canonical
/// module path.
///
/// Files are visited in lexicographic path order and the first declaring file
/// wins; when a symbol is declared in several places the lexicographically
/// smallest path is the deliberate, deterministic choice. The declaration
/// test is a per-line lexical pattern (`pub struct Name`, `fn name`, ...),
/// not a parse.
///
/// Fails with `SymbolNotFound` when nothing declares the symbol; that error
/// is recoverable, and callers are expected to fall back to a default module
/// path rather than abort.
pub fn locate(root: &Path, symbol: &str) -> Result<SymbolReference, EngineError> {
    let matcher = declaration_matcher(symbol);
    for file in collect_source_files(root) {
        let content = match std::fs::read_to_string(&file) {
            Ok(c) => c,
            Err(err) => {
                tracing::debug!(file = %file.display(), %err, "skipping unreadable file");
                continue;
            }
        };
        if matcher.is_match(&content) {
            let module_path = module_path_for(root, &file)?;
            return Ok(SymbolReference {
                symbol: symbol.to_string(),
                declaring_file: file,
                module_path,
            });
        }
    }
    Err(EngineError::SymbolNotFound { root: root.to_path_buf(), symbol: symbol.to_string() })
}

/// All `.rs` files under `root`, sorted lexicographically, skipping build
/// output and VCS directories.
fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.path() == root || !is_ignored_dir(e.path()));
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("rs") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

fn is_ignored_dir(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
        matches!(name, "target" | ".git")
    } else {
        false
    }
}

fn declaration_matcher(symbol: &str) -> Regex {
    let pattern = format!(
        r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?(?:(?:async\s+)?fn|struct|enum|trait|union|type|const|static|mod)\s+{}\b",
        regex::escape(symbol)
    );
    // Built from an escaped name, so compilation cannot fail.
    Regex::new(&pattern).expect("declaration pattern is valid")
}

/// Canonical module path for a file, relative to the tree root: directory
/// segments joined with `::`, the base name appended unless it is a module
/// root (`mod.rs`, `lib.rs`, `main.rs`), a leading `src` segment dropped, the
/// whole prefixed with `crate`.
pub fn module_path_for(root: &Path, file: &Path) -> Result<String, EngineError> {
    let rel = file.strip_prefix(root).map_err(|_| {
        EngineError::io(file, std::io::Error::new(std::io::ErrorKind::InvalidInput, "file not under root"))
    })?;
    let components: Vec<&str> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    let mut segments: Vec<&str> = Vec::new();
    for (i, comp) in components.iter().enumerate() {
        let is_first = segments.is_empty() && i == 0;
        let is_last = i == components.len() - 1;
        if is_first && *comp == "src" {
            continue;
        }
        if is_last {
            if matches!(*comp, "mod.rs" | "lib.rs" | "main.rs") {
                continue;
            }
            if let Some(stem) = Path::new(comp).file_stem().and_then(|s| s.to_str()) {
                segments.push(stem);
            }
        } else {
            segments.push(comp);
        }
    }
    if segments.is_empty() {
        Ok("crate".to_string())
    } else {
        Ok(format!("crate::{}", segments.join("::")))
    }
}

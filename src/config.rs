//! Run settings: where the source tree lives and which file gets patched.
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

pub const ROOT_ENV: &str = "SPLICE_ROOT";
pub const TARGET_ENV: &str = "SPLICE_TARGET";

/// Resolved paths for one orchestrator invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root of the tree searched for symbol declarations.
    pub root: PathBuf,
    /// The one file the run is allowed to rewrite.
    pub target: PathBuf,
}

impl Settings {
    /// Resolve settings from explicit values, falling back to the
    /// `SPLICE_ROOT` / `SPLICE_TARGET` environment overrides. The root
    /// defaults to the current directory; the target has no safe default and
    /// must be supplied one way or the other.
    pub fn resolve(root: Option<PathBuf>, target: Option<PathBuf>) -> Result<Self> {
        let root = root
            .or_else(|| env::var_os(ROOT_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let Some(target) = target.or_else(|| env::var_os(TARGET_ENV).map(PathBuf::from)) else {
            bail!("no target file given: pass --target or set {TARGET_ENV}");
        };
        Ok(Self { root, target })
    }
}

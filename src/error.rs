use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no file under `{}` declares symbol `{symbol}`", root.display())]
    SymbolNotFound { root: PathBuf, symbol: String },
    #[error("anchor not found: {anchor}")]
    AnchorNotFound { anchor: String },
    #[error("no span matched {anchor}")]
    SpanNotFound { anchor: String },
    #[error("required pass `{pass}` failed: {reason}")]
    RequiredPassFailed { pass: String, reason: String },
    #[error("target file `{}` does not exist", .0.display())]
    TargetFileMissing(PathBuf),
    #[error("io error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

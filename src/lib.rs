//! `splice` — a symbol-aware, lexical source-patch engine.
//!
//! The engine locates a named symbol inside a source tree, derives its
//! canonical module path, and rewrites a target file's imports, function
//! bodies, and registration lists to match. It works at the line and block
//! level with no parser; every shipped transformation is idempotent, so
//! repeated application converges instead of accumulating damage.
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod inject;
pub mod locate;
pub mod matcher;
pub mod pass;
pub mod recipes;
pub mod report;

pub use config::Settings;
pub use document::TargetDocument;
pub use engine::{apply, ApplyOptions};
pub use error::EngineError;
pub use inject::Anchor;
pub use locate::SymbolReference;
pub use matcher::{AnchorSpec, Span};
pub use pass::{PassStatus, PatchPass};
pub use report::{Disposition, PassOutcome, PatchReport};

//! The unit of work: a named, ideally idempotent document transformation.
use crate::document::TargetDocument;
use crate::error::EngineError;

/// What a transformation reports back when it runs without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassStatus {
    /// The pass found its anchor and rewrote (or confirmed) its region.
    Applied { note: Option<String> },
    /// The pass had nothing to do on this document.
    Skipped { reason: String },
}

impl PassStatus {
    pub fn applied() -> Self {
        Self::Applied { note: None }
    }

    pub fn applied_with(note: impl Into<String>) -> Self {
        Self::Applied { note: Some(note.into()) }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped { reason: reason.into() }
    }
}

type TransformFn = Box<dyn Fn(&mut TargetDocument) -> Result<PassStatus, EngineError>>;

/// One named transformation in an orchestrated run.
///
/// A well-formed pass is a fixed point of itself: applying it to its own
/// output must change nothing. Passes are required by default; a required
/// pass that errors aborts the run before anything is persisted.
pub struct PatchPass {
    name: String,
    required: bool,
    transform: TransformFn,
}

impl PatchPass {
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&mut TargetDocument) -> Result<PassStatus, EngineError> + 'static,
    {
        Self { name: name.into(), required: true, transform: Box::new(transform) }
    }

    /// Mark the pass as cosmetic: its failure is recorded but does not abort
    /// the run.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn run(&self, doc: &mut TargetDocument) -> Result<PassStatus, EngineError> {
        (self.transform)(doc)
    }
}

impl std::fmt::Debug for PatchPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatchPass")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish()
    }
}

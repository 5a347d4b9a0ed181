//! The orchestrator: load the target once, fold the passes over it in order,
//! persist once at the end — or not at all, if a required pass fails.
use std::path::Path;

use tracing::{debug, info, warn};

use crate::document::TargetDocument;
use crate::error::EngineError;
use crate::pass::{PassStatus, PatchPass};
use crate::report::{PassOutcome, PatchReport};

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Run every pass and produce the full report, but never touch the disk.
    pub dry_run: bool,
}

/// Apply `passes` to the file at `target`.
///
/// The document lives in memory for the duration of the call; disk is read
/// once at the start and written at most once at the end, through a temp file
/// so that a failed run leaves the original untouched. Each pass runs against
/// a snapshot: when it errors, any half-applied edits are rolled back, so a
/// failed pass never leaks partial work into the document. A failing required
/// pass stops the run; failing optional passes are recorded and skipped over.
///
/// Because every shipped pass is idempotent, re-running `apply` against an
/// already patched file converges: the second report shows skips and the file
/// is not rewritten.
pub fn apply(
    target: &Path,
    passes: &[PatchPass],
    options: ApplyOptions,
) -> Result<PatchReport, EngineError> {
    let mut doc = TargetDocument::load(target)?;
    let original = doc.text();

    let mut outcomes = Vec::with_capacity(passes.len());
    let mut success = true;
    for pass in passes {
        let snapshot = doc.clone();
        match pass.run(&mut doc) {
            Ok(PassStatus::Applied { note }) => {
                debug!(pass = pass.name(), "pass applied");
                outcomes.push(PassOutcome::applied(pass.name(), note));
            }
            Ok(PassStatus::Skipped { reason }) => {
                debug!(pass = pass.name(), %reason, "pass skipped");
                outcomes.push(PassOutcome::skipped(pass.name(), reason));
            }
            Err(err) => {
                // A pass that errors contributes nothing: roll back whatever
                // it wrote before failing.
                doc = snapshot;
                outcomes.push(PassOutcome::failed(pass.name(), err.to_string()));
                if pass.is_required() {
                    warn!(pass = pass.name(), %err, "required pass failed, aborting run");
                    success = false;
                    break;
                }
                debug!(pass = pass.name(), %err, "optional pass failed");
            }
        }
    }

    let changed = doc.text() != original;
    let mut persisted = false;
    if success && changed && !options.dry_run {
        doc.persist()?;
        persisted = true;
        info!(target = %target.display(), "target rewritten");
    }

    let preview = options.dry_run.then(|| doc.text());
    Ok(PatchReport { target: target.to_path_buf(), outcomes, success, persisted, preview })
}

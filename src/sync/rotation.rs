//! Backup rotation for the remote version chain
//!
//! Before a save lands at path `P`, the existing versions `P`, `P.1` …
//! are shifted up by one index so the immediately-previous content is
//! never silently overwritten. Rotation is best-effort: losing one backup
//! generation is acceptable, losing the ability to save new data is not,
//! so a failed shift is logged and rotation continues.

use tracing::warn;

use crate::remote::{ObjectStore, RemoteError};

/// What happened to one shift of the chain
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// The source existed and was moved to the destination
    Moved,
    /// The source did not exist; nothing to shift
    Skipped,
    /// The existence check or the move itself failed
    Failed(RemoteError),
}

/// One shift of the version chain
#[derive(Debug, Clone)]
pub struct RotationStep {
    pub src: String,
    pub dst: String,
    pub outcome: StepOutcome,
}

impl RotationStep {
    /// Check if this step failed
    pub fn failed(&self) -> bool {
        matches!(self.outcome, StepOutcome::Failed(_))
    }
}

/// The ordered record of every shift attempted during one rotation
#[derive(Debug, Clone, Default)]
pub struct RotationReport {
    pub steps: Vec<RotationStep>,
}

impl RotationReport {
    /// The steps that failed, in execution order
    pub fn failed_steps(&self) -> Vec<&RotationStep> {
        self.steps.iter().filter(|s| s.failed()).collect()
    }

    /// Check if every step either moved or was skipped
    pub fn is_clean(&self) -> bool {
        !self.steps.iter().any(|s| s.failed())
    }
}

/// Shifts the chain of numbered remote versions to make room for a save
pub struct BackupRotator<'a, S: ObjectStore> {
    store: &'a S,
    path: &'a str,
    depth: u32,
}

impl<'a, S: ObjectStore> BackupRotator<'a, S> {
    /// Create a rotator for path `P` with backup depth `K`
    pub fn new(store: &'a S, path: &'a str, depth: u32) -> Self {
        Self { store, path, depth }
    }

    /// Run the rotation, strictly descending:
    ///
    /// ```text
    /// for i in (K-1) ..= 1:  move P.i -> P.(i+1)   (skip if P.i absent)
    /// move P -> P.1                                 (skip if P absent)
    /// ```
    ///
    /// The move into `P.K` overwrites the oldest backup; entries beyond
    /// the depth are discarded by design. Never fails; every step is
    /// recorded in the returned report.
    pub fn rotate(&self) -> RotationReport {
        let mut report = RotationReport::default();
        if self.depth == 0 {
            return report;
        }

        for i in (1..self.depth).rev() {
            let src = format!("{}.{}", self.path, i);
            let dst = format!("{}.{}", self.path, i + 1);
            report.steps.push(self.shift(src, dst));
        }

        let first_backup = format!("{}.1", self.path);
        report.steps.push(self.shift(self.path.to_string(), first_backup));

        report
    }

    fn shift(&self, src: String, dst: String) -> RotationStep {
        let outcome = match self.store.exists(&src) {
            Ok(false) => StepOutcome::Skipped,
            Ok(true) => match self.store.rename(&src, &dst) {
                Ok(()) => StepOutcome::Moved,
                Err(e) => {
                    warn!(%src, %dst, error = %e, "backup shift failed, continuing");
                    StepOutcome::Failed(e)
                }
            },
            Err(e) => {
                warn!(%src, error = %e, "backup existence check failed, continuing");
                StepOutcome::Failed(e)
            }
        };

        RotationStep { src, dst, outcome }
    }
}

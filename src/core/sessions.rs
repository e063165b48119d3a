//! Session-directory phase: rename one `session-<id>` entry to the owner's name.
//!
//! Candidates are visited in directory-listing order. The owner name is
//! checked before every rename, so once a candidate has taken it the rest
//! are skipped with a warning. Nothing is ever overwritten or merged.

use crate::core::config::{MigrationConfig, SESSION_PREFIX};
use crate::core::error::MigrateError;
use crate::core::report::Reporter;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionOutcome {
    Migrated { target: String },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Entry name inside the base directory, e.g. `session-alice`.
    pub source: String,
    #[serde(flatten)]
    pub outcome: SessionOutcome,
}

impl SessionReport {
    pub fn is_migrated(&self) -> bool {
        matches!(self.outcome, SessionOutcome::Migrated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Base directory does not exist; nothing was touched.
    Absent { base: String },
    /// Base directory exists but holds no non-owner sessions.
    Empty { base: String },
    Processed {
        base: String,
        candidates: Vec<SessionReport>,
    },
}

impl SessionPhase {
    pub fn reports(&self) -> &[SessionReport] {
        match self {
            SessionPhase::Processed { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Absent { .. } => "absent",
            SessionPhase::Empty { .. } => "empty",
            SessionPhase::Processed { .. } => "processed",
        }
    }
}

/// A candidate entry: its display name and full path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionCandidate {
    name: String,
    path: PathBuf,
}

/// Whether an entry name is a session other than the owner's.
pub fn is_candidate_name(name: &str, owner_session_name: &str) -> bool {
    name.starts_with(SESSION_PREFIX) && name != owner_session_name
}

/// List candidate entries of `base` in listing order.
fn find_candidates(
    base: &Path,
    owner_session_name: &str,
) -> Result<Vec<SessionCandidate>, MigrateError> {
    let mut out = Vec::new();
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_candidate_name(&name, owner_session_name) {
            out.push(SessionCandidate {
                name,
                path: entry.path(),
            });
        }
    }
    Ok(out)
}

// `symlink_metadata` so a dangling link at the target still counts as taken.
fn target_taken(target: &Path) -> bool {
    fs::symlink_metadata(target).is_ok()
}

/// Run the session phase described by `config`. Stat, listing and rename
/// failures are fatal.
pub fn migrate_sessions<R>(
    config: &MigrationConfig,
    reporter: &mut R,
) -> Result<SessionPhase, MigrateError>
where
    R: Reporter + ?Sized,
{
    let base = &config.session_dir;
    let base_label = base.display().to_string();

    // Only a genuine NotFound means absent; any other stat error is fatal.
    if !base.try_exists()? {
        let phase = SessionPhase::Absent { base: base_label };
        reporter.session_phase(&phase);
        return Ok(phase);
    }

    let owner_name = config.owner_session_name();
    let candidates = find_candidates(base, &owner_name)?;
    if candidates.is_empty() {
        let phase = SessionPhase::Empty { base: base_label };
        reporter.session_phase(&phase);
        return Ok(phase);
    }

    let target = config.owner_session_path();
    let mut reports = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let outcome = if target_taken(&target) {
            SessionOutcome::Skipped {
                reason: format!("{} already exists", owner_name),
            }
        } else {
            fs::rename(&candidate.path, &target).map_err(|e| {
                MigrateError::PathError(format!(
                    "failed to rename {} to {}: {}",
                    candidate.path.display(),
                    target.display(),
                    e
                ))
            })?;
            SessionOutcome::Migrated {
                target: owner_name.clone(),
            }
        };
        let report = SessionReport {
            source: candidate.name,
            outcome,
        };
        reporter.session(&report);
        reports.push(report);
    }

    let phase = SessionPhase::Processed {
        base: base_label,
        candidates: reports,
    };
    reporter.session_phase(&phase);
    Ok(phase)
}

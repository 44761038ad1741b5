//! Crash-safe single-file mutation.
//!
//! Wraps one read-transform-write cycle with an on-disk backup so an
//! interrupted run never loses the pre-mutation content. The backup exists
//! for the whole window between the first read and the final write; a stale
//! backup from a killed run blocks further mutation of that file until an
//! operator resolves it.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::Outcome;
use crate::error::{Error, Result};

const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Removes the backup file when the mutation call returns, on every path.
/// A process crash skips Drop, which is exactly when the backup must survive.
struct BackupGuard {
    path: PathBuf,
}

impl Drop for BackupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Report for one completed mutation call.
///
/// `applied = false` with diagnostics means the transform rejected the
/// content and the target file was left byte-identical.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub path: String,
    pub backup_path: String,
    pub applied: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Performs read-transform-write cycles with backup-then-write-then-cleanup
/// discipline. The backup suffix is explicit configuration so tests and
/// callers never depend on ambient constants.
#[derive(Debug, Clone)]
pub struct FileMutator {
    backup_suffix: String,
}

impl Default for FileMutator {
    fn default() -> Self {
        Self::new(DEFAULT_BACKUP_SUFFIX)
    }
}

impl FileMutator {
    pub fn new(backup_suffix: impl Into<String>) -> Self {
        Self {
            backup_suffix: backup_suffix.into(),
        }
    }

    pub fn backup_suffix(&self) -> &str {
        &self.backup_suffix
    }

    /// The backup artifact path for a target file: same directory, fixed
    /// suffix appended to the file name.
    pub fn backup_path(&self, dir: &Path, file_name: &str) -> PathBuf {
        dir.join(format!("{}{}", file_name, self.backup_suffix))
    }

    /// Mutate one file through `transform`.
    ///
    /// Sequence: verify the target exists, refuse if a stale backup is
    /// present, copy the target to the backup, read, transform, and either
    /// overwrite the target (applied) or leave it untouched (rejected).
    /// The backup is removed once the call concludes either way.
    ///
    /// Precondition failures (missing target, stale backup) return `Err`
    /// without touching any file; a rejected transform returns `Ok` with
    /// `applied = false` so callers can continue with other files.
    pub fn mutate<F>(&self, dir: &Path, file_name: &str, transform: F) -> Result<MutationOutcome>
    where
        F: FnOnce(&str) -> Outcome,
    {
        let target = dir.join(file_name);
        let backup = self.backup_path(dir, file_name);

        if !target.is_file() {
            return Err(Error::mutate_target_missing(target.display().to_string()));
        }
        if backup.exists() {
            return Err(Error::mutate_stale_backup(
                target.display().to_string(),
                backup.display().to_string(),
            ));
        }

        fs::copy(&target, &backup).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("backup {}", target.display())))
        })?;
        let _guard = BackupGuard {
            path: backup.clone(),
        };

        let original = fs::read_to_string(&target).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read {}", target.display())))
        })?;

        match transform(&original) {
            Outcome::Applied(data) => {
                fs::write(&target, &data).map_err(|e| {
                    Error::internal_io(e.to_string(), Some(format!("write {}", target.display())))
                })?;

                Ok(MutationOutcome {
                    path: target.display().to_string(),
                    backup_path: backup.display().to_string(),
                    applied: true,
                    errors: Vec::new(),
                })
            }
            Outcome::Rejected { errors, .. } => Ok(MutationOutcome {
                path: target.display().to_string(),
                backup_path: backup.display().to_string(),
                applied: false,
                errors,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{self, Rule};
    use crate::error::ErrorCode;
    use tempfile::tempdir;

    #[test]
    fn mutate_applies_transform_and_cleans_backup() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello world").unwrap();

        let mutator = FileMutator::default();
        let outcome = mutator
            .mutate(dir.path(), "a.txt", |text| {
                engine::apply_rule(text, &Rule::new("hello", "goodbye", 1))
            })
            .unwrap();

        assert!(outcome.applied);
        assert!(outcome.errors.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "goodbye world"
        );
        assert!(!dir.path().join("a.txt.bak").exists());
    }

    #[test]
    fn rejected_transform_leaves_target_untouched() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello world").unwrap();

        let mutator = FileMutator::default();
        let outcome = mutator
            .mutate(dir.path(), "a.txt", |text| {
                engine::apply_rule(text, &Rule::new("absent", "x", 1))
            })
            .unwrap();

        assert!(!outcome.applied);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "hello world"
        );
        assert!(!dir.path().join("a.txt.bak").exists());
    }

    #[test]
    fn missing_target_is_a_precondition_error() {
        let dir = tempdir().unwrap();

        let mutator = FileMutator::default();
        let err = mutator
            .mutate(dir.path(), "missing.txt", |text| {
                Outcome::Applied(text.to_string())
            })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::MutateTargetMissing);
    }

    #[test]
    fn stale_backup_blocks_without_touching_anything() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "current").unwrap();
        fs::write(dir.path().join("a.txt.bak"), "from interrupted run").unwrap();

        let mutator = FileMutator::default();
        let err = mutator
            .mutate(dir.path(), "a.txt", |_| Outcome::Applied("new".to_string()))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::MutateStaleBackup);
        // Neither the target nor the recovery copy may change
        assert_eq!(
            fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "current"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("a.txt.bak")).unwrap(),
            "from interrupted run"
        );
    }

    #[test]
    fn backup_holds_original_while_transform_runs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "original content").unwrap();

        let mutator = FileMutator::default();
        let backup = mutator.backup_path(dir.path(), "a.txt");

        mutator
            .mutate(dir.path(), "a.txt", |text| {
                // Recovery point must already exist, byte-for-byte
                let copy = fs::read_to_string(dir.path().join("a.txt.bak")).unwrap();
                assert_eq!(copy, "original content");
                Outcome::Applied(text.to_uppercase())
            })
            .unwrap();

        assert!(!backup.exists());
    }

    #[test]
    fn custom_backup_suffix_is_used() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();

        let mutator = FileMutator::new(".rescue");
        assert_eq!(
            mutator.backup_path(dir.path(), "a.txt"),
            dir.path().join("a.txt.rescue")
        );

        let outcome = mutator
            .mutate(dir.path(), "a.txt", |t| Outcome::Applied(t.repeat(2)))
            .unwrap();

        assert!(outcome.applied);
        assert!(outcome.backup_path.ends_with(".rescue"));
        assert!(!dir.path().join("a.txt.rescue").exists());
    }

    #[test]
    fn chain_rejection_reports_through_outcome() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "A here").unwrap();

        let rules = vec![Rule::new("A", "B", 1), Rule::new("Z", "Y", 1)];
        let mutator = FileMutator::default();
        let outcome = mutator
            .mutate(dir.path(), "a.txt", |text| engine::apply_chain(text, &rules))
            .unwrap();

        assert!(!outcome.applied);
        assert!(outcome.errors[0].contains("'Z'"));
        // Chain failure is a complete no-op on disk
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "A here");
    }
}

//! Git operations used while scaffolding.
//!
//! Thin wrappers over the git CLI; every failure maps to a structured
//! `git.command_failed` error.

use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::command;

/// Clone a git repository to a target directory.
pub fn clone_repo(url: &str, target_dir: &Path) -> Result<()> {
    command::run(
        "git",
        &["clone", url, &target_dir.to_string_lossy()],
        "git clone",
    )
    .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Initialize a fresh repository in an existing directory.
pub fn init_repo(repo_dir: &Path) -> Result<()> {
    command::run_in(&repo_dir.to_string_lossy(), "git", &["init"], "git init")
        .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Stage every file in the repository.
pub fn add_all(repo_dir: &Path) -> Result<()> {
    command::run_in(
        &repo_dir.to_string_lossy(),
        "git",
        &["add", "--all"],
        "git add",
    )
    .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Create a commit with the given message.
pub fn commit(repo_dir: &Path, message: &str) -> Result<()> {
    command::run_in(
        &repo_dir.to_string_lossy(),
        "git",
        &["commit", "--message", message],
        "git commit",
    )
    .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Register a remote named `origin`.
pub fn add_remote(repo_dir: &Path, url: &str) -> Result<()> {
    command::run_in(
        &repo_dir.to_string_lossy(),
        "git",
        &["remote", "add", "origin", url],
        "git remote add",
    )
    .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Force-rename the current branch.
pub fn set_branch(repo_dir: &Path, name: &str) -> Result<()> {
    command::run_in(
        &repo_dir.to_string_lossy(),
        "git",
        &["branch", "-M", name],
        "git branch",
    )
    .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Push the branch and set its upstream on origin.
pub fn push_upstream(repo_dir: &Path, branch: &str) -> Result<()> {
    command::run_in(
        &repo_dir.to_string_lossy(),
        "git",
        &["push", "-u", "origin", branch],
        "git push",
    )
    .map_err(|e| Error::git_command_failed(e.to_string()))?;
    Ok(())
}

/// Whether a directory is inside a git work tree.
pub fn is_git_repo(path: &str) -> bool {
    command::succeeded_in(path, "git", &["rev-parse", "--git-dir"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_a_repository() {
        let dir = tempdir().unwrap();
        init_repo(dir.path()).unwrap();
        assert!(is_git_repo(&dir.path().to_string_lossy()));
    }

    #[test]
    fn is_git_repo_false_for_plain_dir() {
        let dir = tempdir().unwrap();
        assert!(!is_git_repo(&dir.path().to_string_lossy()));
    }

    #[test]
    fn clone_fails_for_bad_url() {
        let dir = tempdir().unwrap();
        let err = clone_repo("/nonexistent/repo.git", &dir.path().join("clone")).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::GitCommandFailed);
    }
}

//! Project scaffolding — clone, relocate, rewrite, re-init.
//!
//! Orchestrates one scaffold run: clone the template repository, prune its
//! VCS metadata, move the package directories to the new identity, rewrite
//! the text markers file by file through the mutator, and initialize a fresh
//! git history. A file whose markers do not match is reported and skipped;
//! the run continues so the operator sees every drifted file at once.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TemplateConfig;
use crate::engine::{self, Rule};
use crate::error::{Error, Result};
use crate::git;
use crate::identity::ProjectIdentity;
use crate::mutator::{FileMutator, MutationOutcome};

/// Everything one scaffold run needs, resolved up front by the caller.
#[derive(Debug, Clone)]
pub struct ScaffoldSpec {
    pub identity: ProjectIdentity,
    pub destination: PathBuf,
    pub template: TemplateConfig,
    /// Remote URL to link and push to, when given.
    pub remote: Option<String>,
}

/// A directory or file moved to match the new identity.
#[derive(Debug, Clone, Serialize)]
pub struct PathRename {
    pub from: String,
    pub to: String,
}

/// The full result of a scaffold run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldReport {
    pub path: String,
    pub package: String,
    pub renames: Vec<PathRename>,
    pub mutations: Vec<MutationOutcome>,
    pub failed_files: usize,
    pub committed: bool,
    pub remote_linked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Run a full scaffold.
pub fn run(spec: &ScaffoldSpec) -> Result<ScaffoldReport> {
    if spec.destination.exists() {
        return Err(Error::scaffold_destination_exists(
            spec.destination.display().to_string(),
        ));
    }

    log_status!(
        "scaffold",
        "Cloning {} into {}",
        spec.template.repo,
        spec.destination.display()
    );
    git::clone_repo(&spec.template.repo, &spec.destination)?;

    prune_dirs(&spec.destination, &spec.template.prune_dirs)?;

    let (package_path, renames) =
        relocate_package(&spec.destination, &spec.identity, &spec.template)?;

    let mutator = FileMutator::new(spec.template.backup_suffix.clone());
    let mutations = rewrite_sources(
        &spec.destination,
        &package_path,
        &spec.identity,
        &spec.template,
        &mutator,
    )?;
    let failed_files = mutations.iter().filter(|m| !m.applied).count();

    log_status!("scaffold", "Initializing git history");
    git::init_repo(&spec.destination)?;
    git::add_all(&spec.destination)?;
    git::commit(&spec.destination, "Initial Commit")?;

    let mut warnings = Vec::new();
    let mut remote_linked = false;
    if let Some(remote) = &spec.remote {
        match link_remote(&spec.destination, remote) {
            Ok(()) => remote_linked = true,
            Err(err) => {
                log_status!("scaffold", "Remote linking failed: {}", err);
                warnings.push(format!("Remote '{}' not linked: {}", remote, err));
            }
        }
    }

    Ok(ScaffoldReport {
        path: spec.destination.display().to_string(),
        package: spec.identity.package.clone(),
        renames,
        mutations,
        failed_files,
        committed: true,
        remote_linked,
        warnings,
    })
}

/// Delete template metadata directories from a fresh clone. Missing
/// directories are fine; the template may have dropped them.
pub fn prune_dirs(destination: &Path, dirs: &[String]) -> Result<()> {
    for dir in dirs {
        let path = destination.join(dir);
        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| {
                Error::internal_io(e.to_string(), Some(format!("remove {}", path.display())))
            })?;
        }
    }
    Ok(())
}

/// Move the template's package directories and main source file to the new
/// identity. Returns the relocated package directory and the renames made,
/// relative to the project root.
pub fn relocate_package(
    destination: &Path,
    identity: &ProjectIdentity,
    template: &TemplateConfig,
) -> Result<(PathBuf, Vec<PathRename>)> {
    let com_dir = destination.join(&template.package_dir);
    let mut renames = Vec::new();

    let author_dir = com_dir.join(&identity.package_author);
    rename_path(
        destination,
        &com_dir.join(&template.author_marker),
        &author_dir,
        &mut renames,
    )?;

    let package_path = author_dir.join(&identity.id);
    rename_path(
        destination,
        &author_dir.join(&template.id_marker),
        &package_path,
        &mut renames,
    )?;

    rename_path(
        destination,
        &package_path.join(template.class_file()),
        &package_path.join(identity.main_file(&template.source_ext)),
        &mut renames,
    )?;

    Ok((package_path, renames))
}

fn rename_path(
    root: &Path,
    from: &Path,
    to: &Path,
    renames: &mut Vec<PathRename>,
) -> Result<()> {
    if from == to {
        return Ok(());
    }

    fs::rename(from, to).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("rename {} -> {}", from.display(), to.display())),
        )
    })?;

    renames.push(PathRename {
        from: relative(root, from),
        to: relative(root, to),
    });
    Ok(())
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Rewrite the template markers across the relocated sources.
///
/// Per-file failures (count mismatches, missing files, stale backups) are
/// recorded in the returned outcomes; only unexpected I/O faults abort.
pub fn rewrite_sources(
    destination: &Path,
    package_path: &Path,
    identity: &ProjectIdentity,
    template: &TemplateConfig,
    mutator: &FileMutator,
) -> Result<Vec<MutationOutcome>> {
    let mut mutations = Vec::new();

    // Every source file carries exactly one package declaration.
    let package_rule = Rule::new(
        format!("package {};", template.package_marker()),
        format!("package {};", identity.package),
        1,
    );
    for file_name in list_source_files(package_path, &template.source_ext)? {
        apply_rules(
            mutator,
            package_path,
            &file_name,
            &[package_rule.clone()],
            &mut mutations,
        );
    }

    // The proxy logs through the main type in two places.
    apply_rules(
        mutator,
        package_path,
        &template.proxy_file,
        &[Rule::new(
            format!("{}.info(", template.class_marker),
            format!("{}.info(", identity.type_name),
            2,
        )],
        &mut mutations,
    );

    // The main class declaration.
    apply_rules(
        mutator,
        package_path,
        &identity.main_file(&template.source_ext),
        &[Rule::new(
            format!("public class {} {{", template.class_marker),
            format!("public class {} {{", identity.type_name),
            1,
        )],
        &mut mutations,
    );

    // Build properties: name, id, and the package marker everywhere it appears.
    let properties_rules = vec![
        Rule::new(
            format!("modName = {}", template.class_marker),
            format!("modName = {}", identity.name),
            1,
        ),
        Rule::new(
            format!("modId = {}", template.id_marker),
            format!("modId = {}", identity.id),
            1,
        ),
        Rule::new(
            template.package_marker(),
            identity.package.clone(),
            template.package_marker_count,
        ),
    ];
    apply_rules(
        mutator,
        destination,
        &template.properties_file,
        &properties_rules,
        &mut mutations,
    );

    Ok(mutations)
}

/// File names (not paths) of source files directly inside `dir`.
fn list_source_files(dir: &Path, source_ext: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(source_ext) && entry.path().is_file() {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

/// Push one file through the mutator, folding precondition errors into a
/// failed outcome so the caller's loop keeps going.
fn apply_rules(
    mutator: &FileMutator,
    dir: &Path,
    file_name: &str,
    rules: &[Rule],
    mutations: &mut Vec<MutationOutcome>,
) {
    match mutator.mutate(dir, file_name, |text| engine::apply_chain(text, rules)) {
        Ok(outcome) => {
            if !outcome.applied {
                log_status!(
                    "scaffold",
                    "Left {} untouched: {}",
                    outcome.path,
                    outcome.errors.join("; ")
                );
            }
            mutations.push(outcome);
        }
        Err(err) => {
            let path = dir.join(file_name);
            log_status!("scaffold", "Cannot rewrite {}: {}", path.display(), err);
            mutations.push(MutationOutcome {
                path: path.display().to_string(),
                backup_path: mutator
                    .backup_path(dir, file_name)
                    .display()
                    .to_string(),
                applied: false,
                errors: vec![format!("{} ({})", err.message, err.code.as_str())],
            });
        }
    }
}

fn link_remote(destination: &Path, remote: &str) -> Result<()> {
    log_status!("scaffold", "Linking remote {}", remote);
    git::add_remote(destination, remote)?;
    git::set_branch(destination, "main")?;
    git::push_upstream(destination, "main")
}

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use stencil::config;
use stencil::identity::ProjectIdentity;
use stencil::scaffold::{self, ScaffoldReport, ScaffoldSpec};

use crate::commands::CmdResult;
use crate::tty;

#[derive(Args)]
pub struct NewArgs {
    /// Project name (prompted when omitted on a TTY)
    pub name: Option<String>,

    /// Author name (defaults to the configured author)
    #[arg(long)]
    pub author: Option<String>,

    /// Directory to create the project under (defaults to the configured workspace root)
    #[arg(long)]
    pub dir: Option<String>,

    /// Remote repository URL to link and push to
    #[arg(long)]
    pub remote: Option<String>,

    /// Template repository URL (overrides the configured template)
    #[arg(long)]
    pub template: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum NewOutput {
    #[serde(rename = "new")]
    New {
        name: String,
        id: String,
        package: String,
        report: ScaffoldReport,
    },
}

pub fn run(args: NewArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<NewOutput> {
    let config = config::load_config();

    let name = resolve_value(args.name, None, "name", "Project name: ")?;
    let author = resolve_value(args.author, config.author.clone(), "author", "Author name: ")?;
    let workspace = resolve_value(
        args.dir,
        config.workspace_root.clone(),
        "dir",
        "Directory to create the project under: ",
    )?;

    let workspace = PathBuf::from(shellexpand::tilde(&workspace).to_string());
    if !workspace.is_dir() {
        return Err(stencil::Error::validation_invalid_argument(
            "dir",
            "Workspace directory does not exist, or is not a directory",
            Some(workspace.display().to_string()),
        ));
    }

    let identity = ProjectIdentity::derive(&author, &name)?;

    let mut template = config.template;
    if let Some(repo) = args.template {
        template.repo = repo;
    }

    let spec = ScaffoldSpec {
        destination: workspace.join(&identity.name),
        identity,
        template,
        remote: args.remote,
    };

    let report = scaffold::run(&spec)?;

    let exit_code = if report.failed_files > 0 { 1 } else { 0 };

    Ok((
        NewOutput::New {
            name: spec.identity.name.clone(),
            id: spec.identity.id.clone(),
            package: spec.identity.package.clone(),
            report,
        },
        exit_code,
    ))
}

/// Resolve a value from flag, then config, then an interactive prompt.
/// Off a TTY the prompt is skipped and the argument is simply missing.
fn resolve_value(
    flag: Option<String>,
    configured: Option<String>,
    field: &str,
    prompt: &str,
) -> stencil::Result<String> {
    if let Some(value) = flag.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }
    if let Some(value) = configured.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }

    if tty::is_stdin_tty() {
        let value = tty::prompt(prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
    }

    Err(stencil::Error::validation_missing_argument(vec![
        field.to_string()
    ]))
}

use clap::{Args, Subcommand};
use serde::Serialize;

use stencil::config::{self, StencilConfig};
use stencil::identity;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Set configuration values
    Set {
        /// Author name for new projects
        #[arg(long)]
        author: Option<String>,
        /// Directory new projects are created under
        #[arg(long)]
        workspace: Option<String>,
        /// Template repository URL
        #[arg(long)]
        template_repo: Option<String>,
    },
    /// Delete the configuration file (reset to defaults)
    Reset,
    /// Show the configuration file path
    Path,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConfigOutput {
    #[serde(rename = "config.show")]
    Show { path: String, config: StencilConfig },
    #[serde(rename = "config.set")]
    Set { path: String, config: StencilConfig },
    #[serde(rename = "config.reset")]
    Reset { deleted: bool },
    #[serde(rename = "config.path")]
    Path { path: String },
}

pub fn run(args: ConfigArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show => {
            let config = config::load_config();
            Ok((
                ConfigOutput::Show {
                    path: config::config_path()?,
                    config,
                },
                0,
            ))
        }
        ConfigCommand::Set {
            author,
            workspace,
            template_repo,
        } => run_set(author, workspace, template_repo),
        ConfigCommand::Reset => {
            let deleted = config::reset_config()?;
            Ok((ConfigOutput::Reset { deleted }, 0))
        }
        ConfigCommand::Path => Ok((
            ConfigOutput::Path {
                path: config::config_path()?,
            },
            0,
        )),
    }
}

fn run_set(
    author: Option<String>,
    workspace: Option<String>,
    template_repo: Option<String>,
) -> CmdResult<ConfigOutput> {
    if author.is_none() && workspace.is_none() && template_repo.is_none() {
        return Err(stencil::Error::validation_missing_argument(vec![
            "author".to_string(),
            "workspace".to_string(),
            "template_repo".to_string(),
        ]));
    }

    let mut config = config::load_config();

    if let Some(author) = author {
        identity::validate_author(&author)?;
        config.author = Some(author);
    }
    if let Some(workspace) = workspace {
        if workspace.trim().is_empty() {
            return Err(stencil::Error::validation_invalid_argument(
                "workspace",
                "Workspace root cannot be empty",
                None,
            ));
        }
        config.workspace_root = Some(workspace);
    }
    if let Some(repo) = template_repo {
        if repo.trim().is_empty() {
            return Err(stencil::Error::validation_invalid_argument(
                "template_repo",
                "Template repository URL cannot be empty",
                None,
            ));
        }
        config.template.repo = repo;
    }

    config::save_config(&config)?;

    Ok((
        ConfigOutput::Set {
            path: config::config_path()?,
            config,
        },
        0,
    ))
}

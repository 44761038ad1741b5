use clap::Args;
use serde::Serialize;
use std::path::Path;

use stencil::engine::{self, Rule};
use stencil::mutator::FileMutator;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RewriteArgs {
    /// Target file path
    pub file: String,

    /// Literal text to search for
    #[arg(long)]
    pub find: Option<String>,

    /// Replacement text
    #[arg(long)]
    pub replace: Option<String>,

    /// Exact number of occurrences the search text must have (0 = must be absent)
    #[arg(long, default_value_t = 1)]
    pub expect: usize,

    /// JSON rule chain (positional alternatives: @file, - for stdin):
    /// [{"find": "...", "replace": "...", "expected": 1}, ...]
    #[arg(long)]
    pub rules: Option<String>,

    /// Backup file suffix used during the rewrite
    #[arg(long, default_value = ".bak")]
    pub backup_suffix: String,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RewriteOutput {
    #[serde(rename = "rewrite")]
    Rewrite {
        path: String,
        rules: usize,
        applied: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        errors: Vec<String>,
    },
}

pub fn run(args: RewriteArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RewriteOutput> {
    let rules = parse_rules(&args)?;

    let target = Path::new(&args.file);
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            stencil::Error::validation_invalid_argument(
                "file",
                "Path has no file name",
                Some(args.file.clone()),
            )
        })?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let mutator = FileMutator::new(args.backup_suffix.clone());
    let outcome = mutator.mutate(dir, &file_name, |text| engine::apply_chain(text, &rules))?;

    let exit_code = if outcome.applied { 0 } else { 1 };

    Ok((
        RewriteOutput::Rewrite {
            path: outcome.path,
            rules: rules.len(),
            applied: outcome.applied,
            errors: outcome.errors,
        },
        exit_code,
    ))
}

/// Build the rule chain from either --rules JSON or the --find/--replace pair.
fn parse_rules(args: &RewriteArgs) -> stencil::Result<Vec<Rule>> {
    if let Some(spec) = &args.rules {
        if args.find.is_some() || args.replace.is_some() {
            return Err(stencil::Error::validation_invalid_argument(
                "rules",
                "--rules cannot be combined with --find/--replace",
                None,
            ));
        }

        let raw = crate::commands::read_json_spec_to_string(spec)?;
        let rules: Vec<Rule> = serde_json::from_str(&raw)
            .map_err(|e| stencil::Error::validation_invalid_json(e, Some("parse --rules".to_string())))?;

        if rules.is_empty() {
            return Err(stencil::Error::validation_invalid_argument(
                "rules",
                "Rule chain is empty",
                None,
            ));
        }
        return Ok(rules);
    }

    match (&args.find, &args.replace) {
        (Some(find), Some(replace)) => Ok(vec![Rule::new(find, replace, args.expect)]),
        _ => Err(stencil::Error::validation_missing_argument(vec![
            "find".to_string(),
            "replace".to_string(),
        ])),
    }
}

use std::io::Read;
use std::path::Path;

pub type CmdResult<T> = stencil::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod config;
pub mod new;
pub mod rewrite;

/// Read a JSON spec from a string, a file (@path), or stdin (-).
pub fn read_json_spec_to_string(spec: &str) -> stencil::Result<String> {
    use std::io::IsTerminal;

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(stencil::Error::validation_invalid_argument(
                "json",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
            ));
        }
        stdin.read_to_string(&mut buf).map_err(|e| {
            stencil::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(stencil::Error::validation_invalid_argument(
                "json",
                "Invalid JSON spec '@' (missing file path)",
                None,
            ));
        }
        return std::fs::read_to_string(Path::new(path)).map_err(|e| {
            stencil::Error::internal_io(e.to_string(), Some(format!("read {}", path)))
        });
    }

    Ok(spec.to_string())
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (stencil::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::New(args) => dispatch!(args, global, new),
        crate::Commands::Rewrite(args) => dispatch!(args, global, rewrite),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}

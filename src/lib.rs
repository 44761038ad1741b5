/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("scaffold", "Cloning {} into {}", repo, path);
/// log_status!("rewrite", "Rewriting markers in {}", file);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod config;
pub mod engine;
pub mod error;
pub mod git;
pub mod identity;
pub mod mutator;
pub mod scaffold;
pub mod utils;

pub(crate) mod paths;

// Re-exports for convenient access
pub use error::{Error, ErrorCode, Result};

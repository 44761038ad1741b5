use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base stencil config directory (universal ~/.config/stencil/ on all platforms)
pub fn stencil() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("stencil"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("stencil"))
    }
}

/// Global stencil.json config file path
pub fn stencil_json() -> Result<PathBuf> {
    Ok(stencil()?.join("stencil.json"))
}

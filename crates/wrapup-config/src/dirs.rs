//! XDG base directory lookup.
//!
//! `$XDG_CACHE_HOME` / `$XDG_CONFIG_HOME` are used only when set, non-empty
//! and pointing at an existing directory; otherwise `$HOME/.cache` /
//! `$HOME/.config`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Name of the wrapup directory under the config home.
const APP_DIR: &str = "wrapup";
/// Name of the tldr directory under the cache home.
const PAGES_DIR: &str = "tldr";

/// `~/.cache/tldr` (or `$XDG_CACHE_HOME/tldr`).
///
/// # Errors
///
/// Returns [`ConfigError::NoHome`] if the XDG variable is unusable and
/// `$HOME` is not set.
pub fn cache_dir() -> Result<PathBuf, ConfigError> {
    home_dir("XDG_CACHE_HOME", ".cache").map(|dir| dir.join(PAGES_DIR))
}

/// `~/.config/wrapup` (or `$XDG_CONFIG_HOME/wrapup`).
///
/// # Errors
///
/// Returns [`ConfigError::NoHome`] if the XDG variable is unusable and
/// `$HOME` is not set.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    home_dir("XDG_CONFIG_HOME", ".config").map(|dir| dir.join(APP_DIR))
}

fn home_dir(xdg_var: &str, fallback: &str) -> Result<PathBuf, ConfigError> {
    resolve_home_dir(
        std::env::var_os(xdg_var),
        std::env::var_os("HOME"),
        fallback,
    )
}

fn resolve_home_dir(
    xdg: Option<OsString>,
    home: Option<OsString>,
    fallback: &str,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = xdg.filter(|d| !d.is_empty())
        && Path::new(&dir).exists()
    {
        let dir = dir.to_string_lossy();
        let trimmed = dir.trim_end_matches('/');
        return Ok(PathBuf::from(if trimmed.is_empty() { "/" } else { trimmed }));
    }

    let home = home.filter(|h| !h.is_empty()).ok_or(ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(fallback))
}

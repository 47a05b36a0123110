//! Data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.cache/talk-topic/`
//! - macOS: `~/Library/Caches/talk-topic/`
//! - Windows: `%LOCALAPPDATA%\talk-topic\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "talk-topic";

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

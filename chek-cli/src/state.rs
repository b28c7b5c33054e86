use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CHEK_HOME`, or `~/.chek`.
pub fn chek_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CHEK_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".chek"))
}

pub fn ensure_chek_home() -> Result<PathBuf> {
    let dir = chek_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Resolve a configured path: absolute paths are kept, relative ones live under the home dir.
pub fn resolve(configured: &str) -> Result<PathBuf> {
    let p = PathBuf::from(configured);
    if p.is_absolute() {
        return Ok(p);
    }
    Ok(ensure_chek_home()?.join(p))
}

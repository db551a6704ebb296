use anyhow::{Context, Result};
use std::path::PathBuf;

/// Data directory for the database and logs, created if absent.
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("could not determine data directory")?
        .join("tandem");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default database path inside the data directory.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("tandem.db"))
}

//! Where the sales ledger lives on disk.

use crate::config::APP_DIR;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Candidate ledger directories, most preferred first: the home directory,
/// the platform data directory, then the working directory.
fn candidates() -> Vec<PathBuf> {
    let home = home::home_dir().map(|h| h.join(APP_DIR));
    let data = dirs::data_local_dir().map(|d| d.join("warranty-countdown"));
    home.into_iter()
        .chain(data)
        .chain(std::iter::once(PathBuf::from(APP_DIR)))
        .collect()
}

/// Resolve the ledger directory. An explicit override must be usable or the
/// call fails; otherwise the first writable candidate wins.
pub fn get_state_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.to_path_buf());
    }

    let mut last_err = None;
    for dir in candidates() {
        match ensure_writable(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unwritable state directory");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no state directory candidates")))
        .context("No writable state directory; set state.state_dir_override in config")
}

/// Create `dir` if needed and prove it accepts writes.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let marker = dir.join(".write_test");
    fs::write(&marker, b"ok").with_context(|| format!("{} is not writable", dir.display()))?;
    let _ = fs::remove_file(&marker);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_dir_takes_priority() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("ledger-home");

        assert_eq!(get_state_dir(Some(dir.as_path())).unwrap(), dir);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_override_that_is_a_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, b"x").unwrap();

        assert!(get_state_dir(Some(file.as_path())).is_err());
    }

    #[test]
    fn test_ensure_writable_cleans_up_marker() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        ensure_writable(&nested).unwrap();
        assert!(nested.exists());
        assert!(!nested.join(".write_test").exists());
    }

    #[test]
    fn test_working_directory_is_last_resort() {
        let dirs = candidates();
        assert_eq!(dirs.last(), Some(&PathBuf::from(APP_DIR)));
    }
}

//! On-disk home of the [`Ledger`]: one JSON document plus a sidecar lock file.

use super::Ledger;
use crate::platform::get_state_dir;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Format written by this build. Files carrying any other number are refused
/// rather than silently reinterpreted.
pub const LEDGER_VERSION: u32 = 1;

const LEDGER_FILE: &str = "ledger.json";
const LOCK_FILE: &str = "ledger.lock";

#[derive(Debug, Clone)]
pub struct LedgerStore {
    ledger_path: PathBuf,
    lock_path: PathBuf,
}

/// Exclusive hold on the lock file, released on drop so every exit path
/// from [`LedgerStore::update`] lets the next writer in.
struct LockGuard {
    file: File,
}

impl LockGuard {
    fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("Failed to open lock file {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", path.display()))?;
        Ok(Self { file })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %e, "failed to release ledger lock");
        }
    }
}

impl LedgerStore {
    /// Ledger kept directly inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            ledger_path: dir.join(LEDGER_FILE),
            lock_path: dir.join(LOCK_FILE),
        }
    }

    /// Ledger in the resolved state directory.
    pub fn open(state_dir_override: Option<&Path>) -> Result<Self> {
        Ok(Self::in_dir(&get_state_dir(state_dir_override)?))
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Snapshot of the ledger without taking the lock. A missing file is an
    /// empty ledger.
    pub fn read(&self) -> Result<Ledger> {
        let content = match fs::read_to_string(&self.ledger_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Ledger::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read ledger {}", self.ledger_path.display())
                });
            }
        };
        decode(&content)
            .with_context(|| format!("Invalid ledger {}", self.ledger_path.display()))
    }

    /// Apply `f` under the lock. The ledger is written back only when `f`
    /// succeeds, so a rejected sale or claim leaves the file untouched.
    pub fn update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Ledger) -> Result<R>,
    {
        if let Some(dir) = self.lock_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let _guard = LockGuard::acquire(&self.lock_path)?;

        let mut ledger = self.read()?;
        let out = f(&mut ledger)?;
        self.write(&ledger)?;
        Ok(out)
    }

    fn write(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger).context("Failed to serialize ledger")?;

        // Replace by rename; readers that skip the lock see old or new, never half
        let staging = self.ledger_path.with_extension("json.new");
        fs::write(&staging, json)
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.ledger_path)
            .with_context(|| format!("Failed to replace {}", self.ledger_path.display()))?;

        tracing::debug!(
            path = %self.ledger_path.display(),
            sales = ledger.sales.len(),
            claims = ledger.claims.len(),
            "ledger written"
        );
        Ok(())
    }
}

fn decode(content: &str) -> Result<Ledger> {
    if content.trim().is_empty() {
        return Ok(Ledger::default());
    }

    // Check the format number before the body so a newer file reports its
    // version instead of whatever field it happens to trip over
    #[derive(serde::Deserialize)]
    struct Header {
        version: u32,
    }
    let header: Header =
        serde_json::from_str(content).context("Ledger has no readable version")?;
    if header.version != LEDGER_VERSION {
        anyhow::bail!(
            "Unsupported ledger version {} (this build reads version {})",
            header.version,
            LEDGER_VERSION
        );
    }

    serde_json::from_str(content).context("Failed to parse ledger records")
}

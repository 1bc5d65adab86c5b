use crate::error::{LotteryError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const LOTTERY_DIR: &str = ".lottery";
pub const LEDGER_FILE: &str = ".lottery/ledger.yaml";
pub const CONFIG_FILE: &str = ".lottery/config.yaml";
pub const LOCK_FILE: &str = ".lottery/ledger.lock";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn lottery_dir(root: &Path) -> PathBuf {
    root.join(LOTTERY_DIR)
}

pub fn ledger_path(root: &Path) -> PathBuf {
    root.join(LEDGER_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn lock_path(root: &Path) -> PathBuf {
    root.join(LOCK_FILE)
}

/// Fails with `NotInitialized` unless `<root>/.lottery/` exists.
pub fn require_initialized(root: &Path) -> Result<()> {
    if lottery_dir(root).is_dir() {
        Ok(())
    } else {
        Err(LotteryError::NotInitialized)
    }
}

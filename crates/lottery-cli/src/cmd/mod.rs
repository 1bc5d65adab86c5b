pub mod clear;
pub mod init;
pub mod pairings;
pub mod participants;
pub mod run;
pub mod serve;
pub mod status;

use lottery_core::{paths, Controller};
use std::path::Path;

/// Controller for an initialized root.
pub(crate) fn open(root: &Path) -> anyhow::Result<Controller> {
    paths::require_initialized(root)?;
    Ok(Controller::open(root)?)
}

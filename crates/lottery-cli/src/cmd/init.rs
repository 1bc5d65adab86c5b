use anyhow::Context;
use lottery_core::{config::Config, io, paths, store::Ledger};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing lunch lottery in: {}", root.display());

    let dir = paths::lottery_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_yaml = serde_yaml::to_string(&Config::default())?;
    if io::write_if_missing(&paths::config_path(root), config_yaml.as_bytes())? {
        println!("  created {}", paths::CONFIG_FILE);
    } else {
        // Existing config must still parse.
        Config::load(root).context("existing config is invalid")?;
        println!("  kept    {}", paths::CONFIG_FILE);
    }

    let ledger_yaml = serde_yaml::to_string(&Ledger::default())?;
    if io::write_if_missing(&paths::ledger_path(root), ledger_yaml.as_bytes())? {
        println!("  created {}", paths::LEDGER_FILE);
    } else {
        println!("  kept    {}", paths::LEDGER_FILE);
    }

    println!("Signups go to sheet A. Set the mail API key env var to send invites.");
    Ok(())
}

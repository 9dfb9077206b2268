//! `wpsh init` — write a starter config file.

use crate::config::Config;
use anyhow::bail;

pub fn run() -> anyhow::Result<()> {
    let path = Config::path()?;
    if path.exists() {
        bail!("config already exists at {}", path.display());
    }

    Config::starter().save_to(&path)?;
    println!("Wrote starter config to {}", path.display());
    println!("Edit the server entry, then run `wpsh doctor` to verify the connection.");
    Ok(())
}

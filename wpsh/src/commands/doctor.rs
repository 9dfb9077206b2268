//! `wpsh doctor` — verify the remote installation.

use crate::config::Config;

pub async fn run(config: &Config, server: Option<&str>) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let report = client.verify_installation().await?;
    match report.version {
        Some(version) => println!("{version}"),
        None if report.verified => println!("WP-CLI responded, but without a version line"),
        None => println!("verification was inconclusive; see the log for details"),
    }

    if let Some(core) = client.core_version().await {
        println!("WordPress {core}");
    }
    if client.core_is_installed().await {
        println!("Installation OK at {}", client.wp_path());
    } else {
        println!("WordPress is not installed at {}", client.wp_path());
    }
    Ok(())
}

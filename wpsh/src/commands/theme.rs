//! `wpsh theme` — theme management.

use crate::config::Config;

pub async fn list(config: &Config, server: Option<&str>) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let themes = client.list_themes(&[]).await?;
    if themes.is_empty() {
        println!("No themes");
        return Ok(());
    }

    println!("{:<24}  {:<10}  {}", "NAME", "STATUS", "VERSION");
    for row in &themes {
        println!(
            "{:<24}  {:<10}  {}",
            super::field(row, &["name", "title"]),
            super::field(row, &["status"]),
            super::field(row, &["version"]),
        );
    }
    Ok(())
}

pub async fn activate(config: &Config, server: Option<&str>, theme: &str) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;
    client.activate_theme(theme).await?;
    println!("Activated theme {theme}");
    Ok(())
}

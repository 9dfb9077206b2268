//! `wpsh list` — tabular post listing.

use crate::config::Config;

pub async fn run(
    config: &Config,
    server: Option<&str>,
    post_type: &str,
    status: Option<&str>,
) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let mut filters: Vec<(&str, &str)> = Vec::new();
    if let Some(status) = status {
        filters.push(("post_status", status));
    }

    let posts = client.list_posts(post_type, &filters).await?;
    if posts.is_empty() {
        println!("No {post_type} entries");
        return Ok(());
    }

    println!("{:>6}  {:<10}  {:<19}  {}", "ID", "STATUS", "DATE", "TITLE");
    for row in &posts {
        println!(
            "{:>6}  {:<10}  {:<19}  {}",
            super::id_field(row),
            super::field(row, &["post_status"]),
            super::field(row, &["post_date"]),
            super::field(row, &["post_title"]),
        );
    }
    Ok(())
}

//! `wpsh find` — client-side title search over the post list.

use crate::config::Config;

pub async fn run(
    config: &Config,
    server: Option<&str>,
    text: &str,
    post_type: &str,
) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let posts = client.list_posts(post_type, &[]).await?;
    let needle = text.to_lowercase();
    let matches: Vec<_> = posts
        .iter()
        .filter(|row| {
            super::field(row, &["post_title"])
                .to_lowercase()
                .contains(&needle)
        })
        .collect();

    if matches.is_empty() {
        println!("No {post_type} matches {text:?}");
        return Ok(());
    }

    for row in matches {
        println!(
            "{:>6}  {:<10}  {}",
            super::id_field(row),
            super::field(row, &["post_status"]),
            super::field(row, &["post_title"]),
        );
    }
    Ok(())
}

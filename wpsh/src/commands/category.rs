//! `wpsh category` — category management.

use crate::config::Config;
use anyhow::Context;
use wp_adapter::WpClient;

pub async fn list(config: &Config, server: Option<&str>) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let categories = client.list_categories(None).await?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:>6}  {:>6}  {:<24}  {}", "ID", "POSTS", "SLUG", "NAME");
    for category in &categories {
        println!(
            "{:>6}  {:>6}  {:<24}  {}",
            category.term_id,
            category.count.unwrap_or(0),
            category.slug,
            category.name,
        );
    }
    Ok(())
}

pub async fn create(
    config: &Config,
    server: Option<&str>,
    name: &str,
    parent: Option<u64>,
) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let parent = parent.map(|id| id.to_string());
    let mut options: Vec<(&str, &str)> = Vec::new();
    if let Some(parent) = &parent {
        options.push(("parent", parent));
    }

    let term_id = client.create_term("category", name, &options).await?;
    println!("Created category {term_id} ({name})");
    Ok(())
}

pub async fn set(
    config: &Config,
    server: Option<&str>,
    post_id: u64,
    categories: &[String],
) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let mut ids = Vec::with_capacity(categories.len());
    for selector in categories {
        ids.push(resolve(&client, selector).await?);
    }

    client.set_post_categories(post_id, &ids).await?;
    println!("Set {} categor(ies) on post {post_id}", ids.len());
    Ok(())
}

/// A selector is either a numeric term ID or a category name/slug.
async fn resolve(client: &WpClient, selector: &str) -> anyhow::Result<u64> {
    if let Ok(id) = selector.parse::<u64>() {
        return Ok(id);
    }
    let category = client
        .get_category_by_name(selector)
        .await?
        .with_context(|| format!("category '{selector}' does not exist"))?;
    Ok(category.term_id)
}

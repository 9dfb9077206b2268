//! `wpsh create` — create one post, or bulk-create from a JSON file.

use crate::config::Config;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use wp_adapter::WpClient;

pub struct CreateArgs<'a> {
    /// Post title, or a path to a `.json` file holding an array of posts.
    pub target: &'a str,
    pub content: Option<&'a str>,
    pub status: &'a str,
    pub post_type: &'a str,
    pub category: Option<&'a str>,
    pub category_id: Option<u64>,
}

pub async fn run(config: &Config, server: Option<&str>, args: CreateArgs<'_>) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    if args.target.ends_with(".json") && Path::new(args.target).is_file() {
        return run_bulk(&client, args.target).await;
    }

    let category_id = super::resolve_category(&client, args.category, args.category_id).await?;

    let mut fields: Vec<(&str, &str)> = vec![
        ("post_title", args.target),
        ("post_status", args.status),
        ("post_type", args.post_type),
    ];
    if let Some(content) = args.content {
        fields.push(("post_content", content));
    }

    let post_id = client.create_post(&fields).await?;
    println!("Created post {post_id}");

    if let Some(category_id) = category_id {
        client.set_post_categories(post_id, &[category_id]).await?;
        println!("Assigned category {category_id}");
    }
    Ok(())
}

/// Creates posts sequentially from a JSON array file. Per-item failures are
/// logged and the loop continues; the summary reports both counts.
async fn run_bulk(client: &WpClient, path: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {path}"))?;
    let items: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("{path} must contain a JSON array of posts"))?;

    let mut created = 0usize;
    let mut failed = 0usize;

    for (index, item) in items.iter().enumerate() {
        match create_one(client, item).await {
            Ok(post_id) => {
                println!("[{}/{}] created post {post_id}", index + 1, items.len());
                created += 1;
            }
            Err(e) => {
                tracing::error!(index, error = %e, "skipping post");
                failed += 1;
            }
        }
    }

    println!("Done: {created} created, {failed} failed");
    Ok(())
}

async fn create_one(client: &WpClient, item: &Value) -> anyhow::Result<u64> {
    let object = item.as_object().context("each post must be a JSON object")?;

    let mut fields: Vec<(&str, &str)> = Vec::with_capacity(object.len());
    for (key, value) in object {
        if key == "category" || key == "category_ids" {
            continue;
        }
        let value = value
            .as_str()
            .with_context(|| format!("field '{key}' must be a string"))?;
        fields.push((key.as_str(), value));
    }
    if !object.contains_key("post_title") {
        anyhow::bail!("missing required field 'post_title'");
    }

    let post_id = client.create_post(&fields).await?;

    if let Some(name) = object.get("category").and_then(Value::as_str) {
        if let Some(category_id) = super::resolve_category(client, Some(name), None).await? {
            client.set_post_categories(post_id, &[category_id]).await?;
        }
    } else if let Some(ids) = object.get("category_ids").and_then(Value::as_array) {
        let ids: Vec<u64> = ids.iter().filter_map(Value::as_u64).collect();
        if !ids.is_empty() {
            client.set_post_categories(post_id, &ids).await?;
        }
    }

    Ok(post_id)
}

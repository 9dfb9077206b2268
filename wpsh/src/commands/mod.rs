//! CLI command handlers.
//!
//! Handlers stay thin: parse-level types come in, adapter calls go out,
//! results print to stdout. Failures bubble up as `anyhow` errors and the
//! binary exits non-zero; there is no rollback.

pub mod category;
pub mod create;
pub mod doctor;
pub mod find;
pub mod init;
pub mod list;
pub mod theme;
pub mod update;

use crate::config::{Config, ServerConfig};
use anyhow::Context;
use std::sync::Arc;
use wp_adapter::{SshShell, SshTarget, WpClient};

/// Builds a connected [`WpClient`] for the selected server.
pub fn client_for(config: &Config, server: Option<&str>) -> anyhow::Result<WpClient> {
    let (name, server) = config.server(server)?;
    tracing::debug!(server = name, host = %server.hostname, "connecting");
    connect(server).with_context(|| format!("could not reach server '{name}'"))
}

fn connect(server: &ServerConfig) -> anyhow::Result<WpClient> {
    let mut target = SshTarget::new(&server.hostname, &server.username);
    target.port = server.port;
    target.identity_file = server.identity_file.as_ref().map(Into::into);

    let shell = SshShell::connect(target)?;
    Ok(WpClient::new(Arc::new(shell), &server.wp_path)
        .with_php_bin(&server.php_bin)
        .with_wp_cli(&server.wp_cli))
}

/// Resolves a category selector (`--category` name or `--category-id`) to a
/// term ID.
pub async fn resolve_category(
    client: &WpClient,
    name: Option<&str>,
    id: Option<u64>,
) -> anyhow::Result<Option<u64>> {
    if let Some(id) = id {
        return Ok(Some(id));
    }
    let Some(name) = name else {
        return Ok(None);
    };
    let category = client
        .get_category_by_name(name)
        .await?
        .with_context(|| format!("category '{name}' does not exist"))?;
    Ok(Some(category.term_id))
}

/// First non-empty string field among `keys` in a JSON object, for tabular
/// output over loosely-shaped WP-CLI rows.
fn field<'a>(row: &'a serde_json::Value, keys: &[&str]) -> &'a str {
    keys.iter()
        .find_map(|key| row.get(key).and_then(serde_json::Value::as_str))
        .unwrap_or("-")
}

/// Post ID rendered from either a number or a string field.
fn id_field(row: &serde_json::Value) -> String {
    match row.get("ID") {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => "-".to_string(),
    }
}

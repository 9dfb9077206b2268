//! Post operations: CRUD, listing, and post meta.

use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;
use serde_json::Value;

pub(crate) fn parse_id(text: &str) -> Result<u64, WpCliError> {
    text.trim()
        .parse()
        .map_err(|_| WpCliError::Parse(format!("expected a numeric ID, got: {text:?}")))
}

impl WpClient {
    /// Fetches a post as a JSON object.
    pub async fn get_post(&self, post_id: u64) -> Result<Value, WpCliError> {
        let cmd = WpCommand::new(["post", "get"])
            .arg(post_id)
            .option("format", "json");
        self.invoke(&cmd).await?.into_json()
    }

    /// Fetches a single field of a post (e.g. `post_content`).
    pub async fn get_post_field(&self, post_id: u64, field: &str) -> Result<String, WpCliError> {
        let cmd = WpCommand::new(["post", "get"])
            .arg(post_id)
            .option("field", field);
        Ok(self.invoke(&cmd).await?.into_text())
    }

    /// Creates a post from the given field map and returns its ID.
    ///
    /// When `post_author` is absent, a default author is resolved
    /// best-effort (user 1, then the first administrator); resolution
    /// failure never aborts the create — WP-CLI applies its own default.
    pub async fn create_post(&self, fields: &[(&str, &str)]) -> Result<u64, WpCliError> {
        let mut cmd = WpCommand::new(["post", "create"]);
        for (name, value) in fields {
            cmd = cmd.option(*name, value);
        }

        if !fields.iter().any(|(name, _)| *name == "post_author") {
            if let Some(author) = self.default_author().await {
                tracing::debug!(%author, "using default author");
                cmd = cmd.option("post_author", &author);
            }
        }

        let out = self.invoke(&cmd.flag("porcelain")).await?.into_text();
        let post_id = parse_id(&out)?;
        tracing::info!(post_id, "created post");
        Ok(post_id)
    }

    /// Updates fields of an existing post.
    pub async fn update_post(&self, post_id: u64, fields: &[(&str, &str)]) -> Result<(), WpCliError> {
        let mut cmd = WpCommand::new(["post", "update"]).arg(post_id);
        for (name, value) in fields {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?;
        tracing::info!(post_id, "updated post");
        Ok(())
    }

    /// Deletes a post, optionally bypassing the trash.
    pub async fn delete_post(&self, post_id: u64, force: bool) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["post", "delete"])
            .arg(post_id)
            .flag_if("force", force);
        self.invoke(&cmd).await?;
        tracing::info!(post_id, "deleted post");
        Ok(())
    }

    /// Returns true when the post exists. Errors convert to `false`.
    pub async fn post_exists(&self, post_id: u64) -> bool {
        let cmd = WpCommand::new(["post", "exists"]).arg(post_id);
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::debug!(post_id, "post exists");
                true
            }
            Err(_) => {
                tracing::debug!(post_id, "post does not exist");
                false
            }
        }
    }

    /// Lists posts of `post_type` with additional `--name='value'` filters.
    pub async fn list_posts(
        &self,
        post_type: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Value>, WpCliError> {
        let mut cmd = WpCommand::new(["post", "list"])
            .option("post_type", post_type)
            .option("format", "json");
        for (name, value) in filters {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?.into_array()
    }

    /// Fetches one post meta value.
    pub async fn get_post_meta(&self, post_id: u64, key: &str) -> Result<String, WpCliError> {
        let cmd = WpCommand::new(["post", "meta", "get"]).arg(post_id).arg(key);
        Ok(self.invoke(&cmd).await?.into_text())
    }

    /// Lists all meta entries of a post.
    pub async fn list_post_meta(&self, post_id: u64) -> Result<Vec<Value>, WpCliError> {
        let cmd = WpCommand::new(["post", "meta", "list"])
            .arg(post_id)
            .option("format", "json");
        self.invoke(&cmd).await?.into_array()
    }

    /// Sets a post meta value.
    pub async fn set_post_meta(&self, post_id: u64, key: &str, value: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["post", "meta", "set"])
            .arg(post_id)
            .arg(key)
            .quoted_arg(value);
        self.invoke(&cmd).await?;
        tracing::info!(post_id, key, "set post meta");
        Ok(())
    }

    /// Updates a post meta value.
    pub async fn update_post_meta(
        &self,
        post_id: u64,
        key: &str,
        value: &str,
    ) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["post", "meta", "update"])
            .arg(post_id)
            .arg(key)
            .quoted_arg(value);
        self.invoke(&cmd).await?;
        tracing::info!(post_id, key, "updated post meta");
        Ok(())
    }

    /// Deletes a post meta entry.
    pub async fn delete_post_meta(&self, post_id: u64, key: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["post", "meta", "delete"]).arg(post_id).arg(key);
        self.invoke(&cmd).await?;
        tracing::info!(post_id, key, "deleted post meta");
        Ok(())
    }
}

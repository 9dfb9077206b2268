//! Comment operations.

use super::posts::parse_id;
use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;
use serde_json::Value;

impl WpClient {
    /// Lists comments with `--name='value'` filters.
    pub async fn list_comments(&self, filters: &[(&str, &str)]) -> Result<Vec<Value>, WpCliError> {
        let mut cmd = WpCommand::new(["comment", "list"]).option("format", "json");
        for (name, value) in filters {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?.into_array()
    }

    /// Fetches a comment as a JSON object.
    pub async fn get_comment(&self, comment_id: u64) -> Result<Value, WpCliError> {
        let cmd = WpCommand::new(["comment", "get"])
            .arg(comment_id)
            .option("format", "json");
        self.invoke(&cmd).await?.into_json()
    }

    /// Creates a comment on a post and returns its ID.
    pub async fn create_comment(
        &self,
        post_id: u64,
        fields: &[(&str, &str)],
    ) -> Result<u64, WpCliError> {
        let mut cmd = WpCommand::new(["comment", "create"]).arg(post_id);
        for (name, value) in fields {
            cmd = cmd.option(*name, value);
        }
        let out = self.invoke(&cmd.flag("porcelain")).await?.into_text();
        let comment_id = parse_id(&out)?;
        tracing::info!(post_id, comment_id, "created comment");
        Ok(comment_id)
    }

    /// Updates fields of a comment.
    pub async fn update_comment(
        &self,
        comment_id: u64,
        fields: &[(&str, &str)],
    ) -> Result<(), WpCliError> {
        let mut cmd = WpCommand::new(["comment", "update"]).arg(comment_id);
        for (name, value) in fields {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?;
        tracing::info!(comment_id, "updated comment");
        Ok(())
    }

    /// Deletes a comment, optionally bypassing the trash.
    pub async fn delete_comment(&self, comment_id: u64, force: bool) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["comment", "delete"])
            .arg(comment_id)
            .flag_if("force", force);
        self.invoke(&cmd).await?;
        tracing::info!(comment_id, "deleted comment");
        Ok(())
    }

    /// Approves a held comment.
    pub async fn approve_comment(&self, comment_id: u64) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["comment", "approve"]).arg(comment_id);
        self.invoke(&cmd).await?;
        tracing::info!(comment_id, "approved comment");
        Ok(())
    }
}

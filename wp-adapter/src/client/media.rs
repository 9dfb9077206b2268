//! Media/attachment operations.

use super::posts::parse_id;
use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;
use serde_json::Value;

impl WpClient {
    /// Imports a media file already present on the remote host, optionally
    /// attaching it to a post. Returns the attachment ID.
    pub async fn import_media(
        &self,
        file_path: &str,
        post_id: Option<u64>,
        fields: &[(&str, &str)],
    ) -> Result<u64, WpCliError> {
        let mut cmd = WpCommand::new(["media", "import"])
            .quoted_arg(file_path)
            .option_opt("post_id", post_id);
        for (name, value) in fields {
            cmd = cmd.option(*name, value);
        }
        let out = self.invoke(&cmd.flag("porcelain")).await?.into_text();
        let attachment_id = parse_id(&out)?;
        tracing::info!(file_path, attachment_id, "imported media");
        Ok(attachment_id)
    }

    /// Fetches the public URL (`guid`) of an attachment.
    pub async fn media_url(&self, attachment_id: u64) -> Result<String, WpCliError> {
        let url = self.get_post_field(attachment_id, "guid").await?;
        tracing::debug!(attachment_id, %url, "retrieved attachment URL");
        Ok(url)
    }

    /// Lists attachments, optionally filtered to a parent post.
    pub async fn list_media(
        &self,
        post_id: Option<u64>,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Value>, WpCliError> {
        let mut cmd = WpCommand::new(["post", "list"])
            .option("post_type", "attachment")
            .option("format", "json")
            .option_opt("post_parent", post_id);
        for (name, value) in filters {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?.into_array()
    }
}

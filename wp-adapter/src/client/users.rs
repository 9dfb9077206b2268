//! User operations, user meta, and default-author resolution.

use super::posts::parse_id;
use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;
use serde_json::Value;

impl WpClient {
    /// Lists users with `--name='value'` filters (role, search, ...).
    pub async fn list_users(&self, filters: &[(&str, &str)]) -> Result<Vec<Value>, WpCliError> {
        let mut cmd = WpCommand::new(["user", "list"]).option("format", "json");
        for (name, value) in filters {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?.into_array()
    }

    /// Fetches a user as a JSON object.
    pub async fn get_user(&self, user_id: u64) -> Result<Value, WpCliError> {
        let cmd = WpCommand::new(["user", "get"])
            .arg(user_id)
            .option("format", "json");
        self.invoke(&cmd).await?.into_json()
    }

    /// Creates a user and returns its ID.
    pub async fn create_user(
        &self,
        login: &str,
        email: &str,
        fields: &[(&str, &str)],
    ) -> Result<u64, WpCliError> {
        let mut cmd = WpCommand::new(["user", "create"]).arg(login).arg(email);
        for (name, value) in fields {
            cmd = cmd.option(*name, value);
        }
        let out = self.invoke(&cmd.flag("porcelain")).await?.into_text();
        let user_id = parse_id(&out)?;
        tracing::info!(login, user_id, "created user");
        Ok(user_id)
    }

    /// Updates fields of an existing user.
    pub async fn update_user(&self, user_id: u64, fields: &[(&str, &str)]) -> Result<(), WpCliError> {
        let mut cmd = WpCommand::new(["user", "update"]).arg(user_id);
        for (name, value) in fields {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?;
        tracing::info!(user_id, "updated user");
        Ok(())
    }

    /// Deletes a user, optionally reassigning their content.
    pub async fn delete_user(&self, user_id: u64, reassign: Option<u64>) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["user", "delete"])
            .arg(user_id)
            .flag("yes")
            .option_opt("reassign", reassign);
        self.invoke(&cmd).await?;
        tracing::info!(user_id, "deleted user");
        Ok(())
    }

    /// Fetches one user meta value.
    pub async fn get_user_meta(&self, user_id: u64, key: &str) -> Result<String, WpCliError> {
        let cmd = WpCommand::new(["user", "meta", "get"]).arg(user_id).arg(key);
        Ok(self.invoke(&cmd).await?.into_text())
    }

    /// Lists all meta entries of a user.
    pub async fn list_user_meta(&self, user_id: u64) -> Result<Vec<Value>, WpCliError> {
        let cmd = WpCommand::new(["user", "meta", "list"])
            .arg(user_id)
            .option("format", "json");
        self.invoke(&cmd).await?.into_array()
    }

    /// Adds a user meta value.
    pub async fn add_user_meta(&self, user_id: u64, key: &str, value: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["user", "meta", "add"])
            .arg(user_id)
            .arg(key)
            .quoted_arg(value);
        self.invoke(&cmd).await?;
        tracing::info!(user_id, key, "added user meta");
        Ok(())
    }

    /// Updates a user meta value.
    pub async fn update_user_meta(
        &self,
        user_id: u64,
        key: &str,
        value: &str,
    ) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["user", "meta", "update"])
            .arg(user_id)
            .arg(key)
            .quoted_arg(value);
        self.invoke(&cmd).await?;
        tracing::info!(user_id, key, "updated user meta");
        Ok(())
    }

    /// Deletes a user meta entry.
    pub async fn delete_user_meta(&self, user_id: u64, key: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["user", "meta", "delete"]).arg(user_id).arg(key);
        self.invoke(&cmd).await?;
        tracing::info!(user_id, key, "deleted user meta");
        Ok(())
    }

    /// Resolves the default author login: user 1, then the first
    /// administrator. Best-effort; `None` means the remote tool should
    /// apply its own default.
    pub async fn default_author(&self) -> Option<String> {
        let cmd = WpCommand::new(["user", "get", "1"]).option("field", "user_login");
        match self.invoke(&cmd).await {
            Ok(out) => {
                let login = out.into_text();
                if !login.is_empty() {
                    return Some(login);
                }
                None
            }
            Err(_) => {
                let cmd = WpCommand::new(["user", "list"])
                    .option("role", "administrator")
                    .option("field", "user_login")
                    .option("format", "csv");
                match self.invoke(&cmd).await {
                    Ok(out) => out
                        .into_text()
                        .lines()
                        .map(str::trim)
                        .find(|line| !line.is_empty())
                        .map(ToString::to_string),
                    Err(e) => {
                        tracing::warn!(error = %e, "could not resolve default user");
                        None
                    }
                }
            }
        }
    }
}

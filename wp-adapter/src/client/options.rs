//! Options, transients, and object-cache operations.

use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;

impl WpClient {
    /// Fetches a WordPress option value.
    pub async fn get_option(&self, option_name: &str) -> Result<String, WpCliError> {
        let cmd = WpCommand::new(["option", "get"]).arg(option_name);
        Ok(self.invoke(&cmd).await?.into_text())
    }

    /// Sets a WordPress option value.
    pub async fn set_option(&self, option_name: &str, value: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["option", "set"]).arg(option_name).quoted_arg(value);
        self.invoke(&cmd).await?;
        tracing::info!(option_name, "set option");
        Ok(())
    }

    /// Deletes a WordPress option.
    pub async fn delete_option(&self, option_name: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["option", "delete"]).arg(option_name);
        self.invoke(&cmd).await?;
        tracing::info!(option_name, "deleted option");
        Ok(())
    }

    /// Fetches a transient value.
    pub async fn get_transient(&self, key: &str) -> Result<String, WpCliError> {
        let cmd = WpCommand::new(["transient", "get"]).arg(key);
        Ok(self.invoke(&cmd).await?.into_text())
    }

    /// Sets a transient, with an optional expiration in seconds.
    pub async fn set_transient(
        &self,
        key: &str,
        value: &str,
        expiration: Option<u64>,
    ) -> Result<(), WpCliError> {
        let mut cmd = WpCommand::new(["transient", "set"]).arg(key).quoted_arg(value);
        if let Some(seconds) = expiration {
            cmd = cmd.arg(seconds);
        }
        self.invoke(&cmd).await?;
        tracing::info!(key, "set transient");
        Ok(())
    }

    /// Deletes a transient.
    pub async fn delete_transient(&self, key: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["transient", "delete"]).arg(key);
        self.invoke(&cmd).await?;
        tracing::info!(key, "deleted transient");
        Ok(())
    }

    /// Flushes the object cache.
    pub async fn flush_cache(&self) -> Result<(), WpCliError> {
        self.invoke(&WpCommand::new(["cache", "flush"])).await?;
        tracing::info!("flushed cache");
        Ok(())
    }

    /// Reports the object-cache backend in use.
    pub async fn cache_type(&self) -> Result<String, WpCliError> {
        Ok(self.invoke(&WpCommand::new(["cache", "type"])).await?.into_text())
    }
}

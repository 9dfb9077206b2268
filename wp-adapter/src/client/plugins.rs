//! Plugin and theme operations.

use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;
use serde_json::Value;

impl WpClient {
    /// Lists installed plugins with `--name='value'` filters.
    pub async fn list_plugins(&self, filters: &[(&str, &str)]) -> Result<Vec<Value>, WpCliError> {
        let mut cmd = WpCommand::new(["plugin", "list"]).option("format", "json");
        for (name, value) in filters {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?.into_array()
    }

    /// Activates a plugin by slug or path.
    pub async fn activate_plugin(&self, plugin: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["plugin", "activate"]).arg(plugin);
        self.invoke(&cmd).await?;
        tracing::info!(plugin, "activated plugin");
        Ok(())
    }

    /// Deactivates a plugin by slug or path.
    pub async fn deactivate_plugin(&self, plugin: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["plugin", "deactivate"]).arg(plugin);
        self.invoke(&cmd).await?;
        tracing::info!(plugin, "deactivated plugin");
        Ok(())
    }

    /// Updates one plugin, or all plugins when `plugin` is `None`.
    pub async fn update_plugin(&self, plugin: Option<&str>) -> Result<(), WpCliError> {
        let cmd = match plugin {
            Some(slug) => WpCommand::new(["plugin", "update"]).arg(slug),
            None => WpCommand::new(["plugin", "update"]).flag("all"),
        };
        self.invoke(&cmd).await?;
        tracing::info!(plugin = plugin.unwrap_or("all"), "updated plugin(s)");
        Ok(())
    }

    /// Lists installed themes with `--name='value'` filters.
    pub async fn list_themes(&self, filters: &[(&str, &str)]) -> Result<Vec<Value>, WpCliError> {
        let mut cmd = WpCommand::new(["theme", "list"]).option("format", "json");
        for (name, value) in filters {
            cmd = cmd.option(*name, value);
        }
        self.invoke(&cmd).await?.into_array()
    }

    /// Activates a theme by slug.
    pub async fn activate_theme(&self, theme: &str) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["theme", "activate"]).arg(theme);
        self.invoke(&cmd).await?;
        tracing::info!(theme, "activated theme");
        Ok(())
    }
}

//! Navigation menus, widgets, and roles.

use super::posts::parse_id;
use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;
use crate::output::WpOutput;
use serde_json::Value;

impl WpClient {
    /// Lists navigation menus.
    pub async fn list_menus(&self) -> Result<Vec<Value>, WpCliError> {
        let cmd = WpCommand::new(["menu", "list"]).option("format", "json");
        self.invoke(&cmd).await?.into_array()
    }

    /// Creates a navigation menu and returns its ID.
    pub async fn create_menu(&self, name: &str) -> Result<u64, WpCliError> {
        let cmd = WpCommand::new(["menu", "create"]).quoted_arg(name).flag("porcelain");
        let out = self.invoke(&cmd).await?.into_text();
        let menu_id = parse_id(&out)?;
        tracing::info!(name, menu_id, "created menu");
        Ok(menu_id)
    }

    /// Deletes a navigation menu.
    pub async fn delete_menu(&self, menu_id: u64) -> Result<(), WpCliError> {
        let cmd = WpCommand::new(["menu", "delete"]).arg(menu_id);
        self.invoke(&cmd).await?;
        tracing::info!(menu_id, "deleted menu");
        Ok(())
    }

    /// Adds a custom item to a menu and returns the item ID.
    pub async fn add_menu_item(
        &self,
        menu_id: u64,
        props: &[(&str, &str)],
    ) -> Result<u64, WpCliError> {
        let mut cmd = WpCommand::new(["menu", "item", "add-custom"]).arg(menu_id);
        for (name, value) in props {
            cmd = cmd.option(*name, value);
        }
        let out = self.invoke(&cmd.flag("porcelain")).await?.into_text();
        let item_id = parse_id(&out)?;
        tracing::info!(menu_id, item_id, "added menu item");
        Ok(item_id)
    }

    /// Lists widgets. Best-effort: failures log and return an empty list.
    pub async fn list_widgets(&self) -> Vec<Value> {
        let cmd = WpCommand::new(["widget", "list"]).option("format", "json");
        match self.invoke(&cmd).await.and_then(WpOutput::into_array) {
            Ok(widgets) => widgets,
            Err(e) => {
                tracing::error!(error = %e, "failed to list widgets");
                Vec::new()
            }
        }
    }

    /// Fetches one widget; `None` when it does not exist.
    pub async fn get_widget(&self, widget_id: &str) -> Option<Value> {
        let cmd = WpCommand::new(["widget", "get"]).arg(widget_id).option("format", "json");
        match self.invoke(&cmd).await.and_then(WpOutput::into_json) {
            Ok(widget) => Some(widget),
            Err(_) => {
                tracing::warn!(widget_id, "widget not found");
                None
            }
        }
    }

    /// Updates widget options. Best-effort: failures log and return false.
    pub async fn update_widget(&self, widget_id: &str, options: &[(&str, &str)]) -> bool {
        let mut cmd = WpCommand::new(["widget", "update"]).arg(widget_id);
        for (name, value) in options {
            cmd = cmd.option(*name, value);
        }
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!(widget_id, "updated widget");
                true
            }
            Err(e) => {
                tracing::error!(widget_id, error = %e, "failed to update widget");
                false
            }
        }
    }

    /// Lists user roles. Best-effort.
    pub async fn list_roles(&self) -> Vec<Value> {
        let cmd = WpCommand::new(["role", "list"]).option("format", "json");
        match self.invoke(&cmd).await.and_then(WpOutput::into_array) {
            Ok(roles) => roles,
            Err(e) => {
                tracing::error!(error = %e, "failed to list roles");
                Vec::new()
            }
        }
    }

    /// Fetches one role; `None` when it does not exist.
    pub async fn get_role(&self, role: &str) -> Option<Value> {
        let cmd = WpCommand::new(["role", "get"]).arg(role).option("format", "json");
        match self.invoke(&cmd).await.and_then(WpOutput::into_json) {
            Ok(info) => Some(info),
            Err(_) => {
                tracing::warn!(role, "role not found");
                None
            }
        }
    }

    /// Creates a role. Best-effort: failures log and return false.
    pub async fn create_role(
        &self,
        role_key: &str,
        role_name: &str,
        capabilities: Option<&str>,
    ) -> bool {
        let cmd = WpCommand::new(["role", "create"])
            .arg(role_key)
            .quoted_arg(role_name)
            .option_opt("capabilities", capabilities);
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!(role_key, role_name, "created role");
                true
            }
            Err(e) => {
                tracing::error!(role_key, error = %e, "failed to create role");
                false
            }
        }
    }

    /// Deletes a role. Best-effort: failures log and return false.
    pub async fn delete_role(&self, role: &str) -> bool {
        let cmd = WpCommand::new(["role", "delete"]).arg(role);
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!(role, "deleted role");
                true
            }
            Err(e) => {
                tracing::error!(role, error = %e, "failed to delete role");
                false
            }
        }
    }
}

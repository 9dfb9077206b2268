//! Core, wp-config, cron, and database operations.
//!
//! Most of these are best-effort maintenance calls: failures are logged
//! and reported as a neutral value rather than propagated, so a broken
//! cron or an old core never aborts a content run.

use super::WpClient;
use crate::cmd::WpCommand;
use crate::error::WpCliError;
use crate::output::WpOutput;
use serde_json::Value;

impl WpClient {
    /// Reports the WordPress core version; `None` when unavailable.
    pub async fn core_version(&self) -> Option<String> {
        match self.invoke(&WpCommand::new(["core", "version"])).await {
            Ok(out) => {
                let version = out.into_text();
                tracing::debug!(%version, "WordPress version");
                (!version.is_empty()).then_some(version)
            }
            Err(_) => {
                tracing::warn!("could not get WordPress version");
                None
            }
        }
    }

    /// Returns true when WordPress is installed. Errors convert to `false`.
    pub async fn core_is_installed(&self) -> bool {
        self.invoke(&WpCommand::new(["core", "is-installed"])).await.is_ok()
    }

    /// Updates WordPress core. Best-effort: failures log and return false.
    pub async fn update_core(&self, version: Option<&str>, force: bool) -> bool {
        let cmd = WpCommand::new(["core", "update"])
            .option_opt("version", version)
            .flag_if("force", force);
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!(version = version.unwrap_or("latest"), "updated WordPress core");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to update WordPress core");
                false
            }
        }
    }

    /// Verifies core file checksums. Best-effort.
    pub async fn verify_core(&self) -> bool {
        match self.invoke(&WpCommand::new(["core", "verify-checksums"])).await {
            Ok(_) => {
                tracing::info!("WordPress core files are valid");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "WordPress core files are invalid");
                false
            }
        }
    }

    /// Checks for core updates. An up-to-date install yields an empty
    /// object; `None` means the check itself failed.
    pub async fn check_core_update(&self) -> Option<Value> {
        let cmd = WpCommand::new(["core", "check-update"]).option("format", "json");
        match self.invoke(&cmd).await {
            Ok(WpOutput::Json(info)) => Some(info),
            Ok(WpOutput::Text(text)) if text.is_empty() => {
                tracing::info!("WordPress is up to date");
                Some(Value::Object(serde_json::Map::new()))
            }
            Ok(WpOutput::Text(_)) => Some(Value::Object(serde_json::Map::new())),
            Err(e) => {
                tracing::error!(error = %e, "failed to check core updates");
                None
            }
        }
    }

    /// Fetches a wp-config.php constant; `None` when it is not defined.
    pub async fn config_get(&self, param: &str) -> Option<String> {
        let cmd = WpCommand::new(["config", "get"]).arg(param);
        match self.invoke(&cmd).await {
            Ok(out) => {
                let value = out.into_text();
                tracing::debug!(param, %value, "retrieved config param");
                (!value.is_empty()).then_some(value)
            }
            Err(_) => {
                tracing::warn!(param, "config parameter not found");
                None
            }
        }
    }

    /// Sets a wp-config.php constant. Best-effort.
    pub async fn config_set(&self, param: &str, value: &str) -> bool {
        let cmd = WpCommand::new(["config", "set"]).arg(param).quoted_arg(value);
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!(param, "set config param");
                true
            }
            Err(e) => {
                tracing::error!(param, error = %e, "failed to set config param");
                false
            }
        }
    }

    /// Lists all wp-config.php constants. Best-effort: empty on failure.
    pub async fn config_list(&self) -> Vec<Value> {
        let cmd = WpCommand::new(["config", "list"]).option("format", "json");
        match self.invoke(&cmd).await.and_then(WpOutput::into_array) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "failed to list config");
                Vec::new()
            }
        }
    }

    /// Reports the wp-config.php path; `None` when it cannot be resolved.
    pub async fn config_path(&self) -> Option<String> {
        match self.invoke(&WpCommand::new(["config", "path"])).await {
            Ok(out) => {
                let path = out.into_text();
                (!path.is_empty()).then_some(path)
            }
            Err(_) => {
                tracing::warn!("could not get config path");
                None
            }
        }
    }

    /// Lists scheduled cron events. Best-effort: empty on failure.
    pub async fn list_cron_events(&self) -> Vec<Value> {
        let cmd = WpCommand::new(["cron", "event", "list"]).option("format", "json");
        match self.invoke(&cmd).await.and_then(WpOutput::into_array) {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(error = %e, "failed to list cron events");
                Vec::new()
            }
        }
    }

    /// Runs all due cron events. Best-effort.
    pub async fn run_cron(&self) -> bool {
        let cmd = WpCommand::new(["cron", "event", "run"]).flag("due-now");
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!("executed cron events");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to run cron events");
                false
            }
        }
    }

    /// Schedules a cron event. Best-effort.
    pub async fn schedule_cron_event(
        &self,
        hook: &str,
        recurrence: &str,
        time: Option<&str>,
        args: Option<&str>,
    ) -> bool {
        let cmd = WpCommand::new(["cron", "event", "schedule"])
            .arg(hook)
            .option("recurrence", recurrence)
            .option_opt("time", time)
            .option_opt("args", args);
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!(hook, recurrence, "scheduled cron event");
                true
            }
            Err(e) => {
                tracing::error!(hook, error = %e, "failed to schedule cron event");
                false
            }
        }
    }

    /// Deletes a cron event by hook name. Best-effort.
    pub async fn delete_cron_event(&self, hook: &str) -> bool {
        let cmd = WpCommand::new(["cron", "event", "delete"]).arg(hook);
        match self.invoke(&cmd).await {
            Ok(_) => {
                tracing::info!(hook, "deleted cron event");
                true
            }
            Err(e) => {
                tracing::error!(hook, error = %e, "failed to delete cron event");
                false
            }
        }
    }

    /// Tests whether WP-Cron is functional by scanning for its success
    /// markers. Best-effort.
    pub async fn test_cron(&self) -> bool {
        match self.invoke(&WpCommand::new(["cron", "test"])).await {
            Ok(out) => {
                let text = out.into_text();
                let working = text.contains("SUCCESS") || text.to_lowercase().contains("working");
                if working {
                    tracing::info!("WP-Cron is working");
                } else {
                    tracing::warn!("WP-Cron is not working");
                }
                working
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to test cron");
                false
            }
        }
    }

    /// Runs a raw SQL query through `db query` and returns the output
    /// verbatim.
    ///
    /// The query is embedded in double quotes, so `"` and `$` are
    /// backslash-escaped; everything else passes through to MySQL.
    pub async fn db_query(&self, query: &str) -> Result<String, WpCliError> {
        let escaped = query.replace('"', "\\\"").replace('$', "\\$");
        self.execute(&format!("db query \"{escaped}\" --format=json")).await
    }

    /// Runs `search-replace` across the database and returns WP-CLI's
    /// report text.
    pub async fn search_replace(
        &self,
        old: &str,
        new: &str,
        tables: &[&str],
        dry_run: bool,
    ) -> Result<String, WpCliError> {
        let mut cmd = WpCommand::new(["search-replace"]).quoted_arg(old).quoted_arg(new);
        for table in tables {
            cmd = cmd.arg(table);
        }
        let cmd = cmd.flag_if("dry-run", dry_run);
        Ok(self.invoke(&cmd).await?.into_text())
    }
}

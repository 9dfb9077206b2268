//! High-level client for WP-CLI over a remote shell.
//!
//! [`WpClient`] is the command adapter: it renders a [`WpCommand`] into a
//! shell fragment, wraps it in the full remote line
//! (`cd <wp_path> && <php> <wp-cli> <fragment>`), executes it through the
//! [`RemoteShell`] collaborator, classifies stderr, and optionally decodes
//! JSON results. It retains no state between calls; every invocation is
//! independently constructed, escaped, and executed.

mod comments;
mod core_ops;
mod media;
mod menus;
mod options;
mod plugins;
mod posts;
mod terms;
mod users;

pub use terms::Category;

use crate::cmd::WpCommand;
use crate::error::{classify_stderr, ClassifyContext, WpCliError};
use crate::output::WpOutput;
use crate::shell::RemoteShell;
use std::sync::Arc;

/// Default PHP interpreter on the remote host.
pub const DEFAULT_PHP_BIN: &str = "php";
/// Default WP-CLI binary path on the remote host.
pub const DEFAULT_WP_CLI: &str = "/usr/local/bin/wp";

/// WP-CLI operations over one remote WordPress installation.
pub struct WpClient {
    shell: Arc<dyn RemoteShell>,
    wp_path: String,
    php_bin: String,
    wp_cli: String,
}

impl WpClient {
    /// Creates a client for the WordPress installation at `wp_path`.
    pub fn new(shell: Arc<dyn RemoteShell>, wp_path: impl Into<String>) -> Self {
        let wp_path = wp_path.into();
        tracing::debug!(%wp_path, "initialized WpClient");
        Self {
            shell,
            wp_path,
            php_bin: DEFAULT_PHP_BIN.to_string(),
            wp_cli: DEFAULT_WP_CLI.to_string(),
        }
    }

    /// Overrides the remote PHP interpreter path.
    #[must_use]
    pub fn with_php_bin(mut self, php_bin: impl Into<String>) -> Self {
        self.php_bin = php_bin.into();
        self
    }

    /// Overrides the remote WP-CLI binary path.
    #[must_use]
    pub fn with_wp_cli(mut self, wp_cli: impl Into<String>) -> Self {
        self.wp_cli = wp_cli.into();
        self
    }

    /// Remote WordPress installation directory.
    #[must_use]
    pub fn wp_path(&self) -> &str {
        &self.wp_path
    }

    /// Remote PHP interpreter path.
    #[must_use]
    pub fn php_bin(&self) -> &str {
        &self.php_bin
    }

    /// Remote WP-CLI binary path.
    #[must_use]
    pub fn wp_cli(&self) -> &str {
        &self.wp_cli
    }

    /// Generic dispatch: renders `cmd`, executes it, and decodes the result.
    ///
    /// When the command carries `--format='json'`, a non-empty stdout is
    /// decoded as JSON; decode failure is non-fatal and yields the raw
    /// trimmed text instead. Without the JSON marker the trimmed stdout is
    /// returned verbatim.
    pub async fn invoke(&self, cmd: &WpCommand) -> Result<WpOutput, WpCliError> {
        let stdout = self.execute(&cmd.render()).await?;

        if cmd.wants_json() && !stdout.is_empty() {
            return match serde_json::from_str(&stdout) {
                Ok(value) => Ok(WpOutput::Json(value)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to parse JSON output");
                    Ok(WpOutput::Text(stdout))
                }
            };
        }

        Ok(WpOutput::Text(stdout))
    }

    /// Execution primitive: runs one WP-CLI command fragment remotely.
    ///
    /// Returns trimmed stdout. Transport failures surface as
    /// [`WpCliError::Transport`]; authoritative stderr patterns surface
    /// through the classifier.
    pub async fn execute(&self, fragment: &str) -> Result<String, WpCliError> {
        let full = format!(
            "cd {} && {} {} {fragment}",
            self.wp_path, self.php_bin, self.wp_cli
        );

        tracing::debug!(command = fragment, "executing WP-CLI");

        let output = self
            .shell
            .execute(&full)
            .await
            .map_err(|e| WpCliError::Transport(e.to_string()))?;

        if !output.stderr.is_empty() {
            if let Some(err) = classify_stderr(&output.stderr, self.classify_ctx()) {
                return Err(err);
            }
        }

        Ok(output.stdout.trim().to_string())
    }

    /// Runs a raw shell command (no WP-CLI prefix) on the remote host.
    /// Used by the installation verification probes.
    pub(crate) async fn shell_exec(&self, command: &str) -> Result<crate::shell::ExecOutput, WpCliError> {
        self.shell
            .execute(command)
            .await
            .map_err(|e| WpCliError::Transport(e.to_string()))
    }

    pub(crate) fn classify_ctx(&self) -> ClassifyContext<'_> {
        ClassifyContext {
            wp_path: &self.wp_path,
            php_bin: &self.php_bin,
            wp_cli: &self.wp_cli,
        }
    }
}

//! Installation verification.
//!
//! Probes the remote host for the WP-CLI binary, the WordPress directory,
//! and wp-config.php, then executes `--version` once to prove the
//! interpreter can actually run the tool. The explicit checks fail with
//! instructive guidance; anything else (a flaky transport, odd shell
//! output) degrades to a warning so verification never blocks a host that
//! would work anyway.

use crate::client::WpClient;
use crate::error::WpCliError;

/// Outcome of the verification sequence.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Whether every probe completed (as opposed to degrading to a warning).
    pub verified: bool,
    /// WP-CLI version line, when the probe produced one.
    pub version: Option<String>,
}

impl WpClient {
    /// Verifies WP-CLI and the WordPress installation on the remote host.
    ///
    /// # Errors
    ///
    /// Returns [`WpCliError::Verify`] when a probe proves the installation
    /// unusable (missing wp-cli, missing WordPress directory, missing
    /// wp-config.php, or an interpreter that cannot execute the tool).
    pub async fn verify_installation(&self) -> Result<VerifyReport, WpCliError> {
        match self.run_probes().await {
            Ok(report) => Ok(report),
            Err(err @ WpCliError::Verify(_)) => Err(err),
            Err(other) => {
                tracing::warn!(error = %other, "could not verify WP-CLI installation");
                Ok(VerifyReport::default())
            }
        }
    }

    async fn run_probes(&self) -> Result<VerifyReport, WpCliError> {
        let wp_cli = self.wp_cli();
        let wp_path = self.wp_path();
        let php_bin = self.php_bin();

        let probe = self
            .shell_exec(&format!("test -f {wp_cli} && echo 'exists' || echo 'not found'"))
            .await?;
        if probe.stdout.contains("not found") {
            return Err(WpCliError::Verify(format!(
                "WP-CLI not found at {wp_cli}\n\
                 \nInstallation instructions:\n\
                 1. Download: curl -O https://raw.githubusercontent.com/wp-cli/builds/gh-pages/phar/wp-cli.phar\n\
                 2. Make executable: chmod +x wp-cli.phar\n\
                 3. Move to path: sudo mv wp-cli.phar {wp_cli}\n\
                 \nOr specify the correct path with the wp_cli setting"
            )));
        }

        let probe = self
            .shell_exec(&format!("test -d {wp_path} && echo 'exists' || echo 'not found'"))
            .await?;
        if probe.stdout.contains("not found") {
            return Err(WpCliError::Verify(format!(
                "WordPress installation not found at {wp_path}\n\
                 Please verify the WordPress path is correct."
            )));
        }

        let probe = self
            .shell_exec(&format!(
                "test -f {wp_path}/wp-config.php && echo 'exists' || echo 'not found'"
            ))
            .await?;
        if probe.stdout.contains("not found") {
            return Err(WpCliError::Verify(format!(
                "wp-config.php not found in {wp_path}\n\
                 This doesn't appear to be a valid WordPress installation."
            )));
        }

        let probe = self
            .shell_exec(&format!("cd {wp_path} && {php_bin} {wp_cli} --version"))
            .await?;
        let stderr_lower = probe.stderr.to_lowercase();
        if stderr_lower.contains("command not found") || stderr_lower.contains("no such file") {
            return Err(WpCliError::Verify(format!(
                "Failed to execute WP-CLI\n\
                 Error: {}\n\
                 \nPossible issues:\n\
                 1. PHP binary not found: {php_bin}\n\
                 2. WP-CLI not executable: {wp_cli}\n\
                 3. Missing PHP extensions (mysql, mysqli)\n\
                 \nFor Plesk servers, try: /opt/plesk/php/8.3/bin/php",
                probe.stderr
            )));
        }

        let version = probe.stdout.trim().to_string();
        if version.contains("WP-CLI") {
            tracing::info!(%version, "WP-CLI verified");
            Ok(VerifyReport {
                verified: true,
                version: Some(version),
            })
        } else {
            tracing::warn!(output = %version, "WP-CLI verification returned unexpected output");
            Ok(VerifyReport {
                verified: true,
                version: None,
            })
        }
    }
}

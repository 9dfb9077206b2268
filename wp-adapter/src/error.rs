//! Error types and stderr classification for WP-CLI invocations.
//!
//! WP-CLI over a remote shell exposes no exit codes, only two text streams,
//! so failure detection is substring-based over stderr. The patterns and
//! their precedence are load-bearing: remote tools routinely write
//! non-fatal noise to stderr, and only the matched patterns are treated as
//! authoritative failure signals.

use thiserror::Error;

/// Errors produced by the WP-CLI command adapter.
#[derive(Debug, Error)]
pub enum WpCliError {
    /// The remote shell itself failed (connection loss, spawn failure).
    #[error("Failed to execute WP-CLI command: {0}")]
    Transport(String),

    /// The interpreter or the WP-CLI binary could not be found remotely.
    #[error(
        "WP-CLI command not found\n\
         Error: {stderr}\n\
         \nPlease verify:\n\
         1. WP-CLI is installed at: {wp_cli}\n\
         2. PHP binary is correct: {php_bin}"
    )]
    CommandNotFound {
        /// Raw stderr from the remote invocation.
        stderr: String,
        /// Configured WP-CLI binary path.
        wp_cli: String,
        /// Configured PHP interpreter path.
        php_bin: String,
    },

    /// A path referenced by the invocation does not exist remotely.
    #[error(
        "File or directory not found\n\
         Error: {stderr}\n\
         \nPlease verify:\n\
         1. WordPress path: {wp_path}\n\
         2. WP-CLI path: {wp_cli}"
    )]
    PathNotFound {
        /// Raw stderr from the remote invocation.
        stderr: String,
        /// Configured WordPress installation directory.
        wp_path: String,
        /// Configured WP-CLI binary path.
        wp_cli: String,
    },

    /// WP-CLI reported an error of its own (`Error:` on stderr).
    #[error("WP-CLI error: {stderr}")]
    Tool {
        /// Raw stderr from the remote invocation.
        stderr: String,
    },

    /// WP-CLI output could not be parsed into the expected shape.
    #[error("Failed to parse WP-CLI output: {0}")]
    Parse(String),

    /// The installation verification sequence failed.
    #[error("{0}")]
    Verify(String),
}

/// Paths baked into classification guidance messages.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    /// WordPress installation directory.
    pub wp_path: &'a str,
    /// PHP interpreter path.
    pub php_bin: &'a str,
    /// WP-CLI binary path.
    pub wp_cli: &'a str,
}

/// Classifies stderr text from a WP-CLI invocation.
///
/// Returns `None` when stderr carries no authoritative failure signal, in
/// which case the invocation is treated as successful. Matching is over the
/// lower-cased text, first match wins:
///
/// 1. `command not found` — tooling missing.
/// 2. `no such file or directory` — path missing.
/// 3. `error:` — WP-CLI's own error prefix.
///
/// A stderr containing the exact phrase `Term doesn't exist` still raises,
/// but is not logged at error level: WP-CLI emits it spuriously on the
/// category-assignment path even when the change was applied (the caller
/// compensates with a read-after-write check).
#[must_use]
pub fn classify_stderr(stderr: &str, ctx: ClassifyContext<'_>) -> Option<WpCliError> {
    let lowered = stderr.to_lowercase();

    if lowered.contains("command not found") {
        return Some(WpCliError::CommandNotFound {
            stderr: stderr.to_string(),
            wp_cli: ctx.wp_cli.to_string(),
            php_bin: ctx.php_bin.to_string(),
        });
    }

    if lowered.contains("no such file or directory") {
        return Some(WpCliError::PathNotFound {
            stderr: stderr.to_string(),
            wp_path: ctx.wp_path.to_string(),
            wp_cli: ctx.wp_cli.to_string(),
        });
    }

    if lowered.contains("error:") {
        if stderr.contains("Term doesn't exist") {
            tracing::debug!(stderr, "suppressing noisy term-lookup stderr");
        } else {
            tracing::error!(stderr, "WP-CLI error");
        }
        return Some(WpCliError::Tool {
            stderr: stderr.to_string(),
        });
    }

    // Anything else on stderr is informational; WP-CLI and PHP both write
    // warnings there without failing the command.
    tracing::debug!(stderr, "ignoring non-fatal stderr");
    None
}

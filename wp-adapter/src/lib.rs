//! WP-CLI command adapter over a remote shell.
//!
//! This crate translates typed WordPress operations into correctly escaped
//! WP-CLI command lines, executes them through a pluggable remote shell,
//! classifies the tool's text-based error output into typed failures, and
//! decodes structured (JSON) results back into native data. The adapter is
//! stateless between calls: every invocation is built, escaped, executed,
//! and discarded independently.

/// WP-CLI command construction and shell-safe escaping.
pub mod cmd;
/// High-level client and the per-entity operation surface.
pub mod client;
/// Error types and stderr classification.
pub mod error;
/// Result payloads (`Json` / `Text`).
pub mod output;
/// Remote shell trait and the OpenSSH subprocess implementation.
pub mod shell;
/// Installation verification probes.
pub mod verify;

pub use client::{WpClient, DEFAULT_PHP_BIN, DEFAULT_WP_CLI};
pub use cmd::{escape_single_quotes, OptionValue, WpCommand};
pub use error::{classify_stderr, ClassifyContext, WpCliError};
pub use output::WpOutput;
pub use shell::{ExecOutput, RemoteShell, ShellError, SshShell, SshTarget, SSH_BIN_ENV_VAR};
pub use verify::VerifyReport;

pub use client::Category;

//! Remote shell execution.
//!
//! The adapter treats the transport as an external collaborator with one
//! operation: run a command string, return both text streams. [`SshShell`]
//! implements it over the system OpenSSH client as a subprocess; tests
//! substitute scripted fakes.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use which::which;

/// Environment variable that overrides the default `ssh` binary path.
pub const SSH_BIN_ENV_VAR: &str = "WPSH_SSH_BIN";

/// Both text streams captured from one remote command.
#[derive(Debug, Clone, Default)]
pub struct ExecOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Transport-level failures, distinct from errors the remote tool reports.
#[derive(Debug, Error)]
pub enum ShellError {
    /// No usable `ssh` client on the local machine.
    #[error("ssh client not found: {0}")]
    ClientNotFound(String),

    /// The ssh subprocess could not be spawned or its output read.
    #[error("failed to run ssh: {0}")]
    Spawn(#[from] std::io::Error),

    /// The ssh client failed before the remote command ran.
    #[error("connection to {host} failed: {stderr}")]
    Connect {
        /// Remote host name.
        host: String,
        /// stderr produced by the ssh client.
        stderr: String,
    },
}

/// Executes command strings in a remote working environment.
#[async_trait]
pub trait RemoteShell: Send + Sync {
    /// Runs `command` remotely and returns its two text streams.
    ///
    /// A non-empty stderr is not itself a failure; callers classify it.
    async fn execute(&self, command: &str) -> Result<ExecOutput, ShellError>;
}

/// Connection coordinates for one remote host. Immutable after construction.
#[derive(Debug, Clone)]
pub struct SshTarget {
    /// Remote host name or address.
    pub host: String,
    /// Remote login user.
    pub user: String,
    /// SSH port.
    pub port: u16,
    /// Optional private key file.
    pub identity_file: Option<PathBuf>,
}

impl SshTarget {
    /// Creates a target with the default SSH port and no explicit key.
    #[must_use]
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            port: 22,
            identity_file: None,
        }
    }
}

/// [`RemoteShell`] implementation over the local OpenSSH client.
pub struct SshShell {
    ssh_bin: PathBuf,
    target: SshTarget,
}

impl SshShell {
    /// Resolves the local `ssh` binary and binds it to `target`.
    ///
    /// Resolution order: the `WPSH_SSH_BIN` environment variable, then
    /// `ssh` via `$PATH`.
    pub fn connect(target: SshTarget) -> Result<Self, ShellError> {
        let ssh_bin = if let Ok(path) = std::env::var(SSH_BIN_ENV_VAR) {
            PathBuf::from(path)
        } else {
            which("ssh").map_err(|e| ShellError::ClientNotFound(e.to_string()))?
        };
        tracing::debug!(host = %target.host, ssh = %ssh_bin.display(), "ssh shell ready");
        Ok(Self { ssh_bin, target })
    }
}

#[async_trait]
impl RemoteShell for SshShell {
    async fn execute(&self, command: &str) -> Result<ExecOutput, ShellError> {
        let mut cmd = Command::new(&self.ssh_bin);
        cmd.arg("-o")
            .arg("BatchMode=yes")
            .arg("-o")
            .arg("ConnectTimeout=15")
            .arg("-p")
            .arg(self.target.port.to_string());

        if let Some(key) = &self.target.identity_file {
            cmd.arg("-i").arg(key);
        }

        cmd.arg(format!("{}@{}", self.target.user, self.target.host))
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::trace!(%command, "executing over ssh");
        let output = cmd.output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        // OpenSSH reserves 255 for its own failures; everything else came
        // from the remote command.
        if output.status.code() == Some(255) {
            return Err(ShellError::Connect {
                host: self.target.host.clone(),
                stderr,
            });
        }

        Ok(ExecOutput { stdout, stderr })
    }
}

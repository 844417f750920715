//! SSH connection records and the `ssh` command lines they launch.
//!
//! Records deserialize with per-field defaults, so a partially filled JSON
//! object from an older config file still loads.

use serde::{Deserialize, Serialize};

use crate::error::{GrasshopperError, Result};

pub const DEFAULT_SSH_PORT: u16 = 22;

const SSH_PROGRAM: &str = "ssh";

/// Characters a POSIX shell would interpret in an unquoted word.
const SHELL_SPECIAL: &str = "'\"\\$`;&|*?<>()[]{}#!";

/// Something that can be turned into an `ssh` invocation.
pub trait SshCommand {
    /// Arguments for the `ssh` binary, program name excluded.
    fn ssh_args(&self) -> Vec<String>;

    /// The full command line, quoted for display or copying to a shell.
    fn command_line(&self) -> String {
        std::iter::once(SSH_PROGRAM.to_string())
            .chain(self.ssh_args().iter().map(|arg| quote_arg(arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A single-hop connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectConnection {
    pub name: String,
    pub user: String,
    pub host: String,
    pub port: u16,
    /// Path to a private key; empty means ssh picks one.
    pub key: String,
    pub notes: String,
}

impl Default for DirectConnection {
    fn default() -> Self {
        Self {
            name: String::new(),
            user: String::new(),
            host: String::new(),
            port: DEFAULT_SSH_PORT,
            key: String::new(),
            notes: String::new(),
        }
    }
}

impl DirectConnection {
    /// A copy with `" (Copy)"` appended to the name.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            name: format!("{} (Copy)", self.name),
            ..self.clone()
        }
    }

    /// # Errors
    ///
    /// `ValidationFailed` naming the first empty required field.
    pub fn validate(&self) -> Result<()> {
        require("host", &self.host)?;
        require("user", &self.user)
    }
}

impl SshCommand for DirectConnection {
    fn ssh_args(&self) -> Vec<String> {
        let mut args = key_args(&self.key);
        args.push(format!("{}@{}", self.user, self.host));
        args.extend(port_args(self.port));
        args
    }
}

/// A connection to `target` that hops through `jump` (`ssh -J`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyJump {
    pub name: String,
    pub target_user: String,
    pub target_host: String,
    pub target_port: u16,
    pub jump_user: String,
    pub jump_host: String,
    pub jump_port: u16,
    pub key: String,
}

impl Default for ProxyJump {
    fn default() -> Self {
        Self {
            name: String::new(),
            target_user: String::new(),
            target_host: String::new(),
            target_port: DEFAULT_SSH_PORT,
            jump_user: String::new(),
            jump_host: String::new(),
            jump_port: DEFAULT_SSH_PORT,
            key: String::new(),
        }
    }
}

impl ProxyJump {
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            name: format!("{} (Copy)", self.name),
            ..self.clone()
        }
    }

    /// # Errors
    ///
    /// `ValidationFailed` naming the first empty required field.
    pub fn validate(&self) -> Result<()> {
        require("target host", &self.target_host)?;
        require("target user", &self.target_user)?;
        require("jump host", &self.jump_host)?;
        require("jump user", &self.jump_user)
    }
}

impl SshCommand for ProxyJump {
    fn ssh_args(&self) -> Vec<String> {
        let mut args = key_args(&self.key);
        args.push("-J".to_string());
        args.push(format!(
            "{}@{}:{}",
            self.jump_user, self.jump_host, self.jump_port
        ));
        args.push(format!("{}@{}", self.target_user, self.target_host));
        args.extend(port_args(self.target_port));
        args
    }
}

/// A local forward: `localhost:local_port` reaches `target_host:target_port`
/// as seen from the remote server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortForward {
    pub name: String,
    pub local_port: u16,
    pub target_host: String,
    pub target_port: u16,
    pub remote_server_user: String,
    pub remote_server_host: String,
    pub remote_server_port: u16,
    pub key: String,
}

impl Default for PortForward {
    fn default() -> Self {
        Self {
            name: String::new(),
            local_port: 0,
            target_host: String::new(),
            target_port: 0,
            remote_server_user: String::new(),
            remote_server_host: String::new(),
            remote_server_port: DEFAULT_SSH_PORT,
            key: String::new(),
        }
    }
}

impl PortForward {
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            name: format!("{} (Copy)", self.name),
            ..self.clone()
        }
    }

    /// # Errors
    ///
    /// `ValidationFailed` naming the first empty required field.
    pub fn validate(&self) -> Result<()> {
        require("target host", &self.target_host)?;
        require("remote server user", &self.remote_server_user)?;
        require("remote server host", &self.remote_server_host)
    }
}

impl SshCommand for PortForward {
    fn ssh_args(&self) -> Vec<String> {
        let mut args = key_args(&self.key);
        args.push("-L".to_string());
        args.push(format!(
            "{}:{}:{}",
            self.local_port, self.target_host, self.target_port
        ));
        args.push(format!(
            "{}@{}",
            self.remote_server_user, self.remote_server_host
        ));
        args.extend(port_args(self.remote_server_port));
        args
    }
}

fn key_args(key: &str) -> Vec<String> {
    if key.is_empty() {
        Vec::new()
    } else {
        vec!["-i".to_string(), key.to_string()]
    }
}

fn port_args(port: u16) -> [String; 2] {
    ["-p".to_string(), port.to_string()]
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GrasshopperError::ValidationFailed(format!(
            "{field} is required"
        )));
    }
    Ok(())
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if arg
        .chars()
        .any(|c| c.is_whitespace() || SHELL_SPECIAL.contains(c))
    {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

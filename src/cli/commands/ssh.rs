//! grasshopper ssh - Render the ssh command line for a connection

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, json_ok};
use crate::connection::{DEFAULT_SSH_PORT, DirectConnection, PortForward, ProxyJump, SshCommand};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SshArgs {
    #[command(subcommand)]
    pub kind: SshKind,
}

#[derive(Subcommand, Debug)]
pub enum SshKind {
    /// Single-hop connection
    Direct(DirectArgs),

    /// Connection through a jump host
    ProxyJump(ProxyJumpArgs),

    /// Local port forward
    PortForward(PortForwardArgs),
}

#[derive(Args, Debug)]
pub struct DirectArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub host: String,
    #[arg(long, default_value_t = DEFAULT_SSH_PORT)]
    pub port: u16,
    /// Private key file
    #[arg(long, default_value = "")]
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ProxyJumpArgs {
    #[arg(long)]
    pub target_user: String,
    #[arg(long)]
    pub target_host: String,
    #[arg(long, default_value_t = DEFAULT_SSH_PORT)]
    pub target_port: u16,
    #[arg(long)]
    pub jump_user: String,
    #[arg(long)]
    pub jump_host: String,
    #[arg(long, default_value_t = DEFAULT_SSH_PORT)]
    pub jump_port: u16,
    /// Private key file
    #[arg(long, default_value = "")]
    pub key: String,
}

#[derive(Args, Debug)]
pub struct PortForwardArgs {
    #[arg(long)]
    pub local_port: u16,
    #[arg(long)]
    pub target_host: String,
    #[arg(long)]
    pub target_port: u16,
    #[arg(long)]
    pub remote_user: String,
    #[arg(long)]
    pub remote_host: String,
    #[arg(long, default_value_t = DEFAULT_SSH_PORT)]
    pub remote_port: u16,
    /// Private key file
    #[arg(long, default_value = "")]
    pub key: String,
}

#[derive(Debug, Serialize)]
struct SshReport {
    program: &'static str,
    args: Vec<String>,
    command_line: String,
}

pub fn run(ctx: &AppContext, args: &SshArgs) -> Result<()> {
    let connection: Box<dyn SshCommand> = match &args.kind {
        SshKind::Direct(a) => {
            let conn = DirectConnection {
                user: a.user.clone(),
                host: a.host.clone(),
                port: a.port,
                key: a.key.clone(),
                ..DirectConnection::default()
            };
            conn.validate()?;
            Box::new(conn)
        }
        SshKind::ProxyJump(a) => {
            let conn = ProxyJump {
                target_user: a.target_user.clone(),
                target_host: a.target_host.clone(),
                target_port: a.target_port,
                jump_user: a.jump_user.clone(),
                jump_host: a.jump_host.clone(),
                jump_port: a.jump_port,
                key: a.key.clone(),
                ..ProxyJump::default()
            };
            conn.validate()?;
            Box::new(conn)
        }
        SshKind::PortForward(a) => {
            let conn = PortForward {
                local_port: a.local_port,
                target_host: a.target_host.clone(),
                target_port: a.target_port,
                remote_server_user: a.remote_user.clone(),
                remote_server_host: a.remote_host.clone(),
                remote_server_port: a.remote_port,
                key: a.key.clone(),
                ..PortForward::default()
            };
            conn.validate()?;
            Box::new(conn)
        }
    };

    let report = SshReport {
        program: "ssh",
        args: connection.ssh_args(),
        command_line: connection.command_line(),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_json(&json_ok(&report)),
        _ => {
            println!("{}", report.command_line);
            Ok(())
        }
    }
}

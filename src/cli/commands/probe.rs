//! grasshopper probe - Online/offline check for a host

use std::time::Duration;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, json_ok};
use crate::error::Result;
use crate::status::{ConnectionStatus, probe};

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Host name or address
    pub host: String,

    /// Port to connect to (default: `probe.default_port`)
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Per-address connect timeout in milliseconds (default: `probe.timeout_ms`)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ProbeReport<'a> {
    host: &'a str,
    port: u16,
    status: ConnectionStatus,
}

pub fn run(ctx: &AppContext, args: &ProbeArgs) -> Result<()> {
    let port = args.port.unwrap_or(ctx.config.probe.default_port);
    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(ctx.config.probe.timeout_ms));

    let report = ProbeReport {
        host: &args.host,
        port,
        status: probe(&args.host, port, timeout),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_json(&json_ok(&report)),
        format => {
            let mut layout = HumanLayout::new(format);
            layout.kv(&format!("{}:{}", report.host, report.port), &report.status.to_string());
            emit_human(layout);
            Ok(())
        }
    }
}

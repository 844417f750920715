//! Online/offline probing of connection targets.
//!
//! A probe is one bounded TCP connect per resolved address. Probes share no
//! state, so any number can run side by side.

use std::fmt;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Not probed yet.
    #[default]
    Unknown,
    Online,
    Offline,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "Unknown",
            Self::Online => "Online",
            Self::Offline => "Offline",
        };
        f.write_str(label)
    }
}

/// Probe `host:port`, waiting at most `timeout` per address.
#[must_use]
pub fn probe(host: &str, port: u16, timeout: Duration) -> ConnectionStatus {
    let addrs: Vec<SocketAddr> = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(err) => {
            debug!(host = %host, port, error = %err, "Could not resolve probe target");
            return ConnectionStatus::Offline;
        }
    };

    for addr in &addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(_) => {
                debug!(host = %host, %addr, "Probe connected");
                return ConnectionStatus::Online;
            }
            Err(err) => debug!(host = %host, %addr, error = %err, "Probe attempt failed"),
        }
    }

    ConnectionStatus::Offline
}

/// Run [`probe`] on its own thread; the receiver yields exactly one status.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_probe(
    host: String,
    port: u16,
    timeout: Duration,
) -> std::io::Result<Receiver<ConnectionStatus>> {
    let (tx, rx) = crossbeam_channel::bounded(1);

    std::thread::Builder::new()
        .name("connection-probe".to_string())
        .spawn(move || {
            let status = probe(&host, port, timeout);
            if tx.send(status).is_err() {
                debug!(host = %host, port, "Probe result dropped; receiver gone");
            }
        })?;

    Ok(rx)
}

pub mod app;
pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod status;
pub mod updater;
pub mod version;

pub use error::{GrasshopperError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

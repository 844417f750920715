use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    /// # Errors
    ///
    /// Propagates config loading failures.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        Ok(Self {
            config,
            output_format: cli.output_format,
        })
    }
}

//! Subcommand implementations and their shared setup.
pub mod check;
pub mod dashboard;
pub mod scan;

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::config::{DEFAULT_CONFIG_FILE, DashboardConfig};
use crate::dashboard::Caller;
use crate::error::AboutError;
use crate::facts::JsonFactSource;
use crate::logging;

/// Account name the CLI acts as; commands run by the operator are staff.
pub const CLI_USER: &str = "cli";

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded dashboard configuration.
    pub config: DashboardConfig,
    /// Facts read from the `--facts` document, when the command takes one.
    pub source: Option<JsonFactSource>,
    /// Caller the entry points are invoked as.
    pub caller: Caller,
}

impl CommandSetup {
    /// Load the configuration and, if given, the facts document.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed.
    pub fn init(global: &GlobalOpts, facts: Option<&Path>) -> Result<Self, AboutError> {
        let config_path = config_path(global);

        logging::stage("Loading configuration");
        let config = DashboardConfig::load(&config_path)?;
        tracing::info!(
            "{}: {} custom section(s), {} important integration(s)",
            config_path.display(),
            config.custom_sections.len(),
            config.display.important_integrations.len()
        );

        let source = match facts {
            Some(path) => {
                logging::stage("Reading facts");
                let source = JsonFactSource::load(path)?;
                tracing::debug!("facts loaded from {}", path.display());
                Some(source)
            }
            None => None,
        };

        Ok(Self {
            config,
            source,
            caller: Caller::staff(CLI_USER),
        })
    }
}

/// Configuration path from `--config`, or `about.toml` in the working directory.
#[must_use]
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Write `value` to stdout as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("serializing output")?;
    writeln!(out).context("writing output")?;
    Ok(())
}

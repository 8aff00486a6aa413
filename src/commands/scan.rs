//! Scan command implementation.
use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::{GlobalOpts, ScanOpts};
use crate::dashboard::scan_integrations;
use crate::logging;

/// Run the scan command, printing `{ "integrations": [...], "count": N }`.
///
/// # Errors
///
/// Returns an error if configuration or facts cannot be loaded, or if the
/// package scan fails.
pub fn run(global: &GlobalOpts, opts: &ScanOpts) -> Result<()> {
    let setup = CommandSetup::init(global, Some(&opts.facts))?;
    let source = setup.source.unwrap_or_default();

    logging::stage("Scanning integrations");
    let response = scan_integrations(&setup.config, &source, &setup.caller)
        .context("scanning integrations")?;
    tracing::info!("{} other integration(s)", response.count);

    super::write_json(&response)
}

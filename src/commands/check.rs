//! Check command implementation.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::config::validation::ValidationWarning;
use crate::logging;

/// Run the check command.
///
/// Warnings are reported but do not fail the command; only an unreadable
/// or invalid configuration does.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let setup = CommandSetup::init(global, None)?;

    logging::stage("Validating configuration");
    let warnings = setup.config.validate();
    report(&warnings);
    Ok(())
}

fn report(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        tracing::info!("configuration OK");
        return;
    }
    tracing::warn!("found {} configuration warning(s):", warnings.len());
    for warning in warnings {
        tracing::warn!(
            "  {} [{}]: {}",
            warning.source,
            warning.item,
            warning.message
        );
    }
}

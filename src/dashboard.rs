//! Request entry points: the dashboard view and the lazy integration scan.
//!
//! Each entry point checks the caller, gathers facts through a
//! [`FactSource`], runs the core and returns a serializable value for the
//! renderer.
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::{DashboardConfig, DisplaySettings};
use crate::custom::{SectionPayload, collect_custom_sections};
use crate::error::DashboardError;
use crate::facts::{CacheStats, FactSource, Facts, IntegrationRecord};
use crate::integrations::{OtherIntegrations, classify, classify_full};
use crate::sections::{SectionInputs, resolve_order};

/// The user behind a request, as established by the host's auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Login name, used in error messages.
    pub username: String,
    /// Whether the account may use the admin area.
    pub is_staff: bool,
    /// Whether the account is enabled.
    pub is_active: bool,
}

impl Caller {
    /// An active staff account.
    #[must_use]
    pub fn staff(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_staff: true,
            is_active: true,
        }
    }

    fn require_staff(&self) -> Result<(), DashboardError> {
        if self.is_staff && self.is_active {
            Ok(())
        } else {
            Err(DashboardError::Forbidden(self.username.clone()))
        }
    }
}

/// Everything the dashboard template renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardContext {
    /// Gathered facts.
    pub versions: Facts,
    /// Cache statistics; absent when disabled or unavailable.
    pub cache_stats: Option<CacheStats>,
    /// Payloads of the custom sections that produced successfully.
    pub custom_sections: Vec<SectionPayload>,
    /// Configured integrations, sorted by name.
    pub important_integrations: Vec<IntegrationRecord>,
    /// Number of integrations left for the scan endpoint.
    pub other_integrations_count: usize,
    /// Display options.
    pub config: DisplaySettings,
    /// Page heading.
    pub title: String,
    /// Final section order.
    pub section_order: Vec<String>,
}

/// Body of the scan endpoint's response.
pub type ScanResponse = OtherIntegrations;

/// Build the dashboard context for one request.
///
/// # Errors
///
/// Returns [`DashboardError::Forbidden`] for non-staff callers and
/// [`DashboardError::Source`] when a collaborator fails. Custom-section
/// failures are not errors.
pub fn system_info(
    config: &DashboardConfig,
    source: &dyn FactSource,
    caller: &Caller,
) -> Result<DashboardContext, DashboardError> {
    caller.require_staff()?;
    let settings = &config.display;

    let versions = source.all_versions()?;
    let cache_stats = if settings.show_cache_stats {
        source.cache_stats()?
    } else {
        None
    };

    let integrations = classify(&versions.integrations, &settings.important_integrations);
    let custom_sections = collect_custom_sections(&config.custom_sections);

    let section_order = resolve_order(&SectionInputs {
        settings,
        facts: &versions,
        cache_stats: cache_stats.as_ref(),
        custom_sections: &custom_sections,
    });

    Ok(DashboardContext {
        versions,
        cache_stats,
        custom_sections,
        important_integrations: integrations.important,
        other_integrations_count: integrations.other_count,
        config: settings.clone(),
        title: settings.page_title.clone(),
        section_order,
    })
}

/// Full listing of the integrations the dashboard deferred.
///
/// Distributions that provide host-framework applications are excluded
/// from the scan itself.
///
/// # Errors
///
/// Returns [`DashboardError::Forbidden`] for non-staff callers and
/// [`DashboardError::Source`] when a collaborator fails.
pub fn scan_integrations(
    config: &DashboardConfig,
    source: &dyn FactSource,
    caller: &Caller,
) -> Result<ScanResponse, DashboardError> {
    caller.require_staff()?;

    let excluded: BTreeSet<String> = source.third_party_app_info_grouped()?.into_keys().collect();
    let found = source.non_host_integrations(&excluded)?;
    tracing::debug!(
        "scan found {} package(s) outside {} host distribution(s)",
        found.len(),
        excluded.len()
    );

    Ok(classify_full(found, &config.display.important_integrations))
}

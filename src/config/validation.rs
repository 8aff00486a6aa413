//! Configuration checks reported by `about check`.
//!
//! None of these are errors: the dashboard renders with any configuration.
//! They point out settings that most likely do not do what was intended.
use std::collections::HashSet;

use super::DashboardConfig;
use crate::sections::BuiltinSection;

/// A validation warning detected in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration key (e.g., "section_order").
    pub source: String,
    /// The specific entry that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for configuration validators.
pub trait ConfigValidator {
    /// Validate the configuration and return any warnings found.
    fn validate(&self) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator.
    fn name(&self) -> &'static str;
}

/// Flags `section_order` entries that match no section known at startup.
///
/// Custom sections registered in code may use ids that differ from their
/// registered names, so an "unknown" entry can still resolve at request
/// time; the warning says as much.
#[derive(Debug)]
pub struct SectionOrderValidator<'a> {
    config: &'a DashboardConfig,
}

impl<'a> SectionOrderValidator<'a> {
    /// Validate the order of `config`.
    #[must_use]
    pub const fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }
}

impl ConfigValidator for SectionOrderValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let Some(order) = self.config.display.user_order() else {
            return Vec::new();
        };
        let custom_names: HashSet<&str> = self
            .config
            .custom_sections
            .iter()
            .map(|s| s.name())
            .collect();

        let mut warnings = Vec::new();
        let mut seen = HashSet::new();
        for id in order {
            if !seen.insert(id.as_str()) {
                warnings.push(ValidationWarning::new(
                    "section_order",
                    id,
                    "listed more than once; the section will render repeatedly",
                ));
            }
            if BuiltinSection::from_id(id).is_none() && !custom_names.contains(id.as_str()) {
                warnings.push(ValidationWarning::new(
                    "section_order",
                    id,
                    "not a built-in section or registered custom section name",
                ));
            }
        }
        warnings
    }

    fn name(&self) -> &'static str {
        "section order"
    }
}

/// Flags custom sections registered twice under the same name.
#[derive(Debug)]
pub struct CustomSectionValidator<'a> {
    config: &'a DashboardConfig,
}

impl<'a> CustomSectionValidator<'a> {
    /// Validate the custom sections of `config`.
    #[must_use]
    pub const fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }
}

impl ConfigValidator for CustomSectionValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut seen = HashSet::new();
        self.config
            .custom_sections
            .iter()
            .filter(|s| !seen.insert(s.name()))
            .map(|s| {
                ValidationWarning::new(
                    "custom_sections",
                    s.name(),
                    "registered more than once; ordering cannot tell them apart",
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "custom sections"
    }
}

impl DashboardConfig {
    /// Run every validator and collect their warnings.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let validators: [&dyn ConfigValidator; 2] = [
            &SectionOrderValidator::new(self),
            &CustomSectionValidator::new(self),
        ];
        validators
            .iter()
            .flat_map(|v| {
                let warnings = v.validate();
                tracing::debug!("{} validator: {} warning(s)", v.name(), warnings.len());
                warnings
            })
            .collect()
    }
}

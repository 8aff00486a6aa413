//! Dashboard configuration: display settings plus registered custom sections.
pub mod toml_loader;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::custom::{CustomSection, PayloadMap};
use crate::error::ConfigError;

/// Default file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "about.toml";

const DEFAULT_PAGE_TITLE: &str = "System Information";

const fn default_true() -> bool {
    true
}

fn default_page_title() -> String {
    DEFAULT_PAGE_TITLE.to_string()
}

/// Display options of the dashboard.
///
/// Every show-flag except `show_dashboard_description` is off unless set.
/// This is the serializable half of [`DashboardConfig`] and is what the
/// renderer receives as `config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Page heading.
    #[serde(default = "default_page_title")]
    pub page_title: String,
    /// Intro text shown under the heading; the section is hidden when unset.
    pub page_intro: Option<String>,
    /// Free-form description rendered by the `dashboard_description` section.
    pub dashboard_description: Option<String>,
    /// Show the `dashboard_description` section.
    #[serde(default = "default_true")]
    pub show_dashboard_description: bool,
    /// Show commit and deployment information.
    pub show_git_info: bool,
    /// Show the host framework version.
    pub show_django_version: bool,
    /// Show the language runtime version.
    pub show_python_version: bool,
    /// Show the database server version.
    pub show_database_version: bool,
    /// Show the worker queue version.
    pub show_celery_version: bool,
    /// Show the cache server version.
    pub show_redis_version: bool,
    /// Show cache statistics.
    pub show_cache_stats: bool,
    /// Show host applications and discovered integrations.
    pub show_third_party_apps: bool,
    /// Preferred section order; sections not listed follow in default order.
    pub section_order: Option<Vec<String>>,
    /// Package names shown eagerly on the dashboard.
    pub important_integrations: BTreeSet<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            page_intro: None,
            dashboard_description: None,
            show_dashboard_description: true,
            show_git_info: false,
            show_django_version: false,
            show_python_version: false,
            show_database_version: false,
            show_celery_version: false,
            show_redis_version: false,
            show_cache_stats: false,
            show_third_party_apps: false,
            section_order: None,
            important_integrations: BTreeSet::new(),
        }
    }
}

impl DisplaySettings {
    /// Whether any of the five version flags is on.
    #[must_use]
    pub const fn shows_any_version(&self) -> bool {
        self.show_django_version
            || self.show_python_version
            || self.show_database_version
            || self.show_celery_version
            || self.show_redis_version
    }

    /// The preferred order, treating an empty list like an unset one.
    #[must_use]
    pub fn user_order(&self) -> Option<&[String]> {
        self.section_order.as_deref().filter(|order| !order.is_empty())
    }
}

/// A `[[custom_sections]]` entry: a registered name plus a static payload.
#[derive(Debug, Clone, Deserialize)]
struct DeclaredSection {
    name: String,
    #[serde(flatten)]
    payload: PayloadMap,
}

/// Key holding the declared sections; everything else is a display setting.
const CUSTOM_SECTIONS_KEY: &str = "custom_sections";

fn invalid(path: &Path, err: &toml::de::Error) -> ConfigError {
    ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: err.message().to_string(),
    }
}

/// Immutable dashboard configuration, built once at startup and shared by
/// reference with every request.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    /// Display options.
    pub display: DisplaySettings,
    /// Section producers in registration order.
    pub custom_sections: Vec<CustomSection>,
}

impl DashboardConfig {
    /// Configuration with the given display options and no custom sections.
    #[must_use]
    pub const fn new(display: DisplaySettings) -> Self {
        Self {
            display,
            custom_sections: Vec::new(),
        }
    }

    /// Load the configuration from a TOML file.
    ///
    /// A missing file yields the defaults. `[[custom_sections]]` entries are
    /// registered as fixed producers in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains an unknown key.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml_loader::load_config(path)?;
        let declared: Vec<DeclaredSection> = match table.remove(CUSTOM_SECTIONS_KEY) {
            Some(value) => value.try_into().map_err(|e| invalid(path, &e))?,
            None => Vec::new(),
        };
        let display: DisplaySettings = toml::Value::Table(table)
            .try_into()
            .map_err(|e| invalid(path, &e))?;

        tracing::debug!(
            "loaded {} with {} declared custom section(s)",
            path.display(),
            declared.len()
        );

        Ok(Self {
            display,
            custom_sections: declared
                .into_iter()
                .map(|d| CustomSection::fixed(d.name, d.payload))
                .collect(),
        })
    }

    /// Register an additional custom section after the existing ones.
    #[must_use]
    pub fn with_custom_section(mut self, section: CustomSection) -> Self {
        self.custom_sections.push(section);
        self
    }
}

//! Facts gathered by external collaborators, and the seam they are read through.
//!
//! The dashboard core never probes versions, caches or installed packages
//! itself. Everything it consumes arrives through a [`FactSource`] as plain
//! data. [`JsonFactSource`] is the file-backed implementation used by the
//! CLI; a host application plugs in its own.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::FactsError;

/// Opaque cache statistics, passed through to the renderer untouched.
pub type CacheStats = serde_json::Map<String, serde_json::Value>;

/// A discovered third-party package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationRecord {
    /// Distribution name as reported by the package scanner.
    pub package_name: String,
    /// Installed version, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// One-line summary from the package metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Project homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl IntegrationRecord {
    /// Record with only a package name.
    #[must_use]
    pub fn named(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            version: None,
            summary: None,
            homepage: None,
        }
    }

    /// Case-insensitive key shared by every integration listing.
    #[must_use]
    pub fn sort_key(&self) -> String {
        self.package_name.to_lowercase()
    }
}

/// An installed application of the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyApp {
    /// Application label inside the host.
    pub name: String,
    /// Installed version, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Version and deployment facts for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facts {
    /// Host framework version.
    pub django_version: Option<String>,
    /// Language runtime version.
    pub python_version: Option<String>,
    /// Database server version.
    pub database_version: Option<String>,
    /// Worker queue version.
    pub celery_version: Option<String>,
    /// Cache server version.
    pub redis_version: Option<String>,
    /// Deployed commit hash.
    pub git_commit: Option<String>,
    /// Deployment timestamp as reported by the host.
    pub deployment_date: Option<String>,
    /// Host-framework applications.
    pub third_party_apps: Vec<ThirdPartyApp>,
    /// Non-host packages discovered at startup.
    pub integrations: Vec<IntegrationRecord>,
}

/// Truthiness of an optional fact: absent and empty strings are both "no".
pub(crate) fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl Facts {
    /// Whether either commit or deployment information is available.
    #[must_use]
    pub fn has_code_info(&self) -> bool {
        is_truthy(self.git_commit.as_deref()) || is_truthy(self.deployment_date.as_deref())
    }
}

/// Collaborators the request layer calls before running the core.
///
/// Implementations may perform arbitrary I/O; the core only consumes the
/// returned values.
#[cfg_attr(test, mockall::automock)]
pub trait FactSource {
    /// Gather version, commit and integration facts.
    ///
    /// # Errors
    ///
    /// Returns an error if the facts cannot be gathered.
    fn all_versions(&self) -> Result<Facts, FactsError>;

    /// Read cache backend statistics; `None` when no cache is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn cache_stats(&self) -> Result<Option<CacheStats>, FactsError>;

    /// Host-framework applications keyed by distribution name.
    ///
    /// # Errors
    ///
    /// Returns an error if the application registry cannot be read.
    fn third_party_app_info_grouped(&self)
    -> Result<BTreeMap<String, Vec<ThirdPartyApp>>, FactsError>;

    /// Full package scan, skipping every distribution in `excluded`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    fn non_host_integrations(
        &self,
        excluded: &BTreeSet<String>,
    ) -> Result<Vec<IntegrationRecord>, FactsError>;
}

/// On-disk layout read by [`JsonFactSource`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FactsDocument {
    versions: Facts,
    cache_stats: Option<CacheStats>,
    third_party_apps_grouped: BTreeMap<String, Vec<ThirdPartyApp>>,
    installed_packages: Vec<IntegrationRecord>,
}

/// A [`FactSource`] backed by a pre-gathered JSON document.
///
/// ```json
/// {
///   "versions": { "python_version": "3.12.1", "integrations": [] },
///   "cache_stats": { "hits": 10 },
///   "third_party_apps_grouped": { "django-extensions": [{ "name": "django_extensions" }] },
///   "installed_packages": [{ "package_name": "requests" }]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFactSource {
    document: FactsDocument,
}

impl JsonFactSource {
    /// Read and parse the facts document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid document.
    pub fn load(path: &Path) -> Result<Self, FactsError> {
        let content = std::fs::read_to_string(path).map_err(|source| FactsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| FactsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse a facts document from a string.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the document is malformed.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            document: serde_json::from_str(content)?,
        })
    }
}

impl FactSource for JsonFactSource {
    fn all_versions(&self) -> Result<Facts, FactsError> {
        Ok(self.document.versions.clone())
    }

    fn cache_stats(&self) -> Result<Option<CacheStats>, FactsError> {
        Ok(self.document.cache_stats.clone())
    }

    fn third_party_app_info_grouped(
        &self,
    ) -> Result<BTreeMap<String, Vec<ThirdPartyApp>>, FactsError> {
        Ok(self.document.third_party_apps_grouped.clone())
    }

    fn non_host_integrations(
        &self,
        excluded: &BTreeSet<String>,
    ) -> Result<Vec<IntegrationRecord>, FactsError> {
        Ok(self
            .document
            .installed_packages
            .iter()
            .filter(|pkg| !excluded.contains(&pkg.package_name))
            .cloned()
            .collect())
    }
}

//! Section visibility and ordering.
//!
//! The dashboard is a sequence of named sections: seven built-ins followed
//! by whatever custom sections the request produced. [`resolve_order`]
//! merges the user's preferred order with the default order, hiding
//! default-order sections whose data or flags are missing.
use std::fmt;

use crate::config::DisplaySettings;
use crate::custom::SectionPayload;
use crate::facts::{CacheStats, Facts};

/// A section every dashboard knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinSection {
    /// Configured free-form description.
    DashboardDescription,
    /// Configured intro text.
    PageIntro,
    /// Commit and deployment date.
    CodeInfo,
    /// Framework, runtime, database, queue and cache versions.
    SoftwareVersions,
    /// Cache backend statistics.
    CacheStats,
    /// Installed host-framework applications.
    ThirdPartyApps,
    /// Discovered non-host packages.
    ThirdPartyIntegrations,
}

impl BuiltinSection {
    /// All built-ins in canonical order.
    pub const ALL: [Self; 7] = [
        Self::DashboardDescription,
        Self::PageIntro,
        Self::CodeInfo,
        Self::SoftwareVersions,
        Self::CacheStats,
        Self::ThirdPartyApps,
        Self::ThirdPartyIntegrations,
    ];

    /// Identifier used in `section_order` and by the renderer.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::DashboardDescription => "dashboard_description",
            Self::PageIntro => "page_intro",
            Self::CodeInfo => "code_info",
            Self::SoftwareVersions => "software_versions",
            Self::CacheStats => "cache_stats",
            Self::ThirdPartyApps => "third_party_apps",
            Self::ThirdPartyIntegrations => "third_party_integrations",
        }
    }

    /// Look up a built-in by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl fmt::Display for BuiltinSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything visibility depends on for one request.
#[derive(Debug, Clone, Copy)]
pub struct SectionInputs<'a> {
    /// Display options.
    pub settings: &'a DisplaySettings,
    /// Gathered facts.
    pub facts: &'a Facts,
    /// Cache statistics, if they were fetched.
    pub cache_stats: Option<&'a CacheStats>,
    /// Payloads of the custom sections that produced successfully.
    pub custom_sections: &'a [SectionPayload],
}

impl SectionInputs<'_> {
    fn builtin_visible(&self, section: BuiltinSection) -> bool {
        let settings = self.settings;
        match section {
            BuiltinSection::DashboardDescription => settings.show_dashboard_description,
            BuiltinSection::PageIntro => settings.page_intro.is_some(),
            BuiltinSection::CodeInfo => settings.show_git_info && self.facts.has_code_info(),
            BuiltinSection::SoftwareVersions => settings.shows_any_version(),
            BuiltinSection::CacheStats => settings.show_cache_stats && self.cache_stats.is_some(),
            BuiltinSection::ThirdPartyApps => {
                settings.show_third_party_apps && !self.facts.third_party_apps.is_empty()
            }
            BuiltinSection::ThirdPartyIntegrations => {
                settings.show_third_party_apps && !self.facts.integrations.is_empty()
            }
        }
    }

    /// Whether the section `id` should be displayed.
    ///
    /// Identifiers that are neither built-in nor produced by a custom
    /// section are never visible.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        BuiltinSection::from_id(id).map_or_else(
            || self.custom_sections.iter().any(|s| s.order_id() == Some(id)),
            |section| self.builtin_visible(section),
        )
    }
}

/// Built-ins in canonical order, then custom section ids in supplied order.
///
/// Custom sections with an empty or non-string id get no slot.
#[must_use]
pub fn default_order(custom_sections: &[SectionPayload]) -> Vec<String> {
    BuiltinSection::ALL
        .iter()
        .map(|s| s.id().to_string())
        .chain(
            custom_sections
                .iter()
                .filter_map(SectionPayload::order_id)
                .map(str::to_string),
        )
        .collect()
}

/// Compute the final section order.
///
/// With a non-empty `section_order` the user's list comes first, verbatim
/// and unfiltered. Every visible default-order section not yet listed
/// follows, in default order. Without a user order this reduces to the
/// default order filtered to visible sections.
#[must_use]
pub fn resolve_order(inputs: &SectionInputs<'_>) -> Vec<String> {
    let mut ordered = inputs
        .settings
        .user_order()
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    for id in default_order(inputs.custom_sections) {
        if !ordered.contains(&id) && inputs.is_visible(&id) {
            ordered.push(id);
        }
    }

    tracing::debug!("section order resolved to [{}]", ordered.join(", "));
    ordered
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::custom::PayloadMap;
    use crate::facts::{IntegrationRecord, ThirdPartyApp};

    fn payload(id: &str) -> SectionPayload {
        SectionPayload::from_data(PayloadMap::new(), id)
    }

    fn order(
        settings: &DisplaySettings,
        facts: &Facts,
        cache_stats: Option<&CacheStats>,
        custom: &[SectionPayload],
    ) -> Vec<String> {
        resolve_order(&SectionInputs {
            settings,
            facts,
            cache_stats,
            custom_sections: custom,
        })
    }

    fn everything_on() -> (DisplaySettings, Facts, CacheStats) {
        let settings = DisplaySettings {
            page_intro: Some("Hello".to_string()),
            show_git_info: true,
            show_python_version: true,
            show_cache_stats: true,
            show_third_party_apps: true,
            ..DisplaySettings::default()
        };
        let facts = Facts {
            git_commit: Some("abc123".to_string()),
            third_party_apps: vec![ThirdPartyApp {
                name: "admin".to_string(),
                version: None,
            }],
            integrations: vec![IntegrationRecord::named("requests")],
            ..Facts::default()
        };
        (settings, facts, CacheStats::new())
    }

    #[test]
    fn builtin_ids_round_trip() {
        for section in BuiltinSection::ALL {
            assert_eq!(BuiltinSection::from_id(section.id()), Some(section));
        }
        assert_eq!(BuiltinSection::from_id("nope"), None);
    }

    #[test]
    fn default_order_appends_custom_ids() {
        let order = default_order(&[payload("env"), payload("support")]);
        assert_eq!(order.len(), 9);
        assert_eq!(order[0], "dashboard_description");
        assert_eq!(order[6], "third_party_integrations");
        assert_eq!(&order[7..], ["env", "support"]);
    }

    #[test]
    fn default_order_without_custom_sections_is_builtins() {
        assert_eq!(default_order(&[]).len(), 7);
    }

    #[test]
    fn defaults_show_only_description() {
        let result = order(&DisplaySettings::default(), &Facts::default(), None, &[]);
        assert_eq!(result, ["dashboard_description"]);
    }

    #[test]
    fn everything_visible_keeps_canonical_order() {
        let (settings, facts, stats) = everything_on();
        let custom = [payload("env")];
        let result = order(&settings, &facts, Some(&stats), &custom);
        assert_eq!(result, default_order(&custom));
    }

    #[test]
    fn code_info_needs_flag_and_data() {
        let (mut settings, mut facts, _) = everything_on();
        let visible = |s: &DisplaySettings, f: &Facts| {
            SectionInputs {
                settings: s,
                facts: f,
                cache_stats: None,
                custom_sections: &[],
            }
            .is_visible("code_info")
        };
        assert!(visible(&settings, &facts));

        facts.git_commit = None;
        assert!(!visible(&settings, &facts));

        facts.deployment_date = Some("2024-01-01".to_string());
        assert!(visible(&settings, &facts));

        settings.show_git_info = false;
        assert!(!visible(&settings, &facts));
    }

    #[test]
    fn cache_stats_hidden_without_stats() {
        let (settings, facts, _) = everything_on();
        let result = order(&settings, &facts, None, &[]);
        assert!(!result.contains(&"cache_stats".to_string()));
    }

    #[test]
    fn third_party_sections_need_entries() {
        let (settings, mut facts, _) = everything_on();
        facts.third_party_apps.clear();
        let result = order(&settings, &facts, None, &[]);
        assert!(!result.contains(&"third_party_apps".to_string()));
        assert!(result.contains(&"third_party_integrations".to_string()));
    }

    #[test]
    fn user_order_bypasses_visibility() {
        let settings = DisplaySettings {
            section_order: Some(vec!["cache_stats".to_string(), "page_intro".to_string()]),
            ..DisplaySettings::default()
        };
        let result = order(&settings, &Facts::default(), None, &[]);
        assert_eq!(result, ["cache_stats", "page_intro", "dashboard_description"]);
    }

    #[test]
    fn user_order_passes_unknown_ids_through() {
        let settings = DisplaySettings {
            section_order: Some(vec!["not_a_section".to_string()]),
            show_dashboard_description: false,
            ..DisplaySettings::default()
        };
        let result = order(&settings, &Facts::default(), None, &[]);
        assert_eq!(result, ["not_a_section"]);
    }

    #[test]
    fn user_order_duplicates_are_preserved() {
        let settings = DisplaySettings {
            section_order: Some(vec!["page_intro".to_string(), "page_intro".to_string()]),
            ..DisplaySettings::default()
        };
        let result = order(&settings, &Facts::default(), None, &[]);
        assert_eq!(result, ["page_intro", "page_intro", "dashboard_description"]);
    }

    #[test]
    fn custom_sections_follow_user_order() {
        let settings = DisplaySettings {
            section_order: Some(vec!["support".to_string()]),
            ..DisplaySettings::default()
        };
        let custom = [payload("env"), payload("support")];
        let result = order(&settings, &Facts::default(), None, &custom);
        assert_eq!(result, ["support", "dashboard_description", "env"]);
    }

    #[test]
    fn failed_custom_section_is_not_visible() {
        let inputs = SectionInputs {
            settings: &DisplaySettings::default(),
            facts: &Facts::default(),
            cache_stats: None,
            custom_sections: &[payload("env")],
        };
        assert!(inputs.is_visible("env"));
        assert!(!inputs.is_visible("broken"));
    }

    #[test]
    fn custom_id_colliding_with_builtin_appears_once() {
        let (settings, facts, stats) = everything_on();
        let custom = [payload("env"), payload("dashboard_description")];
        let result = order(&settings, &facts, Some(&stats), &custom);
        let mut seen = std::collections::HashSet::new();
        for id in &result {
            assert!(seen.insert(id), "duplicate section {id}");
        }
        assert_eq!(result.last().map(String::as_str), Some("env"));
    }

    #[test]
    fn custom_sections_without_usable_id_get_no_slot() {
        let custom = [
            SectionPayload::from_data(
                serde_json::json!({"id": ""}).as_object().cloned().unwrap(),
                "blank",
            ),
            SectionPayload::from_data(
                serde_json::json!({"id": null}).as_object().cloned().unwrap(),
                "null",
            ),
            payload("env"),
        ];
        assert_eq!(&default_order(&custom)[7..], ["env"]);
        let result = order(&DisplaySettings::default(), &Facts::default(), None, &custom);
        assert_eq!(result, ["dashboard_description", "env"]);
    }
}

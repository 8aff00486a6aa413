#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `scan` command path and config checks.
//!
//! These tests verify that:
//! - distributions providing host applications are excluded from the scan
//! - important integrations never appear in the scan listing
//! - the scan and dashboard split the same packages consistently
//! - `about check` style validation flags suspicious settings

mod common;

use about_dashboard::dashboard::{scan_integrations, system_info};
use about_dashboard::error::{AboutError, ConfigError};

const FIXTURE_CONFIG: &str = include_str!("fixtures/about.toml");
const FIXTURE_FACTS: &str = include_str!("fixtures/facts.json");

fn fixture() -> common::IntegrationTestContext {
    common::TestContextBuilder::new()
        .with_config(FIXTURE_CONFIG)
        .with_facts(FIXTURE_FACTS)
        .build()
}

/// Host distributions and important packages are excluded; the rest is
/// sorted case-insensitively.
#[test]
fn scan_lists_other_integrations_sorted() {
    let ctx = fixture();
    let setup = ctx.setup();
    let source = setup.source.expect("facts loaded");
    let response = scan_integrations(&setup.config, &source, &setup.caller).unwrap();

    let names: Vec<_> = response
        .integrations
        .iter()
        .map(|r| r.package_name.as_str())
        .collect();
    assert_eq!(names, ["boto3", "gunicorn", "Pillow", "sentry-sdk"]);
    assert_eq!(response.count, 4);
}

/// The eager and lazy listings agree on the boundary.
#[test]
fn scan_matches_dashboard_count() {
    let ctx = fixture();
    let setup = ctx.setup();
    let source = setup.source.expect("facts loaded");

    let dashboard = system_info(&setup.config, &source, &setup.caller).unwrap();
    let scan = scan_integrations(&setup.config, &source, &setup.caller).unwrap();

    assert_eq!(dashboard.other_integrations_count, scan.count);
    for record in &dashboard.important_integrations {
        assert!(
            scan.integrations
                .iter()
                .all(|r| r.package_name != record.package_name),
            "{} listed twice",
            record.package_name
        );
    }
}

/// The scan response serializes to `{ integrations, count }`.
#[test]
fn scan_response_shape() {
    let ctx = common::TestContextBuilder::new()
        .with_facts(r#"{"installed_packages": [{"package_name": "requests"}]}"#)
        .build();
    let setup = ctx.setup();
    let source = setup.source.expect("facts loaded");
    let response = scan_integrations(&setup.config, &source, &setup.caller).unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "integrations": [{"package_name": "requests"}],
            "count": 1
        })
    );
}

/// Validation flags unknown section ids but accepts declared custom names.
#[test]
fn check_reports_unknown_order_entries() {
    let config = format!("section_order = [\"environment_info\", \"cache_stat\"]\n{FIXTURE_CONFIG}");
    let ctx = common::TestContextBuilder::new().with_config(&config).build();
    let warnings = ctx.load_config().validate();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].item, "cache_stat");
}

/// A malformed configuration stops command setup with a config error.
#[test]
fn invalid_config_fails_setup() {
    let ctx = common::TestContextBuilder::new()
        .with_config("show_cache_stats = maybe\n")
        .build();
    let err = about_dashboard::commands::CommandSetup::init(&ctx.global_opts(), None).unwrap_err();
    assert!(matches!(
        err,
        AboutError::Config(ConfigError::InvalidSyntax { .. })
    ));
}

/// A missing facts document is reported as a facts error.
#[test]
fn missing_facts_fails_setup() {
    let ctx = common::IntegrationTestContext::new();
    std::fs::remove_file(ctx.facts_path()).unwrap();
    let err = about_dashboard::commands::CommandSetup::init(
        &ctx.global_opts(),
        Some(&ctx.facts_path()),
    )
    .unwrap_err();
    assert!(matches!(err, AboutError::Facts(_)));
}

//! Dashboard command implementation.
use anyhow::{Context as _, Result};
use std::fmt::Write as _;
use std::io::Write as _;

use super::CommandSetup;
use crate::cli::{DashboardOpts, GlobalOpts, OutputFormat};
use crate::dashboard::{DashboardContext, system_info};
use crate::logging;
use crate::sections::BuiltinSection;

/// Run the dashboard command.
///
/// # Errors
///
/// Returns an error if configuration or facts cannot be loaded, or if a
/// fact collaborator fails.
pub fn run(global: &GlobalOpts, opts: &DashboardOpts) -> Result<()> {
    let setup = CommandSetup::init(global, Some(&opts.facts))?;
    let source = setup.source.unwrap_or_default();

    logging::stage("Resolving sections");
    let ctx = system_info(&setup.config, &source, &setup.caller)
        .context("building dashboard context")?;
    tracing::info!("{} section(s) to render", ctx.section_order.len());

    match opts.format {
        OutputFormat::Json => super::write_json(&ctx),
        OutputFormat::Text => {
            let mut out = std::io::stdout().lock();
            out.write_all(render_text(&ctx).as_bytes())
                .context("writing output")
        }
    }
}

/// Render a plain-text outline of the dashboard, one block per section.
///
/// Unknown section ids are skipped, as a template renderer would.
#[must_use]
pub fn render_text(ctx: &DashboardContext) -> String {
    let mut out = format!("{}\n", ctx.title);
    for id in &ctx.section_order {
        let Some(body) = section_body(ctx, id) else {
            tracing::debug!("skipping unknown section '{id}'");
            continue;
        };
        let _ = write!(out, "\n[{id}]\n{body}");
    }
    out
}

fn line(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "  {label}: {value}");
    }
}

fn section_body(ctx: &DashboardContext, id: &str) -> Option<String> {
    let mut out = String::new();
    let Some(section) = BuiltinSection::from_id(id) else {
        let payload = ctx.custom_sections.iter().find(|s| s.order_id() == Some(id))?;
        for (key, value) in &payload.data {
            let _ = writeln!(out, "  {key}: {value}");
        }
        return Some(out);
    };

    let versions = &ctx.versions;
    let config = &ctx.config;
    match section {
        BuiltinSection::DashboardDescription => {
            line(&mut out, "description", config.dashboard_description.as_deref());
        }
        BuiltinSection::PageIntro => line(&mut out, "intro", config.page_intro.as_deref()),
        BuiltinSection::CodeInfo => {
            line(&mut out, "commit", versions.git_commit.as_deref());
            line(&mut out, "deployed", versions.deployment_date.as_deref());
        }
        BuiltinSection::SoftwareVersions => {
            let shown = [
                (config.show_django_version, "django", &versions.django_version),
                (config.show_python_version, "python", &versions.python_version),
                (config.show_database_version, "database", &versions.database_version),
                (config.show_celery_version, "celery", &versions.celery_version),
                (config.show_redis_version, "redis", &versions.redis_version),
            ];
            for (enabled, label, value) in shown {
                if enabled {
                    line(&mut out, label, Some(value.as_deref().unwrap_or("unknown")));
                }
            }
        }
        BuiltinSection::CacheStats => {
            for (key, value) in ctx.cache_stats.iter().flatten() {
                let _ = writeln!(out, "  {key}: {value}");
            }
        }
        BuiltinSection::ThirdPartyApps => {
            for app in &versions.third_party_apps {
                line(&mut out, &app.name, Some(app.version.as_deref().unwrap_or("-")));
            }
        }
        BuiltinSection::ThirdPartyIntegrations => {
            for record in &ctx.important_integrations {
                line(
                    &mut out,
                    &record.package_name,
                    Some(record.version.as_deref().unwrap_or("-")),
                );
            }
            if ctx.other_integrations_count > 0 {
                let _ = writeln!(
                    out,
                    "  ... and {} more (run `about scan`)",
                    ctx.other_integrations_count
                );
            }
        }
    }
    Some(out)
}

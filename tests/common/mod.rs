// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed pair of `about.toml` and
// `facts.json` files and a fluent builder so each integration test can set
// up an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use about_dashboard::cli::GlobalOpts;
use about_dashboard::commands::CommandSetup;
use about_dashboard::config::DashboardConfig;
use about_dashboard::facts::JsonFactSource;

/// An isolated test environment backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding `about.toml` and `facts.json`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with an empty config and an empty facts document.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::write(root.path().join("about.toml"), "").expect("write about.toml");
        std::fs::write(root.path().join("facts.json"), "{}").expect("write facts.json");
        Self { root }
    }

    /// Path to `about.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("about.toml")
    }

    /// Path to `facts.json`.
    pub fn facts_path(&self) -> PathBuf {
        self.root.path().join("facts.json")
    }

    /// Global CLI options pointing at this context's config.
    pub fn global_opts(&self) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.config_path()),
        }
    }

    /// Run the shared command setup against this context.
    pub fn setup(&self) -> CommandSetup {
        CommandSetup::init(&self.global_opts(), Some(&self.facts_path())).expect("command setup")
    }

    /// Load just the configuration.
    pub fn load_config(&self) -> DashboardConfig {
        DashboardConfig::load(&self.config_path()).expect("load config")
    }

    /// Load just the facts.
    pub fn load_facts(&self) -> JsonFactSource {
        JsonFactSource::load(&self.facts_path()).expect("load facts")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with empty files.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Overwrite `about.toml`.
    pub fn with_config(self, content: &str) -> Self {
        write(&self.ctx.config_path(), content);
        self
    }

    /// Overwrite `facts.json`.
    pub fn with_facts(self, content: &str) -> Self {
        write(&self.ctx.facts_path(), content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).expect("write test file");
}

//! Domain-specific error types for the about dashboard.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`ConfigError`],
//! [`DashboardError`]) while command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! AboutError
//! ├── Config(ConfigError)       — TOML parsing, invalid values
//! ├── Facts(FactsError)         — fact collaborator failures
//! └── Dashboard(DashboardError) — access checks, request handling
//! ```
//!
//! Custom-section failures are deliberately absent: they are caught per
//! section and logged, never surfaced to the caller.

use thiserror::Error;

/// Top-level error type for the about dashboard.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum AboutError {
    /// Configuration-related error (parsing, I/O).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A fact collaborator failed to produce its data.
    #[error("Facts error: {0}")]
    Facts(#[from] FactsError),

    /// A request entry point refused or failed the request.
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),
}

/// Errors that arise from loading the dashboard configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file contains a syntax error or an unknown key.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised by a [`FactSource`](crate::facts::FactSource).
#[derive(Error, Debug)]
pub enum FactsError {
    /// The facts document could not be read.
    #[error("IO error reading facts file {path}: {source}")]
    Io {
        /// Path to the facts file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The facts document is not valid JSON or has the wrong shape.
    #[error("Invalid facts document {path}: {source}")]
    Parse {
        /// Path to the facts file.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A collaborator reported a failure of its own.
    #[error("{collaborator} failed: {reason}")]
    Unavailable {
        /// Name of the collaborator call (e.g. `"all_versions"`).
        collaborator: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Errors returned by the request entry points.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The caller is not an active staff member.
    #[error("Access denied for '{0}': staff privileges required")]
    Forbidden(String),

    /// Gathering facts failed before the core could run.
    #[error("Failed to gather facts: {0}")]
    Source(#[from] FactsError),
}

//! About dashboard engine.
//!
//! Decides which sections of an admin "about" page appear and in what
//! order, and how discovered integrations are split between the page and
//! its lazily-loaded scan listing. Data gathering, templating and HTTP are
//! left to the host; they meet this crate through [`facts::FactSource`]
//! and the serializable values in [`dashboard`].
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — load and validate the TOML dashboard configuration
//! - **[`sections`], [`integrations`], [`custom`]** — the pure resolution core
//! - **[`dashboard`]** — the two request entry points
//! - **[`commands`]** — top-level subcommand orchestration (`dashboard`, `scan`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod custom;
pub mod dashboard;
pub mod error;
pub mod facts;
pub mod integrations;
pub mod logging;
pub mod sections;

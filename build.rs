//! Embeds the build version as `ABOUT_VERSION`.
//!
//! The variable is always set: an explicit `ABOUT_VERSION` wins, then
//! `git describe` of the crate's checkout, then the package version.
use std::path::Path;
use std::process::Command;

const VERSION_VAR: &str = "ABOUT_VERSION";

fn git_describe(manifest_dir: &Path) -> Option<String> {
    if !manifest_dir.join(".git").exists() {
        return None;
    }
    let output = Command::new("git")
        .current_dir(manifest_dir)
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!described.is_empty()).then_some(described)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let manifest_dir = Path::new(&manifest_dir);

    let version = std::env::var(VERSION_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| git_describe(manifest_dir))
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());
    println!("cargo:rustc-env={VERSION_VAR}={version}");

    let git_dir = manifest_dir.join(".git");
    println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
    println!("cargo:rerun-if-changed={}", git_dir.join("refs").display());
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
}

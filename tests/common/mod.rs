//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This module
//! is included via `mod common;` in individual test files to share fixtures
//! while keeping test modules small.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use lexis::service::{Localization, LocalizationConfig};

/// Path of the checked-in fixture catalogue (`en`, `en.errors`, `pt`).
pub fn fixture_locales() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/locales")
}

/// Start a lenient service over `dir` with `en` as the default locale.
pub fn start_service(dir: impl Into<Utf8PathBuf>) -> Result<Localization> {
    let path = dir.into();
    Localization::start(LocalizationConfig::new(path.clone(), "en"))
        .with_context(|| format!("load locales from {path}"))
}

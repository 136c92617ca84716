//! Error types for the runner module.
//!
//! This submodule isolates derive-macro-affected code to scope lint
//! suppressions narrowly.

// The unused_assignments lint fires on thiserror/miette derive expansion in
// some Rust versions only, so `#[expect]` cannot be used here.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised during command execution.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The configured locale directory is not valid UTF-8.
    #[error("locale path {} is not valid UTF-8", path.display())]
    #[diagnostic(code(lexis::runner::non_utf8_path))]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },

    /// `check` found locale files that could not be loaded.
    #[error("{count} locale file(s) rejected")]
    #[diagnostic(
        code(lexis::runner::files_rejected),
        help("run with --verbose for per-file details")
    )]
    FilesRejected {
        /// Number of rejected files.
        count: usize,
    },
}

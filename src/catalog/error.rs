//! Errors raised while loading catalogue files.
//!
//! Kept in its own file so the lint suppression needed by the derive macros
//! stays narrowly scoped.

// The unused_assignments lint fires on thiserror/miette derive expansion in
// some Rust versions only, so `#[expect]` cannot be used here.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Failure to load a catalogue directory or one of its files.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    /// The source directory does not exist.
    #[error("locale directory {path} does not exist")]
    #[diagnostic(
        code(lexis::load::missing_directory),
        help("check the configured locales path")
    )]
    MissingDirectory {
        /// Directory that was requested.
        path: Utf8PathBuf,
    },

    /// The source path exists but is not a directory.
    #[error("locale path {path} is not a directory")]
    #[diagnostic(code(lexis::load::not_a_directory))]
    NotADirectory {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// The source directory could not be opened or listed.
    #[error("failed to read locale directory {path}")]
    #[diagnostic(code(lexis::load::read_directory))]
    ReadDirectory {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A catalogue file could not be read.
    #[error("failed to read locale file {path}")]
    #[diagnostic(code(lexis::load::read_file))]
    ReadFile {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A catalogue file is not a well-formed catalogue document.
    #[error("malformed locale file {path}: {detail}")]
    #[diagnostic(
        code(lexis::load::parse),
        help("expected a map of sections or a list of {{id, other, one}} records")
    )]
    Parse {
        /// File that failed.
        path: Utf8PathBuf,
        /// Parser message.
        detail: String,
    },

    /// A catalogue file name does not yield a locale tag.
    #[error("cannot derive a locale from file name {path}")]
    #[diagnostic(
        code(lexis::load::invalid_file_name),
        help("name files <locale>.<ext> or <locale>.<section>.<ext>")
    )]
    InvalidFileName {
        /// File that failed.
        path: Utf8PathBuf,
    },

    /// The directory holds no catalogue files at all.
    #[error("no locale files found in {path}")]
    #[diagnostic(
        code(lexis::load::no_catalogs),
        help("supported extensions are .json, .yaml and .yml")
    )]
    NoCatalogs {
        /// Directory that was scanned.
        path: Utf8PathBuf,
    },

    /// The configured default locale is absent from the loaded catalogue.
    #[error("default locale '{locale}' was not loaded")]
    #[diagnostic(code(lexis::load::default_locale_missing))]
    DefaultLocaleMissing {
        /// Configured default locale.
        locale: String,
    },
}

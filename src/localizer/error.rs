//! Errors raised while formatting localised values.

// The unused_assignments lint fires on thiserror/miette derive expansion in
// some Rust versions only, so `#[expect]` cannot be used here.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use thiserror::Error;

/// Failure to render a localised value.
#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    /// The calendar components do not name a real date.
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    #[diagnostic(
        code(lexis::format::invalid_date),
        help("months run from 1 to 12 and days must exist in the given month")
    )]
    InvalidDate {
        /// Requested year.
        year: i32,
        /// Requested month (1-based).
        month: u8,
        /// Requested day of the month.
        day: u8,
    },

    /// The locale's date template is not a valid format description.
    #[error("invalid date template '{template}'")]
    #[diagnostic(
        code(lexis::format::template),
        help("date templates use components such as [day]/[month]/[year]")
    )]
    Template {
        /// Offending template text.
        template: String,
        /// Parser failure.
        #[source]
        source: time::error::InvalidFormatDescription,
    },

    /// The template parsed but could not be applied to a date.
    #[error("failed to render date template '{template}'")]
    #[diagnostic(
        code(lexis::format::render),
        help("date templates may only use date components")
    )]
    Render {
        /// Template that was applied.
        template: String,
        /// Formatting failure.
        #[source]
        source: time::error::Format,
    },
}

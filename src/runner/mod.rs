//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! loads the configured locale directory and answers one query against it.

mod error;

pub use error::RunnerError;

use crate::cli::{Cli, Commands};
use crate::locale_resolution::{SysLocale, SystemLocale, system_preference};
use crate::localizer::Localizer;
use crate::reload::ReloadReport;
use crate::service::{Localization, LocalizationConfig};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use itertools::Itertools;
use std::io::{self, Write};
use tracing::debug;

/// Execute the parsed [`Cli`] command, writing results to stdout.
///
/// # Errors
///
/// Returns an error if the locale directory cannot be loaded, a query
/// fails, or output cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &SysLocale, &mut out)
}

/// Execute `cli` using `system` for the host locale and writing to `out`.
///
/// # Errors
///
/// As for [`run`].
pub fn run_with(cli: &Cli, system: &impl SystemLocale, out: &mut impl Write) -> Result<()> {
    let config = localization_config(cli)?;
    let path = config.locales_path.clone();
    let service = Localization::new(config);
    let report = service
        .initialise()
        .with_context(|| format!("failed to load locales from {path}"))?;

    match cli.command.clone().unwrap_or(Commands::Check) {
        Commands::Check => check(&report, out),
        query => {
            let preference = cli
                .accept
                .clone()
                .or_else(|| system_preference(system))
                .unwrap_or_default();
            let locale = service.request_locale(Some(&preference));
            debug!(
                preference = %preference,
                locale = %locale,
                fallback = locale.is_fallback(),
                "negotiated locale"
            );
            answer(&service, &service.localizer_for(&locale), query, out)
        }
    }
}

fn answer(
    service: &Localization,
    localizer: &Localizer,
    query: Commands,
    out: &mut impl Write,
) -> Result<()> {
    match query {
        Commands::Check => Ok(()),
        Commands::Get { key } => {
            writeln!(out, "{}", localizer.localize(&key)).context("write output")
        }
        Commands::Plural { key, count } => {
            writeln!(out, "{}", localizer.localize_plural(&key, count)).context("write output")
        }
        Commands::Date { year, month, day } => {
            let rendered = localizer.localize_date(year, month, day)?;
            writeln!(out, "{rendered}").context("write output")
        }
        Commands::Prefix { partial } => write_prefix(localizer, &partial, out),
        Commands::Keys { prefix, locale } => {
            let partial = prefix.unwrap_or_default();
            let mut keys = match locale {
                Some(tag) => service.store().sections_under_locale(&tag, &partial),
                None => service.store().sections_under(&partial),
            };
            keys.sort();
            write_lines(out, keys.iter())
        }
    }
}

fn localization_config(cli: &Cli) -> Result<LocalizationConfig> {
    let locales_path = Utf8PathBuf::from_path_buf(cli.locales_path.clone())
        .map_err(|path| RunnerError::NonUtf8Path { path })?;
    Ok(LocalizationConfig {
        locales_path,
        default_locale: cli.default_locale.clone(),
        strict: cli.strict,
    })
}

fn check(report: &ReloadReport, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "loaded {} locale(s) ({}) with {} key(s)",
        report.locales.len(),
        report.locales.iter().join(", "),
        report.keys
    )
    .context("write output")?;
    for rejected in &report.rejected {
        writeln!(out, "rejected {}: {}", rejected.path, rejected.error).context("write output")?;
    }
    for tag in &report.carried_over {
        writeln!(out, "kept previous data for {tag}").context("write output")?;
    }
    if report.rejected.is_empty() {
        Ok(())
    } else {
        Err(RunnerError::FilesRejected {
            count: report.rejected.len(),
        }
        .into())
    }
}

fn write_prefix(localizer: &Localizer, partial: &str, out: &mut impl Write) -> Result<()> {
    let lines = localizer
        .localize_prefix(partial)
        .into_iter()
        .map(|(key, text)| format!("{key}\t{text}"));
    write_lines(out, lines)
}

fn write_lines<I>(out: &mut impl Write, mut lines: I) -> Result<()>
where
    I: Iterator,
    I::Item: std::fmt::Display,
{
    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    out.write_all(body.as_bytes()).context("write output")
}

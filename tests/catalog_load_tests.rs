//! Catalogue directory loading tests.
//!
//! These tests cover both document shapes, section files, merge order, and
//! how malformed files and directories are reported.

mod common;

use anyhow::{Context, Result, ensure};
use camino::Utf8Path;
use common::fixture_locales;
use lexis::catalog::{LoadError, LoadOptions, load, load_with};
use rstest::rstest;
use test_support::LocaleDir;

#[rstest]
fn loading_then_get_round_trips() -> Result<()> {
    let locales = LocaleDir::with_files(&[("en.json", r#"{ "base": { "hello": "Hello" } }"#)])?;
    let loaded = load(locales.path())?;
    ensure!(
        loaded.catalog.get("en", "base", "hello") == Some("Hello"),
        "en base.hello should load"
    );
    ensure!(
        loaded.catalog.get("fr", "base", "hello").is_none(),
        "fr was never loaded"
    );
    ensure!(loaded.rejected.is_empty(), "nothing should be rejected");
    Ok(())
}

#[rstest]
fn fixture_directory_loads_every_shape() -> Result<()> {
    let loaded = load(&fixture_locales())?;
    let catalog = &loaded.catalog;
    ensure!(loaded.files == 3, "expected three fixture files, got {}", loaded.files);
    ensure!(catalog.locales().collect::<Vec<_>>() == ["en", "pt"], "en and pt load");
    ensure!(
        catalog.get("en", "errors", "not_found") == Some("Page not found"),
        "section file should populate en.errors"
    );
    ensure!(
        catalog.get("en", "", "base_title") == Some("Lexis"),
        "top-level strings live in the root section"
    );
    ensure!(
        catalog.get("pt", "base", "hello") == Some("Olá"),
        "record lists should load"
    );
    let item = catalog
        .message("pt", "base.item")
        .context("pt base.item should exist")?;
    ensure!(item.singular() == Some("1 item"), "records keep the one form");
    Ok(())
}

#[rstest]
fn later_files_override_earlier_keys() -> Result<()> {
    let locales = LocaleDir::with_files(&[
        ("en.errors.json", r#"{ "not_found": "Missing", "gone": "Gone" }"#),
        ("en.errors.yaml", "not_found: Not found\n"),
    ])?;
    let loaded = load(locales.path())?;
    ensure!(
        loaded.catalog.get("en", "errors", "not_found") == Some("Not found"),
        "en.errors.yaml sorts after en.errors.json and wins"
    );
    ensure!(
        loaded.catalog.get("en", "errors", "gone") == Some("Gone"),
        "keys only in the earlier file survive the merge"
    );
    Ok(())
}

#[rstest]
fn broken_file_rejects_only_its_locale() -> Result<()> {
    let locales = LocaleDir::with_files(&[
        ("en.json", r#"{ "base": { "hello": "Hello" } }"#),
        ("pt.json", r#"{ "base": { "hello": "Olá" } }"#),
        ("pt.errors.json", "{ broken"),
    ])?;
    let loaded = load(locales.path())?;
    ensure!(
        loaded.catalog.contains_locale("en"),
        "en is unaffected by a broken pt file"
    );
    ensure!(
        !loaded.catalog.contains_locale("pt"),
        "pt must not be partially loaded"
    );
    ensure!(
        loaded.rejected_locales().into_iter().collect::<Vec<_>>() == ["pt"],
        "pt should be reported as rejected"
    );
    let rejected = loaded.rejected.first().context("one rejected file")?;
    ensure!(
        rejected.path.file_name() == Some("pt.errors.json"),
        "rejected path should name the broken file"
    );
    ensure!(
        matches!(rejected.error, LoadError::Parse { .. }),
        "expected a parse error, got {:?}",
        rejected.error
    );
    Ok(())
}

#[rstest]
fn strict_loading_fails_on_first_rejection() -> Result<()> {
    let locales = LocaleDir::with_files(&[
        ("en.json", r#"{ "base": { "hello": "Hello" } }"#),
        ("pt.json", "[ { \"id\": \"base.hello\" } ]"),
    ])?;
    let err = load_with(locales.path(), LoadOptions::strict())
        .err()
        .context("strict load should fail")?;
    ensure!(
        matches!(err, LoadError::Parse { ref path, .. } if path.file_name() == Some("pt.json")),
        "unexpected error {err:?}"
    );
    Ok(())
}

#[rstest]
fn invalid_file_names_are_rejected_and_others_ignored() -> Result<()> {
    let locales = LocaleDir::with_files(&[
        ("en.json", r#"{ "hello": "Hello" }"#),
        ("en.a.b.json", r#"{ "x": "y" }"#),
        ("README.md", "# notes"),
    ])?;
    locales.create_subdir("nested.json")?;
    let loaded = load(locales.path())?;
    ensure!(loaded.files == 2, "only catalogue-looking files count");
    ensure!(
        matches!(
            loaded.rejected.as_slice(),
            [file] if matches!(file.error, LoadError::InvalidFileName { .. }) && file.locale.is_none()
        ),
        "the malformed name should be rejected without a locale"
    );
    ensure!(
        loaded.catalog.get("en", "", "hello") == Some("Hello"),
        "en still loads"
    );
    Ok(())
}

#[rstest]
fn directory_errors_are_distinguished() -> Result<()> {
    let locales = LocaleDir::with_files(&[("notes.txt", "nothing here")])?;
    let missing = locales.path().join("absent");
    ensure!(
        matches!(load(&missing), Err(LoadError::MissingDirectory { .. })),
        "missing directory should be reported"
    );
    let file = locales.path().join("notes.txt");
    ensure!(
        matches!(load(&file), Err(LoadError::NotADirectory { .. })),
        "a file is not a directory"
    );
    ensure!(
        matches!(load(locales.path()), Err(LoadError::NoCatalogs { .. })),
        "a directory without catalogue files is an error"
    );
    Ok(())
}

#[rstest]
fn load_errors_carry_diagnostic_codes() -> Result<()> {
    use miette::Diagnostic;
    let err = load(Utf8Path::new("/definitely/not/here"))
        .err()
        .context("missing directory should fail")?;
    let code = err.code().map(|code| code.to_string());
    ensure!(
        code.as_deref() == Some("lexis::load::missing_directory"),
        "unexpected code {code:?}"
    );
    Ok(())
}

#[cfg(unix)]
#[rstest]
fn non_utf8_file_names_are_skipped() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let locales = LocaleDir::with_files(&[("en.json", r#"{ "base": { "hello": "Hello" } }"#)])?;
    let stray = locales
        .path()
        .as_std_path()
        .join(OsStr::from_bytes(b"notes\xff.txt"));
    std::fs::write(&stray, "stray").context("write non-UTF-8 file name")?;

    let loaded = load(locales.path())?;
    ensure!(
        loaded.catalog.get("en", "base", "hello") == Some("Hello"),
        "en should load next to a non-UTF-8 file name"
    );
    ensure!(loaded.rejected.is_empty(), "the stray file is not a catalogue file");

    let service = common::start_service(locales.path())?;
    locales.write("en.json", r#"{ "base": { "hello": "Hi" } }"#)?;
    service.reload()?;
    ensure!(
        service.store().get("en", "base", "hello").as_deref() == Some("Hi"),
        "reload should apply the edit"
    );
    Ok(())
}

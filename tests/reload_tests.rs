//! Reload controller behaviour: state transitions, failure isolation, and
//! snapshot atomicity under concurrent readers.

mod common;

use anyhow::{Context, Result, ensure};
use common::start_service;
use lexis::catalog::{CatalogStore, LoadError, LoadOptions, Snapshot};
use lexis::reload::{ReloadController, ReloadState};
use lexis::service::{Localization, LocalizationConfig};
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use test_support::LocaleDir;

const EN: &str = r#"{ "base": { "hello": "Hello" } }"#;
const PT: &str = r#"{ "base": { "hello": "Olá" } }"#;
const ES: &str = r#"{ "base": { "hello": "Hola" } }"#;

#[rstest]
fn controller_walks_the_state_machine() -> Result<()> {
    let locales = LocaleDir::with_files(&[("en.json", EN)])?;
    let store = Arc::new(CatalogStore::new());
    let controller =
        ReloadController::new(Arc::clone(&store), locales.path(), "en", LoadOptions::default());
    ensure!(controller.state() == ReloadState::Uninitialized, "starts uninitialised");

    let report = controller.initialise()?;
    ensure!(controller.state() == ReloadState::Ready, "ready after load");
    ensure!(report.generation == 1, "first generation is 1");
    ensure!(report.locales == ["en"], "unexpected locales {:?}", report.locales);
    ensure!(report.keys == 1, "one key indexed");

    locales.write("pt.json", PT)?;
    let second = controller.reload()?;
    ensure!(second.generation == 2, "reload bumps the generation");
    ensure!(store.generation() == 2, "store serves the new generation");
    ensure!(controller.state() == ReloadState::Ready, "ready after reload");
    Ok(())
}

#[rstest]
fn failed_initial_load_stays_uninitialised() -> Result<()> {
    let locales = LocaleDir::with_files(&[("pt.json", PT)])?;
    let service = Localization::new(LocalizationConfig::new(locales.path(), "en"));
    let err = service
        .initialise()
        .err()
        .context("default locale is missing")?;
    ensure!(
        matches!(err, LoadError::DefaultLocaleMissing { ref locale } if locale == "en"),
        "unexpected error {err:?}"
    );
    ensure!(
        service.state() == ReloadState::Uninitialized,
        "a failed start-up load leaves the controller uninitialised"
    );
    ensure!(service.store().generation() == 0, "nothing was installed");
    Ok(())
}

#[rstest]
fn reload_from_missing_directory_keeps_catalogue() -> Result<()> {
    let locales = LocaleDir::with_files(&[("en.json", EN), ("pt.json", PT)])?;
    let service = start_service(locales.path())?;
    let before = service.store().snapshot();

    let missing = locales.path().join("does-not-exist");
    let err = service
        .reload_from(&missing)
        .err()
        .context("reload should fail")?;
    ensure!(
        matches!(err, LoadError::MissingDirectory { .. }),
        "unexpected error {err:?}"
    );

    let after = service.store().snapshot();
    ensure!(
        Arc::ptr_eq(&before, &after),
        "the previous snapshot must still be served"
    );
    ensure!(
        after.catalog() == before.catalog(),
        "catalogue unchanged after a failed reload"
    );
    ensure!(service.state() == ReloadState::Ready, "still ready");
    Ok(())
}

#[rstest]
fn lenient_reload_carries_over_broken_locale() -> Result<()> {
    let locales = LocaleDir::with_files(&[("en.json", EN), ("pt.json", PT)])?;
    let service = start_service(locales.path())?;

    locales.write("pt.json", "{ not valid")?;
    locales.write("en.json", r#"{ "base": { "hello": "Hi" } }"#)?;
    let report = service.reload()?;
    ensure!(report.carried_over == ["pt"], "pt should be carried over");
    ensure!(report.rejected.len() == 1, "one rejected file");

    let store = service.store();
    ensure!(
        store.get("pt", "base", "hello").as_deref() == Some("Olá"),
        "pt keeps its previous text"
    );
    ensure!(
        store.get("en", "base", "hello").as_deref() == Some("Hi"),
        "en picks up the edit"
    );
    Ok(())
}

#[rstest]
fn strict_reload_rejects_everything_on_one_bad_file() -> Result<()> {
    let locales = LocaleDir::with_files(&[("en.json", EN)])?;
    let service = Localization::start(LocalizationConfig {
        strict: true,
        ..LocalizationConfig::new(locales.path(), "en")
    })?;

    locales.write("pt.json", "{ not valid")?;
    locales.write("en.json", r#"{ "base": { "hello": "Hi" } }"#)?;
    ensure!(service.reload().is_err(), "strict reload should fail");
    ensure!(
        service.store().get("en", "base", "hello").as_deref() == Some("Hello"),
        "the edit to en must not be applied"
    );
    Ok(())
}

#[rstest]
fn reload_dropping_default_locale_is_refused() -> Result<()> {
    let locales = LocaleDir::with_files(&[("en.json", EN), ("pt.json", PT)])?;
    let service = start_service(locales.path())?;
    locales.remove("en.json")?;
    ensure!(
        matches!(service.reload(), Err(LoadError::DefaultLocaleMissing { .. })),
        "removing the default locale must fail the reload"
    );
    ensure!(
        service.store().get("en", "base", "hello").is_some(),
        "en is still served"
    );
    Ok(())
}

/// Reads each reader performs at minimum while the reload runs.
const MIN_READS: usize = 1000;

/// A snapshot is consistent when its catalogue and both indexes agree with
/// its generation: `es` exists only from generation 2 on.
fn is_consistent(snapshot: &Snapshot) -> bool {
    let has_es = snapshot.generation() >= 2;
    snapshot.catalog().contains_locale("es") == has_es
        && snapshot.locale_index("es").is_some() == has_es
        && snapshot.sections_under("base.hello").len() == 1
}

/// Read until the reload has finished, returning the generations seen and
/// the number of inconsistent observations.
fn read_through_reload(
    service: &Localization,
    start: &Barrier,
    reloaded: &AtomicBool,
) -> (BTreeSet<u64>, usize) {
    let mut generations = BTreeSet::new();
    let mut mismatches = 0_usize;
    let observe = |generations: &mut BTreeSet<u64>| {
        let snapshot = service.store().snapshot();
        generations.insert(snapshot.generation());
        usize::from(!is_consistent(&snapshot))
    };

    mismatches += observe(&mut generations);
    start.wait();
    let mut reads = 0_usize;
    loop {
        let finished = reloaded.load(Ordering::Acquire);
        mismatches += observe(&mut generations);
        let text = service.get_localizer("es").localize("base.hello");
        if text != "Hola" && text != "Hello" {
            mismatches += 1;
        }
        reads += 1;
        if finished && reads >= MIN_READS {
            break;
        }
    }
    (generations, mismatches)
}

#[rstest]
fn readers_never_observe_mixed_generations() -> Result<()> {
    const READERS: usize = 4;
    let locales = LocaleDir::with_files(&[("en.json", EN), ("pt.json", PT)])?;
    let service = start_service(locales.path())?;
    locales.write("es.json", ES)?;

    let start = Barrier::new(READERS + 1);
    let reloaded = AtomicBool::new(false);
    let (generation, observations) = thread::scope(|scope| {
        let readers: Vec<_> = (0..READERS)
            .map(|_| scope.spawn(|| read_through_reload(&service, &start, &reloaded)))
            .collect();
        start.wait();
        let reload = service.reload().map(|report| report.generation);
        reloaded.store(true, Ordering::Release);
        let observations: Vec<_> = readers
            .into_iter()
            .map(|reader| reader.join().expect("reader thread panicked"))
            .collect();
        (reload, observations)
    });

    ensure!(generation? == 2, "the reload should install generation 2");
    for (generations, mismatches) in &observations {
        ensure!(
            generations.contains(&1) && generations.contains(&2),
            "each reader should see both generations, saw {generations:?}"
        );
        ensure!(
            *mismatches == 0,
            "{mismatches} lookups observed an inconsistent snapshot"
        );
    }
    ensure!(
        service.get_localizer("es").localize("base.hello") == "Hola",
        "es is served after the reload"
    );
    Ok(())
}

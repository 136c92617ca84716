//! Initial load and hot reload of the catalogue.
//!
//! The controller drives the `Uninitialized → Loading → Ready` start-up path
//! and the `Ready → Reloading → Ready` reload path. Each pass parses the
//! source directory and builds the replacement [`Snapshot`] without touching
//! the store; only a fully built snapshot is installed, with a single pointer
//! swap. A failed pass leaves the previous snapshot in place.
//!
//! [`Snapshot`]: crate::catalog::Snapshot

use crate::catalog::{
    CatalogStore, LoadError, LoadOptions, LoadedCatalog, RejectedFile, Snapshot, load_with,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Lifecycle of the catalogue held by a [`ReloadController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    /// No catalogue has been loaded yet.
    Uninitialized,
    /// The initial load is in progress.
    Loading,
    /// A catalogue is being served.
    Ready,
    /// A replacement catalogue is being built while the current one is served.
    Reloading,
}

impl fmt::Display for ReloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Reloading => "reloading",
        };
        f.write_str(label)
    }
}

/// Summary of a successful load or reload.
#[derive(Debug)]
pub struct ReloadReport {
    /// Generation now being served.
    pub generation: u64,
    /// Locales in the installed snapshot.
    pub locales: Vec<String>,
    /// Number of distinct fully-qualified keys across all locales.
    pub keys: usize,
    /// Files rejected during the pass.
    pub rejected: Vec<RejectedFile>,
    /// Locales whose files were rejected and whose previous data was kept.
    pub carried_over: Vec<String>,
}

/// A snapshot built off-lock, ready to install.
struct Prepared {
    snapshot: Snapshot,
    rejected: Vec<RejectedFile>,
    carried_over: Vec<String>,
}

/// Coordinates loading catalogue files into a [`CatalogStore`].
#[derive(Debug)]
pub struct ReloadController {
    store: Arc<CatalogStore>,
    source: Utf8PathBuf,
    default_locale: String,
    options: LoadOptions,
    state: Mutex<ReloadState>,
    writer: Mutex<()>,
}

impl ReloadController {
    /// Create a controller that loads `source` into `store`.
    #[must_use]
    pub fn new(
        store: Arc<CatalogStore>,
        source: impl Into<Utf8PathBuf>,
        default_locale: impl Into<String>,
        options: LoadOptions,
    ) -> Self {
        Self {
            store,
            source: source.into(),
            default_locale: default_locale.into(),
            options,
            state: Mutex::new(ReloadState::Uninitialized),
            writer: Mutex::new(()),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ReloadState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Directory read by [`ReloadController::reload`].
    #[must_use]
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }

    fn set_state(&self, next: ReloadState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Perform the start-up load from the configured source.
    ///
    /// Once a catalogue is being served this behaves like
    /// [`ReloadController::reload`].
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] that prevented the load; the controller stays
    /// [`ReloadState::Uninitialized`].
    pub fn initialise(&self) -> Result<ReloadReport, LoadError> {
        self.run(&self.source)
    }

    /// Reload from the configured source.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] that aborted the reload; the previous
    /// snapshot keeps being served.
    pub fn reload(&self) -> Result<ReloadReport, LoadError> {
        self.run(&self.source)
    }

    /// Reload from `dir` instead of the configured source.
    ///
    /// # Errors
    ///
    /// As for [`ReloadController::reload`].
    pub fn reload_from(&self, dir: &Utf8Path) -> Result<ReloadReport, LoadError> {
        self.run(dir)
    }

    fn run(&self, dir: &Utf8Path) -> Result<ReloadReport, LoadError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let (active, settled) = match self.state() {
            ReloadState::Uninitialized | ReloadState::Loading => {
                (ReloadState::Loading, ReloadState::Uninitialized)
            }
            ReloadState::Ready | ReloadState::Reloading => {
                (ReloadState::Reloading, ReloadState::Ready)
            }
        };
        self.set_state(active);
        match self.build(dir) {
            Ok(Prepared {
                snapshot,
                rejected,
                carried_over,
            }) => {
                let report = ReloadReport {
                    generation: snapshot.generation(),
                    locales: snapshot
                        .catalog()
                        .locales()
                        .map(ToOwned::to_owned)
                        .collect(),
                    keys: snapshot.index().len(),
                    rejected,
                    carried_over,
                };
                self.store.install(snapshot);
                self.set_state(ReloadState::Ready);
                info!(
                    path = %dir,
                    generation = report.generation,
                    locales = report.locales.len(),
                    keys = report.keys,
                    "catalogue installed"
                );
                Ok(report)
            }
            Err(err) => {
                self.set_state(settled);
                warn!(
                    path = %dir,
                    error = %err,
                    state = %settled,
                    "catalogue load failed; keeping current snapshot"
                );
                Err(err)
            }
        }
    }

    fn build(&self, dir: &Utf8Path) -> Result<Prepared, LoadError> {
        let loaded = load_with(dir, self.options)?;
        let rejected_locales: Vec<String> = loaded
            .rejected_locales()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect();
        let LoadedCatalog {
            mut catalog,
            rejected,
            ..
        } = loaded;

        let mut carried_over = Vec::new();
        let previous = self.store.snapshot();
        for tag in rejected_locales {
            if let Some(sections) = previous.catalog().locale(&tag) {
                warn!(locale = %tag, "keeping previous data for rejected locale");
                catalog.insert_locale(tag.as_str(), sections.clone());
                carried_over.push(tag);
            }
        }
        drop(previous);

        if !catalog.contains_locale(&self.default_locale) {
            return Err(LoadError::DefaultLocaleMissing {
                locale: self.default_locale.clone(),
            });
        }
        Ok(Prepared {
            snapshot: self.store.prepare(catalog),
            rejected,
            carried_over,
        })
    }
}

//! Shared, swappable catalogue state.
//!
//! The store owns the active [`Snapshot`] behind a read/write lock holding an
//! `Arc`. Readers take the shared lock only long enough to clone the `Arc`;
//! writers build the replacement snapshot beforehand and take the exclusive
//! lock only for the pointer swap.

use super::{LocaleCatalog, Snapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Process-wide catalogue handle shared by request handlers.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Snapshot>>,
    generations: AtomicU64,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create a store holding the empty generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty())),
            generations: AtomicU64::new(0),
        }
    }

    /// Create a store whose first generation is `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: LocaleCatalog) -> Self {
        let store = Self::new();
        store.replace(catalog);
        store
    }

    /// Return the active snapshot.
    ///
    /// The returned `Arc` stays valid after later swaps; callers should drop
    /// it at the end of the lookup rather than hold it indefinitely.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a snapshot for `catalog` without publishing it.
    ///
    /// Index construction happens here, outside any lock.
    #[must_use]
    pub fn prepare(&self, catalog: LocaleCatalog) -> Snapshot {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        Snapshot::new(generation, catalog)
    }

    /// Publish a prepared snapshot, returning its generation.
    pub fn install(&self, snapshot: Snapshot) -> u64 {
        let generation = snapshot.generation();
        let replacement = Arc::new(snapshot);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = replacement;
        generation
    }

    /// Prepare and publish `catalog` in one step, returning its generation.
    pub fn replace(&self, catalog: LocaleCatalog) -> u64 {
        self.install(self.prepare(catalog))
    }

    /// Generation of the active snapshot.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.snapshot().generation()
    }

    /// Look up the text of a message in the active snapshot.
    #[must_use]
    pub fn get(&self, locale: &str, section: &str, key: &str) -> Option<String> {
        self.snapshot()
            .get(locale, section, key)
            .map(ToOwned::to_owned)
    }

    /// Fully-qualified keys from any locale that start with `prefix`.
    #[must_use]
    pub fn sections_under(&self, prefix: &str) -> Vec<String> {
        self.snapshot().sections_under(prefix)
    }

    /// Fully-qualified keys declared by `locale` that start with `prefix`.
    #[must_use]
    pub fn sections_under_locale(&self, locale: &str, prefix: &str) -> Vec<String> {
        self.snapshot().sections_under_locale(locale, prefix)
    }

    /// Locale tags present in the active snapshot.
    #[must_use]
    pub fn locales(&self) -> Vec<String> {
        self.snapshot()
            .catalog()
            .locales()
            .map(ToOwned::to_owned)
            .collect()
    }
}

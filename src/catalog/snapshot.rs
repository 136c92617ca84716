//! Immutable catalogue generations.

use super::{LocaleCatalog, Message, split_key};
use crate::trie::TrieIndex;
use std::collections::BTreeMap;

/// One generation of loaded data: a catalogue plus the indexes derived from it.
///
/// The indexes are computed in [`Snapshot::new`] and never modified
/// afterwards, so a reader holding a snapshot always sees a catalogue and
/// index that agree with each other.
#[derive(Debug, Default)]
pub struct Snapshot {
    generation: u64,
    catalog: LocaleCatalog,
    index: TrieIndex,
    locale_indexes: BTreeMap<String, TrieIndex>,
}

impl Snapshot {
    /// Build a snapshot, deriving the global and per-locale key indexes.
    #[must_use]
    pub fn new(generation: u64, catalog: LocaleCatalog) -> Self {
        let mut index = TrieIndex::new();
        let mut locale_indexes = BTreeMap::new();
        for (tag, sections) in catalog.entries() {
            let scoped: TrieIndex = sections.qualified_keys().collect();
            index.extend(scoped.search_prefix(""));
            locale_indexes.insert(tag.to_owned(), scoped);
        }
        Self {
            generation,
            catalog,
            index,
            locale_indexes,
        }
    }

    /// The empty generation zero used before the first load.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Monotonic generation number assigned by the store.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Borrow the catalogue.
    #[must_use]
    pub const fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// Index of fully-qualified keys across every loaded locale.
    #[must_use]
    pub const fn index(&self) -> &TrieIndex {
        &self.index
    }

    /// Index of fully-qualified keys declared by `locale`.
    #[must_use]
    pub fn locale_index(&self, locale: &str) -> Option<&TrieIndex> {
        self.locale_indexes.get(locale)
    }

    /// Look up the text of a message.
    #[must_use]
    pub fn get(&self, locale: &str, section: &str, key: &str) -> Option<&str> {
        self.catalog.get(locale, section, key)
    }

    /// Look up a message by fully-qualified key.
    #[must_use]
    pub fn message(&self, locale: &str, qualified: &str) -> Option<&Message> {
        let (section, key) = split_key(qualified);
        self.catalog
            .locale(locale)
            .and_then(|sections| sections.get(section, key))
    }

    /// Fully-qualified keys from any locale that start with `prefix`.
    #[must_use]
    pub fn sections_under(&self, prefix: &str) -> Vec<String> {
        self.index.search_prefix(prefix)
    }

    /// Fully-qualified keys declared by `locale` that start with `prefix`.
    ///
    /// Unknown locales yield an empty vector.
    #[must_use]
    pub fn sections_under_locale(&self, locale: &str, prefix: &str) -> Vec<String> {
        self.locale_index(locale)
            .map(|scoped| scoped.search_prefix(prefix))
            .unwrap_or_default()
    }
}

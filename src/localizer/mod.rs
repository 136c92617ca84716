//! Request-scoped localisation handle.
//!
//! A [`Localizer`] pairs a negotiated locale tag with the shared
//! [`CatalogStore`]. It holds no catalogue data itself: every operation takes
//! the active snapshot once and answers from it, so a reload between two calls
//! is visible to the second call while each individual call sees a single
//! generation.
//!
//! Lookups fall back from the bound locale to the default locale. A key found
//! in neither renders as the key itself so missing translations stay visible.

mod error;
mod format;

pub use error::FormatError;
pub use format::{DATE_FORMAT_KEY, ISO_DATE_TEMPLATE};

use crate::catalog::{CatalogStore, Message, Snapshot};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Locale-bound view over a [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct Localizer {
    store: Arc<CatalogStore>,
    locale: String,
    default_locale: String,
}

impl Localizer {
    /// Bind `locale` to `store`, falling back to `default_locale` on misses.
    #[must_use]
    pub fn new(
        store: Arc<CatalogStore>,
        locale: impl Into<String>,
        default_locale: impl Into<String>,
    ) -> Self {
        Self {
            store,
            locale: locale.into(),
            default_locale: default_locale.into(),
        }
    }

    /// Locale tag this handle serves.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Locale consulted when the bound locale lacks a key.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn find<'s>(&self, snapshot: &'s Snapshot, key: &str) -> Option<&'s Message> {
        snapshot
            .message(&self.locale, key)
            .or_else(|| snapshot.message(&self.default_locale, key))
    }

    fn find_or_log<'s>(&self, snapshot: &'s Snapshot, key: &str) -> Option<&'s Message> {
        let found = self.find(snapshot, key);
        if found.is_none() {
            debug!(locale = %self.locale, key, "missing translation");
        }
        found
    }

    /// Translate a fully-qualified key.
    ///
    /// Returns the key itself when no locale in the fallback chain has it.
    #[must_use]
    pub fn localize(&self, key: &str) -> String {
        let snapshot = self.store.snapshot();
        self.find_or_log(&snapshot, key)
            .map_or_else(|| key.to_owned(), |message| message.text().to_owned())
    }

    /// Translate `key` choosing the singular form when `count` is one.
    ///
    /// `%d` and `{count}` in the selected text are replaced with `count`.
    /// Returns the key itself when it is missing.
    #[must_use]
    pub fn localize_plural(&self, key: &str, count: i64) -> String {
        let snapshot = self.store.snapshot();
        self.find_or_log(&snapshot, key)
            .map_or_else(
                || key.to_owned(),
                |message| format::substitute_count(message.plural_form(count), count),
            )
    }

    /// Format a calendar date with the locale's `DateFormat` template.
    ///
    /// The template is looked up like any other key; when neither the locale
    /// nor the default declares one, ISO 8601 (`2024-02-29`) is used.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidDate`] for impossible calendar values and
    /// [`FormatError::Template`] or [`FormatError::Render`] when the template
    /// cannot be applied.
    pub fn localize_date(&self, year: i32, month: u8, day: u8) -> Result<String, FormatError> {
        let date = format::calendar_date(year, month, day)?;
        let snapshot = self.store.snapshot();
        let template = self
            .find(&snapshot, DATE_FORMAT_KEY)
            .map_or(ISO_DATE_TEMPLATE, Message::text);
        format::render_date(date, template)
    }

    /// Translate every key starting with `partial`.
    ///
    /// Candidate keys come from the index over all loaded locales; those that
    /// resolve in neither the bound nor the default locale are left out.
    #[must_use]
    pub fn localize_prefix(&self, partial: &str) -> BTreeMap<String, String> {
        let snapshot = self.store.snapshot();
        snapshot
            .sections_under(partial)
            .into_iter()
            .filter_map(|key| {
                let text = self.find(&snapshot, &key)?.text().to_owned();
                Some((key, text))
            })
            .collect()
    }

    /// Translate several keys at once against a single snapshot.
    #[must_use]
    pub fn localize_many<'k, I>(&self, keys: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let snapshot = self.store.snapshot();
        keys.into_iter()
            .map(|key| {
                let text = self
                    .find_or_log(&snapshot, key)
                    .map_or_else(|| key.to_owned(), |message| message.text().to_owned());
                (key.to_owned(), text)
            })
            .collect()
    }
}

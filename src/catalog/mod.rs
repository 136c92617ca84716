//! Locale catalogues: messages grouped by locale and section.
//!
//! A [`LocaleCatalog`] maps locale tags to [`LocaleSections`], each of which
//! maps section names to a [`Section`] of [`Message`] values. Messages are
//! addressed either by `(locale, section, key)` or by a fully-qualified key of
//! the form `section.key`. Messages declared outside any section live in the
//! root section, whose fully-qualified keys carry no prefix (for example
//! `DateFormat` or `base_title`).
//!
//! Catalogues are loaded from disk by [`load`] and published to readers as
//! immutable [`Snapshot`] values through a [`CatalogStore`].

use std::collections::BTreeMap;

mod document;
mod error;
mod loader;
mod snapshot;
mod store;

pub use error::LoadError;
pub use loader::{LoadOptions, LoadedCatalog, RejectedFile, load, load_with};
pub use snapshot::Snapshot;
pub use store::CatalogStore;

/// Name of the section holding messages declared outside any section.
pub const ROOT_SECTION: &str = "";

/// Separator between the section and local key of a fully-qualified key.
pub const KEY_SEPARATOR: char = '.';

/// Join a section and local key into a fully-qualified key.
///
/// # Examples
///
/// ```
/// use lexis::catalog::{ROOT_SECTION, qualify};
///
/// assert_eq!(qualify("base", "hello"), "base.hello");
/// assert_eq!(qualify(ROOT_SECTION, "DateFormat"), "DateFormat");
/// ```
#[must_use]
pub fn qualify(section: &str, key: &str) -> String {
    if section.is_empty() {
        key.to_owned()
    } else {
        format!("{section}{KEY_SEPARATOR}{key}")
    }
}

/// Split a fully-qualified key at its first separator.
///
/// Keys without a separator belong to the root section.
///
/// # Examples
///
/// ```
/// use lexis::catalog::split_key;
///
/// assert_eq!(split_key("base.hello"), ("base", "hello"));
/// assert_eq!(split_key("errors.http.404"), ("errors", "http.404"));
/// assert_eq!(split_key("DateFormat"), ("", "DateFormat"));
/// ```
#[must_use]
pub fn split_key(qualified: &str) -> (&str, &str) {
    qualified
        .split_once(KEY_SEPARATOR)
        .unwrap_or((ROOT_SECTION, qualified))
}

/// A single translatable message.
///
/// `text` is the general ("other") form; `singular` optionally overrides it
/// when a count of exactly one is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: String,
    text: String,
    singular: Option<String>,
}

impl Message {
    /// Create a message with only the general form.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            singular: None,
        }
    }

    /// Attach a singular variant.
    #[must_use]
    pub fn with_singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    /// Identifier local to the message's section.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// General form of the message.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Singular variant, when declared.
    #[must_use]
    pub fn singular(&self) -> Option<&str> {
        self.singular.as_deref()
    }

    /// Select the form used to render `count` items.
    ///
    /// Only the singular/other split is modelled: a count of one uses the
    /// singular variant when present, every other count uses the general form.
    #[must_use]
    pub fn plural_form(&self, count: i64) -> &str {
        match (count, self.singular.as_deref()) {
            (1, Some(singular)) => singular,
            _ => self.text.as_str(),
        }
    }
}

/// Messages of one section keyed by local identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    messages: BTreeMap<String, Message>,
}

impl Section {
    /// Insert `message`, replacing and returning any message with the same id.
    pub fn insert(&mut self, message: Message) -> Option<Message> {
        self.messages.insert(message.id.clone(), message)
    }

    /// Look up a message by local identifier.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Message> {
        self.messages.get(key)
    }

    /// Number of messages in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Return `true` when the section holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate messages in identifier order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    /// Merge `other` into `self`; keys from `other` win on collision.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
    }
}

/// All sections loaded for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSections {
    sections: BTreeMap<String, Section>,
}

impl LocaleSections {
    /// Borrow a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Mutable access to a section, creating it when missing.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_owned()).or_default()
    }

    /// Insert a message under a fully-qualified key.
    ///
    /// The key is split with [`split_key`], so `errors.missing` lands in the
    /// `errors` section and `DateFormat` in the root section.
    pub fn insert_qualified(&mut self, qualified: &str, message: Message) -> Option<Message> {
        let (section, key) = split_key(qualified);
        let Message { text, singular, .. } = message;
        self.section_mut(section).insert(Message {
            id: key.to_owned(),
            text,
            singular,
        })
    }

    /// Look up a message by section and local key.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&Message> {
        self.sections.get(section).and_then(|found| found.get(key))
    }

    /// Look up a message by fully-qualified key.
    #[must_use]
    pub fn message(&self, qualified: &str) -> Option<&Message> {
        let (section, key) = split_key(qualified);
        self.get(section, key)
    }

    /// Iterate `(section name, section)` pairs in name order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(name, section)| (name.as_str(), section))
    }

    /// Iterate every fully-qualified key of this locale.
    pub fn qualified_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.sections().flat_map(|(name, section)| {
            section.messages().map(move |message| qualify(name, message.id()))
        })
    }

    /// Total number of messages across all sections.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.sections.values().map(Section::len).sum()
    }

    /// Merge `other` into `self` section by section; `other` wins on collision.
    pub fn merge(&mut self, other: Self) {
        for (name, section) in other.sections {
            self.sections.entry(name).or_default().merge(section);
        }
    }
}

/// Mapping from locale tag to that locale's sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleCatalog {
    locales: BTreeMap<String, LocaleSections>,
}

impl LocaleCatalog {
    /// Create an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the text of a message.
    ///
    /// Returns `None` when the locale, section, or key is absent.
    #[must_use]
    pub fn get(&self, locale: &str, section: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|sections| sections.get(section, key))
            .map(Message::text)
    }

    /// Look up a message by locale and fully-qualified key.
    #[must_use]
    pub fn message(&self, locale: &str, qualified: &str) -> Option<&Message> {
        self.locales
            .get(locale)
            .and_then(|sections| sections.message(qualified))
    }

    /// Borrow the sections of `locale`.
    #[must_use]
    pub fn locale(&self, locale: &str) -> Option<&LocaleSections> {
        self.locales.get(locale)
    }

    /// Return `true` when `locale` has been loaded.
    #[must_use]
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Iterate loaded locale tags in order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Iterate `(locale tag, sections)` pairs in tag order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LocaleSections)> {
        self.locales
            .iter()
            .map(|(tag, sections)| (tag.as_str(), sections))
    }

    /// Install `sections` for `locale`, returning the replaced value.
    pub fn insert_locale(
        &mut self,
        locale: impl Into<String>,
        sections: LocaleSections,
    ) -> Option<LocaleSections> {
        self.locales.insert(locale.into(), sections)
    }

    /// Merge `sections` into `locale`, creating the locale when missing.
    pub fn merge_locale(&mut self, locale: &str, sections: LocaleSections) {
        self.locales
            .entry(locale.to_owned())
            .or_default()
            .merge(sections);
    }

    /// Number of loaded locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Return `true` when no locale is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Total number of messages across every locale.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.locales.values().map(LocaleSections::message_count).sum()
    }
}

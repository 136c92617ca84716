//! Owned localisation service for the request layer.
//!
//! [`Localization`] bundles one [`CatalogStore`] with the
//! [`ReloadController`] that fills it. Request handlers receive it by
//! reference (or behind an `Arc`) rather than through process globals, so
//! several independent instances can coexist, for example one per test.

use crate::catalog::{CatalogStore, LoadError, LoadOptions};
use crate::localizer::Localizer;
use crate::negotiate::{self, Negotiation};
use crate::reload::{ReloadController, ReloadReport, ReloadState};
use crate::request::RequestLocale;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;

/// Start-up settings for a [`Localization`] service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationConfig {
    /// Directory holding the catalogue files.
    pub locales_path: Utf8PathBuf,
    /// Locale served when negotiation finds no match.
    pub default_locale: String,
    /// Reject the whole load when any file fails.
    pub strict: bool,
}

impl LocalizationConfig {
    /// Settings for `locales_path` with lenient loading.
    #[must_use]
    pub fn new(locales_path: impl Into<Utf8PathBuf>, default_locale: impl Into<String>) -> Self {
        Self {
            locales_path: locales_path.into(),
            default_locale: default_locale.into(),
            strict: false,
        }
    }

    const fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.strict,
        }
    }
}

/// Localisation catalogue plus the operations the request layer needs.
#[derive(Debug)]
pub struct Localization {
    store: Arc<CatalogStore>,
    controller: ReloadController,
    default_locale: String,
}

impl Localization {
    /// Create an unloaded service; call [`Localization::initialise`] to fill it.
    #[must_use]
    pub fn new(config: LocalizationConfig) -> Self {
        let store = Arc::new(CatalogStore::new());
        let options = config.load_options();
        let controller = ReloadController::new(
            Arc::clone(&store),
            config.locales_path,
            config.default_locale.clone(),
            options,
        );
        Self {
            store,
            controller,
            default_locale: config.default_locale,
        }
    }

    /// Create a service and perform the initial load.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of the initial load; without a catalogue
    /// there is nothing to serve.
    pub fn start(config: LocalizationConfig) -> Result<Self, LoadError> {
        let service = Self::new(config);
        service.initialise()?;
        Ok(service)
    }

    /// Perform the initial load, returning what was loaded.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] that prevented the load.
    pub fn initialise(&self) -> Result<ReloadReport, LoadError> {
        self.controller.initialise()
    }

    /// Shared catalogue handle.
    #[must_use]
    pub const fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Lifecycle state of the underlying reload controller.
    #[must_use]
    pub fn state(&self) -> ReloadState {
        self.controller.state()
    }

    /// Locale served when negotiation finds no match.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Negotiate an `Accept-Language` style preference against the loaded
    /// locales.
    #[must_use]
    pub fn negotiate(&self, preference: &str) -> Negotiation {
        let requested = negotiate::parse_preference(preference);
        let snapshot = self.store.snapshot();
        negotiate::negotiate(
            requested.iter().map(String::as_str),
            |tag| snapshot.catalog().contains_locale(tag),
            &self.default_locale,
        )
    }

    /// Resolve a preference string to a loaded locale tag.
    #[must_use]
    pub fn resolve_locale(&self, preference: &str) -> String {
        self.negotiate(preference).locale
    }

    /// Resolve the typed request locale; `None` selects the default.
    #[must_use]
    pub fn request_locale(&self, preference: Option<&str>) -> RequestLocale {
        self.negotiate(preference.unwrap_or_default()).into()
    }

    /// Localizer bound to `tag`.
    #[must_use]
    pub fn get_localizer(&self, tag: &str) -> Localizer {
        Localizer::new(Arc::clone(&self.store), tag, self.default_locale.as_str())
    }

    /// Localizer bound to a negotiated request locale.
    #[must_use]
    pub fn localizer_for(&self, locale: &RequestLocale) -> Localizer {
        self.get_localizer(locale.as_str())
    }

    /// Reload from the configured directory.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] that aborted the reload; the previous
    /// catalogue keeps being served.
    pub fn reload(&self) -> Result<ReloadReport, LoadError> {
        self.controller.reload()
    }

    /// Reload from `dir`.
    ///
    /// # Errors
    ///
    /// As for [`Localization::reload`].
    pub fn reload_from(&self, dir: &Utf8Path) -> Result<ReloadReport, LoadError> {
        self.controller.reload_from(dir)
    }
}

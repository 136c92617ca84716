//! Stub locale providers for tests.
//!
//! These helpers implement the locale-resolution traits so tests can inject
//! a deterministic host locale.

use lexis::locale_resolution::SystemLocale;

/// Stub system locale provider for locale resolution.
#[derive(Debug, Default, Clone)]
pub struct StubSystemLocale {
    /// Optional system locale value to return.
    pub locale: Option<String>,
}

impl StubSystemLocale {
    /// Create a stub system locale with the provided value.
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
        }
    }
}

impl SystemLocale for StubSystemLocale {
    fn system_locale(&self) -> Option<String> {
        self.locale.clone()
    }
}

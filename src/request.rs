//! Typed request-context locale.
//!
//! The request layer stores a [`RequestLocale`] alongside each request
//! instead of an untyped context entry, so handlers read the negotiated tag
//! through an accessor rather than a runtime type check.

use crate::negotiate::Negotiation;
use std::fmt;

/// Locale negotiated for one request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestLocale {
    tag: String,
    fallback: bool,
}

impl RequestLocale {
    /// Wrap a negotiated tag.
    #[must_use]
    pub const fn new(tag: String, fallback: bool) -> Self {
        Self { tag, fallback }
    }

    /// The negotiated locale tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// `true` when the default locale was used because nothing requested was
    /// available.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl From<Negotiation> for RequestLocale {
    fn from(negotiation: Negotiation) -> Self {
        Self::new(negotiation.locale, negotiation.fallback)
    }
}

impl AsRef<str> for RequestLocale {
    fn as_ref(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for RequestLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn negotiation_converts_into_request_locale() {
        let locale = RequestLocale::from(Negotiation {
            locale: String::from("pt"),
            fallback: false,
        });
        assert_eq!(locale.as_str(), "pt");
        assert!(!locale.is_fallback());
        assert_eq!(locale.to_string(), "pt");
    }
}

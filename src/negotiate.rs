//! Locale negotiation.
//!
//! Negotiation picks the first requested tag that is loaded, or the default
//! locale when none is. Matching is exact: a request for `en-US` does not
//! match a loaded `en`. Callers that want region fallback should list the
//! broader tag themselves, as browsers do with `en-US,en;q=0.9`.
//!
//! Every function here is pure and safe to call concurrently.

use std::collections::BTreeSet;
use tracing::debug;

/// Quality weight in thousandths, as carried by `q=` parameters.
const MAX_QUALITY: u16 = 1000;

/// Outcome of negotiating a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiation {
    /// Selected locale tag.
    pub locale: String,
    /// `true` when no requested tag was available and the default was used.
    pub fallback: bool,
}

/// Select the first requested tag for which `is_available` holds.
///
/// Falls back to `default_locale` when nothing matches.
///
/// # Examples
///
/// ```
/// use lexis::negotiate::negotiate;
///
/// let loaded = ["en", "pt"];
/// let outcome = negotiate(["fr", "pt"], |tag| loaded.contains(&tag), "en");
/// assert_eq!(outcome.locale, "pt");
/// assert!(!outcome.fallback);
/// ```
pub fn negotiate<'a, I, F>(requested: I, is_available: F, default_locale: &str) -> Negotiation
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> bool,
{
    let mut tried = 0_usize;
    for tag in requested {
        tried += 1;
        if is_available(tag) {
            return Negotiation {
                locale: tag.to_owned(),
                fallback: false,
            };
        }
    }
    debug!(
        requested = tried,
        default = default_locale,
        "no requested locale available; using default"
    );
    Negotiation {
        locale: default_locale.to_owned(),
        fallback: true,
    }
}

/// Resolve `requested` against `available`, returning the chosen tag.
///
/// # Examples
///
/// ```
/// use lexis::negotiate::resolve;
/// use std::collections::BTreeSet;
///
/// let available: BTreeSet<String> = ["en", "pt"].map(String::from).into();
/// assert_eq!(resolve(&["fr", "pt"], &available, "en"), "pt");
/// assert_eq!(resolve(&["fr", "de"], &available, "en"), "en");
/// ```
#[must_use]
pub fn resolve<S: AsRef<str>>(
    requested: &[S],
    available: &BTreeSet<String>,
    default_locale: &str,
) -> String {
    negotiate(
        requested.iter().map(AsRef::as_ref),
        |tag| available.contains(tag),
        default_locale,
    )
    .locale
}

/// Split an `Accept-Language` style preference into ordered tags.
///
/// Tags are ordered by descending `q` weight; equal weights keep their
/// written order. Entries with `q=0`, empty tags, and the `*` wildcard are
/// dropped. A malformed weight counts as `q=1`.
///
/// # Examples
///
/// ```
/// use lexis::negotiate::parse_preference;
///
/// assert_eq!(
///     parse_preference("fr;q=0.5, pt-BR, en;q=0.8, *;q=0.1"),
///     ["pt-BR", "en", "fr"],
/// );
/// ```
#[must_use]
pub fn parse_preference(header: &str) -> Vec<String> {
    let mut weighted: Vec<(u16, &str)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or_default().trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let quality = parts
                .find_map(|param| param.trim().strip_prefix("q="))
                .map_or(MAX_QUALITY, parse_quality);
            (quality > 0).then_some((quality, tag))
        })
        .collect();
    // `sort_by` is stable, so equal weights keep header order.
    weighted.sort_by(|left, right| right.0.cmp(&left.0));
    weighted
        .into_iter()
        .map(|(_, tag)| tag.to_owned())
        .collect()
}

/// Parse a `q` value such as `0.8` or `1.000` into thousandths.
fn parse_quality(raw: &str) -> u16 {
    let trimmed = raw.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let valid = fraction.len() <= 3
        && fraction.chars().all(|ch| ch.is_ascii_digit())
        && matches!(whole, "0" | "1");
    if !valid {
        return MAX_QUALITY;
    }
    let thousandths = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(3)
        .fold(0_u16, |acc, ch| {
            acc * 10 + ch.to_digit(10).and_then(|d| u16::try_from(d).ok()).unwrap_or(0)
        });
    if whole == "1" {
        MAX_QUALITY
    } else {
        thousandths
    }
}

//! Host locale detection for command-line use.
//!
//! Negotiation only matches tags exactly, so the host locale is turned into
//! a preference list that also names its primary language: a host running
//! `pt_BR.UTF-8` prefers `pt-BR,pt;q=0.9`.

use ortho_config::LanguageIdentifier;
use std::str::FromStr;

/// Host locale names meaning "no locale configured".
const UNSET_LOCALES: [&str; 2] = ["C", "POSIX"];

/// Weight given to the primary language behind a regional host locale.
const PRIMARY_LANGUAGE_WEIGHT: &str = "0.9";

/// System locale provider for the current host.
pub trait SystemLocale {
    /// Return the system locale string when available.
    fn system_locale(&self) -> Option<String>;
}

/// System locale provider backed by `sys-locale`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SysLocale;

impl SystemLocale for SysLocale {
    fn system_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// Normalize a raw locale string into a valid BCP 47 language tag.
///
/// This strips encoding suffixes (for example `.UTF-8`), removes variant
/// sections (for example `@latin`), replaces underscores with hyphens, and
/// validates the result using `LanguageIdentifier`. The `C` and `POSIX`
/// locales name no language and yield `None`.
///
/// # Examples
///
/// ```rust
/// use lexis::locale_resolution::normalize_locale_tag;
///
/// assert_eq!(normalize_locale_tag("en_US.UTF-8"), Some("en-US".to_string()));
/// assert_eq!(normalize_locale_tag("es-ES"), Some("es-ES".to_string()));
/// assert_eq!(normalize_locale_tag("12"), None);
/// assert_eq!(normalize_locale_tag("POSIX"), None);
/// ```
#[must_use]
pub fn normalize_locale_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = trimmed.split(['.', '@']).next().unwrap_or_default().trim();
    if stripped.is_empty() || UNSET_LOCALES.contains(&stripped) {
        return None;
    }
    let candidate = stripped.replace('_', "-");
    LanguageIdentifier::from_str(&candidate)
        .ok()
        .map(|lang| lang.to_string())
}

/// Build a preference list from a raw host locale.
///
/// Regional tags are followed by their primary language at a lower weight.
/// Returns `None` when the value is not a usable locale.
///
/// # Examples
///
/// ```rust
/// use lexis::locale_resolution::preference_from_locale;
///
/// assert_eq!(preference_from_locale("pt_BR.UTF-8").as_deref(), Some("pt-BR,pt;q=0.9"));
/// assert_eq!(preference_from_locale("de").as_deref(), Some("de"));
/// assert_eq!(preference_from_locale("C"), None);
/// ```
#[must_use]
pub fn preference_from_locale(raw: &str) -> Option<String> {
    let tag = normalize_locale_tag(raw)?;
    Some(match tag.split_once('-') {
        Some((primary, _)) => format!("{tag},{primary};q={PRIMARY_LANGUAGE_WEIGHT}"),
        None => tag,
    })
}

/// Preference list derived from the host locale, if one is available.
#[must_use]
pub fn system_preference(system: &impl SystemLocale) -> Option<String> {
    system
        .system_locale()
        .as_deref()
        .and_then(preference_from_locale)
}

//! CLI parsing helpers for clap value parsers.

use ortho_config::LanguageIdentifier;
use std::str::FromStr;

pub(super) fn parse_locale(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(String::from("locale must not be empty"));
    }
    LanguageIdentifier::from_str(trimmed)
        .map(|_| trimmed.to_owned())
        .map_err(|_| format!("invalid locale '{trimmed}'"))
}

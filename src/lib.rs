//! Lexis localisation catalogue engine.
//!
//! Lexis loads per-locale message catalogues from a directory, indexes their
//! fully-qualified keys in a prefix tree, negotiates a request's locale, and
//! serves plain, plural, date and prefix lookups while the catalogue can be
//! hot-reloaded underneath concurrent readers.
//!
//! The request layer normally works through [`service::Localization`]:
//!
//! ```no_run
//! use lexis::service::{Localization, LocalizationConfig};
//!
//! # fn main() -> Result<(), lexis::catalog::LoadError> {
//! let service = Localization::start(LocalizationConfig::new("locales", "en"))?;
//! let locale = service.request_locale(Some("pt-BR,pt;q=0.9"));
//! let localizer = service.localizer_for(&locale);
//! println!("{}", localizer.localize("base.hello"));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod locale_resolution;
pub mod localizer;
pub mod negotiate;
pub mod reload;
pub mod request;
pub mod runner;
pub mod service;
pub mod trie;

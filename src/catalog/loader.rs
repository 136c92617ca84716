//! Catalogue directory loading.
//!
//! The loader scans one directory (non-recursively) through a capability
//! handle and parses every `*.json`, `*.yaml`, and `*.yml` file in file-name
//! order. File names select the destination:
//!
//! - `<locale>.<ext>` holds a whole-locale document;
//! - `<locale>.<section>.<ext>` holds the contents of one section.
//!
//! Data for the same locale and section merges across files, with later
//! files overriding earlier ones key by key. A locale is loaded all or
//! nothing: when any of its files fails to read or parse, every contribution
//! to that locale from this pass is discarded and the failure is recorded in
//! [`LoadedCatalog::rejected`]. Strict loading turns the first rejection into
//! an error instead.

use super::document::{self, Format};
use super::{LoadError, LocaleCatalog, LocaleSections};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::collections::{BTreeMap, BTreeSet};
use std::{fs, io};
use tracing::{debug, info, warn};

/// Options controlling how failing files are treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail the whole load on the first rejected file.
    pub strict: bool,
}

impl LoadOptions {
    /// Options that reject the whole load on any failing file.
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// A catalogue file whose contribution was discarded.
#[derive(Debug)]
pub struct RejectedFile {
    /// Path of the failing file.
    pub path: Utf8PathBuf,
    /// Locale the file belonged to, when its name could be parsed.
    pub locale: Option<String>,
    /// Why the file was rejected.
    pub error: LoadError,
}

/// Result of scanning a catalogue directory.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    /// Locales whose files all loaded successfully.
    pub catalog: LocaleCatalog,
    /// Files that failed, in processing order.
    pub rejected: Vec<RejectedFile>,
    /// Number of catalogue files considered.
    pub files: usize,
}

impl LoadedCatalog {
    /// Locales dropped from this load because one of their files failed.
    #[must_use]
    pub fn rejected_locales(&self) -> BTreeSet<&str> {
        self.rejected
            .iter()
            .filter_map(|file| file.locale.as_deref())
            .collect()
    }
}

/// Parsed catalogue file name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogFile {
    name: String,
    locale: String,
    section: Option<String>,
    format: Format,
}

/// Classification of one directory entry.
enum Candidate {
    Catalog(CatalogFile),
    Invalid(String),
}

impl Candidate {
    fn classify(name: &str) -> Option<Self> {
        let path = Utf8Path::new(name);
        let format = path.extension().and_then(Format::from_extension)?;
        let stem = path.file_stem().unwrap_or_default();
        let (locale, section) = match stem.split_once('.') {
            Some((tag, section_name)) => (tag, Some(section_name)),
            None => (stem, None),
        };
        let valid_locale = !locale.is_empty() && !locale.contains(char::is_whitespace);
        let valid_section = section.is_none_or(|value| !value.is_empty() && !value.contains('.'));
        if !(valid_locale && valid_section) {
            return Some(Self::Invalid(name.to_owned()));
        }
        Some(Self::Catalog(CatalogFile {
            name: name.to_owned(),
            locale: locale.to_owned(),
            section: section.map(ToOwned::to_owned),
            format,
        }))
    }

    fn name(&self) -> &str {
        match self {
            Self::Catalog(file) => file.name.as_str(),
            Self::Invalid(name) => name.as_str(),
        }
    }
}

/// Load every catalogue file in `dir` with default (lenient) options.
///
/// # Errors
///
/// Returns a [`LoadError`] when the directory is missing, is not a
/// directory, cannot be listed, or contains no catalogue files. Individual
/// file failures are reported through [`LoadedCatalog::rejected`].
pub fn load(dir: &Utf8Path) -> Result<LoadedCatalog, LoadError> {
    load_with(dir, LoadOptions::default())
}

/// Load every catalogue file in `dir`.
///
/// # Errors
///
/// As for [`load`]; additionally, under [`LoadOptions::strict`] the first
/// failing file is returned as the error.
pub fn load_with(dir: &Utf8Path, options: LoadOptions) -> Result<LoadedCatalog, LoadError> {
    let root = open_directory(dir)?;
    let candidates = list_candidates(&root, dir)?;
    if candidates.is_empty() {
        return Err(LoadError::NoCatalogs {
            path: dir.to_owned(),
        });
    }

    let mut staged: BTreeMap<String, LocaleSections> = BTreeMap::new();
    let mut loaded = LoadedCatalog {
        files: candidates.len(),
        ..LoadedCatalog::default()
    };
    for candidate in candidates {
        let path = dir.join(candidate.name());
        let (locale, outcome) = match candidate {
            Candidate::Catalog(file) => {
                let parsed = read_catalog_file(&root, &path, &file);
                (Some(file.locale), parsed)
            }
            Candidate::Invalid(_) => (None, Err(LoadError::InvalidFileName { path: path.clone() })),
        };
        match (locale, outcome) {
            (Some(tag), Ok(sections)) => {
                debug!(path = %path, locale = %tag, "loaded locale file");
                staged.entry(tag).or_default().merge(sections);
            }
            (tag, Err(error)) => {
                if options.strict {
                    return Err(error);
                }
                warn!(path = %path, error = %error, "rejected locale file");
                loaded.rejected.push(RejectedFile {
                    path,
                    locale: tag,
                    error,
                });
            }
            (None, Ok(_)) => {}
        }
    }

    let rejected_locales: BTreeSet<String> = loaded
        .rejected_locales()
        .into_iter()
        .map(ToOwned::to_owned)
        .collect();
    for (tag, sections) in staged {
        if rejected_locales.contains(&tag) {
            continue;
        }
        loaded.catalog.insert_locale(tag, sections);
    }
    info!(
        path = %dir,
        locales = loaded.catalog.len(),
        messages = loaded.catalog.message_count(),
        rejected = loaded.rejected.len(),
        "loaded locale directory"
    );
    Ok(loaded)
}

fn open_directory(dir: &Utf8Path) -> Result<Dir, LoadError> {
    match fs::metadata(dir.as_std_path()) {
        Ok(metadata) if !metadata.is_dir() => {
            return Err(LoadError::NotADirectory {
                path: dir.to_owned(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::MissingDirectory {
                path: dir.to_owned(),
            });
        }
        Err(source) => {
            return Err(LoadError::ReadDirectory {
                path: dir.to_owned(),
                source,
            });
        }
    }
    Dir::open_ambient_dir(dir, ambient_authority()).map_err(|source| LoadError::ReadDirectory {
        path: dir.to_owned(),
        source,
    })
}

fn list_candidates(root: &Dir, dir: &Utf8Path) -> Result<Vec<Candidate>, LoadError> {
    let read_error = |source: io::Error| LoadError::ReadDirectory {
        path: dir.to_owned(),
        source,
    };
    let mut candidates = Vec::new();
    for entry in root.entries().map_err(read_error)? {
        let dir_entry = entry.map_err(read_error)?;
        if dir_entry.file_type().map_err(read_error)?.is_dir() {
            continue;
        }
        let Ok(name) = dir_entry.file_name() else {
            warn!(path = %dir, "ignoring entry with a non-UTF-8 file name");
            continue;
        };
        match Candidate::classify(&name) {
            Some(candidate) => candidates.push(candidate),
            None => debug!(file = %name, "ignoring non-catalogue file"),
        }
    }
    candidates.sort_by(|left, right| left.name().cmp(right.name()));
    Ok(candidates)
}

fn read_catalog_file(
    root: &Dir,
    path: &Utf8Path,
    file: &CatalogFile,
) -> Result<LocaleSections, LoadError> {
    let source = root
        .read_to_string(&file.name)
        .map_err(|source| LoadError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
    let parsed = match file.section.as_deref() {
        Some(section) => document::parse_section(file.format, &source, section),
        None => document::parse_locale(file.format, &source),
    };
    parsed.map_err(|detail| LoadError::Parse {
        path: path.to_owned(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn catalog(name: &str) -> Option<CatalogFile> {
        match Candidate::classify(name)? {
            Candidate::Catalog(file) => Some(file),
            Candidate::Invalid(_) => None,
        }
    }

    #[rstest]
    #[case("en.json", "en", None, Format::Json)]
    #[case("pt-BR.yaml", "pt-BR", None, Format::Yaml)]
    #[case("en.errors.yml", "en", Some("errors"), Format::Yaml)]
    fn file_names_map_to_locale_and_section(
        #[case] name: &str,
        #[case] locale: &str,
        #[case] section: Option<&str>,
        #[case] format: Format,
    ) {
        let file = catalog(name).expect("recognised catalogue file");
        assert_eq!(file.locale, locale);
        assert_eq!(file.section.as_deref(), section);
        assert_eq!(file.format, format);
    }

    #[rstest]
    #[case("README.md")]
    #[case("en.toml")]
    #[case(".json")]
    #[case("notes")]
    fn unrelated_files_are_ignored(#[case] name: &str) {
        assert!(Candidate::classify(name).is_none());
    }

    #[rstest]
    #[case("en..json")]
    #[case("en.a.b.json")]
    #[case(".errors.json")]
    fn malformed_names_are_flagged(#[case] name: &str) {
        assert!(matches!(
            Candidate::classify(name),
            Some(Candidate::Invalid(_))
        ));
    }
}

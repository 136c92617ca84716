//! Test utilities for catalogue loading.
//!
//! [`LocaleDir`] builds throwaway locale directories so integration tests
//! can load, edit, and reload catalogues without touching the repository.

pub mod locale_stubs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// Temporary directory holding locale files.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct LocaleDir {
    _temp: TempDir,
    path: Utf8PathBuf,
    dir: Dir,
}

impl LocaleDir {
    /// Create an empty locale directory.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp locale dir")?;
        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("temp dir {} is not UTF-8", path.display()))?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority())
            .with_context(|| format!("open {path}"))?;
        Ok(Self {
            _temp: temp,
            path,
            dir,
        })
    }

    /// Create a directory pre-populated with `files` as `(name, contents)`.
    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let locales = Self::new()?;
        for (name, contents) in files {
            locales.write(name, contents)?;
        }
        Ok(locales)
    }

    /// Path of the directory.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Write (or overwrite) `name` with `contents`.
    pub fn write(&self, name: &str, contents: &str) -> Result<()> {
        self.dir
            .write(name, contents)
            .with_context(|| format!("write {name} in {}", self.path))
    }

    /// Delete `name`.
    pub fn remove(&self, name: &str) -> Result<()> {
        self.dir
            .remove_file(name)
            .with_context(|| format!("remove {name} in {}", self.path))
    }

    /// Create an empty subdirectory called `name`.
    pub fn create_subdir(&self, name: &str) -> Result<()> {
        self.dir
            .create_dir(name)
            .with_context(|| format!("create {name} in {}", self.path))
    }
}

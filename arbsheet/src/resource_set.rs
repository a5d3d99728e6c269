//! Discovery of per-locale ARB files in a resource directory.
//!
//! Resource files follow the `<prefix>_<locale>.arb` convention, e.g.
//! `app_zh.arb` or `app_en_US.arb`. The locale code is everything between the
//! first `_` after the prefix and the extension, and it must look like a
//! locale: a file that matches the prefix but carries a malformed code fails
//! the scan instead of being silently mis-split.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

/// File extension for ARB resources.
pub const ARB_EXTENSION: &str = "arb";

lazy_static! {
    // Primary subtag of 2-8 letters, then optional subtags split by `_` or `-`.
    static ref LOCALE_CODE_REGEX: Regex =
        Regex::new(r"^[A-Za-z]{2,8}([_-][A-Za-z0-9]{1,8})*$").unwrap();
}

/// Whether `code` has the shape of a locale code (`zh`, `en_US`, `zh-Hant`).
pub fn is_locale_code(code: &str) -> bool {
    LOCALE_CODE_REGEX.is_match(code)
}

/// Extracts the locale code from a resource file name.
///
/// Returns `Ok(None)` for files that do not belong to the set (different
/// extension or prefix); a name that matches the convention but carries a
/// malformed locale code is an error.
pub fn locale_from_file_name(name: &str, prefix: &str) -> Result<Option<String>, Error> {
    let dot_ext = format!(".{}", ARB_EXTENSION);
    let Some(stem) = name.strip_suffix(dot_ext.as_str()) else {
        return Ok(None);
    };
    let Some(rest) = stem.strip_prefix(prefix) else {
        return Ok(None);
    };
    let Some(locale) = rest.strip_prefix('_') else {
        return Ok(None);
    };
    if locale.is_empty() {
        return Err(Error::file_name(name, "empty locale code"));
    }
    if !is_locale_code(locale) {
        return Err(Error::file_name(
            name,
            format!("`{locale}` is not a locale code"),
        ));
    }
    Ok(Some(locale.to_string()))
}

/// One discovered resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    pub locale: String,
    pub path: PathBuf,
}

/// The resource files of one directory, sorted by locale code so every
/// downstream column and report order is deterministic.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    dir: PathBuf,
    prefix: String,
    files: Vec<LocaleFile>,
}

impl ResourceSet {
    /// Scans `dir` for `<prefix>_<locale>.arb` files.
    ///
    /// Files with a different extension or prefix are ignored; an unreadable
    /// directory or a malformed resource file name fails the whole scan.
    pub fn scan<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| Error::directory(dir.display().to_string(), e.to_string()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::directory(dir.display().to_string(), e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(locale) = locale_from_file_name(name, prefix)? {
                files.push(LocaleFile { locale, path });
            }
        }
        files.sort_by(|a, b| a.locale.cmp(&b.locale));

        Ok(ResourceSet {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            files,
        })
    }

    /// The scanned directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The resource file name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Discovered files, sorted by locale code.
    pub fn files(&self) -> &[LocaleFile] {
        &self.files
    }

    /// The discovered file for `locale`, if one exists.
    pub fn find(&self, locale: &str) -> Option<&LocaleFile> {
        self.files.iter().find(|f| f.locale == locale)
    }

    /// The conventional path for a locale's file, whether or not it exists
    /// yet. Import seeds missing files at this path.
    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.{}", self.prefix, locale, ARB_EXTENSION))
    }
}

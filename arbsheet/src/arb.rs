//! Support for Flutter ARB resource files.
//!
//! An ARB file is a flat JSON object mapping keys to values. Keys beginning
//! with `@` are metadata; everything else is a translatable entry with a plain
//! string value. The reserved key `@@locale` records the file's own locale
//! code. Key order is meaningful to the humans maintaining these files and is
//! preserved through load, merge, and save.

use std::{
    fs::File,
    io::{BufRead, Read},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{backup, error::Error, traits::Parser};

/// Reserved key holding the file's own locale code.
pub const LOCALE_KEY: &str = "@@locale";

/// Prefix marking metadata keys (`@greeting` describes `greeting`).
pub const METADATA_MARKER: char = '@';

/// Field inside a metadata object carrying the translator-facing description.
pub const DESCRIPTION_FIELD: &str = "description";

/// Metadata key for a translatable key (`greeting` -> `@greeting`).
pub fn metadata_key(key: &str) -> String {
    format!("{METADATA_MARKER}{key}")
}

/// One parsed ARB document.
///
/// Metadata values are carried verbatim: only the `description` field of a
/// metadata object is ever read or written, all other fields survive a merge
/// byte-for-byte. Translatable values are validated to be strings at parse
/// time, so the accessors below never encounter anything else.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArbFile {
    values: Map<String, Value>,
}

impl ArbFile {
    /// Creates an empty document.
    pub fn new() -> Self {
        ArbFile { values: Map::new() }
    }

    /// Creates a document seeded with only `@@locale`, the starting point for
    /// a locale that has no resource file yet.
    pub fn with_locale(locale: &str) -> Self {
        let mut values = Map::new();
        values.insert(LOCALE_KEY.to_string(), Value::String(locale.to_string()));
        ArbFile { values }
    }

    /// The locale code declared by `@@locale`, if present.
    pub fn locale(&self) -> Option<&str> {
        self.values.get(LOCALE_KEY).and_then(Value::as_str)
    }

    /// Sets the `@@locale` entry.
    pub fn set_locale(&mut self, locale: &str) {
        self.values
            .insert(LOCALE_KEY.to_string(), Value::String(locale.to_string()));
    }

    /// The value of a translatable entry. Metadata keys always return `None`.
    pub fn value(&self, key: &str) -> Option<&str> {
        if key.starts_with(METADATA_MARKER) {
            return None;
        }
        self.values.get(key).and_then(Value::as_str)
    }

    /// Inserts or overwrites a translatable entry. An existing key keeps its
    /// position in the document; a new key appends at the end.
    pub fn set_value(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Translatable entries in document order.
    pub fn translatable_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().filter_map(|(key, value)| {
            if key.starts_with(METADATA_MARKER) {
                None
            } else {
                value.as_str().map(|v| (key.as_str(), v))
            }
        })
    }

    /// Metadata entries in document order, excluding `@@locale`.
    pub fn metadata_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().filter_map(|(key, value)| {
            if key.starts_with(METADATA_MARKER) && key != LOCALE_KEY {
                Some((key.as_str(), value))
            } else {
                None
            }
        })
    }

    /// The description attached to a key's metadata, when the metadata entry
    /// is an object with a string `description` field.
    pub fn description(&self, key: &str) -> Option<&str> {
        self.values
            .get(&metadata_key(key))?
            .as_object()?
            .get(DESCRIPTION_FIELD)?
            .as_str()
    }

    /// Attaches a description to a key's metadata and reports whether
    /// anything was written.
    ///
    /// A missing metadata entry is created with only the description; an
    /// existing object gains the field only when it has none yet. An existing
    /// description is never overwritten, and a non-object metadata value is
    /// left untouched.
    pub fn attach_description(&mut self, key: &str, description: &str) -> bool {
        let meta_key = metadata_key(key);
        match self.values.get_mut(&meta_key) {
            None => {
                let mut meta = Map::new();
                meta.insert(
                    DESCRIPTION_FIELD.to_string(),
                    Value::String(description.to_string()),
                );
                self.values.insert(meta_key, Value::Object(meta));
                true
            }
            Some(Value::Object(meta)) => {
                if meta.contains_key(DESCRIPTION_FIELD) {
                    false
                } else {
                    meta.insert(
                        DESCRIPTION_FIELD.to_string(),
                        Value::String(description.to_string()),
                    );
                    true
                }
            }
            Some(_) => false,
        }
    }

    /// Number of entries, metadata included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the document has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Writes the document to `path`, optionally copying the existing file to
    /// a timestamped `.bak` sibling first. Returns the backup path if one was
    /// made.
    ///
    /// The backup completes before the rewrite starts, so a failed backup
    /// leaves the original untouched.
    pub fn save_to<P: AsRef<Path>>(&self, path: P, backup: bool) -> Result<Option<PathBuf>, Error> {
        let path = path.as_ref();
        let backup_path = if backup && path.exists() {
            Some(backup::create_backup(path)?)
        } else {
            None
        };
        self.write_to(path)?;
        Ok(backup_path)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Parser for ArbFile {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let values: Map<String, Value> = serde_json::from_reader(reader)?;
        for (key, value) in &values {
            if !key.starts_with(METADATA_MARKER) && !value.is_string() {
                return Err(Error::document(format!(
                    "translatable entry `{}` must be a string, found {}",
                    key,
                    json_type_name(value)
                )));
            }
        }
        Ok(ArbFile { values })
    }

    /// Pretty two-space-indent JSON; non-ASCII text is written verbatim, never
    /// `\u`-escaped.
    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, &self.values).map_err(Error::Parse)
    }

    /// Override default file reading to tolerate a BOM, which editors on
    /// Windows routinely prepend.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound(path.display().to_string()),
            _ => Error::Io(e),
        })?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

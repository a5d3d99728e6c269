//! The tabular sheet exchanged with translators.
//!
//! A sheet is a CSV file with a header row: `key`, one column per locale
//! (reference locale first), and a trailing `description` column that exists
//! only when at least one row carries a description. Spreadsheet applications
//! open and save this directly, which is how the sheets travel to and from
//! translators.
//!
//! An empty cell means "no translation recorded". The format cannot
//! distinguish an intentionally empty translation from a missing one, so
//! empty cells read back as absent and are never imported.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, Read},
    path::Path,
};

use crate::{backup, error::Error, traits::Parser};

/// Header of the required key column.
pub const KEY_COLUMN: &str = "key";

/// Header of the optional description column.
pub const DESCRIPTION_COLUMN: &str = "description";

/// File extension for sheets.
pub const SHEET_EXTENSION: &str = "csv";

/// Fresh sheet file name, timestamped so repeated exports never collide.
pub fn timestamped_file_name() -> String {
    format!(
        "translations_{}.{}",
        backup::timestamp_slug(),
        SHEET_EXTENSION
    )
}

/// One sheet row: a key, its cell per locale, and an optional description.
///
/// Cells hold only non-empty text; an absent entry is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub key: String,
    pub cells: HashMap<String, String>,
    pub description: Option<String>,
}

impl Row {
    /// Creates an empty row for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Row {
            key: key.into(),
            cells: HashMap::new(),
            description: None,
        }
    }

    /// Sets the cell for a locale.
    pub fn set_cell(&mut self, locale: &str, value: &str) {
        self.cells.insert(locale.to_string(), value.to_string());
    }

    /// The cell for a locale, if one holds text.
    pub fn cell(&self, locale: &str) -> Option<&str> {
        self.cells.get(locale).map(String::as_str)
    }
}

/// A parsed or assembled sheet: locale columns in order, plus the rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sheet {
    pub locales: Vec<String>,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Creates an empty sheet with the given locale column order.
    pub fn new(locales: Vec<String>) -> Self {
        Sheet {
            locales,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Whether any row carries a description, which decides if the
    /// `description` column is written at all.
    pub fn has_descriptions(&self) -> bool {
        self.rows.iter().any(|r| r.description.is_some())
    }
}

impl Parser for Sheet {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = rdr.records();

        let Some(header) = records.next() else {
            return Err(Error::schema("sheet is empty, expected a header row"));
        };
        let header = header.map_err(Error::CsvParse)?;

        let mut key_column = None;
        let mut description_column = None;
        let mut locale_columns: Vec<(usize, String)> = Vec::new();
        for (index, name) in header.iter().enumerate() {
            let name = name.trim();
            match name {
                KEY_COLUMN => {
                    if key_column.is_some() {
                        return Err(Error::schema("duplicate `key` column"));
                    }
                    key_column = Some(index);
                }
                DESCRIPTION_COLUMN => {
                    if description_column.is_some() {
                        return Err(Error::schema("duplicate `description` column"));
                    }
                    description_column = Some(index);
                }
                "" => {
                    return Err(Error::schema(format!(
                        "column {} has an empty header",
                        index + 1
                    )));
                }
                _ => {
                    if locale_columns.iter().any(|(_, locale)| locale == name) {
                        return Err(Error::schema(format!("duplicate locale column `{name}`")));
                    }
                    locale_columns.push((index, name.to_string()));
                }
            }
        }
        let Some(key_column) = key_column else {
            return Err(Error::schema("missing required `key` column"));
        };
        if locale_columns.is_empty() {
            return Err(Error::schema("no locale columns found"));
        }

        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(Error::CsvParse)?;
            let mut row = Row::new(record.get(key_column).unwrap_or(""));
            for (index, locale) in &locale_columns {
                let value = record.get(*index).unwrap_or("");
                if !value.is_empty() {
                    row.set_cell(locale, value);
                }
            }
            if let Some(index) = description_column {
                let value = record.get(index).unwrap_or("");
                if !value.is_empty() {
                    row.description = Some(value.to_string());
                }
            }
            rows.push(row);
        }

        Ok(Sheet {
            locales: locale_columns.into_iter().map(|(_, locale)| locale).collect(),
            rows,
        })
    }

    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        let with_description = self.has_descriptions();

        let mut header: Vec<&str> = Vec::with_capacity(self.locales.len() + 2);
        header.push(KEY_COLUMN);
        for locale in &self.locales {
            header.push(locale);
        }
        if with_description {
            header.push(DESCRIPTION_COLUMN);
        }
        wtr.write_record(&header).map_err(Error::CsvParse)?;

        for row in &self.rows {
            let mut record: Vec<&str> = Vec::with_capacity(header.len());
            record.push(&row.key);
            for locale in &self.locales {
                record.push(row.cell(locale).unwrap_or(""));
            }
            if with_description {
                record.push(row.description.as_deref().unwrap_or(""));
            }
            wtr.write_record(&record).map_err(Error::CsvParse)?;
        }

        wtr.flush().map_err(Error::Io)?;
        Ok(())
    }

    /// Override default file reading to tolerate a BOM; Excel prepends one
    /// when saving CSV as UTF-8.
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

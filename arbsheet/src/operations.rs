//! High-level operations connecting resource documents and sheets.
//!
//! [`build_sheet`] flattens a set of locale documents into one sheet keyed by
//! the reference locale, and [`apply_sheet`] merges a sheet column back into a
//! single locale document. Directory scanning, file I/O and backups live with
//! the callers; these functions only transform in-memory data.

use serde::Serialize;

use crate::{
    arb::{ArbFile, METADATA_MARKER},
    sheet::{Row, Sheet},
};

/// Builds the translation sheet for one resource set.
///
/// The sheet has one row per translatable entry of `reference`, in document
/// order. The reference locale becomes the first locale column; the `others`
/// follow in the given order (an entry for the reference locale itself is
/// ignored, so the result of a directory scan can be passed through as is).
/// Descriptions are taken from the reference document's metadata.
///
/// Keys that only exist in other locales do not produce rows: the reference
/// document defines what is up for translation.
pub fn build_sheet(
    reference: &ArbFile,
    reference_locale: &str,
    others: &[(String, ArbFile)],
) -> Sheet {
    let mut locales = Vec::with_capacity(others.len() + 1);
    locales.push(reference_locale.to_string());
    for (locale, _) in others {
        if locale != reference_locale {
            locales.push(locale.clone());
        }
    }

    let mut sheet = Sheet::new(locales);
    for (key, value) in reference.translatable_entries() {
        let mut row = Row::new(key);
        if !value.is_empty() {
            row.set_cell(reference_locale, value);
        }
        for (locale, document) in others {
            if locale == reference_locale {
                continue;
            }
            if let Some(translation) = document.value(key) {
                if !translation.is_empty() {
                    row.set_cell(locale, translation);
                }
            }
        }
        row.description = reference.description(key).map(str::to_string);
        sheet.add_row(row);
    }
    sheet
}

/// What [`apply_sheet`] did to one locale document.
///
/// `created` is set by the caller when the document had to be seeded because
/// no file existed yet. `skipped` counts rows that offered nothing to import
/// for this locale: an empty cell, an empty key, or a key in the metadata
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleOutcome {
    pub locale: String,
    pub created: bool,
    pub added: usize,
    pub updated: usize,
    pub descriptions_added: usize,
    pub skipped: usize,
}

impl LocaleOutcome {
    /// Creates a zeroed outcome for a locale.
    pub fn new(locale: impl Into<String>) -> Self {
        LocaleOutcome {
            locale: locale.into(),
            created: false,
            added: 0,
            updated: 0,
            descriptions_added: 0,
            skipped: 0,
        }
    }

    /// Whether the document content changed and needs to be written back.
    ///
    /// A seeded document that received no cells does not count: it would
    /// serialize to nothing but its locale marker, and writing it would
    /// create file churn for no content.
    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0 || self.descriptions_added > 0
    }
}

/// Merges the column for `locale` from `sheet` into `target`.
///
/// Cells only ever add or replace values; keys absent from the sheet or with
/// an empty cell are left untouched, so a sheet can never delete a
/// translation. Identical values are left alone, which keeps a fresh
/// export/import cycle from touching any file.
///
/// When a cell changes a value and the row carries a description, the
/// description is attached to the entry's metadata unless one already exists.
/// Rows with an empty key or a key starting with `@` are skipped: the
/// reserved namespace is owned by the documents, not the sheet.
pub fn apply_sheet(sheet: &Sheet, locale: &str, target: &mut ArbFile) -> LocaleOutcome {
    let mut outcome = LocaleOutcome::new(locale);
    for row in &sheet.rows {
        if row.key.is_empty() || row.key.starts_with(METADATA_MARKER) {
            outcome.skipped += 1;
            continue;
        }
        let Some(value) = row.cell(locale) else {
            outcome.skipped += 1;
            continue;
        };

        let (exists, same) = match target.value(&row.key) {
            Some(current) => (true, current == value),
            None => (false, false),
        };
        if same {
            continue;
        }

        target.set_value(&row.key, value);
        if exists {
            outcome.updated += 1;
        } else {
            outcome.added += 1;
        }
        if let Some(description) = &row.description {
            if target.attach_description(&row.key, description) {
                outcome.descriptions_added += 1;
            }
        }
    }
    outcome
}

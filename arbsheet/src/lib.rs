#![forbid(unsafe_code)]
//! Round-trip Flutter ARB localization resources through translator sheets.
//!
//! `arbsheet` reads a directory of per-locale ARB files (`app_en.arb`,
//! `app_zh.arb`, ...), flattens them into one CSV sheet with a row per key of
//! the reference locale, and merges an edited sheet back into the ARB files,
//! writing a timestamped backup before overwriting anything.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arbsheet::{ArbFile, Parser, ResourceSet, Sheet, apply_sheet, build_sheet};
//!
//! // Export: scan the resource directory and build a sheet.
//! let set = ResourceSet::scan("lib/core/i18n/l10n", "app")?;
//! let reference = ArbFile::read_from(set.path_for("zh"))?;
//! let mut others = Vec::new();
//! for file in set.files() {
//!     others.push((file.locale.clone(), ArbFile::read_from(&file.path)?));
//! }
//! let sheet = build_sheet(&reference, "zh", &others);
//! sheet.write_to("translations/translations_20240131_120000.csv")?;
//!
//! // Import: merge a reviewed sheet back into one locale.
//! let sheet = Sheet::read_from("translations/reviewed.csv")?;
//! let mut english = ArbFile::read_from(set.path_for("en"))?;
//! let outcome = apply_sheet(&sheet, "en", &mut english);
//! if outcome.changed() {
//!     english.save_to(set.path_for("en"), true)?;
//! }
//! # Ok::<(), arbsheet::Error>(())
//! ```
//!
//! # Merge Rules
//!
//! - Key order in ARB documents is preserved end to end; imports update
//!   values in place and append new keys at the end.
//! - The sheet never deletes: empty cells mean "no translation recorded" and
//!   are skipped on import.
//! - Files are only rewritten when their content actually changed, so a
//!   fresh export/import cycle leaves the resource directory untouched.
//! - A sheet description is attached only to an entry whose value changed
//!   and that has no description yet; hand-maintained metadata wins.

pub mod arb;
pub mod backup;
pub mod error;
pub mod operations;
pub mod resource_set;
pub mod sheet;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    arb::ArbFile,
    error::Error,
    operations::{LocaleOutcome, apply_sheet, build_sheet},
    resource_set::{LocaleFile, ResourceSet},
    sheet::{Row, Sheet},
    traits::Parser,
};

use std::path::{Path, PathBuf};

use arbsheet::{ArbFile, LocaleOutcome, Parser, ResourceSet, Sheet, apply_sheet, resource_set};
use serde_json::json;

use crate::picker::{ConsolePicker, SheetPicker, list_sheet_candidates};
use crate::validation::{validate_dir_path, validate_file_path, validate_output_path};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub arb_dir: String,
    pub prefix: String,
    pub table: Option<String>,
    pub table_dir: String,
    pub no_backup: bool,
    pub report_json: Option<String>,
}

pub fn run_import_command(opts: ImportOptions) -> Result<(), String> {
    run_import_command_with(opts, &ConsolePicker)
}

/// Import with an injected picker, so tests can select a sheet without a
/// terminal.
pub fn run_import_command_with(
    opts: ImportOptions,
    picker: &dyn SheetPicker,
) -> Result<(), String> {
    validate_dir_path(&opts.arb_dir)?;
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }

    let sheet_path = resolve_sheet_path(&opts, picker)?;
    println!("Importing from: {}", sheet_path.display());

    let sheet = Sheet::read_from(&sheet_path)
        .map_err(|e| format!("Failed to read '{}': {}", sheet_path.display(), e))?;
    for locale in &sheet.locales {
        if !resource_set::is_locale_code(locale) {
            return Err(format!(
                "Sheet column '{}' does not look like a locale code",
                locale
            ));
        }
    }

    let set = ResourceSet::scan(&opts.arb_dir, &opts.prefix).map_err(|e| e.to_string())?;

    // Each locale is independent: a failure in one is reported and the rest
    // still run, but the command exits non-zero at the end.
    let mut outcomes: Vec<LocaleOutcome> = Vec::new();
    let mut failures: Vec<String> = Vec::new();
    for locale in &sheet.locales {
        match import_locale(&sheet, locale, &set, opts.no_backup) {
            Ok(outcome) => outcomes.push(outcome),
            Err(message) => {
                eprintln!("Error: {}", message);
                failures.push(locale.clone());
            }
        }
    }

    if let Some(report_path) = &opts.report_json {
        write_report(report_path, &sheet_path, &outcomes, &failures)?;
        println!("Report JSON written: {}", report_path);
    }

    if !failures.is_empty() {
        return Err(format!(
            "Import failed for locale(s): {}",
            failures.join(", ")
        ));
    }

    let written = outcomes.iter().filter(|o| o.changed()).count();
    println!(
        "✅ Import complete: {} locale(s) processed, {} file(s) written",
        outcomes.len(),
        written
    );
    Ok(())
}

/// Resolution order: an explicit `--table` path wins; otherwise the table
/// directory is listed, a lone sheet is used directly (announced on stdout),
/// and only an ambiguous listing reaches the picker.
fn resolve_sheet_path(opts: &ImportOptions, picker: &dyn SheetPicker) -> Result<PathBuf, String> {
    if let Some(table) = &opts.table {
        validate_file_path(table)?;
        return Ok(PathBuf::from(table));
    }

    validate_dir_path(&opts.table_dir)?;
    let candidates = list_sheet_candidates(Path::new(&opts.table_dir))?;
    if candidates.is_empty() {
        return Err(format!("No sheet files found in '{}'", opts.table_dir));
    }
    if candidates.len() == 1 {
        println!("Using sheet: {}", candidates[0].path.display());
        return Ok(candidates[0].path.clone());
    }
    picker.pick(&candidates)
}

fn import_locale(
    sheet: &Sheet,
    locale: &str,
    set: &ResourceSet,
    no_backup: bool,
) -> Result<LocaleOutcome, String> {
    let path = set.path_for(locale);
    let (mut document, created) = if path.exists() {
        let document = ArbFile::read_from(&path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        if let Some(declared) = document.locale() {
            if declared != locale {
                return Err(format!(
                    "'{}' declares @@locale '{}' but the file name says '{}'",
                    path.display(),
                    declared,
                    locale
                ));
            }
        }
        (document, false)
    } else {
        println!("Creating new resource file: {}", path.display());
        (ArbFile::with_locale(locale), true)
    };

    let mut outcome = apply_sheet(sheet, locale, &mut document);
    outcome.created = created;

    if outcome.changed() {
        let backup = document
            .save_to(&path, !no_backup)
            .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
        if let Some(backup) = backup {
            println!("Backup written: {}", backup.display());
        }
        println!(
            "Updated {}: {} added, {} updated, {} description(s) attached",
            path.display(),
            outcome.added,
            outcome.updated,
            outcome.descriptions_added
        );
    } else {
        println!("No changes for {}", path.display());
    }
    Ok(outcome)
}

fn write_report(
    path: &str,
    sheet_path: &Path,
    outcomes: &[LocaleOutcome],
    failures: &[String],
) -> Result<(), String> {
    let payload = json!({
        "sheet": sheet_path.display().to_string(),
        "locales": outcomes,
        "failed": failures,
        "summary": {
            "locales": outcomes.len(),
            "files_written": outcomes.iter().filter(|o| o.changed()).count(),
            "added": outcomes.iter().map(|o| o.added).sum::<usize>(),
            "updated": outcomes.iter().map(|o| o.updated).sum::<usize>(),
            "descriptions_added": outcomes.iter().map(|o| o.descriptions_added).sum::<usize>(),
        },
    });

    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}

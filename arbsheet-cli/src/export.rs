use std::path::Path;

use arbsheet::{ArbFile, Parser, ResourceSet, build_sheet, sheet};

use crate::validation::{validate_dir_path, validate_locale_code};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub arb_dir: String,
    pub prefix: String,
    pub reference: String,
    pub output_dir: String,
}

pub fn run_export_command(opts: ExportOptions) -> Result<(), String> {
    validate_dir_path(&opts.arb_dir)?;
    validate_locale_code(&opts.reference)?;

    let set = ResourceSet::scan(&opts.arb_dir, &opts.prefix).map_err(|e| e.to_string())?;
    let Some(reference_file) = set.find(&opts.reference) else {
        return Err(format!(
            "Reference file not found: {}",
            set.path_for(&opts.reference).display()
        ));
    };

    let reference = ArbFile::read_from(&reference_file.path)
        .map_err(|e| format!("Failed to read '{}': {}", reference_file.path.display(), e))?;
    if let Some(declared) = reference.locale() {
        if declared != opts.reference {
            return Err(format!(
                "'{}' declares @@locale '{}' but the file name says '{}'",
                reference_file.path.display(),
                declared,
                opts.reference
            ));
        }
    }

    // Any unreadable file aborts the export before anything is written.
    let mut others = Vec::new();
    for file in set.files() {
        if file.locale == opts.reference {
            continue;
        }
        let document = ArbFile::read_from(&file.path)
            .map_err(|e| format!("Failed to read '{}': {}", file.path.display(), e))?;
        others.push((file.locale.clone(), document));
    }

    let sheet = build_sheet(&reference, &opts.reference, &others);

    std::fs::create_dir_all(&opts.output_dir)
        .map_err(|e| format!("Cannot create output directory '{}': {}", opts.output_dir, e))?;
    let output_path = Path::new(&opts.output_dir).join(sheet::timestamped_file_name());
    sheet
        .write_to(&output_path)
        .map_err(|e| format!("Failed to write '{}': {}", output_path.display(), e))?;

    println!("Keys exported: {}", sheet.rows.len());
    println!("Locales: {}", sheet.locales.join(", "));
    println!("✅ Sheet written: {}", output_path.display());
    Ok(())
}

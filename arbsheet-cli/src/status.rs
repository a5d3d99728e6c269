use arbsheet::{ArbFile, Parser, ResourceSet};
use serde::Serialize;
use serde_json::json;

use crate::validation::{validate_dir_path, validate_locale_code};

#[derive(Debug, Clone)]
pub struct StatusOptions {
    pub arb_dir: String,
    pub prefix: String,
    pub reference: String,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LocaleStatus {
    locale: String,
    translated: usize,
    missing: usize,
    completion_percent: f64,
}

pub fn run_status_command(opts: StatusOptions) -> Result<(), String> {
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
    let reference_keys: Vec<String> = reference
        .translatable_entries()
        .map(|(key, _)| key.to_string())
        .collect();

    let mut rows = Vec::new();
    for file in set.files() {
        if file.locale == opts.reference {
            continue;
        }
        let document = ArbFile::read_from(&file.path)
            .map_err(|e| format!("Failed to read '{}': {}", file.path.display(), e))?;
        let translated = reference_keys
            .iter()
            .filter(|key| document.value(key).is_some_and(|v| !v.is_empty()))
            .count();
        let missing = reference_keys.len() - translated;
        let percent = if reference_keys.is_empty() {
            100.0
        } else {
            (translated as f64) * 100.0 / (reference_keys.len() as f64)
        };
        rows.push(LocaleStatus {
            locale: file.locale.clone(),
            translated,
            missing,
            completion_percent: (percent * 100.0).round() / 100.0,
        });
    }

    if opts.json {
        let body = json!({
            "reference": opts.reference,
            "keys": reference_keys.len(),
            "locales": rows,
        });
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| format!("Failed to serialize status JSON: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("=== Translation status ===");
    println!(
        "Reference: {} ({} keys)",
        opts.reference,
        reference_keys.len()
    );
    for row in &rows {
        println!("\nLocale: {}", row.locale);
        println!("  Translated: {}", row.translated);
        println!("  Missing: {}", row.missing);
        println!("  Completion: {:.2}%", row.completion_percent);
    }
    Ok(())
}

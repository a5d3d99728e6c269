//! Selection of a sheet file when none was named on the command line.
//!
//! A lone candidate is used directly without a prompt; only an ambiguous
//! listing reaches the picker. The interactive prompt is the only place the
//! tool blocks on user input, so it sits behind the [`SheetPicker`] trait
//! and the import logic takes the picker as a collaborator. Tests supply a
//! canned picker instead of simulating console input.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// One selectable sheet file and its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetCandidate {
    pub path: PathBuf,
    pub modified: DateTime<Local>,
}

/// Chooses one sheet out of the candidates, newest first.
pub trait SheetPicker {
    fn pick(&self, candidates: &[SheetCandidate]) -> Result<PathBuf, String>;
}

/// Lists the sheet files in a directory, sorted by modification time with
/// the newest first.
pub fn list_sheet_candidates(dir: &Path) -> Result<Vec<SheetCandidate>, String> {
    // The directory name is literal text, not pattern syntax; a directory
    // like `translations[2024]` must still match.
    let literal_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&literal_dir).join(format!("*.{}", arbsheet::sheet::SHEET_EXTENSION));
    let pattern = pattern.to_string_lossy().into_owned();

    let mut candidates = Vec::new();
    let paths =
        glob::glob(&pattern).map_err(|e| format!("Invalid sheet pattern '{}': {}", pattern, e))?;
    for entry in paths {
        let path = entry.map_err(|e| format!("Cannot list sheets: {}", e))?;
        if !path.is_file() {
            continue;
        }
        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|e| format!("Cannot stat '{}': {}", path.display(), e))?;
        candidates.push(SheetCandidate {
            path,
            modified: DateTime::<Local>::from(modified),
        });
    }
    candidates.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(candidates)
}

/// Interactive picker: prints a numbered list and reads one selection from
/// stdin. Refuses to prompt when stdin is not a terminal.
pub struct ConsolePicker;

impl SheetPicker for ConsolePicker {
    fn pick(&self, candidates: &[SheetCandidate]) -> Result<PathBuf, String> {
        if candidates.is_empty() {
            return Err("No sheet files found".to_string());
        }
        if !atty::is(atty::Stream::Stdin) {
            return Err(
                "Multiple sheets found and stdin is not a terminal; pass --table to pick one"
                    .to_string(),
            );
        }

        println!("Available sheets (newest first):");
        for (index, candidate) in candidates.iter().enumerate() {
            println!(
                "  {}. {} ({})",
                index + 1,
                candidate.path.display(),
                candidate.modified.format("%Y-%m-%d %H:%M:%S")
            );
        }
        print!("Select a sheet [1-{}]: ", candidates.len());
        std::io::stdout()
            .flush()
            .map_err(|e| format!("Cannot prompt for selection: {}", e))?;

        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .map_err(|e| format!("Cannot read selection: {}", e))?;
        let choice: usize = line
            .trim()
            .parse()
            .map_err(|_| format!("Invalid selection: '{}'", line.trim()))?;
        if choice == 0 || choice > candidates.len() {
            return Err(format!("Selection out of range: {}", choice));
        }
        Ok(candidates[choice - 1].path.clone())
    }
}

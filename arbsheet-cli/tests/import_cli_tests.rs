use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn arbsheet_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("arbsheet"))
}

fn write_arb_fixtures(arb_dir: &Path) {
    fs::create_dir_all(arb_dir).unwrap();
    fs::write(
        arb_dir.join("app_zh.arb"),
        r#"{
  "@@locale": "zh",
  "greeting": "你好",
  "@greeting": {
    "description": "greeting text"
  },
  "farewell": "再见"
}"#,
    )
    .unwrap();
    fs::write(
        arb_dir.join("app_en.arb"),
        r#"{
  "@@locale": "en",
  "greeting": "Hello"
}"#,
    )
    .unwrap();
}

fn backups_in(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().ends_with(".bak"))
        .collect()
}

fn run_import(arb_dir: &Path, extra: &[&str]) -> std::process::Output {
    let mut args = vec![
        "import".to_string(),
        "--arb-dir".to_string(),
        arb_dir.to_str().unwrap().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    arbsheet_cmd()
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_import_updates_file_and_writes_backup() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);
    let original_en = fs::read(arb_dir.join("app_en.arb")).unwrap();
    let original_zh = fs::read(arb_dir.join("app_zh.arb")).unwrap();

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(
        &sheet,
        "key,zh,en\ngreeting,你好,Hello\nfarewell,再见,Goodbye\n",
    )
    .unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Backup written:"), "stdout: {stdout}");
    assert!(stdout.contains("1 file(s) written"), "stdout: {stdout}");

    let updated_en = fs::read_to_string(arb_dir.join("app_en.arb")).unwrap();
    assert!(updated_en.contains("\"farewell\": \"Goodbye\""));

    // The zh column matched the current content, so only en was rewritten
    // and only en left a backup behind.
    assert_eq!(fs::read(arb_dir.join("app_zh.arb")).unwrap(), original_zh);
    let backups = backups_in(&arb_dir);
    assert_eq!(backups.len(), 1, "backups: {backups:?}");
    assert!(backups[0].to_string_lossy().contains("app_en.arb."));
    assert_eq!(fs::read(&backups[0]).unwrap(), original_en);
}

#[test]
fn test_import_with_unedited_sheet_reports_no_change() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);
    let original_en = fs::read(arb_dir.join("app_en.arb")).unwrap();

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(&sheet, "key,zh,en\ngreeting,你好,Hello\nfarewell,再见,\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No changes for"), "stdout: {stdout}");
    assert!(stdout.contains("0 file(s) written"), "stdout: {stdout}");

    assert_eq!(fs::read(arb_dir.join("app_en.arb")).unwrap(), original_en);
    assert!(backups_in(&arb_dir).is_empty());
}

#[test]
fn test_import_creates_missing_locale_file() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(&sheet, "key,zh,fr\ngreeting,你好,Bonjour\nfarewell,再见,\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating new resource file:"), "stdout: {stdout}");

    let french = fs::read_to_string(arb_dir.join("app_fr.arb")).unwrap();
    assert!(french.contains("\"@@locale\": \"fr\""));
    assert!(french.contains("\"greeting\": \"Bonjour\""));
    assert!(!french.contains("farewell"), "empty cell must stay unset");
    assert!(backups_in(&arb_dir).is_empty(), "new files have nothing to back up");
}

#[test]
fn test_import_skips_empty_cells() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    // The en cell for greeting is empty; the existing translation stays.
    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(&sheet, "key,zh,en\ngreeting,你好,\nfarewell,再见,\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let english = fs::read_to_string(arb_dir.join("app_en.arb")).unwrap();
    assert!(english.contains("\"greeting\": \"Hello\""));
}

#[test]
fn test_import_attaches_description_only_when_value_changes() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(
        &sheet,
        "key,zh,en,description\ngreeting,你好,Hello,greeting text\nfarewell,再见,Goodbye,farewell text\n",
    )
    .unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let english = fs::read_to_string(arb_dir.join("app_en.arb")).unwrap();
    // farewell was newly translated, so its description came along.
    assert!(english.contains("\"@farewell\""), "content: {english}");
    assert!(english.contains("farewell text"));
    // greeting was already up to date, so no metadata was created for it.
    assert!(!english.contains("\"@greeting\""), "content: {english}");
}

#[test]
fn test_import_never_overwrites_existing_description() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    fs::create_dir_all(&arb_dir).unwrap();
    fs::write(
        arb_dir.join("app_en.arb"),
        r#"{
  "@@locale": "en",
  "farewell": "Bye",
  "@farewell": {
    "description": "hand written"
  }
}"#,
    )
    .unwrap();

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(&sheet, "key,en,description\nfarewell,Goodbye,sheet text\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let english = fs::read_to_string(arb_dir.join("app_en.arb")).unwrap();
    assert!(english.contains("\"farewell\": \"Goodbye\""));
    assert!(english.contains("hand written"));
    assert!(!english.contains("sheet text"));
}

#[test]
fn test_import_fails_on_missing_key_column() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let sheet = temp_dir.path().join("broken.csv");
    fs::write(&sheet, "zh,en\n你好,Hello\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required `key` column"), "stderr: {stderr}");
}

#[test]
fn test_import_fails_without_locale_columns() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let sheet = temp_dir.path().join("broken.csv");
    fs::write(&sheet, "key,description\ngreeting,text\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no locale columns"), "stderr: {stderr}");
}

#[test]
fn test_import_rejects_non_locale_column_headers() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let sheet = temp_dir.path().join("broken.csv");
    fs::write(&sheet, "key,zh,review notes\ngreeting,你好,looks fine\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not look like a locale code"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_import_no_backup_flag_skips_backup() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(&sheet, "key,zh,en\nfarewell,再见,Goodbye\n").unwrap();

    let output = run_import(
        &arb_dir,
        &["--table", sheet.to_str().unwrap(), "--no-backup"],
    );
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(backups_in(&arb_dir).is_empty());
    let english = fs::read_to_string(arb_dir.join("app_en.arb")).unwrap();
    assert!(english.contains("\"farewell\": \"Goodbye\""));
}

#[test]
fn test_import_writes_report_json() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(&sheet, "key,zh,en\nfarewell,再见,Goodbye\n").unwrap();
    let report = temp_dir.path().join("report.json");

    let output = run_import(
        &arb_dir,
        &[
            "--table",
            sheet.to_str().unwrap(),
            "--report-json",
            report.to_str().unwrap(),
        ],
    );
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(v["summary"]["files_written"], 1);
    assert_eq!(v["summary"]["added"], 1);
    assert_eq!(v["failed"].as_array().unwrap().len(), 0);

    let locales = v["locales"].as_array().unwrap();
    let en = locales.iter().find(|l| l["locale"] == "en").unwrap();
    assert_eq!(en["added"], 1);
    assert_eq!(en["created"], false);
}

#[test]
fn test_import_picks_single_sheet_automatically() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let table_dir = temp_dir.path().join("translations");
    fs::create_dir_all(&table_dir).unwrap();
    fs::write(
        table_dir.join("translations_20240131_120000.csv"),
        "key,zh,en\nfarewell,再见,Goodbye\n",
    )
    .unwrap();

    let output = run_import(&arb_dir, &["--table-dir", table_dir.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Using sheet:"), "stdout: {stdout}");
    // A lone sheet is used directly; the numbered listing is for the
    // ambiguous case only.
    assert!(!stdout.contains("Available sheets"), "stdout: {stdout}");

    let english = fs::read_to_string(arb_dir.join("app_en.arb")).unwrap();
    assert!(english.contains("\"farewell\": \"Goodbye\""));
}

#[test]
fn test_import_requires_table_when_ambiguous_without_terminal() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);

    let table_dir = temp_dir.path().join("translations");
    fs::create_dir_all(&table_dir).unwrap();
    fs::write(table_dir.join("a.csv"), "key,en\ngreeting,Hi\n").unwrap();
    fs::write(table_dir.join("b.csv"), "key,en\ngreeting,Hey\n").unwrap();

    let output = run_import(&arb_dir, &["--table-dir", table_dir.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pass --table"), "stderr: {stderr}");
}

#[test]
fn test_import_continues_past_a_broken_locale() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    write_arb_fixtures(&arb_dir);
    fs::write(arb_dir.join("app_de.arb"), "{ not valid json").unwrap();

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(
        &sheet,
        "key,zh,de,fr\ngreeting,你好,Hallo,Bonjour\nfarewell,再见,,\n",
    )
    .unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Import failed for locale(s): de"),
        "stderr: {stderr}"
    );

    // The broken locale did not stop the others: fr was still created.
    let french = fs::read_to_string(arb_dir.join("app_fr.arb")).unwrap();
    assert!(french.contains("\"greeting\": \"Bonjour\""));
}

#[test]
fn test_import_rejects_locale_declaration_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let arb_dir = temp_dir.path().join("l10n");
    fs::create_dir_all(&arb_dir).unwrap();
    fs::write(
        arb_dir.join("app_en.arb"),
        r#"{"@@locale": "de", "greeting": "Hallo"}"#,
    )
    .unwrap();

    let sheet = temp_dir.path().join("reviewed.csv");
    fs::write(&sheet, "key,en\ngreeting,Hello\n").unwrap();

    let output = run_import(&arb_dir, &["--table", sheet.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("declares @@locale"), "stderr: {stderr}");

    // The mismatched file was left untouched.
    let english = fs::read_to_string(arb_dir.join("app_en.arb")).unwrap();
    assert!(english.contains("Hallo"));
}

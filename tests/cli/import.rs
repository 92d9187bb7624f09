use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, STORE_PATH, stderr, stdout};

const EN_AUTH: &str = r#"<?php

return [
    'failed' => 'These credentials do not match our records.',
    'throttle' => 'Too many login attempts.',
    'login' => [
        'title' => 'Log in',
    ],
];
"#;

const NL_AUTH: &str = r#"<?php
// Dutch
return array(
    'failed' => 'Deze combinatie van e-mailadres en wachtwoord is niet geldig.',
    'login' => array('title' => 'Inloggen'),
);
"#;

fn setup_project(test: &CliTest) -> Result<()> {
    test.write_file("resources/lang/en/auth.php", EN_AUTH)?;
    test.write_file("resources/lang/nl/auth.php", NL_AUTH)?;
    test.write_file("resources/lang/en.json", r#"{"Welcome": "Welcome"}"#)?;
    test.write_file("resources/lang/nl.json", r#"{"Welcome": "Welkom", "Empty": ""}"#)?;
    test.write_file(
        "resources/lang/vendor/courier/en/messages.php",
        "<?php return ['sent' => 'Message sent'];",
    )?;
    Ok(())
}

#[test]
fn test_import_creates_files_and_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.run_ok(&mut test.import_command())?;

    assert!(
        stdout(&output).contains("✓ Imported 3 files, 5 keys created, 0 keys updated"),
        "unexpected output:\n{}",
        stdout(&output)
    );

    let store = test.read_store()?;
    let files: Vec<(Option<&str>, &str)> = store["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["vendor"].as_str(), f["filename"].as_str().unwrap()))
        .collect();
    assert_eq!(
        files,
        vec![(None, "_json"), (None, "auth"), (Some("courier"), "messages")]
    );

    assert_eq!(
        test.stored_translations(None, "auth", "failed")?,
        Some(json!({
            "en": "These credentials do not match our records.",
            "nl": "Deze combinatie van e-mailadres en wachtwoord is niet geldig."
        }))
    );
    assert_eq!(
        test.stored_translations(None, "auth", "login.title")?,
        Some(json!({"en": "Log in", "nl": "Inloggen"}))
    );
    assert_eq!(
        test.stored_translations(None, "auth", "throttle")?,
        Some(json!({"en": "Too many login attempts."}))
    );
    assert_eq!(
        test.stored_translations(None, "_json", "Welcome")?,
        Some(json!({"en": "Welcome", "nl": "Welkom"}))
    );
    assert_eq!(test.stored_translations(None, "_json", "Empty")?, None);
    assert_eq!(
        test.stored_translations(Some("courier"), "messages", "sent")?,
        Some(json!({"en": "Message sent"}))
    );

    Ok(())
}

#[test]
fn test_import_twice_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    test.run_ok(&mut test.import_command())?;
    let before = test.read_file(STORE_PATH)?;

    let output = test.run_ok(&mut test.import_command())?;

    let out = stdout(&output);
    assert!(out.contains("Skipped existing file auth"), "{}", out);
    assert!(out.contains("Skipped existing file courier::messages"), "{}", out);
    assert!(out.contains("✓ Nothing to import"), "{}", out);
    assert_eq!(test.read_file(STORE_PATH)?, before);

    Ok(())
}

#[test]
fn test_import_fill_missing_keeps_existing_values() -> Result<()> {
    let test = CliTest::with_file("resources/lang/en/auth.php", EN_AUTH)?;
    test.run_ok(&mut test.import_command())?;

    test.write_file("resources/lang/nl/auth.php", NL_AUTH)?;
    test.write_file(
        "resources/lang/en/auth.php",
        "<?php return ['failed' => 'Changed', 'password' => 'Wrong password'];",
    )?;

    let output = test.run_ok(test.import_command().arg("--fill-missing"))?;

    assert!(stdout(&output).contains("1 key created, 2 keys updated"), "{}", stdout(&output));
    assert_eq!(
        test.stored_translations(None, "auth", "failed")?,
        Some(json!({
            "en": "These credentials do not match our records.",
            "nl": "Deze combinatie van e-mailadres en wachtwoord is niet geldig."
        }))
    );
    assert_eq!(
        test.stored_translations(None, "auth", "password")?,
        Some(json!({"en": "Wrong password"}))
    );

    Ok(())
}

#[test]
fn test_import_replace_existing_overwrites_values() -> Result<()> {
    let test = CliTest::with_file("resources/lang/en/auth.php", EN_AUTH)?;
    test.run_ok(&mut test.import_command())?;

    test.write_file(
        "resources/lang/en/auth.php",
        "<?php return ['failed' => 'Changed'];",
    )?;
    test.write_file("resources/lang/nl/auth.php", NL_AUTH)?;

    test.run_ok(test.import_command().arg("--replace-existing"))?;

    // nl was missing, which only --fill-missing adds
    assert_eq!(
        test.stored_translations(None, "auth", "failed")?,
        Some(json!({"en": "Changed"}))
    );
    assert_eq!(
        test.stored_translations(None, "auth", "throttle")?,
        Some(json!({"en": "Too many login attempts."}))
    );

    Ok(())
}

#[test]
fn test_import_only_selected_locales() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    test.run_ok(test.import_command().args(["--locales", "nl"]))?;

    assert_eq!(
        test.stored_translations(None, "auth", "failed")?,
        Some(json!({"nl": "Deze combinatie van e-mailadres en wachtwoord is niet geldig."}))
    );
    assert_eq!(test.stored_translations(None, "auth", "throttle")?, None);
    assert_eq!(test.stored_translations(Some("courier"), "messages", "sent")?, None);

    Ok(())
}

#[test]
fn test_import_locales_from_config() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file(".transyncrc.json", r#"{ "locales": ["en"] }"#)?;

    test.run_ok(&mut test.import_command())?;

    assert_eq!(
        test.stored_translations(None, "_json", "Welcome")?,
        Some(json!({"en": "Welcome"}))
    );

    Ok(())
}

#[test]
fn test_import_include_empty() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    test.run_ok(test.import_command().arg("--include-empty"))?;

    assert_eq!(
        test.stored_translations(None, "_json", "Empty")?,
        Some(json!({"nl": ""}))
    );

    Ok(())
}

#[test]
fn test_import_purge_replaces_store() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.run_ok(&mut test.import_command())?;

    std::fs::remove_dir_all(test.root().join("resources/lang/vendor"))?;

    let output = test.run_ok(test.import_command().arg("--purge"))?;

    assert!(stdout(&output).contains("Purged all files and keys"));
    let store = test.read_store()?;
    let files = store["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    // ids keep counting after a purge
    assert_eq!(files[0]["id"], 4);

    Ok(())
}

#[test]
fn test_import_dry_run_does_not_write() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.run_ok(test.import_command().arg("--dry-run"))?;

    let out = stdout(&output);
    assert!(out.contains("Created file auth"), "{}", out);
    assert!(out.contains("Would import 3 files, 5 keys created, 0 keys updated"), "{}", out);
    assert!(!test.root().join(STORE_PATH).exists());

    Ok(())
}

#[test]
fn test_import_json_output() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.run_ok(test.import_command().arg("--json"))?;

    let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["dryRun"], false);
    assert_eq!(report["filesCreated"], 3);
    assert_eq!(report["keysCreated"], 5);
    assert_eq!(report["writes"][0]["action"], "fileCreated");
    assert_eq!(report["writes"][0]["file"], "_json");

    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[1]["filename"], "auth");
    assert_eq!(files[2]["vendor"], "courier");
    assert_eq!(
        files[2]["translationKeys"][0]["translations"],
        json!({ "en": "Message sent" })
    );

    Ok(())
}

#[test]
fn test_import_missing_directory_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.import_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not exist"), "{}", stderr(&output));
    assert!(!test.root().join(STORE_PATH).exists());

    Ok(())
}

#[test]
fn test_import_parse_error_reports_location() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("resources/lang/en/auth.php", EN_AUTH)?;
    test.write_file(
        "resources/lang/nl/auth.php",
        "<?php\n\nreturn [\n    'failed' => ,\n];\n",
    )?;

    let output = test.import_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("error: "), "{}", err);
    assert!(err.contains("nl/auth.php:4:"), "{}", err);
    assert!(err.contains("4 |     'failed' => ,"), "{}", err);
    // Nothing is written when any file fails to parse
    assert!(!test.root().join(STORE_PATH).exists());

    Ok(())
}

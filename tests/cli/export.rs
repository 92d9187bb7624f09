use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const OUT: &str = "storage/translator/lang";

fn imported_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "resources/lang/en/auth.php",
        r#"<?php

return [
    'failed' => 'These credentials do not match our records.',
    'throttle' => 'Too many login attempts.',
    'login' => [
        'title' => 'Log in',
    ],
];
"#,
    )?;
    test.write_file(
        "resources/lang/nl/auth.php",
        r#"<?php return ["failed" => "Onjuiste gegevens", "login" => ["title" => "Inloggen"]];"#,
    )?;
    test.write_file(
        "resources/lang/en.json",
        r#"{"Welcome": "Welcome", "It's \"quoted\"": "It's \"quoted\""}"#,
    )?;
    test.write_file(
        "resources/lang/vendor/courier/en/messages.php",
        "<?php return ['sent' => 'Message sent'];",
    )?;
    test.run_ok(&mut test.import_command())?;
    Ok(test)
}

#[test]
fn test_export_writes_locale_files() -> Result<()> {
    let test = imported_project()?;

    let output = test.run_ok(&mut test.export_command())?;

    assert_eq!(
        test.read_file(&format!("{}/en/auth.php", OUT))?,
        r#"<?php

return [
    'failed' => 'These credentials do not match our records.',
    'throttle' => 'Too many login attempts.',
    'login' => [
        'title' => 'Log in',
    ],
];
"#
    );
    assert_eq!(
        test.read_file(&format!("{}/nl/auth.php", OUT))?,
        r#"<?php

return [
    'failed' => 'Onjuiste gegevens',
    'login' => [
        'title' => 'Inloggen',
    ],
];
"#
    );
    assert_eq!(
        test.read_file(&format!("{}/en.json", OUT))?,
        "{\n  \"Welcome\": \"Welcome\",\n  \"It's \\\"quoted\\\"\": \"It's \\\"quoted\\\"\"\n}\n"
    );
    assert_eq!(
        test.read_file(&format!("{}/vendor/courier/en/messages.php", OUT))?,
        "<?php\n\nreturn [\n    'sent' => 'Message sent',\n];\n"
    );

    let out = stdout(&output);
    assert!(out.contains("Wrote en/auth.php (3 keys)"), "{}", out);
    assert!(out.contains("✓ Exported 8 keys to 4 files in"), "{}", out);

    Ok(())
}

#[test]
fn test_export_replaces_destination() -> Result<()> {
    let test = imported_project()?;
    test.write_file(&format!("{}/fr/stale.php", OUT), "<?php return [];")?;

    test.run_ok(&mut test.export_command())?;

    assert!(!test.root().join(OUT).join("fr").exists());
    assert!(test.root().join(OUT).join("en/auth.php").exists());

    Ok(())
}

#[test]
fn test_export_include_empty_fills_every_locale() -> Result<()> {
    let test = imported_project()?;

    test.run_ok(test.export_command().arg("--include-empty"))?;

    let nl = test.read_file(&format!("{}/nl/auth.php", OUT))?;
    assert!(nl.contains("    'throttle' => '',\n"), "{}", nl);
    assert!(test.root().join(OUT).join("vendor/courier/nl/messages.php").exists());

    Ok(())
}

#[test]
fn test_export_only_selected_locales() -> Result<()> {
    let test = imported_project()?;

    test.run_ok(test.export_command().args(["--locales", "nl"]))?;

    assert!(test.root().join(OUT).join("nl/auth.php").exists());
    assert!(!test.root().join(OUT).join("en").exists());
    assert!(!test.root().join(OUT).join("en.json").exists());

    Ok(())
}

#[test]
fn test_export_then_import_round_trips() -> Result<()> {
    let test = imported_project()?;
    test.run_ok(&mut test.export_command())?;
    let original = test.read_store()?;

    test.run_ok(test.import_command().args([
        "--import-path",
        OUT,
        "--export-path",
        "out",
        "--database",
        "copy.json",
    ]))?;

    let copy: serde_json::Value = serde_json::from_str(&test.read_file("copy.json")?)?;
    assert_eq!(copy["files"], original["files"]);

    Ok(())
}

#[test]
fn test_round_trip_keeps_empty_values() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "resources/lang/en/auth.php",
        "<?php return ['failed' => 'Wrong', 'login' => ['title' => 'Log in', 'hint' => '']];",
    )?;
    test.write_file(
        "resources/lang/nl/auth.php",
        "<?php return ['failed' => '', 'login' => ['title' => 'Inloggen', 'hint' => 'Tip']];",
    )?;
    test.write_file("resources/lang/en.json", r#"{"Welcome": "Welcome", "Empty": ""}"#)?;
    test.write_file("resources/lang/nl.json", r#"{"Welcome": "", "Empty": ""}"#)?;
    test.run_ok(test.import_command().arg("--include-empty"))?;
    let original = test.read_store()?;
    assert_eq!(
        test.stored_translations(None, "auth", "failed")?,
        Some(serde_json::json!({ "en": "Wrong", "nl": "" }))
    );

    test.run_ok(test.export_command().arg("--include-empty"))?;
    assert_eq!(
        test.read_file(&format!("{}/nl.json", OUT))?,
        "{\n  \"Welcome\": \"\",\n  \"Empty\": \"\"\n}\n"
    );

    test.run_ok(test.import_command().args([
        "--replace-existing",
        "--include-empty",
        "--import-path",
        OUT,
        "--export-path",
        "out",
        "--database",
        "copy.json",
    ]))?;
    let copy: serde_json::Value = serde_json::from_str(&test.read_file("copy.json")?)?;
    assert_eq!(copy["files"], original["files"]);

    // Re-importing into the same store changes no value.
    test.run_ok(test.import_command().args([
        "--replace-existing",
        "--include-empty",
        "--import-path",
        OUT,
        "--export-path",
        "out",
    ]))?;
    assert_eq!(test.read_store()?["files"], original["files"]);

    Ok(())
}

#[test]
fn test_export_refuses_to_wipe_import_source() -> Result<()> {
    let test = imported_project()?;

    let output = test
        .export_command()
        .args(["--export-path", "resources"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("must not contain the import path"));
    assert!(test.root().join("resources/lang/en/auth.php").exists());

    Ok(())
}

#[test]
fn test_export_empty_store() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run_ok(&mut test.export_command())?;

    assert!(stdout(&output).contains("✓ Exported 0 keys to 0 files in"));
    assert!(test.root().join(OUT).is_dir());

    Ok(())
}

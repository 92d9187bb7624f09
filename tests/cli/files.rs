use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

fn add_file(test: &CliTest, args: &[&str]) -> Result<std::process::Output> {
    let mut cmd = test.command();
    cmd.args(["files", "add"]).args(args);
    Ok(cmd.output()?)
}

#[test]
fn test_files_add_and_list() -> Result<()> {
    let test = CliTest::new()?;

    let output = add_file(&test, &["auth"])?;
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "✓ Created file auth (id 1)\n");

    let output = add_file(&test, &["messages", "--vendor", "courier"])?;
    assert_eq!(stdout(&output), "✓ Created file courier::messages (id 2)\n");

    let output = test.run_ok(test.command().args(["files", "list"]))?;
    assert_eq!(
        stdout(&output),
        "1  auth  (0 keys)\n2  courier::messages  (0 keys)\n"
    );

    Ok(())
}

#[test]
fn test_files_list_empty_store() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run_ok(test.command().args(["files", "list"]))?;

    assert_eq!(stdout(&output), "No translation files.\n");

    Ok(())
}

#[test]
fn test_files_list_json() -> Result<()> {
    let test = CliTest::new()?;
    add_file(&test, &["auth"])?;

    let output = test.run_ok(test.command().args(["files", "list", "--json"]))?;

    let files: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(files[0]["filename"], "auth");
    assert_eq!(files[0]["vendor"], serde_json::Value::Null);
    assert_eq!(files[0]["translationKeys"], serde_json::json!([]));

    Ok(())
}

#[test]
fn test_files_add_rejects_duplicate() -> Result<()> {
    let test = CliTest::new()?;
    add_file(&test, &["auth"])?;

    let output = add_file(&test, &["auth"])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "error: The given data was invalid.\n  = filename: The filename has already been taken.\n\n✘ 1 problem\n"
    );

    Ok(())
}

#[test]
fn test_files_add_rejects_invalid_names() -> Result<()> {
    let test = CliTest::new()?;

    let output = add_file(&test, &["bad name", "--vendor", "bad/vendor"])?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("filename: The filename format is invalid."), "{}", err);
    assert!(err.contains("vendor: The vendor format is invalid."), "{}", err);
    assert!(err.contains("✘ 2 problems"), "{}", err);

    Ok(())
}

#[test]
fn test_files_add_rejects_vendor_json() -> Result<()> {
    let test = CliTest::new()?;

    let output = add_file(&test, &["_json", "--vendor", "courier"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("JSON files in vendor directories are not supported."));

    Ok(())
}

#[test]
fn test_files_update() -> Result<()> {
    let test = CliTest::new()?;
    add_file(&test, &["auth"])?;

    let output = test.run_ok(test.command().args(["files", "update", "1", "login", "--vendor", "courier"]))?;

    assert_eq!(stdout(&output), "✓ Updated file courier::login (id 1)\n");
    let store = test.read_store()?;
    assert_eq!(store["files"][0]["filename"], "login");
    assert_eq!(store["files"][0]["vendor"], "courier");

    Ok(())
}

#[test]
fn test_files_update_unknown_id() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["files", "update", "9", "auth"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "error: translation file 9 not found\n");

    Ok(())
}

#[test]
fn test_files_delete_removes_keys() -> Result<()> {
    let test = CliTest::with_file(
        "resources/lang/en/auth.php",
        "<?php return ['failed' => 'Wrong'];",
    )?;
    test.write_file("resources/lang/en/pagination.php", "<?php return ['next' => 'Next'];")?;
    test.run_ok(&mut test.import_command())?;

    let output = test.run_ok(test.command().args(["files", "delete", "1"]))?;

    assert_eq!(stdout(&output), "✓ Deleted file auth (id 1)\n");
    let store = test.read_store()?;
    let files = store["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], "pagination");

    Ok(())
}

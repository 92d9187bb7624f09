use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use transync::mcp::{
    TransyncMcpServer,
    types::{ExportParams, ImportParams},
};

use crate::{McpTestFixture, extract_tool_result_json, fixture_auth};

fn import_params(fixture: &McpTestFixture) -> ImportParams {
    ImportParams {
        project_root_path: fixture.root(),
        ..Default::default()
    }
}

// ============================================================================
// import_translations tests
// ============================================================================

#[tokio::test]
async fn test_import_translations() {
    let fixture = fixture_auth().unwrap();
    let server = TransyncMcpServer::new();

    let result = server
        .import_translations(Parameters(import_params(&fixture)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["dryRun"], false);
    assert_eq!(json_result["filesCreated"], 2);
    assert_eq!(json_result["keysCreated"], 3);
    assert_eq!(json_result["translationsWritten"], 4);
    assert_eq!(json_result["files"][0]["filename"], "_json");
    assert_eq!(json_result["files"][1]["filename"], "auth");
    assert_eq!(
        json_result["files"][1]["translationKeys"][1]["key"],
        "throttle"
    );

    let store = fixture.read_store().unwrap();
    assert_eq!(store["revision"], 1);
    assert_eq!(store["files"][1]["filename"], "auth");
    assert_eq!(
        store["files"][1]["translationKeys"][0]["translations"],
        json!({
            "en": "These credentials do not match our records.",
            "nl": "Deze gegevens zijn onjuist."
        })
    );
}

#[tokio::test]
async fn test_import_translations_dry_run() {
    let fixture = fixture_auth().unwrap();
    let server = TransyncMcpServer::new();

    let params = ImportParams {
        dry_run: true,
        ..import_params(&fixture)
    };
    let result = server.import_translations(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["dryRun"], true);
    assert_eq!(json_result["filesCreated"], 2);
    assert_eq!(json_result["files"].as_array().unwrap().len(), 2);
    assert!(!fixture.root_path().join(".transync").exists());
}

#[tokio::test]
async fn test_import_translations_fill_missing() {
    let fixture = fixture_auth().unwrap();
    let server = TransyncMcpServer::new();
    server
        .import_translations(Parameters(import_params(&fixture)))
        .await
        .unwrap();

    fixture
        .write_lang_file(
            "nl/auth.php",
            "<?php return ['failed' => 'Anders', 'throttle' => 'Te veel pogingen.'];",
        )
        .unwrap();

    // Without a flag the existing file is skipped
    let result = server
        .import_translations(Parameters(import_params(&fixture)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["skippedFiles"], json!(["_json", "auth"]));

    let params = ImportParams {
        fill_missing: true,
        ..import_params(&fixture)
    };
    let result = server.import_translations(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["keysUpdated"], 1);

    let store = fixture.read_store().unwrap();
    let keys = &store["files"][1]["translationKeys"];
    assert_eq!(keys[0]["translations"]["nl"], "Deze gegevens zijn onjuist.");
    assert_eq!(keys[1]["translations"]["nl"], "Te veel pogingen.");
}

#[tokio::test]
async fn test_import_translations_missing_directory() {
    let fixture = McpTestFixture::new().unwrap();
    std::fs::remove_dir_all(fixture.root_path().join("resources")).unwrap();
    let server = TransyncMcpServer::new();

    let err = server
        .import_translations(Parameters(import_params(&fixture)))
        .await
        .unwrap_err();

    assert!(err.message.contains("does not exist"), "{}", err.message);
}

// ============================================================================
// export_translations tests
// ============================================================================

#[tokio::test]
async fn test_export_translations() {
    let fixture = fixture_auth().unwrap();
    let server = TransyncMcpServer::new();
    server
        .import_translations(Parameters(import_params(&fixture)))
        .await
        .unwrap();

    let params = ExportParams {
        project_root_path: fixture.root(),
        locales: Some(vec!["nl".to_string()]),
        ..Default::default()
    };
    let result = server.export_translations(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["files"].as_array().unwrap().len(), 1);
    assert_eq!(json_result["files"][0]["path"], "nl/auth.php");
    assert_eq!(
        fixture
            .read_file("storage/translator/lang/nl/auth.php")
            .unwrap(),
        "<?php\n\nreturn [\n    'failed' => 'Deze gegevens zijn onjuist.',\n];\n"
    );
}

use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use transync::mcp::{TransyncMcpServer, types::GetConfigParams};

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = TransyncMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["config"]["importPath"], "./resources/lang");
    assert_eq!(json_result["config"]["exportPath"], "./storage/translator/lang");
    assert_eq!(json_result["config"]["locales"], serde_json::Value::Null);
    assert_eq!(json_result["fromFile"], false);
}

#[tokio::test]
async fn test_get_config_from_transyncrc() {
    let fixture = McpTestFixture::new().unwrap();

    fixture
        .write_config(&json!({
            "locales": ["en", "nl"],
            "importPath": "lang",
            "exportPath": "build/lang"
        }))
        .unwrap();

    let server = TransyncMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["locales"], json!(["en", "nl"]));
    assert_eq!(json_result["config"]["importPath"], "lang");
    assert_eq!(
        json_result["config"]["databasePath"],
        "./.transync/translations.json"
    );
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary Laravel-like project with a resources/lang/ directory
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        fs::create_dir_all(project_root.join("resources/lang"))?;
        fs::create_dir(project_root.join(".git"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with locale files
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_lang_files(vec![
    ///     ("en/auth.php", "<?php return ['failed' => 'Wrong'];"),
    ///     ("nl.json", r#"{"Welcome": "Welkom"}"#),
    /// ])?;
    /// ```
    pub fn with_lang_files(files: Vec<(&str, &str)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (path, content) in files {
            fixture.write_lang_file(path, content)?;
        }
        Ok(fixture)
    }

    /// Write a file below resources/lang/
    pub fn write_lang_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join("resources/lang").join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write locale file: {}", path.display()))?;
        Ok(())
    }

    /// Write a .transyncrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".transyncrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    pub fn read_file(&self, relative_path: &str) -> Result<String> {
        let path = self.project_root.join(relative_path);
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read the translation store at its default location
    pub fn read_store(&self) -> Result<Value> {
        let content = self.read_file(".transync/translations.json")?;
        serde_json::from_str(&content).context("Store should be valid JSON")
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// English and Dutch auth translations plus flat JSON strings
pub fn fixture_auth() -> Result<McpTestFixture> {
    McpTestFixture::with_lang_files(vec![
        (
            "en/auth.php",
            "<?php\n\nreturn [\n    'failed' => 'These credentials do not match our records.',\n    'throttle' => 'Too many login attempts.',\n];\n",
        ),
        (
            "nl/auth.php",
            "<?php\n\nreturn [\n    'failed' => 'Deze gegevens zijn onjuist.',\n];\n",
        ),
        ("en.json", r#"{"Welcome": "Welcome"}"#),
    ])
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    // Check for errors using is_error field
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    // Extract text from the content
    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}

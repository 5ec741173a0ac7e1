//! End-to-end JSON-RPC exchanges against the MCP server
//!
//! Builds a skills directory on disk, loads it the way `main` does, and
//! drives `handle_message` with raw wire-format requests.

use std::fs;

use serde_json::Value;
use symbols_docs::DocStore;
use symbols_mcp::SymbolsMcpServer;
use tempfile::TempDir;

fn bundled_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("AGENT_INSTRUCTIONS.md"),
        "# Symbols Rules\n\nAlways use v3 syntax: extends, childExtends, flattened props.\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("CLAUDE.md"),
        "# DOMQL v3 Reference\n\nComponents are plain objects.\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("QUICKSTART.md"),
        "# Quickstart\n\nInstall the Symbols CLI and scaffold a project.\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("MIGRATE_TO_SYMBOLS.md"),
        "# Migration Guide\n\nReact components become plain objects.\n",
    )
    .unwrap();
    dir
}

fn server(dir: &TempDir) -> SymbolsMcpServer {
    let store = DocStore::load(dir.path()).unwrap();
    SymbolsMcpServer::new(store)
}

async fn roundtrip(server: &SymbolsMcpServer, request: &str) -> Value {
    let response = server.handle_message(request).await.unwrap();
    serde_json::from_str(&response).unwrap()
}

#[tokio::test]
async fn initialize_handshake_advertises_all_capabilities() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"1.0"}}}"#,
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "symbols-mcp");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["resources"].is_object());
    assert!(result["capabilities"]["prompts"].is_object());

    // The initialized notification produces no response.
    let notification = server
        .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await
        .unwrap();
    assert!(notification.is_empty());
}

#[tokio::test]
async fn tools_list_exposes_exactly_two_tools() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}}"#,
    )
    .await;

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(names.contains(&"get_project_rules"));
    assert!(names.contains(&"search_symbols_docs"));
}

#[tokio::test]
async fn get_project_rules_returns_the_rules_body() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_project_rules","arguments":{}}}"#,
    )
    .await;

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Always use v3 syntax"));
    assert!(response["result"]["is_error"].is_null());

    // Stable across repeated calls within one process lifetime.
    let again = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_project_rules","arguments":{}}}"#,
    )
    .await;
    assert_eq!(text, again["result"]["content"][0]["text"].as_str().unwrap());
}

#[tokio::test]
async fn search_returns_titles_excerpts_and_uris() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"search_symbols_docs","arguments":{"query":"scaffold"}}}"#,
    )
    .await;

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Quickstart"));
    assert!(text.contains("symbols://skills/quickstart"));
    assert!(text.contains("scaffold"));
}

#[tokio::test]
async fn search_with_no_matches_is_not_an_error() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"search_symbols_docs","arguments":{"query":"zebra"}}}"#,
    )
    .await;

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("No results found for 'zebra'"));
    assert!(response["result"]["is_error"].is_null());
}

#[tokio::test]
async fn empty_query_is_a_tool_error_payload() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"search_symbols_docs","arguments":{"query":"   "}}}"#,
    )
    .await;

    assert_eq!(response["result"]["is_error"], true);
    assert!(response.get("error").is_none());
}

#[tokio::test]
async fn resources_list_covers_files_and_builtins() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":8,"method":"resources/list","params":{}}"#,
    )
    .await;

    let resources = response["result"]["resources"].as_array().unwrap();
    // Three manifest files (AGENT_INSTRUCTIONS.md is not a resource) plus
    // three built-in references.
    assert_eq!(resources.len(), 6);

    let uris: Vec<&str> = resources.iter().filter_map(|r| r["uri"].as_str()).collect();
    assert!(uris.contains(&"symbols://skills/domql-v3-reference"));
    assert!(uris.contains(&"symbols://skills/quickstart"));
    assert!(uris.contains(&"symbols://skills/migration-guide"));
    assert!(uris.contains(&"symbols://reference/spacing-tokens"));
    assert!(uris.contains(&"symbols://reference/atom-components"));
    assert!(uris.contains(&"symbols://reference/event-handlers"));
}

#[tokio::test]
async fn every_listed_resource_reads_back() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let list = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":9,"method":"resources/list","params":{}}"#,
    )
    .await;

    for resource in list["result"]["resources"].as_array().unwrap() {
        let uri = resource["uri"].as_str().unwrap();
        let request = format!(
            r#"{{"jsonrpc":"2.0","id":10,"method":"resources/read","params":{{"uri":"{uri}"}}}}"#
        );
        let response = roundtrip(&server, &request).await;
        let contents = &response["result"]["contents"][0];
        assert_eq!(contents["uri"], uri);
        assert!(!contents["text"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn unknown_resource_read_is_a_protocol_error() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":11,"method":"resources/read","params":{"uri":"symbols://skills/does-not-exist"}}"#,
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn prompts_list_and_get_round_trip() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let list = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":12,"method":"prompts/list","params":{}}"#,
    )
    .await;
    let prompts = list["result"]["prompts"].as_array().unwrap();
    assert_eq!(prompts.len(), 4);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":13,"method":"prompts/get","params":{"name":"symbols_migration_prompt","arguments":{"source_framework":"Angular"}}}"#,
    )
    .await;
    let text = response["result"]["messages"][0]["content"]["text"]
        .as_str()
        .unwrap();
    assert!(text.contains("migrating Angular code"));
}

#[tokio::test]
async fn prompt_missing_argument_names_the_parameter() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":14,"method":"prompts/get","params":{"name":"symbols_project_prompt","arguments":{}}}"#,
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    let message = response["error"]["message"].as_str().unwrap();
    assert!(message.contains("description"));
}

#[tokio::test]
async fn unknown_method_is_rejected() {
    let dir = bundled_corpus();
    let server = server(&dir);

    let response = roundtrip(
        &server,
        r#"{"jsonrpc":"2.0","id":15,"method":"documents/delete","params":{}}"#,
    )
    .await;

    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn startup_fails_without_a_corpus() {
    let dir = TempDir::new().unwrap();
    assert!(DocStore::load(&dir.path().join("missing")).is_err());
    assert!(DocStore::load(dir.path()).is_err());
}

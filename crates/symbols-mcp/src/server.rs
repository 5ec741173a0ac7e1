//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling with the
//! documentation corpus. The whole dependency graph is assembled once at
//! startup: the caller loads the [`DocStore`] and hands it to the server
//! constructor; there is no global state.

use std::io::{BufRead, Write};

use serde_json::{Value, json};
use symbols_docs::DocStore;

use crate::handlers::handle_tool_call;
use crate::prompts::{PromptKind, get_prompt_definitions};
use crate::protocol::{
    GetPromptParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PromptsCapability,
    ReadResourceParams, ResourcesCapability, ServerCapabilities, ServerInfo, ToolCallParams,
    ToolsCapability,
};
use crate::resources::{get_resource_definitions, read_resource};
use crate::tools::{ToolResult, get_tool_definitions};
use crate::{Error, Result};

/// Upfront guidance sent with the initialize response
const SERVER_INSTRUCTIONS: &str = "Reference assistant for the Symbols/DOMQL v3 design-system \
     framework. Searches Symbols documentation, exposes framework rules, and provides \
     comprehensive syntax and API reference.";

/// MCP Server for the Symbols documentation corpus
///
/// Serves a fixed set of tools, resources, and prompt templates over
/// JSON-RPC 2.0 on stdio. All content comes from the [`DocStore`] loaded at
/// startup; no request mutates anything.
///
/// # Example
///
/// ```ignore
/// use symbols_docs::DocStore;
/// use symbols_mcp::SymbolsMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = DocStore::load(std::path::Path::new("skills"))?;
///     let server = SymbolsMcpServer::new(store);
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct SymbolsMcpServer {
    /// Loaded documentation corpus, read-only for the process lifetime
    store: DocStore,
}

impl SymbolsMcpServer {
    /// Create a server over an already-loaded corpus
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// The underlying document store
    pub fn store(&self) -> &DocStore {
        &self.store
    }

    /// Run the MCP server
    ///
    /// Reads one JSON-RPC message per line from stdin and writes responses
    /// to stdout until the input stream closes.
    pub async fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!(documents = self.store.len(), "MCP server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            match self.handle_message(&line).await {
                Ok(response) if !response.is_empty() => {
                    writeln!(stdout, "{}", response)?;
                    stdout.flush()?;
                }
                Ok(_) => {} // No response needed (notifications)
                Err(e) => {
                    let error_response = JsonRpcResponse::error(
                        None,
                        -32603,
                        format!("Internal error: {}", e),
                    );
                    let json_str = serde_json::to_string(&error_response)?;
                    writeln!(stdout, "{}", json_str)?;
                    stdout.flush()?;
                }
            }
        }

        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Parses the JSON-RPC request and dispatches to the appropriate
    /// handler. Returns the serialized response, or an empty string for
    /// notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                // Unparseable input carries no usable id.
                let response =
                    JsonRpcResponse::error(None, -32700, format!("Parse error: {}", e));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" => return Ok(String::new()), // Notification, no response
            "notifications/initialized" => return Ok(String::new()),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            "resources/list" => self.handle_resources_list(request.id),
            "resources/read" => self.handle_resources_read(request.id, request.params)?,
            "prompts/list" => self.handle_prompts_list(request.id),
            "prompts/get" => self.handle_prompts_get(request.id, request.params)?,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Handle the initialize request
    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
                prompts: Some(PromptsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "symbols-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e)),
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = get_tool_definitions()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    ///
    /// Tool failures are reported as successful responses carrying an
    /// `is_error` tool result, per MCP convention; only serialization
    /// problems become protocol-level errors.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = serde_json::from_value(params)?;

        let tool_result =
            match handle_tool_call(&self.store, &tool_params.name, tool_params.arguments).await {
                Ok(text) => ToolResult::text(text),
                Err(e) => ToolResult::error(format!("{}", e)),
            };

        Ok(JsonRpcResponse::success(
            id,
            serde_json::to_value(tool_result)?,
        ))
    }

    /// Handle resources/list request
    fn handle_resources_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let resources: Vec<Value> = get_resource_definitions(&self.store)
            .iter()
            .map(|r| {
                json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "resources": resources }))
    }

    /// Handle resources/read request
    fn handle_resources_read(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let read_params: ReadResourceParams = serde_json::from_value(params)?;

        match read_resource(&self.store, &read_params.uri) {
            Ok(content) => {
                let result = json!({
                    "contents": [{
                        "uri": content.uri,
                        "mimeType": content.mime_type,
                        "text": content.text
                    }]
                });
                Ok(JsonRpcResponse::success(id, result))
            }
            Err(e) => Ok(JsonRpcResponse::error(
                id,
                -32602,
                format!("Resource error: {}", e),
            )),
        }
    }

    /// Handle prompts/list request
    fn handle_prompts_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let prompts: Vec<Value> = get_prompt_definitions()
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "prompts": prompts }))
    }

    /// Handle prompts/get request
    fn handle_prompts_get(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let prompt_params: GetPromptParams = serde_json::from_value(params)?;

        let Some(kind) = PromptKind::from_name(&prompt_params.name) else {
            return Ok(JsonRpcResponse::error(
                id,
                -32602,
                format!("Prompt error: {}", Error::UnknownPrompt(prompt_params.name)),
            ));
        };

        match kind.render(&prompt_params.arguments) {
            Ok(text) => Ok(JsonRpcResponse::success(
                id,
                json!({
                    "description": kind.description(),
                    "messages": [{
                        "role": "user",
                        "content": { "type": "text", "text": text }
                    }]
                }),
            )),
            Err(e) => Ok(JsonRpcResponse::error(
                id,
                -32602,
                format!("Prompt error: {}", e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbols_docs::{Category, Document};

    fn test_server() -> SymbolsMcpServer {
        let store = DocStore::from_documents(
            vec![
                Document::new(
                    Category::Skill,
                    "quickstart",
                    "Quickstart",
                    "Setup guide.",
                    "# Quickstart\n\nInstall and run the CLI.\n",
                ),
                Document::new(
                    Category::Reference,
                    "spacing-tokens",
                    "Spacing Tokens",
                    "Token table.",
                    "padding: 'A B' uses spacing tokens.\n",
                ),
            ],
            "# Rules\n\nAlways use v3 syntax.\n",
        );
        SymbolsMcpServer::new(store)
    }

    #[tokio::test]
    async fn test_handle_initialize() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"1.0"}}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("symbols-mcp"));
        assert!(response.contains("capabilities"));
        assert!(response.contains("protocolVersion"));
        assert!(response.contains("prompts"));
    }

    #[tokio::test]
    async fn test_handle_initialized_notification() {
        let server = test_server();

        for request in [
            r#"{"jsonrpc":"2.0","method":"initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        ] {
            let response = server.handle_message(request).await.unwrap();
            assert!(response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_handle_tools_list() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("get_project_rules"));
        assert!(response.contains("search_symbols_docs"));
        assert!(response.contains("inputSchema"));
    }

    #[tokio::test]
    async fn test_handle_tools_call_rules() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_project_rules","arguments":{}}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("Always use v3 syntax"));
        assert!(!response.contains("is_error"));
    }

    #[tokio::test]
    async fn test_handle_tools_call_search() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"search_symbols_docs","arguments":{"query":"padding"}}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("Spacing Tokens"));
        assert!(response.contains("symbols://reference/spacing-tokens"));
    }

    #[tokio::test]
    async fn test_handle_tools_call_empty_query() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"search_symbols_docs","arguments":{"query":"  "}}}"#;

        let response = server.handle_message(request).await.unwrap();
        // Tool errors are successful responses with is_error: true
        assert!(response.contains("result"));
        assert!(response.contains("is_error"));
        assert!(response.contains("empty"));
    }

    #[tokio::test]
    async fn test_handle_tools_call_unknown_tool() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"unknown_tool","arguments":{}}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("result"));
        assert!(response.contains("is_error"));
        assert!(response.contains("unknown tool"));
    }

    #[tokio::test]
    async fn test_handle_resources_list() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":7,"method":"resources/list","params":{}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("symbols://skills/quickstart"));
        assert!(response.contains("symbols://reference/spacing-tokens"));
        assert!(response.contains("mimeType"));
    }

    #[tokio::test]
    async fn test_handle_resources_read() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":8,"method":"resources/read","params":{"uri":"symbols://skills/quickstart"}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("contents"));
        assert!(response.contains("Install and run the CLI."));
    }

    #[tokio::test]
    async fn test_handle_resources_read_unknown() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":9,"method":"resources/read","params":{"uri":"symbols://skills/does-not-exist"}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("error"));
        assert!(response.contains("-32602"));
    }

    #[tokio::test]
    async fn test_handle_prompts_list() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":10,"method":"prompts/list","params":{}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("symbols_component_prompt"));
        assert!(response.contains("symbols_migration_prompt"));
        assert!(response.contains("symbols_project_prompt"));
        assert!(response.contains("symbols_review_prompt"));
    }

    #[tokio::test]
    async fn test_handle_prompts_get() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":11,"method":"prompts/get","params":{"name":"symbols_component_prompt","arguments":{"description":"a login form","component_name":"LoginForm"}}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("messages"));
        assert!(response.contains("Component Name: LoginForm"));
    }

    #[tokio::test]
    async fn test_handle_prompts_get_missing_argument() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":12,"method":"prompts/get","params":{"name":"symbols_component_prompt","arguments":{}}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("error"));
        assert!(response.contains("-32602"));
        assert!(response.contains("description"));
    }

    #[tokio::test]
    async fn test_handle_prompts_get_unknown() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":13,"method":"prompts/get","params":{"name":"nope"}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("error"));
        assert!(response.contains("-32602"));
    }

    #[tokio::test]
    async fn test_handle_unknown_method() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":14,"method":"unknown/method","params":{}}"#;

        let response = server.handle_message(request).await.unwrap();
        assert!(response.contains("error"));
        assert!(response.contains("-32601"));
        assert!(response.contains("Method not found"));
    }

    #[tokio::test]
    async fn test_handle_invalid_json_is_parse_error() {
        let server = test_server();
        let response = server.handle_message(r#"{"invalid json"#).await.unwrap();

        let parsed: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["error"]["code"], -32700);
        assert!(
            parsed["error"]["message"]
                .as_str()
                .unwrap()
                .starts_with("Parse error")
        );
        assert!(parsed.get("id").is_none());
    }

    #[tokio::test]
    async fn test_response_format() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":10,"method":"initialize","params":{}}"#;

        let response = server.handle_message(request).await.unwrap();

        let parsed: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["jsonrpc"], "2.0");
        assert_eq!(parsed["id"], 10);
        assert!(parsed.get("result").is_some());
        assert!(parsed.get("error").is_none());
    }

    #[tokio::test]
    async fn test_error_response_format() {
        let server = test_server();
        let request = r#"{"jsonrpc":"2.0","id":11,"method":"unknown","params":{}}"#;

        let response = server.handle_message(request).await.unwrap();

        let parsed: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["jsonrpc"], "2.0");
        assert_eq!(parsed["id"], 11);
        assert!(parsed.get("result").is_none());
        assert!(parsed.get("error").is_some());
        assert!(parsed["error"]["code"].is_i64());
        assert!(parsed["error"]["message"].is_string());
    }
}

//! MCP Tool definitions
//!
//! The server exposes two tools over the documentation corpus:
//!
//! - `get_project_rules` - returns the mandatory Symbols/DOMQL v3 rules
//! - `search_symbols_docs` - keyword search across the corpus
//!
//! Tool names arriving over the wire are converted into [`ToolKind`] before
//! any logic runs; string-keyed lookup stops at the transport edge.

use serde::{Deserialize, Serialize};

/// Closed set of tools the server knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GetProjectRules,
    SearchSymbolsDocs,
}

impl ToolKind {
    /// Parse a wire-level tool name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "get_project_rules" => Some(Self::GetProjectRules),
            "search_symbols_docs" => Some(Self::SearchSymbolsDocs),
            _ => None,
        }
    }

    /// Wire-level tool name
    pub fn name(self) -> &'static str {
        match self {
            Self::GetProjectRules => "get_project_rules",
            Self::SearchSymbolsDocs => "search_symbols_docs",
        }
    }
}

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: ToolKind::GetProjectRules.name().to_string(),
            description: "ALWAYS call this first before any code generation task. \
                          Returns the mandatory Symbols/DOMQL v3 rules that MUST be \
                          followed. Violations cause silent failures - black page, \
                          nothing renders."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: ToolKind::SearchSymbolsDocs.name().to_string(),
            description: "Search the Symbols documentation knowledge base for relevant \
                          information. Returns ranked excerpts with a resource URI to \
                          fetch each full document."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Natural language search query about Symbols/DOMQL"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default 10)"
                    }
                },
                "required": ["query"]
            }),
        },
    ]
}

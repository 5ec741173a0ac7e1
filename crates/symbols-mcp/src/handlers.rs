//! MCP Tool Handlers
//!
//! Executes tool calls against the document store. The wire-level tool name
//! is validated into [`ToolKind`] here, before any logic runs.
//!
//! Note: Handler functions use `async fn` for consistency with the MCP
//! server's tokio runtime, even though every operation is a sub-millisecond
//! in-memory scan.

use serde::Deserialize;
use serde_json::Value;
use symbols_docs::{DocStore, SearchParams, search};

use crate::tools::ToolKind;
use crate::{Error, Result};

/// Handle a tool call by dispatching to the appropriate handler
pub async fn handle_tool_call(store: &DocStore, tool_name: &str, arguments: Value) -> Result<String> {
    let kind =
        ToolKind::from_name(tool_name).ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;

    match kind {
        ToolKind::GetProjectRules => handle_get_project_rules(store).await,
        ToolKind::SearchSymbolsDocs => handle_search_docs(store, arguments).await,
    }
}

/// Handle get_project_rules - return the mandatory rules document verbatim
async fn handle_get_project_rules(store: &DocStore) -> Result<String> {
    Ok(store.project_rules().to_string())
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    max_results: Option<i64>,
}

/// Handle search_symbols_docs - keyword search with formatted text output
async fn handle_search_docs(store: &DocStore, arguments: Value) -> Result<String> {
    let args: SearchArgs =
        serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments {
            message: format!("search_symbols_docs: {e}"),
        })?;

    let mut params = SearchParams::default();
    if let Some(n) = args.max_results {
        if n <= 0 {
            return Err(Error::InvalidArguments {
                message: "max_results must be a positive integer".to_string(),
            });
        }
        params.max_results = n as usize;
    }

    let results = search(store, &args.query, params)?;
    if results.is_empty() {
        return Ok(format!(
            "No results found for '{}'. Try a different search term.",
            args.query.trim()
        ));
    }

    let mut out = format!(
        "Found {} result{} for '{}':\n",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        args.query.trim()
    );
    for result in &results {
        // Ids come from the store, so the lookup cannot miss.
        let doc = store.get(&result.document_id)?;
        out.push_str(&format!(
            "\n## {} (score: {})\nResource: {}\n\n{}\n",
            doc.title, result.score, doc.uri, result.excerpt
        ));
    }
    Ok(out)
}

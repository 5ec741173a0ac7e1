//! MCP Server for Symbols documentation
//!
//! This crate exposes the Symbols/DOMQL v3 documentation corpus via the
//! Model Context Protocol (MCP), allowing agentic IDEs (like Claude
//! Desktop, Windsurf, Cursor) to read framework rules, search the docs, and
//! use prompt templates for common tasks.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (Claude/IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ symbols-mcp (MCP Server) ]
//!        | (Rust API)
//!        v
//! [ symbols-docs (DocStore + search) ]
//!        |
//!        +--> [ skills/*.md (bundled corpus) ]
//!        +--> [ built-in reference tables ]
//! ```
//!
//! # Tools
//!
//! - `get_project_rules` - the mandatory Symbols/DOMQL v3 rules document
//! - `search_symbols_docs` - keyword search across the corpus
//!
//! # Resources
//!
//! One read-only resource per document, nine for the bundled layout, under
//! `symbols://skills/` and `symbols://reference/`.
//!
//! # Prompts
//!
//! Four fixed templates: component generation, framework migration, project
//! scaffolding, and code review.

pub mod error;
pub mod handlers;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use prompts::{PromptDefinition, PromptKind, get_prompt_definitions};
pub use resources::{ResourceContent, ResourceDefinition, get_resource_definitions, read_resource};
pub use server::SymbolsMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolKind, ToolResult, get_tool_definitions};

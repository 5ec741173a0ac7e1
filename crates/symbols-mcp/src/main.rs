//! Symbols MCP Server
//!
//! A Model Context Protocol server that exposes the Symbols/DOMQL v3
//! documentation corpus to agentic IDEs like Claude Desktop, Windsurf, and
//! Cursor.
//!
//! # Usage
//!
//! ```bash
//! symbols-mcp [--skills-dir <path>]
//! ```
//!
//! # Environment Variables
//!
//! - `SYMBOLS_SKILLS_DIR`: Alternate skills directory (same as --skills-dir)
//! - `RUST_LOG`: Control log verbosity (default: `symbols_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use symbols_docs::DocStore;
use symbols_mcp::SymbolsMcpServer;

/// MCP server for Symbols documentation
#[derive(Parser)]
#[command(name = "symbols-mcp")]
#[command(about = "MCP server for Symbols/DOMQL v3 documentation")]
#[command(version)]
struct Args {
    /// Path to the skills directory holding the markdown corpus
    #[arg(long, env = "SYMBOLS_SKILLS_DIR", default_value = "skills")]
    skills_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symbols_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(skills_dir = ?args.skills_dir, "Starting symbols-mcp server");

    // A missing or empty corpus is fatal: serving would return nothing
    // useful on every call, so fail fast before speaking the protocol.
    let store = match DocStore::load(&args.skills_dir) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to load documentation corpus: {}", e);
            std::process::exit(1);
        }
    };

    let server = SymbolsMcpServer::new(store);
    server.run().await?;

    Ok(())
}

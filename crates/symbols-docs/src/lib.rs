//! Document store and keyword search for the Symbols documentation corpus
//!
//! This crate is the leaf layer of the symbols-mcp server: it loads the
//! bundled markdown corpus (skills plus compiled-in reference tables) once
//! at startup and answers lookups and keyword searches over it. It knows
//! nothing about the MCP protocol.
//!
//! ```text
//!        symbols-mcp (protocol / registries)
//!                      |
//!                symbols-docs
//!                      |
//!          skills/*.md  +  built-in references
//! ```
//!
//! # Example
//!
//! ```ignore
//! use symbols_docs::{DocStore, SearchParams, search};
//!
//! let store = DocStore::load(std::path::Path::new("skills"))?;
//! let hits = search(&store, "spacing tokens", SearchParams::default())?;
//! # Ok::<(), symbols_docs::Error>(())
//! ```

pub mod error;
pub mod reference;
pub mod search;
pub mod store;

pub use error::{Error, Result};
pub use search::{DEFAULT_CONTEXT_CHARS, DEFAULT_MAX_RESULTS, SearchParams, SearchResult, search};
pub use store::{Category, DocStore, Document};

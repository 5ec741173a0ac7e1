//! Error types for symbols-docs

use std::path::PathBuf;

/// Result type for symbols-docs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in symbols-docs operations
///
/// The first three variants are startup-class: the process must not begin
/// serving without a usable corpus, so `DocStore::load` failures are fatal
/// to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Skills directory missing or not a directory
    #[error("Skills directory not found at {path}")]
    SkillsDirNotFound { path: PathBuf },

    /// Skills directory exists but holds no markdown documents
    #[error("No markdown documents found in {path}")]
    EmptyCorpus { path: PathBuf },

    /// Neither AGENT_INSTRUCTIONS.md nor the reference fallback could provide
    /// the project rules body
    #[error("Project rules document not found in {path}")]
    RulesNotFound { path: PathBuf },

    /// Lookup of an unknown document id or uri
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Search query was empty after trimming whitespace
    #[error("Search query is empty")]
    EmptyQuery,

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//! Document store
//!
//! Loads the markdown corpus exactly once at process startup and holds it in
//! memory for the lifetime of the process. The store is never mutated after
//! `load`, so it is safe to share across threads without synchronization.
//!
//! The bundled layout is flat:
//!
//! ```text
//! skills/
//!   AGENT_INSTRUCTIONS.md      (project rules, not a resource)
//!   CLAUDE.md                  -> symbols://skills/domql-v3-reference
//!   SYMBOLS_LOCAL_INSTRUCTIONS.md -> symbols://skills/project-structure
//!   DESIGN_DIRECTION.md        -> symbols://skills/design-direction
//!   MIGRATE_TO_SYMBOLS.md      -> symbols://skills/migration-guide
//!   DOMQL_v2-v3_MIGRATION.md   -> symbols://skills/v2-to-v3-migration
//!   QUICKSTART.md              -> symbols://skills/quickstart
//! ```
//!
//! Three additional reference documents are compiled into the binary (see
//! [`crate::reference`]), giving nine addressable documents in total for the
//! bundled layout.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::reference::builtin_references;
use crate::{Error, Result};

/// File holding the mandatory project rules. When absent, the rules fall
/// back to the `domql-v3-reference` document (backed by CLAUDE.md).
const RULES_FILE: &str = "AGENT_INSTRUCTIONS.md";

/// Curated identity for one bundled skill file
struct SkillManifestEntry {
    file: &'static str,
    id: &'static str,
    title: &'static str,
    description: &'static str,
}

/// Fixed identities for the bundled skill files. Files outside this table
/// still load, with an id derived from the file stem.
const SKILL_MANIFEST: &[SkillManifestEntry] = &[
    SkillManifestEntry {
        file: "CLAUDE.md",
        id: "domql-v3-reference",
        title: "DOMQL v3 Reference",
        description: "Complete DOMQL v3 syntax reference and rules.",
    },
    SkillManifestEntry {
        file: "SYMBOLS_LOCAL_INSTRUCTIONS.md",
        id: "project-structure",
        title: "Project Structure",
        description: "Symbols project folder structure and file conventions.",
    },
    SkillManifestEntry {
        file: "DESIGN_DIRECTION.md",
        id: "design-direction",
        title: "Design Direction",
        description: "Modern UI/UX design direction for generating Symbols interfaces.",
    },
    SkillManifestEntry {
        file: "MIGRATE_TO_SYMBOLS.md",
        id: "migration-guide",
        title: "Migration Guide",
        description: "Guide for migrating React/Angular/Vue apps to Symbols/DOMQL v3.",
    },
    SkillManifestEntry {
        file: "DOMQL_v2-v3_MIGRATION.md",
        id: "v2-to-v3-migration",
        title: "v2 to v3 Migration",
        description: "DOMQL v2 to v3 migration changes and examples.",
    },
    SkillManifestEntry {
        file: "QUICKSTART.md",
        id: "quickstart",
        title: "Quickstart",
        description: "Symbols CLI setup and usage quickstart guide.",
    },
];

/// Document category, determining the URI prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// File-backed documentation loaded from the skills directory
    Skill,
    /// Hand-authored reference table compiled into the binary
    Reference,
}

impl Category {
    /// URI prefix for documents in this category
    pub fn uri_prefix(self) -> &'static str {
        match self {
            Category::Skill => "symbols://skills/",
            Category::Reference => "symbols://reference/",
        }
    }
}

/// One bundled text document, immutable after construction
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identifier (e.g. `domql-v3-reference`)
    pub id: String,
    /// Fully-qualified resource address, a pure function of category and id
    pub uri: String,
    /// Human-readable name
    pub title: String,
    /// One-line summary used in resource listings
    pub description: String,
    /// Raw markdown content, loaded once, never re-read
    pub body: String,
    /// Category determining the URI prefix
    pub category: Category,
    /// Lowercased body, precomputed for case-insensitive search
    pub(crate) body_lower: String,
}

impl Document {
    /// Construct a document, deriving `uri` and the lowercased body cache
    pub fn new(
        category: Category,
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let body = body.into();
        Self {
            uri: format!("{}{}", category.uri_prefix(), id),
            body_lower: body.to_lowercase(),
            id,
            title: title.into(),
            description: description.into(),
            body,
            category,
        }
    }
}

/// In-memory corpus with id and uri indexes
pub struct DocStore {
    /// All documents, sorted by id ascending
    documents: Vec<Document>,
    by_id: HashMap<String, usize>,
    by_uri: HashMap<String, usize>,
    /// Body of the designated project rules document
    rules: String,
}

impl DocStore {
    /// Load the corpus from a skills directory
    ///
    /// Reads every `*.md` file in `root` (flat, file names sorted for
    /// determinism), appends the built-in reference documents, and resolves
    /// the project rules body from `AGENT_INSTRUCTIONS.md` with a fallback
    /// to `CLAUDE.md`.
    ///
    /// # Errors
    ///
    /// All failures here are startup-fatal for the server:
    /// - [`Error::SkillsDirNotFound`] if `root` is not a directory
    /// - [`Error::EmptyCorpus`] if no markdown file loads
    /// - [`Error::RulesNotFound`] if no rules body can be resolved
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::SkillsDirNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut entries: Vec<_> = fs::read_dir(root)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
            .collect();
        entries.sort_by_key(|e| e.file_name());

        let mut documents = Vec::new();
        let mut rules: Option<String> = None;

        for entry in entries {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().to_string();

            let body = match fs::read_to_string(&path) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                    continue;
                }
            };

            if file_name == RULES_FILE {
                rules = Some(body);
                continue;
            }

            let doc = match SKILL_MANIFEST.iter().find(|m| m.file == file_name) {
                Some(entry) => Document::new(
                    Category::Skill,
                    entry.id,
                    entry.title,
                    entry.description,
                    body,
                ),
                None => {
                    let id = slugify(file_stem(&file_name));
                    let title = title_from_body(&body)
                        .unwrap_or_else(|| file_stem(&file_name).to_string());
                    let description = format!("Symbols documentation: {title}.");
                    Document::new(Category::Skill, id, title, description, body)
                }
            };
            documents.push(doc);
        }

        if documents.is_empty() {
            return Err(Error::EmptyCorpus {
                path: root.to_path_buf(),
            });
        }

        // The rules body falls back to the v3 reference, as the original
        // distribution shipped before AGENT_INSTRUCTIONS.md existed.
        let rules = match rules {
            Some(body) if !body.trim().is_empty() => body,
            _ => documents
                .iter()
                .find(|d| d.id == "domql-v3-reference")
                .map(|d| d.body.clone())
                .filter(|body| !body.trim().is_empty())
                .ok_or_else(|| Error::RulesNotFound {
                    path: root.to_path_buf(),
                })?,
        };

        documents.extend(builtin_references());

        let store = Self::from_documents(documents, rules);
        tracing::info!(
            count = store.documents.len(),
            root = %root.display(),
            "Loaded documentation corpus"
        );
        Ok(store)
    }

    /// Build a store from pre-constructed documents
    ///
    /// Documents are sorted by id; a duplicate id keeps the first occurrence
    /// and drops the rest with a warning.
    pub fn from_documents(documents: Vec<Document>, rules: impl Into<String>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_uri = HashMap::new();
        let mut kept: Vec<Document> = Vec::with_capacity(documents.len());

        for doc in documents {
            if by_id.contains_key(&doc.id) {
                tracing::warn!(id = %doc.id, "Duplicate document id, skipping");
                continue;
            }
            by_id.insert(doc.id.clone(), kept.len());
            kept.push(doc);
        }

        kept.sort_by(|a, b| a.id.cmp(&b.id));
        by_id.clear();
        for (idx, doc) in kept.iter().enumerate() {
            by_id.insert(doc.id.clone(), idx);
            by_uri.insert(doc.uri.clone(), idx);
        }

        Self {
            documents: kept,
            by_id,
            by_uri,
            rules: rules.into(),
        }
    }

    /// Look up a document by id
    pub fn get(&self, id: &str) -> Result<&Document> {
        self.by_id
            .get(id)
            .map(|&idx| &self.documents[idx])
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Look up a document by uri
    pub fn get_by_uri(&self, uri: &str) -> Result<&Document> {
        self.by_uri
            .get(uri)
            .map(|&idx| &self.documents[idx])
            .ok_or_else(|| Error::NotFound(uri.to_string()))
    }

    /// All documents, sorted by id ascending
    pub fn list(&self) -> &[Document] {
        &self.documents
    }

    /// Body of the mandatory project rules document
    pub fn project_rules(&self) -> &str {
        &self.rules
    }

    /// Number of documents in the corpus
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty (never true for a loaded store)
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// File name without the `.md` extension
fn file_stem(file_name: &str) -> &str {
    file_name.strip_suffix(".md").unwrap_or(file_name)
}

/// Derive a stable id from a file stem: lowercase, alphanumeric runs joined
/// by single hyphens
fn slugify(stem: &str) -> String {
    let mut slug = String::with_capacity(stem.len());
    let mut pending_sep = false;
    for c in stem.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// Title from the first `#` heading, if any
fn title_from_body(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
}

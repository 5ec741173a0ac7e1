//! Keyword search across the document store
//!
//! A linear scan over the in-memory corpus: the query is split on whitespace
//! into terms, a document matches if it contains at least one term
//! (case-insensitive, OR semantics), and the score is the summed occurrence
//! count of every term. Results order by score descending with ties broken
//! by document id ascending, so repeated queries are fully deterministic.
//!
//! No indexes and no caching: the corpus is a handful of markdown files and
//! every query completes in well under a millisecond.

use crate::store::DocStore;
use crate::{Error, Result};

/// Default cap on returned results
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default excerpt window width on each side of the match
pub const DEFAULT_CONTEXT_CHARS: usize = 150;

/// Tuning knobs for a search invocation
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    /// Maximum number of results returned (must be positive)
    pub max_results: usize,
    /// Characters of context extracted on each side of the first match
    pub context_chars: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }
}

/// One ranked match, created per query and never cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Id of the matched document (look up via [`DocStore::get`])
    pub document_id: String,
    /// Short window of the body around the leftmost match
    pub excerpt: String,
    /// Total occurrence count of all query terms
    pub score: usize,
}

/// Search the corpus for documents containing any query term
///
/// # Errors
///
/// Returns [`Error::EmptyQuery`] when `query` is empty after trimming; an
/// empty query would otherwise dump the whole corpus. Zero matches is a
/// valid outcome and yields an empty vec.
pub fn search(store: &DocStore, query: &str, params: SearchParams) -> Result<Vec<SearchResult>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyQuery);
    }

    let terms: Vec<String> = trimmed
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();

    let mut results = Vec::new();
    for doc in store.list() {
        let score: usize = terms
            .iter()
            .map(|t| doc.body_lower.matches(t.as_str()).count())
            .sum();
        if score == 0 {
            continue;
        }

        // Leftmost occurrence of any term anchors the excerpt.
        let (pos, len) = terms
            .iter()
            .filter_map(|t| doc.body_lower.find(t.as_str()).map(|p| (p, t.len())))
            .min_by_key(|&(p, _)| p)
            .unwrap_or((0, 0));

        results.push(SearchResult {
            document_id: doc.id.clone(),
            excerpt: excerpt(&doc.body, pos, len, params.context_chars),
            score,
        });
    }

    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.document_id.cmp(&b.document_id))
    });
    results.truncate(params.max_results);

    tracing::debug!(query = trimmed, results = results.len(), "Search completed");
    Ok(results)
}

/// Extract a window of `context` characters around the match, trimmed to
/// word boundaries where feasible, with `...` markers when the window cuts
/// into the document.
///
/// `pos`/`len` are byte offsets into the lowercased body; they are clamped
/// to char boundaries of the original body, which only differs for the rare
/// characters whose lowercase form changes byte length.
fn excerpt(body: &str, pos: usize, len: usize, context: usize) -> String {
    let match_start = floor_char_boundary(body, pos);
    let match_end = floor_char_boundary(body, pos.saturating_add(len));

    let mut start = floor_char_boundary(body, match_start.saturating_sub(context));
    let mut end = floor_char_boundary(
        body,
        match_end.saturating_add(context).min(body.len()),
    );

    // A window that opens mid-word drops the partial word. A window that
    // opens exactly on a word start keeps that word.
    let opens_mid_word = body[..start]
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace());
    if opens_mid_word {
        if let Some((i, c)) = body[start..match_start]
            .char_indices()
            .find(|&(_, c)| c.is_whitespace())
        {
            start += i + c.len_utf8();
        }
    }
    if end < body.len() {
        if let Some(i) = body[match_end..end].rfind(char::is_whitespace) {
            end = match_end + i;
        }
    }

    let truncated_start = start > 0;
    let truncated_end = end < body.len();
    let mut out = String::new();
    if truncated_start {
        out.push_str("...");
    }
    out.push_str(body[start..end].trim());
    if truncated_end {
        out.push_str("...");
    }
    out
}

/// Largest char boundary less than or equal to `idx`
fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

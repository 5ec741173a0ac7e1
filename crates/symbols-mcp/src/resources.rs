//! MCP Resource definitions and reads
//!
//! Every document in the store is exposed as one read-only resource; the
//! advertised set and the readable set are both the store's uri index, so a
//! listed uri can never fail to read. The bundled layout yields nine
//! resources under two prefixes:
//!
//! | URI | Description |
//! |-----|-------------|
//! | `symbols://skills/domql-v3-reference` | Complete DOMQL v3 syntax reference |
//! | `symbols://skills/project-structure` | Project folder structure and conventions |
//! | `symbols://skills/design-direction` | UI/UX design direction |
//! | `symbols://skills/migration-guide` | Migrating React/Angular/Vue apps |
//! | `symbols://skills/v2-to-v3-migration` | DOMQL v2 to v3 changes |
//! | `symbols://skills/quickstart` | CLI setup and usage |
//! | `symbols://reference/spacing-tokens` | Spacing token table |
//! | `symbols://reference/atom-components` | Primitive atom components |
//! | `symbols://reference/event-handlers` | Event handler reference |

use serde::Serialize;
use symbols_docs::DocStore;

use crate::{Error, Result};

/// Resource definition for MCP protocol
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

/// Content returned from a resource read
#[derive(Debug, Clone, Serialize)]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// One resource definition per document in the store
pub fn get_resource_definitions(store: &DocStore) -> Vec<ResourceDefinition> {
    store
        .list()
        .iter()
        .map(|doc| ResourceDefinition {
            uri: doc.uri.clone(),
            name: doc.title.clone(),
            description: doc.description.clone(),
            mime_type: "text/markdown".to_string(),
        })
        .collect()
}

/// Read a resource by URI
///
/// # Errors
///
/// Returns [`Error::UnknownResource`] if the URI is not in the store.
pub fn read_resource(store: &DocStore, uri: &str) -> Result<ResourceContent> {
    let doc = store
        .get_by_uri(uri)
        .map_err(|_| Error::UnknownResource(uri.to_string()))?;

    Ok(ResourceContent {
        uri: doc.uri.clone(),
        mime_type: "text/markdown".to_string(),
        text: doc.body.clone(),
    })
}

/*!
 * Film and series metadata used as translation context.
 *
 * The resolver looks the normalized title up in a catalog, films first and
 * series second, and hands back the plot overview of the first hit. Lookup
 * problems never stop a file: they are logged and treated as "not found",
 * in which case the configured placeholder becomes the context.
 */

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::errors::MetadataError;

pub mod tmdb;

pub use self::tmdb::TmdbClient;

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Film,
    Series,
}

impl EntryKind {
    /// Lookup order used by the resolver
    pub const SEARCH_ORDER: [EntryKind; 2] = [EntryKind::Film, EntryKind::Series];
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Film => write!(f, "film"),
            Self::Series => write!(f, "series"),
        }
    }
}

/// A search hit, in catalog ranking order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCandidate {
    pub id: u64,
    pub title: String,
}

/// Detail record of one entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogDetails {
    pub title: String,
    pub overview: String,
}

/// Resolved metadata for a subtitle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub overview: String,
    pub kind: EntryKind,
}

/// Film/series catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search by title; candidates come back in the catalog's ranking
    async fn search(&self, title: &str, kind: EntryKind) -> Result<Vec<CatalogCandidate>, MetadataError>;

    /// Fetch the detail record of one candidate
    async fn details(&self, id: u64, kind: EntryKind) -> Result<CatalogDetails, MetadataError>;
}

/// Resolves a title to its overview, degrading to a placeholder
pub struct MetadataResolver {
    /// Catalog, `None` when lookups are disabled
    catalog: Option<Box<dyn Catalog>>,

    /// Context used when nothing was found
    placeholder: String,
}

impl MetadataResolver {
    pub fn new(catalog: Box<dyn Catalog>, placeholder: impl Into<String>) -> Self {
        Self {
            catalog: Some(catalog),
            placeholder: placeholder.into(),
        }
    }

    /// Resolver that never performs a lookup
    pub fn disabled(placeholder: impl Into<String>) -> Self {
        Self {
            catalog: None,
            placeholder: placeholder.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Look the title up as a film, then as a series
    pub async fn resolve(&self, title: &str) -> Option<CatalogEntry> {
        let catalog = self.catalog.as_ref()?;
        let title = title.trim();
        if title.is_empty() {
            debug!("Empty title, skipping metadata lookup");
            return None;
        }

        for kind in EntryKind::SEARCH_ORDER {
            let candidates = match catalog.search(title, kind).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!("Metadata search for {} '{}' failed: {}", kind, title, e);
                    continue;
                },
            };
            let Some(first) = candidates.first() else {
                debug!("No {} match for '{}'", kind, title);
                continue;
            };

            // A hit ends the lookup even when its details fail
            return match entry_for(catalog.as_ref(), first, kind).await {
                Ok(entry) => {
                    info!("Found {} '{}' for title '{}'", kind, entry.title, title);
                    Some(entry)
                },
                Err(e) => {
                    warn!("Fetching {} details for '{}' failed, using placeholder context: {}", kind, title, e);
                    None
                },
            };
        }

        warn!("No metadata found for '{}', using placeholder context", title);
        None
    }

    /// Overview for the title, or the placeholder
    pub async fn context_for(&self, title: &str) -> String {
        match self.resolve(title).await {
            Some(entry) if !entry.overview.trim().is_empty() => entry.overview,
            Some(entry) => {
                warn!("'{}' has no overview, using placeholder context", entry.title);
                self.placeholder.clone()
            },
            None => self.placeholder.clone(),
        }
    }
}

/// Details of a search hit, keeping the search title when details carry none
async fn entry_for(
    catalog: &dyn Catalog,
    candidate: &CatalogCandidate,
    kind: EntryKind,
) -> Result<CatalogEntry, MetadataError> {
    let details = catalog.details(candidate.id, kind).await?;
    let title = if details.title.is_empty() {
        candidate.title.clone()
    } else {
        details.title
    };

    Ok(CatalogEntry {
        title,
        overview: details.overview,
        kind,
    })
}

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("invalid pokemon id: {0}")]
    InvalidId(String),

    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("PokeAPI request failed: {0}")]
    Http(String),

    #[error("PokeAPI returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode PokeAPI response: {0}")]
    Decode(String),

    #[error("unable to build HTTP client: {0}")]
    Client(String),

    #[error("pokemon not found: {0}")]
    NotFound(u32),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_) | CatalogError::Status { status: 404, .. }
        )
    }
}

/// Error state recorded by the collection store for a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum StoreError {
    #[error("Failed to load Pokémon data. Please try again later.")]
    CollectionLoadFailed,

    #[error("Unable to load Pokémon details. Please try again later.")]
    DetailLoadFailed,
}

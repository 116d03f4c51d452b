use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("Can't create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to download catalog from {url}: {source}")]
    CatalogFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Catalog at {url} is not valid JSON: {source}")]
    CatalogParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request for {slug} failed: {source}")]
    Detail {
        slug: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response for {slug} is not valid JSON: {source}")]
    DetailParse {
        slug: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Can't write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = RankError> = std::result::Result<T, E>;

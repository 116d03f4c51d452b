use crate::error::{RankError, Result};
use crate::types::Catalog;
use tracing::{debug, info};

/// Download the catalog of known repositories. Any failure here ends the run.
pub async fn load_catalog(client: &reqwest::Client, url: &str) -> Result<Catalog> {
    debug!(%url, "downloading catalog");

    let body = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|source| RankError::CatalogFetch {
            url: url.to_string(),
            source,
        })?
        .bytes()
        .await
        .map_err(|source| RankError::CatalogFetch {
            url: url.to_string(),
            source,
        })?;

    let parse_error = |source| RankError::CatalogParse {
        url: url.to_string(),
        source,
    };
    // `preserve_order` keeps the map in document order
    let document: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(&body).map_err(parse_error)?;
    let catalog = document
        .into_iter()
        .map(|(key, value)| Ok((key, serde_json::from_value(value)?)))
        .collect::<std::result::Result<Catalog, serde_json::Error>>()
        .map_err(parse_error)?;

    info!(entries = catalog.len(), "catalog loaded");
    Ok(catalog)
}

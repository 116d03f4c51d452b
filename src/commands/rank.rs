use crate::catalog;
use crate::config::RankConfig;
use crate::error::Result;
use crate::fetch::{build_client, DetailFetcher};
use crate::rank;
use crate::render;
use crate::types::Repository;
use tracing::info;

/// Catalog download, detail fan-out and ranking, without rendering.
pub async fn collect_ranked(config: &RankConfig) -> Result<Vec<Repository>> {
    let client = build_client(config.timeout)?;
    let catalog = catalog::load_catalog(&client, &config.catalog_url).await?;

    let fetcher = DetailFetcher::new(client, config);
    let outcomes = fetcher.fetch_all(&catalog).await;
    let dropped = outcomes.iter().filter(|o| !o.is_found()).count();

    let ranked = rank::rank(outcomes);
    info!(ranked = ranked.len(), dropped, "ranking complete");
    Ok(ranked)
}

pub async fn rank_command(config: &RankConfig) -> Result<()> {
    let ranked = collect_ranked(config).await?;

    if let Some(path) = render::render(config.format, &ranked, &config.output_dir)? {
        println!("✓ Wrote {} repositories to {}", ranked.len(), path.display());
    }
    Ok(())
}

use crate::types::{FetchOutcome, Repository};
use std::cmp::Ordering;

/// Most popular first: stars, then forks, then watchers, then subscribers.
///
/// Each tier only matters when every tier above it is equal. Counts the API
/// left out (`None`) sort below any present count, zero included.
pub fn compare_popularity(a: &Repository, b: &Repository) -> Ordering {
    b.stargazers_count
        .cmp(&a.stargazers_count)
        .then_with(|| b.forks.cmp(&a.forks))
        .then_with(|| b.watchers.cmp(&a.watchers))
        .then_with(|| b.subscribers_count.cmp(&a.subscribers_count))
}

/// Keep the fetches that resolved to a named repository and sort them.
///
/// The sort is stable, so fully tied repositories keep catalog order.
pub fn rank(outcomes: Vec<FetchOutcome>) -> Vec<Repository> {
    let mut ranked: Vec<Repository> = outcomes
        .into_iter()
        .filter_map(FetchOutcome::into_repository)
        .filter(|repo| !repo.name.is_empty())
        .collect();
    ranked.sort_by(compare_popularity);
    ranked
}

use crate::config::{Credentials, RankConfig};
use crate::error::{RankError, Result};
use crate::types::{Catalog, FetchOutcome, RepositoryPayload};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("starrank/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the catalog download and the detail fetches.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(RankError::Client)
}

pub struct DetailFetcher {
    client: reqwest::Client,
    api_url: String,
    credentials: Credentials,
    concurrency: usize,
}

impl DetailFetcher {
    pub fn new(client: reqwest::Client, config: &RankConfig) -> Self {
        DetailFetcher {
            client,
            api_url: config.api_url.clone(),
            credentials: config.credentials.clone(),
            concurrency: config.concurrency.max(1),
        }
    }

    pub fn detail_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        )
    }

    /// Fetch every catalog entry, at most `concurrency` at a time.
    ///
    /// One outcome per entry, in catalog order. Entries without an
    /// owner/repo pair come back as `Skipped`; nothing in here aborts the join.
    pub async fn fetch_all(&self, catalog: &Catalog) -> Vec<FetchOutcome> {
        let outcomes: Vec<FetchOutcome> = stream::iter(catalog)
            .map(|(key, entry)| async move {
                match entry.coordinates() {
                    Some((owner, repo)) => self.fetch_one(owner, repo).await,
                    None => FetchOutcome::Skipped { key: key.clone() },
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        for reason in outcomes.iter().filter_map(FetchOutcome::drop_reason) {
            warn!("dropping {}", reason);
        }
        outcomes
    }

    /// One authenticated GET. The body is parsed whatever the status code.
    pub async fn fetch_one(&self, owner: &str, repo: &str) -> FetchOutcome {
        let slug = format!("{}/{}", owner, repo);
        let url = self.detail_url(owner, repo);
        debug!(%url, "fetching repository");

        let response = match self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(source) => return FetchOutcome::Failed(RankError::Detail { slug, source }),
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return FetchOutcome::Failed(RankError::Detail { slug, source }),
        };

        let payload: RepositoryPayload = match serde_json::from_slice(&body) {
            Ok(payload) => payload,
            Err(source) => {
                return FetchOutcome::Failed(RankError::DetailParse { slug, source })
            }
        };

        match payload.into_repository() {
            Ok(repository) => FetchOutcome::Found(repository),
            Err(message) => FetchOutcome::Missing {
                slug,
                status,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;
    use crate::types::CatalogEntry;
    use wiremock::matchers::{header, method, path};
    use std::time::Instant;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(server: &MockServer, concurrency: usize) -> DetailFetcher {
        let config = RankConfig::new(Credentials::new("alice", "secret"), OutputFormat::Table)
            .with_api_url(server.uri())
            .with_concurrency(concurrency);
        DetailFetcher::new(build_client(None).unwrap(), &config)
    }

    fn repo_body(name: &str, stars: u64) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "full_name": format!("owner/{}", name),
            "html_url": format!("https://github.com/owner/{}", name),
            "stargazers_count": stars,
            "forks": 1,
            "watchers": stars,
            "subscribers_count": 1,
            "archived": false,
            "description": "a module"
        })
    }

    #[test]
    fn test_detail_url_encodes_segments() {
        let config = RankConfig::new(Credentials::new("a", "b"), OutputFormat::File)
            .with_api_url("https://api.example.test");
        let fetcher = DetailFetcher::new(reqwest::Client::new(), &config);
        assert_eq!(
            fetcher.detail_url("denoland", "deno std"),
            "https://api.example.test/repos/denoland/deno%20std"
        );
    }

    #[tokio::test]
    async fn test_fetch_one_sends_basic_auth() {
        let server = MockServer::start().await;
        // base64("alice:secret")
        Mock::given(method("GET"))
            .and(path("/repos/owner/oak"))
            .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body("oak", 42)))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = fetcher_for(&server, 4).fetch_one("owner", "oak").await;
        let repo = outcome.into_repository().unwrap();
        assert_eq!(repo.name, "oak");
        assert_eq!(repo.stargazers_count, Some(42));
    }

    #[tokio::test]
    async fn test_fetch_one_not_found_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        match fetcher_for(&server, 4).fetch_one("owner", "gone").await {
            FetchOutcome::Missing {
                slug,
                status,
                message,
            } => {
                assert_eq!(slug, "owner/gone");
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("Not Found"));
            }
            other => panic!("expected Missing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_one_success_status_is_not_required() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(repo_body("odd", 3)))
            .mount(&server)
            .await;

        assert!(fetcher_for(&server, 1).fetch_one("owner", "odd").await.is_found());
    }

    #[tokio::test]
    async fn test_fetch_one_garbage_body_is_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let outcome = fetcher_for(&server, 1).fetch_one("owner", "oak").await;
        assert!(matches!(
            outcome,
            FetchOutcome::Failed(RankError::DetailParse { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_one_connection_error_is_failed() {
        let config = RankConfig::new(Credentials::new("a", "b"), OutputFormat::File)
            .with_api_url("http://127.0.0.1:1");
        let fetcher = DetailFetcher::new(build_client(None).unwrap(), &config);

        let outcome = fetcher.fetch_one("owner", "oak").await;
        assert!(matches!(outcome, FetchOutcome::Failed(RankError::Detail { .. })));
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_catalog_order_and_skips_incomplete_entries() {
        let server = MockServer::start().await;
        for (name, stars) in [("a", 1), ("b", 2), ("c", 3)] {
            Mock::given(method("GET"))
                .and(path(format!("/repos/owner/{}", name)))
                .respond_with(ResponseTemplate::new(200).set_body_json(repo_body(name, stars)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let catalog: Catalog = vec![
            ("c".to_string(), CatalogEntry::new("owner", "c")),
            ("a".to_string(), CatalogEntry::new("owner", "a")),
            (
                "x".to_string(),
                CatalogEntry {
                    owner: None,
                    repo: Some("x".to_string()),
                },
            ),
            ("b".to_string(), CatalogEntry::new("owner", "b")),
        ];

        let outcomes = fetcher_for(&server, 2).fetch_all(&catalog).await;
        assert_eq!(outcomes.len(), 4);
        assert!(matches!(&outcomes[2], FetchOutcome::Skipped { key } if key == "x"));

        let names: Vec<String> = outcomes
            .into_iter()
            .filter_map(FetchOutcome::into_repository)
            .map(|repo| repo.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_fetch_all_limits_requests_in_flight() {
        let delay = Duration::from_millis(200);
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(repo_body("slow", 1))
                    .set_delay(delay),
            )
            .expect(6)
            .mount(&server)
            .await;

        let catalog: Catalog = (0..6)
            .map(|i| (i.to_string(), CatalogEntry::new("owner", &format!("r{}", i))))
            .collect();

        // Two at a time: three rounds of the delay at minimum
        let started = Instant::now();
        let outcomes = fetcher_for(&server, 2).fetch_all(&catalog).await;
        let elapsed = started.elapsed();

        assert_eq!(outcomes.len(), 6);
        assert!(outcomes.iter().all(FetchOutcome::is_found));
        assert!(elapsed >= delay * 3, "finished in {:?}", elapsed);
        // and still concurrent: one at a time would take six rounds
        assert!(elapsed < delay * 6, "finished in {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_fetch_all_with_single_slot_is_sequential() {
        let delay = Duration::from_millis(100);
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(repo_body("slow", 1))
                    .set_delay(delay),
            )
            .mount(&server)
            .await;

        let catalog: Catalog = (0..4)
            .map(|i| (i.to_string(), CatalogEntry::new("owner", &format!("r{}", i))))
            .collect();

        let started = Instant::now();
        fetcher_for(&server, 1).fetch_all(&catalog).await;
        assert!(started.elapsed() >= delay * 4);
    }
}

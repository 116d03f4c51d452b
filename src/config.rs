use crate::render::OutputFormat;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/denoland/deno_website2/master/database.json";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything one run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct RankConfig {
    pub credentials: Credentials,
    pub format: OutputFormat,
    pub catalog_url: String,
    pub api_url: String,
    pub concurrency: usize,
    pub timeout: Option<Duration>,
    pub output_dir: PathBuf,
}

impl RankConfig {
    pub fn new(credentials: Credentials, format: OutputFormat) -> Self {
        RankConfig {
            credentials,
            format,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
            output_dir: PathBuf::from("."),
        }
    }

    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

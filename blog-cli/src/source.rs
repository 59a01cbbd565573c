use async_trait::async_trait;
use blog_core::{check_status, parse_posts, BlogError, Post, PostSource};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// `posts.json` on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl PostSource for FileSource {
    async fn load_posts(&self) -> Result<Vec<Post>, BlogError> {
        tracing::debug!("Reading posts from {:?}", self.path);
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| BlogError::Transport(format!("Failed to read {:?}: {}", self.path, e)))?;
        parse_posts(&body)
    }
}

/// `posts.json` served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait(?Send)]
impl PostSource for HttpSource {
    async fn load_posts(&self) -> Result<Vec<Post>, BlogError> {
        tracing::debug!("Fetching posts from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BlogError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        check_status(status.as_u16(), status.canonical_reason().unwrap_or_default())?;

        let body = response
            .text()
            .await
            .map_err(|e| BlogError::Transport(format!("Failed to read response: {}", e)))?;
        parse_posts(&body)
    }
}

/// `http://` and `https://` locations are fetched, anything else is a path.
pub fn open_source(location: &str) -> Box<dyn PostSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

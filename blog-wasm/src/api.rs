use async_trait::async_trait;
use blog_core::{check_status, parse_posts, BlogError, Post, PostSource};
use gloo_net::http::Request;

/// Fetches the post collection over the browser's `fetch`. Relative URLs
/// resolve against the current page.
#[derive(Debug, Clone)]
pub struct FetchSource {
    url: String,
}

impl FetchSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl PostSource for FetchSource {
    async fn load_posts(&self) -> Result<Vec<Post>, BlogError> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| BlogError::Transport(format!("Network error: {}", e)))?;

        check_status(response.status(), &response.status_text())?;

        let text = response
            .text()
            .await
            .map_err(|e| BlogError::Transport(format!("Failed to read response: {}", e)))?;

        parse_posts(&text)
    }
}

use crate::error::BlogError;
use crate::models::Post;
use async_trait::async_trait;

/// Where the post collection comes from.
///
/// Every call is a fresh fetch: no caching, no retry. Futures are not `Send`
/// so browser implementations can hold JS handles across awaits.
#[async_trait(?Send)]
pub trait PostSource {
    async fn load_posts(&self) -> Result<Vec<Post>, BlogError>;
}

/// Parses the body of `posts.json`, keeping source order.
pub fn parse_posts(body: &str) -> Result<Vec<Post>, BlogError> {
    let posts: Vec<Post> = serde_json::from_str(body)?;
    log::debug!("Parsed {} posts", posts.len());
    Ok(posts)
}

/// Maps a response status to an error for anything outside 2xx.
pub fn check_status(status: u16, status_text: &str) -> Result<(), BlogError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(BlogError::Network {
            status,
            status_text: status_text.to_string(),
        })
    }
}

/// A collection already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    posts: Vec<Post>,
}

impl StaticSource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn from_json(body: &str) -> Result<Self, BlogError> {
        parse_posts(body).map(Self::new)
    }
}

#[async_trait(?Send)]
impl PostSource for StaticSource {
    async fn load_posts(&self) -> Result<Vec<Post>, BlogError> {
        Ok(self.posts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_non_arrays() {
        assert!(parse_posts(r#"{"id":"1"}"#).unwrap_err().is_parse());
        assert!(parse_posts("not json").unwrap_err().is_parse());
        assert!(parse_posts("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_entries_without_id() {
        let body = r#"[{"title":"A","author":"a","date":"2024-01-01","summary":"s","content":"c"}]"#;
        assert!(parse_posts(body).is_err());
    }

    #[test]
    fn status_check() {
        assert!(check_status(200, "OK").is_ok());
        assert!(check_status(204, "No Content").is_ok());

        let err = check_status(404, "Not Found").unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Network response was not ok: 404 Not Found");
    }

    #[tokio::test]
    async fn static_source_returns_source_order() {
        let body = r#"[
            {"id":"001","title":"A","author":"a","date":"2024-01-01","summary":"s","content":"c"},
            {"id":"002","title":"B","author":"b","date":"2024-01-02","summary":"s","content":"c"}
        ]"#;
        let source = StaticSource::from_json(body).unwrap();
        let posts = source.load_posts().await.unwrap();
        assert_eq!(posts.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["001", "002"]);
    }
}

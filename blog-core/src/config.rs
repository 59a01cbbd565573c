use crate::rating::RatingRange;
use serde::{Deserialize, Serialize};

pub const DEFAULT_POSTS_URL: &str = "posts.json";
pub const DEFAULT_POST_PAGE: &str = "post.html";
pub const DEFAULT_FALLBACK_IMAGE: &str =
    "https://visernic.com/wp-content/uploads/2025/03/visernic-1.png";
pub const DEFAULT_PUBLISHER_NAME: &str = "My Blog";
pub const DEFAULT_PUBLISHER_LOGO: &str = "https://i.postimg.cc/L8PPqhKk/v.png";

/// Site-wide settings shared by both page modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Location of the post collection, relative to the page.
    pub posts_url: String,
    /// Detail page that list cards link to.
    pub post_page: String,
    pub fallback_image_url: String,
    pub publisher_name: String,
    pub publisher_logo_url: String,
    pub rating: RatingRange,
}

impl SiteConfig {
    /// Link from a list card to the detail page of `id`.
    pub fn post_link(&self, id: &str) -> String {
        format!("{}?id={}", self.post_page, encode_query_value(id))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_url: DEFAULT_POSTS_URL.to_string(),
            post_page: DEFAULT_POST_PAGE.to_string(),
            fallback_image_url: DEFAULT_FALLBACK_IMAGE.to_string(),
            publisher_name: DEFAULT_PUBLISHER_NAME.to_string(),
            publisher_logo_url: DEFAULT_PUBLISHER_LOGO.to_string(),
            rating: RatingRange::default(),
        }
    }
}

pub(crate) fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

use blog_core::SiteConfig;
use std::env;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Settings for one CLI run: the site config plus where to read posts from
/// and which origin canonical URLs use.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub site: SiteConfig,
    pub source: String,
    pub origin: String,
}

impl CliConfig {
    /// Environment first (including `.env`), then command-line overrides.
    pub fn load(source: Option<String>, origin: Option<String>) -> Self {
        let mut site = SiteConfig::default();

        if let Ok(url) = env::var("BLOG_FALLBACK_IMAGE") {
            site.fallback_image_url = url;
        }
        if let Ok(name) = env::var("BLOG_PUBLISHER_NAME") {
            site.publisher_name = name;
        }
        if let Ok(url) = env::var("BLOG_PUBLISHER_LOGO") {
            site.publisher_logo_url = url;
        }

        let source = source
            .or_else(|| env::var("BLOG_POSTS_SOURCE").ok())
            .unwrap_or_else(|| site.posts_url.clone());
        let origin = origin
            .or_else(|| env::var("BLOG_SITE_ORIGIN").ok())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        Self {
            site,
            source,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// `<origin>/<page>`
    pub fn page_url(&self, page: &str) -> String {
        format!("{}/{}", self.origin, page.trim_start_matches('/'))
    }
}

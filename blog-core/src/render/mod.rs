pub mod detail;
pub mod list;

use crate::command::UiCommand;
use crate::config::SiteConfig;
use crate::loader::PostSource;
use crate::page::{PageContext, PageMode};
use crate::rating::{RandomRating, RatingProvider};

pub use detail::{DetailOutcome, DetailRenderer, DetailState};
pub use list::{render_list, render_list_page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    Rendered,
    NotFound,
    /// The load failed; the error has already been logged.
    Failed(String),
    /// The page has neither container.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub status: RenderStatus,
    pub commands: Vec<UiCommand>,
}

/// Entry point shared by every adapter: picks the page mode once and runs
/// the matching renderer.
pub struct Renderer {
    config: SiteConfig,
    rating: Box<dyn RatingProvider>,
}

impl Renderer {
    pub fn new(config: SiteConfig) -> Self {
        let rating = Box::new(RandomRating::new(config.rating.clone()));
        Self { config, rating }
    }

    /// Replaces the random rating strategy.
    pub fn with_rating(mut self, rating: impl RatingProvider + 'static) -> Self {
        self.rating = Box::new(rating);
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub async fn render_page<S>(&self, page: &PageContext, source: &S) -> (PageMode, RenderOutput)
    where
        S: PostSource + ?Sized,
    {
        let mode = PageMode::detect(page);
        log::debug!("Page mode: {:?}", mode);

        let output = match mode {
            PageMode::List => render_list_page(source, &self.config).await,
            PageMode::Detail => self.render_detail(page, source).await.into(),
            PageMode::Unknown => RenderOutput {
                status: RenderStatus::Skipped,
                commands: Vec::new(),
            },
        };
        (mode, output)
    }

    pub async fn render_detail<S>(&self, page: &PageContext, source: &S) -> DetailOutcome
    where
        S: PostSource + ?Sized,
    {
        DetailRenderer::new(&self.config, self.rating.as_ref())
            .render(page, source)
            .await
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

use super::{RenderOutput, RenderStatus};
use crate::command::{Target, UiCommand};
use crate::config::{encode_query_value, SiteConfig};
use crate::error::BlogError;
use crate::loader::PostSource;
use crate::markdown;
use crate::meta::{update_meta_tag, MetaTag};
use crate::models::{iso_timestamp, Post};
use crate::page::{Location, PageContext};
use crate::rating::RatingProvider;
use crate::schema::{BlogPosting, PostingFields};
use crate::stars::activate_rating_stars;

pub const MISSING_ID_HTML: &str = "<p>Post not found.</p>";
pub const UNKNOWN_POST_HTML: &str = "<p>Sorry, this post could not be found.</p>";
pub const NOT_FOUND_TITLE: &str = "Post Not Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Init,
    Loading,
    NotFound,
    Failed,
    Rendered,
}

impl DetailState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DetailState::NotFound | DetailState::Failed | DetailState::Rendered
        )
    }

    pub fn can_advance_to(self, next: DetailState) -> bool {
        use DetailState::*;
        matches!(
            (self, next),
            (Init, NotFound) | (Init, Loading) | (Loading, Failed | NotFound | Rendered)
        )
    }

    fn advance(&mut self, next: DetailState) {
        debug_assert!(
            self.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self,
            next
        );
        log::debug!("Detail page: {:?} -> {:?}", self, next);
        *self = next;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailOutcome {
    pub state: DetailState,
    pub commands: Vec<UiCommand>,
    pub error: Option<String>,
}

impl From<DetailOutcome> for RenderOutput {
    fn from(outcome: DetailOutcome) -> Self {
        let status = match outcome.state {
            DetailState::Rendered => RenderStatus::Rendered,
            DetailState::NotFound => RenderStatus::NotFound,
            DetailState::Failed => RenderStatus::Failed(outcome.error.unwrap_or_default()),
            DetailState::Init | DetailState::Loading => RenderStatus::Skipped,
        };
        RenderOutput {
            status,
            commands: outcome.commands,
        }
    }
}

/// `origin + pathname + ?id=<id>`
pub fn canonical_url(location: &Location, id: &str) -> String {
    format!(
        "{}{}?id={}",
        location.origin,
        location.pathname,
        encode_query_value(id)
    )
}

/// Renders a post that has already been found.
pub fn render_post(
    page: &PageContext,
    post: &Post,
    config: &SiteConfig,
    rating: &dyn RatingProvider,
) -> Result<Vec<UiCommand>, BlogError> {
    let published = iso_timestamp(&post.published_at()?);
    let image = post.display_image(&config.fallback_image_url);
    let canonical = canonical_url(&page.location, &post.id);

    let mut commands = vec![UiCommand::SetDocumentTitle {
        title: post.title.clone(),
    }];

    let meta_updates = [
        (MetaTag::Description, post.summary.as_str()),
        (MetaTag::OgTitle, post.title.as_str()),
        (MetaTag::OgDescription, post.summary.as_str()),
        (MetaTag::OgImage, image),
        (MetaTag::TwitterTitle, post.title.as_str()),
        (MetaTag::TwitterDescription, post.summary.as_str()),
        (MetaTag::TwitterImage, image),
        (MetaTag::OgUrl, canonical.as_str()),
    ];
    commands.extend(
        meta_updates
            .iter()
            .filter_map(|(tag, value)| update_meta_tag(page, tag.selector(), "content", value)),
    );

    let posting = BlogPosting::new(PostingFields {
        canonical_url: &canonical,
        title: &post.title,
        description: &post.summary,
        image,
        author: &post.author,
        publisher_name: &config.publisher_name,
        publisher_logo: &config.publisher_logo_url,
        published: &published,
        rating: rating.aggregate_rating(),
    });
    commands.extend(posting.inject()?);

    commands.push(UiCommand::SetText {
        target: Target::PostTitle,
        text: post.title.clone(),
    });
    commands.push(UiCommand::SetText {
        target: Target::PostMeta,
        text: post.byline(),
    });
    commands.push(UiCommand::SetHtml {
        target: Target::PostContent,
        html: markdown::to_html(&post.content),
    });

    commands.extend(activate_rating_stars(page));

    Ok(commands)
}

pub struct DetailRenderer<'a> {
    config: &'a SiteConfig,
    rating: &'a dyn RatingProvider,
}

impl<'a> DetailRenderer<'a> {
    pub fn new(config: &'a SiteConfig, rating: &'a dyn RatingProvider) -> Self {
        Self { config, rating }
    }

    /// Resolves `?id=` against the collection and renders the match. The
    /// source is only consulted when the page names a post.
    pub async fn render<S>(&self, page: &PageContext, source: &S) -> DetailOutcome
    where
        S: PostSource + ?Sized,
    {
        let mut state = DetailState::Init;

        let Some(id) = page.location.query_param("id") else {
            state.advance(DetailState::NotFound);
            return DetailOutcome {
                state,
                commands: vec![UiCommand::SetHtml {
                    target: Target::PostContent,
                    html: MISSING_ID_HTML.to_string(),
                }],
                error: None,
            };
        };

        state.advance(DetailState::Loading);
        let result = source
            .load_posts()
            .await
            .and_then(|posts| self.render_from(page, &id, &posts));

        match result {
            Ok(Some(commands)) => {
                state.advance(DetailState::Rendered);
                log::info!("Rendered post {}", id);
                DetailOutcome {
                    state,
                    commands,
                    error: None,
                }
            }
            Ok(None) => {
                state.advance(DetailState::NotFound);
                log::info!("Post {} is not in the collection", id);
                DetailOutcome {
                    state,
                    commands: vec![
                        UiCommand::SetHtml {
                            target: Target::PostContent,
                            html: UNKNOWN_POST_HTML.to_string(),
                        },
                        UiCommand::SetDocumentTitle {
                            title: NOT_FOUND_TITLE.to_string(),
                        },
                    ],
                    error: None,
                }
            }
            Err(e) => {
                state.advance(DetailState::Failed);
                log::error!("Failed to load the post: {}", e);
                DetailOutcome {
                    state,
                    commands: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn render_from(
        &self,
        page: &PageContext,
        id: &str,
        posts: &[Post],
    ) -> Result<Option<Vec<UiCommand>>, BlogError> {
        match posts.iter().find(|post| post.id == id) {
            Some(post) => render_post(page, post, self.config, self.rating).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticSource;
    use crate::rating::FixedRating;
    use crate::schema::{LD_JSON_SELECTOR, LD_JSON_TYPE};
    use async_trait::async_trait;
    use std::cell::Cell;

    fn post(id: &str, title: &str, image_url: Option<&str>) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            author: "Ann".to_string(),
            date: "2024-05-01".to_string(),
            summary: format!("About {}", title),
            content: format!("# {}\n\nBody of *{}*.", title, title),
            image_url: image_url.map(str::to_string),
        }
    }

    fn page(search: &str) -> PageContext {
        PageContext::detail_page(Location::new("https://blog.test", "/post.html", search))
    }

    /// Counts loads so tests can tell whether the source was consulted.
    struct CountingSource {
        inner: StaticSource,
        loads: Cell<usize>,
    }

    impl CountingSource {
        fn new(posts: Vec<Post>) -> Self {
            Self {
                inner: StaticSource::new(posts),
                loads: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl PostSource for CountingSource {
        async fn load_posts(&self) -> Result<Vec<Post>, BlogError> {
            self.loads.set(self.loads.get() + 1);
            self.inner.load_posts().await
        }
    }

    struct BrokenSource;

    #[async_trait(?Send)]
    impl PostSource for BrokenSource {
        async fn load_posts(&self) -> Result<Vec<Post>, BlogError> {
            Err(BlogError::Transport("connection refused".to_string()))
        }
    }

    fn set_attribute<'c>(commands: &'c [UiCommand], selector: &str) -> Option<&'c str> {
        commands.iter().find_map(|cmd| match cmd {
            UiCommand::SetAttribute {
                selector: s, value, ..
            } if s == selector => Some(value.as_str()),
            _ => None,
        })
    }

    fn structured_data(commands: &[UiCommand]) -> serde_json::Value {
        let script = commands
            .iter()
            .find_map(|cmd| match cmd {
                UiCommand::AppendChild { parent, node } if *parent == Target::Head => {
                    node.as_element()
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(script.get_attribute("type"), Some(LD_JSON_TYPE));
        serde_json::from_str(&script.text_content()).unwrap()
    }

    #[test]
    fn state_transitions() {
        use DetailState::*;
        assert!(Init.can_advance_to(NotFound));
        assert!(Init.can_advance_to(Loading));
        assert!(Loading.can_advance_to(Rendered));
        assert!(Loading.can_advance_to(Failed));
        assert!(!Init.can_advance_to(Rendered));
        assert!(!Rendered.can_advance_to(Loading));
        assert!(Rendered.is_terminal() && NotFound.is_terminal() && Failed.is_terminal());
        assert!(!Loading.is_terminal());
    }

    #[test]
    fn canonical_url_from_location() {
        let loc = Location::new("https://blog.test", "/post.html", "?id=001&utm=x");
        assert_eq!(canonical_url(&loc, "001"), "https://blog.test/post.html?id=001");
    }

    #[tokio::test]
    async fn missing_id_skips_the_source() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.6, 1500);
        let source = CountingSource::new(vec![post("001", "A", None)]);

        let outcome = DetailRenderer::new(&config, &rating)
            .render(&page(""), &source)
            .await;

        assert_eq!(outcome.state, DetailState::NotFound);
        assert_eq!(source.loads.get(), 0);
        assert_eq!(
            outcome.commands,
            vec![UiCommand::SetHtml {
                target: Target::PostContent,
                html: "<p>Post not found.</p>".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.6, 1500);
        let source = CountingSource::new(vec![post("001", "A", None)]);

        let outcome = DetailRenderer::new(&config, &rating)
            .render(&page("?id=999"), &source)
            .await;

        assert_eq!(outcome.state, DetailState::NotFound);
        assert_eq!(source.loads.get(), 1);
        assert!(outcome.commands.contains(&UiCommand::SetHtml {
            target: Target::PostContent,
            html: "<p>Sorry, this post could not be found.</p>".to_string(),
        }));
        assert!(outcome.commands.contains(&UiCommand::SetDocumentTitle {
            title: "Post Not Found".to_string(),
        }));
    }

    #[tokio::test]
    async fn load_failure_renders_nothing() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.6, 1500);

        let outcome = DetailRenderer::new(&config, &rating)
            .render(&page("?id=001"), &BrokenSource)
            .await;

        assert_eq!(outcome.state, DetailState::Failed);
        assert!(outcome.commands.is_empty());
        assert!(outcome.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn bad_date_fails_before_any_output() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.6, 1500);
        let mut broken = post("001", "A", None);
        broken.date = "someday".to_string();

        let outcome = DetailRenderer::new(&config, &rating)
            .render(&page("?id=001"), &StaticSource::new(vec![broken]))
            .await;

        assert_eq!(outcome.state, DetailState::Failed);
        assert!(outcome.commands.is_empty());
    }

    #[tokio::test]
    async fn us_style_and_spelled_out_dates_render() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.6, 1500);

        for date in ["5/1/2024", "May 1 2024"] {
            let mut dated = post("001", "A", None);
            dated.date = date.to_string();

            let outcome = DetailRenderer::new(&config, &rating)
                .render(&page("?id=001"), &StaticSource::new(vec![dated]))
                .await;

            assert_eq!(outcome.state, DetailState::Rendered, "date {}", date);
            let schema = structured_data(&outcome.commands);
            assert_eq!(schema["datePublished"], "2024-05-01T00:00:00.000Z");
        }
    }

    #[tokio::test]
    async fn renders_every_post_in_the_collection() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.6, 1500);
        let posts = vec![post("002", "B", None), post("001", "A", None)];
        let source = StaticSource::new(posts.clone());
        let renderer = DetailRenderer::new(&config, &rating);

        for expected in &posts {
            let outcome = renderer
                .render(&page(&format!("?id={}", expected.id)), &source)
                .await;
            assert_eq!(outcome.state, DetailState::Rendered);

            let cmds = &outcome.commands;
            assert!(cmds.contains(&UiCommand::SetText {
                target: Target::PostTitle,
                text: expected.title.clone(),
            }));
            assert!(cmds.contains(&UiCommand::SetText {
                target: Target::PostMeta,
                text: "By Ann on 2024-05-01".to_string(),
            }));
            assert!(cmds.contains(&UiCommand::SetHtml {
                target: Target::PostContent,
                html: markdown::to_html(&expected.content),
            }));
            assert_eq!(
                cmds[0],
                UiCommand::SetDocumentTitle {
                    title: expected.title.clone()
                }
            );
        }
    }

    #[test]
    fn metadata_and_structured_data() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.8, 1999);
        let page = page("?id=001");

        let cmds = render_post(&page, &post("001", "A", None), &config, &rating).unwrap();

        assert_eq!(set_attribute(&cmds, MetaTag::Description.selector()), Some("About A"));
        assert_eq!(set_attribute(&cmds, MetaTag::OgTitle.selector()), Some("A"));
        assert_eq!(set_attribute(&cmds, MetaTag::TwitterTitle.selector()), Some("A"));
        assert_eq!(
            set_attribute(&cmds, MetaTag::OgUrl.selector()),
            Some("https://blog.test/post.html?id=001")
        );
        assert_eq!(
            set_attribute(&cmds, MetaTag::OgImage.selector()),
            Some(config.fallback_image_url.as_str())
        );
        assert_eq!(
            set_attribute(&cmds, MetaTag::TwitterImage.selector()),
            Some(config.fallback_image_url.as_str())
        );

        let schema = structured_data(&cmds);
        assert_eq!(schema["@type"], "BlogPosting");
        assert_eq!(schema["mainEntityOfPage"]["@id"], "https://blog.test/post.html?id=001");
        assert_eq!(schema["image"], config.fallback_image_url.as_str());
        assert_eq!(schema["author"]["name"], "Ann");
        assert_eq!(schema["publisher"]["name"], "My Blog");
        assert_eq!(schema["datePublished"], "2024-05-01T00:00:00.000Z");
        assert_eq!(schema["dateModified"], "2024-05-01T00:00:00.000Z");
        assert_eq!(schema["aggregateRating"]["ratingValue"], "4.8");
        assert_eq!(schema["aggregateRating"]["ratingCount"], 1999);

        let removes = cmds
            .iter()
            .position(|c| matches!(c, UiCommand::RemoveAll { selector } if selector == LD_JSON_SELECTOR))
            .unwrap();
        let appends = cmds
            .iter()
            .position(|c| matches!(c, UiCommand::AppendChild { parent: Target::Head, .. }))
            .unwrap();
        assert!(removes < appends);
    }

    #[test]
    fn own_image_wins_over_fallback() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.5, 1200);
        let cmds = render_post(
            &page("?id=001"),
            &post("001", "A", Some("https://img/a.png")),
            &config,
            &rating,
        )
        .unwrap();

        assert_eq!(set_attribute(&cmds, MetaTag::OgImage.selector()), Some("https://img/a.png"));
        assert_eq!(
            set_attribute(&cmds, MetaTag::TwitterImage.selector()),
            Some("https://img/a.png")
        );
        assert_eq!(structured_data(&cmds)["image"], "https://img/a.png");
    }

    #[test]
    fn bare_page_gets_no_meta_updates_or_stars() {
        let config = SiteConfig::default();
        let rating = FixedRating::new(4.5, 1200);
        let bare = PageContext {
            location: Location::new("https://blog.test", "/post.html", "?id=001"),
            has_content_container: true,
            ..PageContext::default()
        };

        let cmds = render_post(&bare, &post("001", "A", None), &config, &rating).unwrap();
        assert!(!cmds
            .iter()
            .any(|c| matches!(c, UiCommand::SetAttribute { .. } | UiCommand::OnClick { .. })));
    }
}

use super::{RenderOutput, RenderStatus};
use crate::command::{Element, Target, UiCommand};
use crate::config::SiteConfig;
use crate::loader::PostSource;
use crate::models::Post;
use icu_collator::{Collator, CollatorOptions};

/// Newest first: identifiers compared as strings, descending, with the
/// root-locale collation order (`a` < `B` < `c`, digits before letters).
pub fn sort_posts(posts: &mut [Post]) {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => posts.sort_by(|a, b| collator.compare(&b.id, &a.id)),
        Err(e) => {
            log::warn!("Collation unavailable, sorting ids bytewise: {}", e);
            posts.sort_by(|a, b| b.id.cmp(&a.id));
        }
    }
}

/// `article.post-summary` card for the index page.
pub fn summary_card(post: &Post, config: &SiteConfig) -> Element {
    let link = config.post_link(&post.id);

    Element::new("article")
        .class("post-summary")
        .child(
            Element::new("h2").child(
                Element::new("a")
                    .attr("href", link.as_str())
                    .text(post.title.as_str()),
            ),
        )
        .child(Element::new("p").class("meta").text(post.byline()))
        .child(Element::new("p").text(post.summary.as_str()))
        .child(
            Element::new("a")
                .attr("href", link)
                .class("read-more")
                .text("Read More →"),
        )
}

pub fn render_list(mut posts: Vec<Post>, config: &SiteConfig) -> Vec<UiCommand> {
    sort_posts(&mut posts);
    posts
        .iter()
        .map(|post| UiCommand::AppendChild {
            parent: Target::PostsList,
            node: summary_card(post, config).into(),
        })
        .collect()
}

/// Loads the collection and renders every card. A failed load renders
/// nothing.
pub async fn render_list_page<S>(source: &S, config: &SiteConfig) -> RenderOutput
where
    S: PostSource + ?Sized,
{
    match source.load_posts().await {
        Ok(posts) => {
            log::info!("Rendering {} post summaries", posts.len());
            RenderOutput {
                status: RenderStatus::Rendered,
                commands: render_list(posts, config),
            }
        }
        Err(e) => {
            log::error!("Failed to load posts: {}", e);
            RenderOutput {
                status: RenderStatus::Failed(e.to_string()),
                commands: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlogError;
    use crate::loader::StaticSource;
    use async_trait::async_trait;

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            author: "Ann".to_string(),
            date: "2024-05-01".to_string(),
            summary: format!("About {}", title),
            content: String::new(),
            image_url: None,
        }
    }

    fn card_ids(commands: &[UiCommand]) -> Vec<String> {
        commands
            .iter()
            .map(|cmd| match cmd {
                UiCommand::AppendChild { parent, node } => {
                    assert_eq!(*parent, Target::PostsList);
                    let card = node.as_element().unwrap();
                    let h2 = card.children[0].as_element().unwrap();
                    let link = h2.children[0].as_element().unwrap();
                    link.get_attribute("href")
                        .unwrap()
                        .trim_start_matches("post.html?id=")
                        .to_string()
                }
                other => panic!("unexpected command {:?}", other),
            })
            .collect()
    }

    #[test]
    fn lists_newest_id_first() {
        let posts = vec![post("002", "B"), post("001", "A"), post("010", "J")];
        let commands = render_list(posts, &SiteConfig::default());
        assert_eq!(card_ids(&commands), ["010", "002", "001"]);
    }

    #[test]
    fn mixed_case_ids_sort_by_collation_not_bytes() {
        let posts = vec![post("a", "Ta"), post("B", "TB"), post("c", "Tc")];
        let commands = render_list(posts, &SiteConfig::default());
        assert_eq!(card_ids(&commands), ["c", "B", "a"]);
    }

    #[test]
    fn card_layout() {
        let card = summary_card(&post("001", "A"), &SiteConfig::default());
        assert!(card.has_class("post-summary"));
        assert_eq!(
            card.to_html(),
            "<article class=\"post-summary\">\
             <h2><a href=\"post.html?id=001\">A</a></h2>\
             <p class=\"meta\">By Ann on 2024-05-01</p>\
             <p>About A</p>\
             <a href=\"post.html?id=001\" class=\"read-more\">Read More →</a>\
             </article>"
        );
    }

    #[test]
    fn card_text_is_not_markup() {
        let card = summary_card(&post("001", "<script>x</script>"), &SiteConfig::default());
        assert!(card.to_html().contains("&lt;script&gt;x&lt;/script&gt;"));
    }

    struct FailingSource;

    #[async_trait(?Send)]
    impl PostSource for FailingSource {
        async fn load_posts(&self) -> Result<Vec<Post>, BlogError> {
            Err(BlogError::Network {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn failed_load_renders_nothing() {
        let output = render_list_page(&FailingSource, &SiteConfig::default()).await;
        assert!(output.commands.is_empty());
        assert!(matches!(output.status, RenderStatus::Failed(_)));
    }

    #[tokio::test]
    async fn loads_then_renders() {
        let source = StaticSource::new(vec![post("001", "A"), post("002", "B")]);
        let output = render_list_page(&source, &SiteConfig::default()).await;
        assert_eq!(output.status, RenderStatus::Rendered);
        assert_eq!(card_ids(&output.commands), ["002", "001"]);
    }
}

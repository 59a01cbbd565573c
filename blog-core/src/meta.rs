use crate::command::UiCommand;
use crate::page::PageContext;

/// Meta tags the post page may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaTag {
    Description,
    OgTitle,
    OgDescription,
    OgImage,
    OgUrl,
    TwitterTitle,
    TwitterDescription,
    TwitterImage,
}

impl MetaTag {
    pub const ALL: [MetaTag; 8] = [
        MetaTag::Description,
        MetaTag::OgTitle,
        MetaTag::OgDescription,
        MetaTag::OgImage,
        MetaTag::OgUrl,
        MetaTag::TwitterTitle,
        MetaTag::TwitterDescription,
        MetaTag::TwitterImage,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            MetaTag::Description => r#"meta[name="description"]"#,
            MetaTag::OgTitle => r#"meta[property="og:title"]"#,
            MetaTag::OgDescription => r#"meta[property="og:description"]"#,
            MetaTag::OgImage => r#"meta[property="og:image"]"#,
            MetaTag::OgUrl => r#"meta[property="og:url"]"#,
            MetaTag::TwitterTitle => r#"meta[property="twitter:title"]"#,
            MetaTag::TwitterDescription => r#"meta[property="twitter:description"]"#,
            MetaTag::TwitterImage => r#"meta[property="twitter:image"]"#,
        }
    }
}

/// Sets `attribute` on the tag behind `selector`, if the page has one.
/// Missing tags are never created.
pub fn update_meta_tag(
    page: &PageContext,
    selector: &str,
    attribute: &str,
    value: &str,
) -> Option<UiCommand> {
    page.has_meta(selector).then(|| UiCommand::SetAttribute {
        selector: selector.to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

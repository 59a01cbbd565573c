//! schema.org `BlogPosting` structured data for the post page.

use crate::command::{Element, Target, UiCommand};
use crate::rating::AggregateRating;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const LD_JSON_TYPE: &str = "application/ld+json";
pub const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPosting {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub main_entity_of_page: WebPage,
    pub headline: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub author: Person,
    pub publisher: Organization,
    pub date_published: String,
    pub date_modified: String,
    pub aggregate_rating: AggregateRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebPage {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: String,
    pub url: String,
}

/// Inputs for [`BlogPosting::new`].
#[derive(Debug, Clone)]
pub struct PostingFields<'a> {
    pub canonical_url: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub author: &'a str,
    pub publisher_name: &'a str,
    pub publisher_logo: &'a str,
    /// Used for both the published and modified dates.
    pub published: &'a str,
    pub rating: AggregateRating,
}

impl BlogPosting {
    pub fn new(fields: PostingFields<'_>) -> Self {
        Self {
            context: SCHEMA_CONTEXT.to_string(),
            kind: "BlogPosting".to_string(),
            main_entity_of_page: WebPage {
                kind: "WebPage".to_string(),
                id: fields.canonical_url.to_string(),
            },
            headline: fields.title.to_string(),
            name: fields.title.to_string(),
            description: fields.description.to_string(),
            image: fields.image.to_string(),
            author: Person {
                kind: "Person".to_string(),
                name: fields.author.to_string(),
            },
            publisher: Organization {
                kind: "Organization".to_string(),
                name: fields.publisher_name.to_string(),
                logo: ImageObject {
                    kind: "ImageObject".to_string(),
                    url: fields.publisher_logo.to_string(),
                },
            },
            date_published: fields.published.to_string(),
            date_modified: fields.published.to_string(),
            aggregate_rating: fields.rating,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Commands that swap whatever structured data the page holds for this
    /// one, so a page never carries two blocks.
    pub fn inject(&self) -> Result<Vec<UiCommand>, serde_json::Error> {
        let script = Element::new("script")
            .attr("type", LD_JSON_TYPE)
            .text(self.to_json()?);

        Ok(vec![
            UiCommand::RemoveAll {
                selector: LD_JSON_SELECTOR.to_string(),
            },
            UiCommand::AppendChild {
                parent: Target::Head,
                node: script.into(),
            },
        ])
    }
}

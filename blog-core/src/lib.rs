//! Rendering logic for a static blog: an index page listing post summaries
//! and a post page with SEO metadata, structured data and a rating widget.
//!
//! Nothing here touches a browser. Renderers take the post collection and a
//! [`PageContext`] describing the hosting page and return [`UiCommand`]s for
//! an adapter to apply.

pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod markdown;
pub mod meta;
pub mod models;
pub mod page;
pub mod rating;
pub mod render;
pub mod schema;
pub mod stars;

pub use command::{Element, Node, Target, UiCommand};
pub use config::SiteConfig;
pub use document::Document;
pub use error::BlogError;
pub use loader::{check_status, parse_posts, PostSource, StaticSource};
pub use models::Post;
pub use page::{Location, PageContext, PageMode};
pub use rating::{AggregateRating, FixedRating, RandomRating, RatingProvider, RatingRange};
pub use render::{DetailOutcome, DetailState, RenderOutput, RenderStatus, Renderer};

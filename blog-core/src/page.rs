use crate::error::BlogError;
use crate::meta::MetaTag;
use std::collections::BTreeSet;
use url::Url;

pub const STAR_SELECTOR: &str = ".star";

/// The parts of `window.location` the renderers read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub origin: String,
    pub pathname: String,
    /// Raw query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    pub fn new(
        origin: impl Into<String>,
        pathname: impl Into<String>,
        search: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    pub fn parse(href: &str) -> Result<Self, BlogError> {
        let url = Url::parse(href)?;
        Ok(Self {
            origin: url.origin().ascii_serialization(),
            pathname: url.path().to_string(),
            search: url.query().map(|q| format!("?{}", q)).unwrap_or_default(),
        })
    }

    /// Appends `name=value` to the query string, encoded.
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        let pair = url::form_urlencoded::Serializer::new(String::new())
            .append_pair(name, value)
            .finish();
        self.search = if self.search.len() > 1 {
            format!("{}&{}", self.search, pair)
        } else {
            format!("?{}", pair)
        };
        self
    }

    /// First value of the query parameter `name`. Empty values count as
    /// absent.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.search.strip_prefix('?').unwrap_or(&self.search);
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }
}

/// What the hosting page offers, captured once at load time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageContext {
    pub location: Location,
    pub has_list_container: bool,
    pub has_content_container: bool,
    /// Meta tag selectors that resolve to an element in the page.
    pub meta_selectors: BTreeSet<String>,
    /// `data-value` of every `.star` element, in document order.
    pub stars: Vec<Option<String>>,
}

impl PageContext {
    /// The stock index page: a list container and nothing else.
    pub fn list_page(location: Location) -> Self {
        Self {
            location,
            has_list_container: true,
            ..Self::default()
        }
    }

    /// The stock post page: content container, every known meta tag and a
    /// five-star rating widget.
    pub fn detail_page(location: Location) -> Self {
        Self {
            location,
            has_content_container: true,
            meta_selectors: MetaTag::ALL
                .iter()
                .map(|tag| tag.selector().to_string())
                .collect(),
            stars: (1..=5).map(|value| Some(value.to_string())).collect(),
            ..Self::default()
        }
    }

    pub fn has_meta(&self, selector: &str) -> bool {
        self.meta_selectors.contains(selector)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    List,
    Detail,
    Unknown,
}

impl PageMode {
    /// The list container wins when a page carries both.
    pub fn detect(page: &PageContext) -> Self {
        if page.has_list_container {
            PageMode::List
        } else if page.has_content_container {
            PageMode::Detail
        } else {
            PageMode::Unknown
        }
    }
}

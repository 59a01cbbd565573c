//! UI updates produced by the renderers.
//!
//! Renderers never touch a document directly. They return a list of
//! [`UiCommand`]s which an adapter applies: the browser crate against the
//! real DOM, [`crate::document::Document`] against an in-memory page.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Elements of the page contract, addressed by their fixed `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Target {
    #[serde(rename = "posts-list-container")]
    PostsList,
    #[serde(rename = "post-content")]
    PostContent,
    #[serde(rename = "post-title")]
    PostTitle,
    #[serde(rename = "post-meta")]
    PostMeta,
    #[serde(rename = "rating-message")]
    RatingMessage,
    /// The document `<head>`.
    #[serde(rename = "head")]
    Head,
}

impl Target {
    /// DOM id of the element, `None` for the head.
    pub fn element_id(self) -> Option<&'static str> {
        match self {
            Target::PostsList => Some("posts-list-container"),
            Target::PostContent => Some("post-content"),
            Target::PostTitle => Some("post-title"),
            Target::PostMeta => Some("post-meta"),
            Target::RatingMessage => Some("rating-message"),
            Target::Head => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiCommand {
    SetDocumentTitle {
        title: String,
    },
    /// Replaces the element's text (`innerText`).
    SetText {
        target: Target,
        text: String,
    },
    /// Replaces the element's markup (`innerHTML`).
    SetHtml {
        target: Target,
        html: String,
    },
    /// Sets an attribute on the first element matching `selector`.
    SetAttribute {
        selector: String,
        attribute: String,
        value: String,
    },
    AppendChild {
        parent: Target,
        node: Node,
    },
    /// Removes every element matching `selector`.
    RemoveAll {
        selector: String,
    },
    /// Runs `action` whenever the `index`-th match of `selector` is clicked.
    OnClick {
        selector: String,
        index: usize,
        action: Box<UiCommand>,
    },
}

// ==================== Узлы ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Builds the element a simple `tag[attr="value"]` selector describes.
    pub fn from_selector(selector: &str) -> Option<Self> {
        let (tag, rest) = selector.trim().split_once('[')?;
        let (name, value) = rest.strip_suffix(']')?.split_once('=')?;
        if tag.is_empty() {
            return None;
        }
        let value = value.trim_matches(|c| c == '"' || c == '\'');
        Some(Self::new(tag).attr(name.trim(), value))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Matches the selector shapes the renderers emit: `tag`, `.class`,
    /// `tag[attr="value"]` and `[attr="value"]`.
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if let Some(class) = selector.strip_prefix('.') {
            return self.has_class(class);
        }

        match selector.split_once('[') {
            None => self.tag.eq_ignore_ascii_case(selector),
            Some((tag, rest)) => {
                let tag_ok = tag.is_empty() || self.tag.eq_ignore_ascii_case(tag);
                let Some((name, value)) = rest
                    .strip_suffix(']')
                    .and_then(|inner| inner.split_once('='))
                else {
                    return false;
                };
                let value = value.trim_matches(|c| c == '"' || c == '\'');
                tag_ok && self.get_attribute(name.trim()) == Some(value)
            }
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
        }
        out.push('>');
        let raw_text = matches!(self.tag.as_str(), "script" | "style");
        for child in &self.children {
            match child {
                // `</` inside a raw-text body would close the element early.
                Node::Text(text) if raw_text => out.push_str(&text.replace("</", "<\\/")),
                _ => child.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(element) => element.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Escape special HTML characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

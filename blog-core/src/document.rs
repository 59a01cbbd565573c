//! In-memory page that [`UiCommand`]s can be applied to.
//!
//! Mirrors the hosting page closely enough to preview renders outside a
//! browser: containers by id, head tags, stars and their click handlers.
//! Commands aimed at elements the page lacks are ignored, as in the DOM
//! adapter.

use crate::command::{escape_html, Element, Node, Target, UiCommand};
use crate::meta::MetaTag;
use crate::page::PageContext;
use crate::schema::LD_JSON_SELECTOR;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
struct Slot {
    html: Option<String>,
    children: Vec<Node>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    head: Vec<Node>,
    slots: BTreeMap<Target, Slot>,
    stars: Vec<Element>,
    handlers: Vec<(usize, UiCommand)>,
}

impl Document {
    /// Builds the markup `page` describes, with empty containers.
    pub fn from_page(page: &PageContext) -> Self {
        let mut doc = Self::default();

        for tag in MetaTag::ALL {
            if page.has_meta(tag.selector()) {
                if let Some(meta) = Element::from_selector(tag.selector()) {
                    doc.head.push(meta.attr("content", "").into());
                }
            }
        }

        if page.has_list_container {
            doc.slots.insert(Target::PostsList, Slot::default());
        }
        if page.has_content_container {
            for target in [
                Target::PostTitle,
                Target::PostMeta,
                Target::PostContent,
                Target::RatingMessage,
            ] {
                doc.slots.insert(target, Slot::default());
            }
        }

        doc.stars = page
            .stars
            .iter()
            .map(|value| {
                let star = Element::new("span").class("star").text("★");
                match value {
                    Some(v) => star.attr("data-value", v.as_str()),
                    None => star,
                }
            })
            .collect();

        doc
    }

    pub fn apply_all<'c>(&mut self, commands: impl IntoIterator<Item = &'c UiCommand>) {
        for command in commands {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: &UiCommand) {
        match command {
            UiCommand::SetDocumentTitle { title } => self.title = title.clone(),
            UiCommand::SetText { target, text } => {
                if let Some(slot) = self.slot_mut(*target) {
                    slot.html = None;
                    slot.children = vec![Node::Text(text.clone())];
                }
            }
            UiCommand::SetHtml { target, html } => {
                if let Some(slot) = self.slot_mut(*target) {
                    slot.html = Some(html.clone());
                    slot.children.clear();
                }
            }
            UiCommand::SetAttribute {
                selector,
                attribute,
                value,
            } => {
                let found = self
                    .head
                    .iter_mut()
                    .filter_map(|node| match node {
                        Node::Element(element) => Some(element),
                        Node::Text(_) => None,
                    })
                    .chain(self.stars.iter_mut())
                    .find(|element| element.matches(selector));
                match found {
                    Some(element) => element.set_attribute(attribute, value),
                    None => log::debug!("No element matches {}", selector),
                }
            }
            UiCommand::AppendChild { parent, node } => match parent {
                Target::Head => self.head.push(node.clone()),
                other => {
                    if let Some(slot) = self.slot_mut(*other) {
                        slot.children.push(node.clone());
                    }
                }
            },
            UiCommand::RemoveAll { selector } => {
                self.head.retain(|node| {
                    !node
                        .as_element()
                        .map(|element| element.matches(selector))
                        .unwrap_or(false)
                });
            }
            UiCommand::OnClick {
                selector,
                index,
                action,
            } => {
                let matching = self.stars.iter().filter(|s| s.matches(selector)).count();
                if *index < matching {
                    self.handlers.push((*index, (**action).clone()));
                } else {
                    log::debug!("No element {} of {}", index, selector);
                }
            }
        }
    }

    /// Fires the click handlers bound to the `index`-th star.
    pub fn click_star(&mut self, index: usize) {
        let actions: Vec<UiCommand> = self
            .handlers
            .iter()
            .filter(|(i, _)| *i == index)
            .map(|(_, action)| action.clone())
            .collect();
        for action in &actions {
            self.apply(action);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has(&self, target: Target) -> bool {
        self.slots.contains_key(&target)
    }

    /// Text of the element, ignoring markup set through `SetHtml`.
    pub fn text(&self, target: Target) -> Option<String> {
        self.slots.get(&target).map(|slot| {
            slot.children
                .iter()
                .map(Node::text_content)
                .collect::<String>()
        })
    }

    pub fn inner_html(&self, target: Target) -> Option<String> {
        self.slots.get(&target).map(Self::slot_html)
    }

    pub fn children(&self, target: Target) -> &[Node] {
        self.slots
            .get(&target)
            .map(|slot| slot.children.as_slice())
            .unwrap_or_default()
    }

    pub fn meta_content(&self, selector: &str) -> Option<&str> {
        self.head_elements()
            .find(|element| element.matches(selector))
            .and_then(|element| element.get_attribute("content"))
    }

    /// Every `application/ld+json` script in the head.
    pub fn structured_data(&self) -> Vec<&Element> {
        self.head_elements()
            .filter(|element| element.matches(LD_JSON_SELECTOR))
            .collect()
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Serializes the page as a standalone HTML document.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        for node in &self.head {
            out.push_str(&node.to_html());
            out.push('\n');
        }
        out.push_str("</head>\n<body>\n");

        for (target, slot) in &self.slots {
            let id = target.element_id().unwrap_or_default();
            let tag = match target {
                Target::PostTitle => "h1",
                Target::PostMeta | Target::RatingMessage => "p",
                _ => "div",
            };
            out.push_str(&format!(
                "<{tag} id=\"{id}\">{}</{tag}>\n",
                Self::slot_html(slot),
                tag = tag,
                id = id
            ));
            if *target == Target::PostContent && !self.stars.is_empty() {
                out.push_str("<div class=\"rating\">");
                for star in &self.stars {
                    out.push_str(&star.to_html());
                }
                out.push_str("</div>\n");
            }
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn head_elements(&self) -> impl Iterator<Item = &Element> {
        self.head.iter().filter_map(Node::as_element)
    }

    fn slot_mut(&mut self, target: Target) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(&target);
        if slot.is_none() {
            log::debug!("Page has no {:?} element", target);
        }
        slot
    }

    fn slot_html(slot: &Slot) -> String {
        let mut html = slot.html.clone().unwrap_or_default();
        for child in &slot.children {
            html.push_str(&child.to_html());
        }
        html
    }
}

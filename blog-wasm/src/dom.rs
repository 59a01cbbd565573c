use blog_core::meta::MetaTag;
use blog_core::page::STAR_SELECTOR;
use blog_core::{Location, Node, PageContext, Target, UiCommand};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Reads what the current page offers: containers, meta tags, stars.
pub fn capture_page(
    document: &Document,
    location: &web_sys::Location,
) -> Result<PageContext, JsValue> {
    let location = Location::new(location.origin()?, location.pathname()?, location.search()?);

    let has_element = |target: Target| {
        target
            .element_id()
            .and_then(|id| document.get_element_by_id(id))
            .is_some()
    };

    let meta_selectors = MetaTag::ALL
        .iter()
        .map(|tag| tag.selector())
        .filter(|selector| matches!(document.query_selector(selector), Ok(Some(_))))
        .map(str::to_string)
        .collect();

    let stars = select_all(document, STAR_SELECTOR)?
        .iter()
        .map(|star| star.get_attribute("data-value"))
        .collect();

    Ok(PageContext {
        location,
        has_list_container: has_element(Target::PostsList),
        has_content_container: has_element(Target::PostContent),
        meta_selectors,
        stars,
    })
}

fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Applies render commands to the live DOM. Missing targets are skipped.
#[derive(Debug, Clone)]
pub struct DomApplier {
    document: Document,
}

impl DomApplier {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn apply_all(&self, commands: &[UiCommand]) {
        for command in commands {
            if let Err(e) = self.apply(command) {
                log::warn!("Failed to apply {:?}: {:?}", command, e);
            }
        }
    }

    pub fn apply(&self, command: &UiCommand) -> Result<(), JsValue> {
        match command {
            UiCommand::SetDocumentTitle { title } => self.document.set_title(title),

            UiCommand::SetText { target, text } => {
                if let Some(element) = self.target(*target) {
                    match element.dyn_ref::<HtmlElement>() {
                        Some(html) => html.set_inner_text(text),
                        None => element.set_text_content(Some(text)),
                    }
                }
            }

            UiCommand::SetHtml { target, html } => {
                if let Some(element) = self.target(*target) {
                    element.set_inner_html(html);
                }
            }

            UiCommand::SetAttribute {
                selector,
                attribute,
                value,
            } => {
                if let Some(element) = self.document.query_selector(selector)? {
                    element.set_attribute(attribute, value)?;
                }
            }

            UiCommand::AppendChild { parent, node } => {
                if let Some(parent) = self.target(*parent) {
                    parent.append_child(&self.build(node)?)?;
                }
            }

            UiCommand::RemoveAll { selector } => {
                for element in select_all(&self.document, selector)? {
                    element.remove();
                }
            }

            UiCommand::OnClick {
                selector,
                index,
                action,
            } => {
                if let Some(element) = select_all(&self.document, selector)?.into_iter().nth(*index) {
                    self.bind_click(&element, (**action).clone())?;
                }
            }
        }
        Ok(())
    }

    fn target(&self, target: Target) -> Option<Element> {
        let element = match target.element_id() {
            Some(id) => self.document.get_element_by_id(id),
            None => self.document.head().map(Element::from),
        };
        if element.is_none() {
            log::debug!("Page has no {:?} element", target);
        }
        element
    }

    fn build(&self, node: &Node) -> Result<web_sys::Node, JsValue> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(el) => {
                let element = self.document.create_element(&el.tag)?;
                for (name, value) in &el.attributes {
                    element.set_attribute(name, value)?;
                }
                for child in &el.children {
                    element.append_child(&self.build(child)?)?;
                }
                Ok(element.into())
            }
        }
    }

    /// The handler lives as long as the page, so the closure is leaked.
    fn bind_click(&self, element: &Element, action: UiCommand) -> Result<(), JsValue> {
        let applier = self.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = applier.apply(&action) {
                log::warn!("Click handler failed: {:?}", e);
            }
        });
        element.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
        Ok(())
    }
}

// dom.rs - Page implementation over the live document

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::error::{HostError, HostResult};
use crate::reveal::Page;

const CARET_CLASS: &str = "prompt-cursor";

#[derive(Clone)]
pub struct DomPage {
    doc: Document,
}

impl DomPage {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    pub fn current() -> HostResult<Self> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let doc = window.document().ok_or(HostError::NoDocument)?;
        Ok(Self::new(doc))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }
}

impl Page for DomPage {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.doc.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.doc.query_selector(selector) {
            Ok(el) => el,
            Err(e) => {
                log::warn!("bad selector {selector:?}: {e:?}");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.doc.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("bad selector {selector:?}: {e:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name()
    }

    fn has_child_elements(&self, node: &Element) -> bool {
        node.child_element_count() > 0
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn append_text(&self, node: &Element, ch: char) {
        let mut text = node.text_content().unwrap_or_default();
        text.push(ch);
        node.set_text_content(Some(&text));
    }

    fn reset_caret(&self, node: &Element) {
        node.set_inner_html(&format!(r#"<span class="{CARET_CLASS}"></span>"#));
    }

    fn insert_before_caret(&self, node: &Element, ch: char) {
        let Ok(span) = self.doc.create_element("span") else { return };
        let mut buf = [0u8; 4];
        span.set_text_content(Some(&*ch.encode_utf8(&mut buf)));

        let caret = node.query_selector(&format!(".{CARET_CLASS}")).ok().flatten();
        let caret = caret.as_ref().map(|c| c.as_ref() as &web_sys::Node);
        if let Err(e) = node.insert_before(&span, caret) {
            log::warn!("prompt insert failed: {e:?}");
        }
    }

    fn disable(&self, node: &Element) {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(true);
        }
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let style = el.style();
            let _ = style.set_property("opacity", "0.7");
            let _ = style.set_property("cursor", "not-allowed");
        }
    }
}

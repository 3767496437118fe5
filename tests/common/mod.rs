// In-memory document for driving the sequencer without a browser.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use syllabus_reveal::reveal::page::{self, Page};

#[derive(Clone, Debug, Default)]
pub struct FakeNode {
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub children: bool,
    pub caret: bool,
    pub disabled: bool,
    /// Number of set_text calls.
    pub writes: usize,
}

#[derive(Default)]
struct Doc {
    nodes: Vec<FakeNode>,
    ids: HashMap<String, usize>,
    selectors: HashMap<String, Vec<usize>>,
}

#[derive(Clone, Default)]
pub struct FakePage {
    doc: Rc<RefCell<Doc>>,
}

/// Node ids of the named regions.
#[derive(Clone, Copy, Debug)]
pub struct Ids {
    pub prompt_overlay: usize,
    pub loading_overlay: usize,
    pub main_content: usize,
    pub prompt_text: usize,
    pub generate_button: usize,
    pub loading_status: usize,
    pub response_header: usize,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, tag: &str, text: &str) -> usize {
        let mut doc = self.doc.borrow_mut();
        doc.nodes.push(FakeNode {
            tag: tag.to_ascii_uppercase(),
            text: text.to_string(),
            ..FakeNode::default()
        });
        doc.nodes.len() - 1
    }

    pub fn with_id(&self, id: &str, tag: &str) -> usize {
        let node = self.element(tag, "");
        self.doc.borrow_mut().ids.insert(id.to_string(), node);
        node
    }

    /// Make `node` match `selector` (appended in document order).
    pub fn bind(&self, selector: &str, node: usize) -> usize {
        self.doc
            .borrow_mut()
            .selectors
            .entry(selector.to_string())
            .or_default()
            .push(node);
        node
    }

    pub fn set_children(&self, node: usize) {
        self.doc.borrow_mut().nodes[node].children = true;
    }

    pub fn node(&self, node: usize) -> FakeNode {
        self.doc.borrow().nodes[node].clone()
    }

    pub fn text_of(&self, node: usize) -> String {
        self.doc.borrow().nodes[node].text.clone()
    }

    pub fn has(&self, node: usize, class: &str) -> bool {
        self.doc.borrow().nodes[node].classes.contains(class)
    }

    /// All seven named regions.
    pub fn with_regions(&self) -> Ids {
        Ids {
            prompt_overlay: self.with_id(page::PROMPT_OVERLAY, "div"),
            loading_overlay: self.with_id(page::LOADING_OVERLAY, "div"),
            main_content: self.with_id(page::MAIN_CONTENT, "main"),
            prompt_text: self.with_id(page::PROMPT_TEXT, "div"),
            generate_button: self.with_id(page::GENERATE_BUTTON, "button"),
            loading_status: self.with_id(page::LOADING_STATUS, "p"),
            response_header: self.with_id(page::RESPONSE_HEADER, "div"),
        }
    }
}

/// Content nodes of a representative syllabus page.
#[derive(Clone, Debug)]
pub struct Content {
    pub nav: usize,
    pub hero_title: usize,
    pub hero_subtitle: usize,
    pub description: Vec<usize>,
    pub module_cards: Vec<usize>,
    pub gallery_items: Vec<usize>,
    pub references: Vec<usize>,
    pub footer: usize,
}

pub fn syllabus_page() -> (FakePage, Ids, Content) {
    let page = FakePage::new();
    let ids = page.with_regions();

    let nav = page.bind("nav", page.element("nav", "Home"));
    page.set_children(nav);
    let hero_title = page.bind(".hero h1", page.element("h1", "AI & Art"));
    let hero_subtitle = page.bind(".hero .subtitle", page.element("p", "A course"));

    page.bind("#description .section-title", page.element("h2", "Description"));
    page.bind("#description .section-divider", page.element("div", ""));
    let para = page.element("p", "First paragraph.");
    let list = page.element("ul", "");
    page.set_children(list);
    let para2 = page.element("p", "Second paragraph.");
    let description = vec![para, list, para2];
    for &n in &description {
        page.bind("#description .description-content > *", n);
    }

    page.bind("#modules .section-title", page.element("h2", "Modules"));
    page.bind("#modules .section-divider", page.element("div", ""));
    let module_cards: Vec<usize> = (0..5)
        .map(|i| page.bind(".module-card", page.element("article", &format!("Module {i}"))))
        .collect();

    page.bind("#gallery .section-title", page.element("h2", "Gallery"));
    page.bind("#gallery .section-divider", page.element("div", ""));
    page.bind("#gallery .gallery-intro", page.element("p", "Works."));
    let gallery_items: Vec<usize> = (0..4)
        .map(|i| page.bind(".gallery-item", page.element("figure", &format!("Work {i}"))))
        .collect();

    page.bind("#references .section-title", page.element("h2", "References"));
    page.bind("#references .section-divider", page.element("div", ""));
    let references: Vec<usize> = (0..6)
        .map(|i| page.bind(".reference-list li", page.element("li", &format!("Ref {i}"))))
        .collect();

    let footer = page.bind("footer", page.element("footer", "(c) 2025"));

    let content = Content {
        nav,
        hero_title,
        hero_subtitle,
        description,
        module_cards,
        gallery_items,
        references,
        footer,
    };
    (page, ids, content)
}

impl Page for FakePage {
    type Node = usize;

    fn by_id(&self, id: &str) -> Option<usize> {
        self.doc.borrow().ids.get(id).copied()
    }

    fn query(&self, selector: &str) -> Option<usize> {
        self.doc.borrow().selectors.get(selector).and_then(|v| v.first().copied())
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        self.doc.borrow().selectors.get(selector).cloned().unwrap_or_default()
    }

    fn add_class(&self, node: &usize, class: &str) {
        self.doc.borrow_mut().nodes[*node].classes.insert(class.to_string());
    }

    fn remove_class(&self, node: &usize, class: &str) {
        self.doc.borrow_mut().nodes[*node].classes.remove(class);
    }

    fn has_class(&self, node: &usize, class: &str) -> bool {
        self.doc.borrow().nodes[*node].classes.contains(class)
    }

    fn tag_name(&self, node: &usize) -> String {
        self.doc.borrow().nodes[*node].tag.clone()
    }

    fn has_child_elements(&self, node: &usize) -> bool {
        self.doc.borrow().nodes[*node].children
    }

    fn text(&self, node: &usize) -> String {
        self.doc.borrow().nodes[*node].text.clone()
    }

    fn set_text(&self, node: &usize, text: &str) {
        let mut doc = self.doc.borrow_mut();
        let n = &mut doc.nodes[*node];
        n.text = text.to_string();
        n.writes += 1;
    }

    fn append_text(&self, node: &usize, ch: char) {
        self.doc.borrow_mut().nodes[*node].text.push(ch);
    }

    fn reset_caret(&self, node: &usize) {
        let mut doc = self.doc.borrow_mut();
        let n = &mut doc.nodes[*node];
        n.text.clear();
        n.caret = true;
    }

    fn insert_before_caret(&self, node: &usize, ch: char) {
        let mut doc = self.doc.borrow_mut();
        let n = &mut doc.nodes[*node];
        assert!(n.caret, "prompt typed before the caret was placed");
        n.text.push(ch);
    }

    fn disable(&self, node: &usize) {
        self.doc.borrow_mut().nodes[*node].disabled = true;
    }
}

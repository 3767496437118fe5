// page.rs - Host document abstraction
//
// The sequencer only ever touches the page through this trait. The browser
// implementation wraps web-sys elements; tests use an in-memory document.

/// Class names toggled by the sequence. Styling lives in the page's CSS.
pub mod class {
    pub const HIDDEN: &str = "hidden";
    pub const ACTIVE: &str = "active";
    pub const VISIBLE: &str = "visible";
    pub const TYPEWRITER_HIDDEN: &str = "typewriter-hidden";
    pub const TYPEWRITER_VISIBLE: &str = "typewriter-visible";
    pub const TYPING_CURSOR: &str = "typing-cursor";
}

pub trait Page {
    type Node: Clone;

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All elements matching a CSS selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Upper-case tag name, e.g. "P".
    fn tag_name(&self, node: &Self::Node) -> String;
    fn has_child_elements(&self, node: &Self::Node) -> bool;

    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn append_text(&self, node: &Self::Node, ch: char);

    /// Empty the node, leaving only the blinking caret.
    fn reset_caret(&self, node: &Self::Node);
    /// Insert one character immediately before the caret.
    fn insert_before_caret(&self, node: &Self::Node, ch: char);

    /// Grey out and disable an interactive control.
    fn disable(&self, node: &Self::Node);
}

// Element ids of the named regions
pub const PROMPT_OVERLAY: &str = "aiPromptOverlay";
pub const LOADING_OVERLAY: &str = "aiLoadingOverlay";
pub const MAIN_CONTENT: &str = "mainContent";
pub const PROMPT_TEXT: &str = "promptText";
pub const GENERATE_BUTTON: &str = "generateBtn";
pub const LOADING_STATUS: &str = "loadingStatus";
pub const RESPONSE_HEADER: &str = "aiResponseHeader";

/// Handles to the named regions, located once at start-up.
/// Any of them may be absent; the stages skip what is missing.
#[derive(Clone, Debug)]
pub struct Regions<N> {
    pub prompt_overlay: Option<N>,
    pub loading_overlay: Option<N>,
    pub main_content: Option<N>,
    pub prompt_text: Option<N>,
    pub generate_button: Option<N>,
    pub loading_status: Option<N>,
    pub response_header: Option<N>,
}

impl<N: Clone> Regions<N> {
    pub fn locate<P: Page<Node = N>>(page: &P) -> Self {
        let find = |id: &str| {
            let node = page.by_id(id);
            if node.is_none() {
                log::warn!("region #{id} not found, its effects will be skipped");
            }
            node
        };

        Self {
            prompt_overlay: find(PROMPT_OVERLAY),
            loading_overlay: find(LOADING_OVERLAY),
            main_content: find(MAIN_CONTENT),
            prompt_text: find(PROMPT_TEXT),
            generate_button: find(GENERATE_BUTTON),
            loading_status: find(LOADING_STATUS),
            response_header: find(RESPONSE_HEADER),
        }
    }
}

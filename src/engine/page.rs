//! Page representation

use crate::devtools::Console;
use crate::renderer::{Document, HtmlParser, NodeRef};
use crate::template::HostDocument;
use crate::utils::Result;
use crate::utils::error::RenderError;
use url::Url;

/// Loading state of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Markup still arriving
    Loading,
    /// Fully parsed; ready handlers may run
    Complete,
}

/// A displayed document
#[derive(Debug)]
pub struct Page {
    /// The page URL
    url: Url,
    /// The DOM document
    document: Document,
    /// Diagnostics reported while the page was live
    console: Console,
    ready_state: ReadyState,
}

impl Page {
    /// Create a page around an already parsed document. The page stays
    /// `Loading` until [`Page::mark_ready`].
    pub fn new(url: Url, document: Document) -> Self {
        Self {
            url,
            document,
            console: Console::new(),
            ready_state: ReadyState::Loading,
        }
    }

    /// Parse served markup into a ready page
    pub fn load(url: Url, html: &str) -> Result<Self> {
        let document = HtmlParser::new().parse(html)?;
        let mut page = Self::new(url, document);
        page.mark_ready();
        Ok(page)
    }

    /// Signal that parsing finished
    pub fn mark_ready(&mut self) {
        self.ready_state = ReadyState::Complete;
    }

    /// Current loading state
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Get the page URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the DOM document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Page diagnostics
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Mutable access to page diagnostics
    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    /// Serialize the displayed document
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}

impl HostDocument for Page {
    fn url(&self) -> &Url {
        &self.url
    }

    fn element_by_id(&self, id: &str) -> Option<NodeRef> {
        self.document.get_element_by_id(id)
    }

    fn count_by_id(&self, id: &str) -> usize {
        self.document.count_elements_by_id(id)
    }

    fn body(&self) -> Option<NodeRef> {
        self.document.body()
    }

    fn replace_body(&mut self, root: NodeRef) -> std::result::Result<(), RenderError> {
        let body = self.document.body().ok_or(RenderError::NoBody)?;
        body.replace_children([root])
    }

    fn title(&self) -> Option<String> {
        self.document.title()
    }

    fn console(&mut self) -> &mut Console {
        &mut self.console
    }
}

//! Layout composition
//!
//! A served page carries only its own content. At load time the shared
//! layout is fetched, the page's content element is grafted into the layout's
//! slot, and the composed layout becomes the visible body.

mod composer;

pub use composer::LayoutComposer;

use crate::devtools::Console;
use crate::renderer::NodeRef;
use crate::utils::error::RenderError;
use url::Url;

/// The live document a composition runs against
pub trait HostDocument {
    /// URL the document was served from; relative layout paths resolve
    /// against it
    fn url(&self) -> &Url;

    /// Element with `id` in the currently displayed tree
    fn element_by_id(&self, id: &str) -> Option<NodeRef>;

    /// Number of elements carrying `id` in the currently displayed tree
    fn count_by_id(&self, id: &str) -> usize;

    /// The displayed `<body>`
    fn body(&self) -> Option<NodeRef>;

    /// Make `root` the only child of the displayed body
    fn replace_body(&mut self, root: NodeRef) -> Result<(), RenderError>;

    /// Title of the displayed document
    fn title(&self) -> Option<String> {
        None
    }

    /// Diagnostic channel
    fn console(&mut self) -> &mut Console;
}

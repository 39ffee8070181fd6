//! DOM (Document Object Model) implementation
//!
//! Nodes are reference counted and know their parent through a weak link, so a
//! handle captured from one tree stays valid when the node is moved into
//! another tree. Appending a node that already has a parent detaches it first,
//! exactly like `appendChild` in a browser.

use crate::utils::error::RenderError;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Node types in the DOM
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    /// Document root
    Document,
    /// `<!DOCTYPE name>`
    Doctype(String),
    /// Element node (e.g., <div>)
    Element(ElementData),
    /// Text node
    Text(String),
    /// Comment node
    Comment(String),
}

impl NodeType {
    fn kind(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Doctype(_) => "doctype",
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::Comment(_) => "comment",
        }
    }
}

/// Data for element nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (e.g., "div", "span")
    pub tag_name: String,
    /// Element attributes, in source order
    pub attributes: Vec<(String, String)>,
}

impl ElementData {
    /// Create a new element
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute value, replacing an existing one in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Get the ID attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }
}

/// A node in the DOM tree
pub struct Node {
    data: RefCell<NodeType>,
    parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<NodeRef>>,
}

/// Shared handle to a [`Node`]
#[derive(Clone)]
pub struct NodeRef(Rc<Node>);

impl NodeRef {
    /// Create a detached node
    pub fn new(node_type: NodeType) -> Self {
        Self(Rc::new(Node {
            data: RefCell::new(node_type),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Create an element node
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::new(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeType::Text(content.into()))
    }

    /// Borrow the node data
    pub fn node_type(&self) -> Ref<'_, NodeType> {
        self.0.data.borrow()
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(*self.0.data.borrow(), NodeType::Element(_))
    }

    /// Lowercase tag name for elements
    pub fn tag_name(&self) -> Option<String> {
        match &*self.0.data.borrow() {
            NodeType::Element(data) => Some(data.tag_name.clone()),
            _ => None,
        }
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &*self.0.data.borrow() {
            NodeType::Element(data) => data.get_attribute(name).map(str::to_owned),
            _ => None,
        }
    }

    /// Set an attribute; ignored on non-elements
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        if let NodeType::Element(data) = &mut *self.0.data.borrow_mut() {
            data.set_attribute(name, value);
        }
    }

    /// Get the ID attribute
    pub fn id(&self) -> Option<String> {
        self.attribute("id")
    }

    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Current parent, if attached
    pub fn parent(&self) -> Option<NodeRef> {
        self.0.parent.borrow().upgrade().map(NodeRef)
    }

    /// Snapshot of the child list
    pub fn children(&self) -> Vec<NodeRef> {
        self.0.children.borrow().clone()
    }

    /// Number of children
    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// Topmost ancestor (the node itself when detached)
    pub fn root(&self) -> NodeRef {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Whether `self` is `other` or one of its ancestors
    pub fn is_inclusive_ancestor_of(&self, other: &NodeRef) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Remove this node from its parent; no-op when detached
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .children
                .borrow_mut()
                .retain(|child| !child.ptr_eq(self));
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    /// Append `child`, moving it out of wherever it currently lives
    pub fn append_child(&self, child: &NodeRef) -> Result<(), RenderError> {
        self.ensure_container()?;
        if child.is_inclusive_ancestor_of(self) {
            return Err(RenderError::Hierarchy);
        }
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        Ok(())
    }

    /// Drop every child, then append `nodes` in order
    pub fn replace_children<I>(&self, nodes: I) -> Result<(), RenderError>
    where
        I: IntoIterator<Item = NodeRef>,
    {
        self.ensure_container()?;
        let nodes: Vec<NodeRef> = nodes.into_iter().collect();
        if nodes.iter().any(|node| node.is_inclusive_ancestor_of(self)) {
            return Err(RenderError::Hierarchy);
        }
        for child in self.children() {
            child.detach();
        }
        for node in &nodes {
            self.append_child(node)?;
        }
        Ok(())
    }

    /// Depth-first search (self included) for an element with `id`
    pub fn find_by_id(&self, id: &str) -> Option<NodeRef> {
        self.find(&|node| node.id().as_deref() == Some(id))
    }

    /// Depth-first search (self included) for the first element named `tag`
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeRef> {
        self.find(&|node| {
            node.tag_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
        })
    }

    /// Number of elements in this subtree (self included) carrying `id`
    pub fn count_by_id(&self, id: &str) -> usize {
        let own = usize::from(self.id().as_deref() == Some(id));
        own + self
            .0
            .children
            .borrow()
            .iter()
            .map(|child| child.count_by_id(id))
            .sum::<usize>()
    }

    fn find(&self, predicate: &dyn Fn(&NodeRef) -> bool) -> Option<NodeRef> {
        if predicate(self) {
            return Some(self.clone());
        }
        self.0
            .children
            .borrow()
            .iter()
            .find_map(|child| child.find(predicate))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeType::Text(text) = &*self.0.data.borrow() {
            out.push_str(text);
        }
        for child in self.0.children.borrow().iter() {
            child.collect_text(out);
        }
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&self, text: impl Into<String>) -> Result<(), RenderError> {
        self.replace_children([NodeRef::text(text)])
    }

    fn ensure_container(&self) -> Result<(), RenderError> {
        match &*self.0.data.borrow() {
            NodeType::Document | NodeType::Element(_) => Ok(()),
            other => Err(RenderError::NotAContainer(other.kind())),
        }
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.data.borrow() {
            NodeType::Element(data) => match data.id() {
                Some(id) => write!(f, "<{} id={:?}>", data.tag_name, id),
                None => write!(f, "<{}>", data.tag_name),
            },
            NodeType::Text(text) => write!(f, "#text {:?}", text),
            other => write!(f, "#{}", other.kind()),
        }
    }
}

/// The DOM document
#[derive(Debug, Clone)]
pub struct Document {
    /// Root node
    pub root: NodeRef,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            root: NodeRef::new(NodeType::Document),
        }
    }

    /// The `<html>` element, or whatever element sits at the top
    pub fn document_element(&self) -> Option<NodeRef> {
        self.root
            .children()
            .into_iter()
            .find(NodeRef::is_element)
    }

    /// The `<head>` element
    pub fn head(&self) -> Option<NodeRef> {
        self.document_element()?.find_by_tag("head")
    }

    /// The `<body>` element
    pub fn body(&self) -> Option<NodeRef> {
        self.document_element()?.find_by_tag("body")
    }

    /// Text of the first `<title>`
    pub fn title(&self) -> Option<String> {
        self.root
            .find_by_tag("title")
            .map(|title| title.text_content().trim().to_string())
    }

    /// Overwrite the first `<title>`, creating one in `<head>` if needed
    pub fn set_title(&self, title: &str) -> Result<(), RenderError> {
        if let Some(existing) = self.root.find_by_tag("title") {
            return existing.set_text_content(title);
        }
        if let Some(head) = self.head() {
            let node = NodeRef::element("title");
            node.set_text_content(title)?;
            head.append_child(&node)?;
        }
        Ok(())
    }

    /// Look up an element by id anywhere in the tree
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef> {
        self.root.find_by_id(id)
    }

    /// Number of elements carrying `id`; more than one means the id is ambiguous
    pub fn count_elements_by_id(&self, id: &str) -> usize {
        self.root.count_by_id(id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

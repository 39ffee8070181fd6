//! HTML5 parser implementation using html5ever
//!
//! Markup is parsed into a `markup5ever_rcdom` tree and then converted into our
//! own [`Document`]. Each call produces a fresh, detached tree.

use super::dom::{Document, ElementData, NodeRef, NodeType};
use crate::utils::Result;
use crate::utils::error::ParseError;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{LocalName, Namespace, ParseOpts, QualName, parse_document, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Context used when the target of a fragment is not an element
const DEFAULT_FRAGMENT_CONTEXT: &str = "p";

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text children are written verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// HTML5 parser using html5ever
#[derive(Clone)]
pub struct HtmlParser {
    opts: ParseOpts,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self {
            opts: ParseOpts {
                tree_builder: TreeBuilderOpts {
                    drop_doctype: false,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    /// Parse a complete document. Empty input is rejected.
    pub fn parse(&self, content: &str) -> Result<Document> {
        if content.trim().is_empty() {
            return Err(ParseError::Empty.into());
        }
        self.parse_into_document(content)
    }

    /// Parse raw bytes, rejecting anything that is not UTF-8
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Document> {
        let content =
            std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding(e.to_string()))?;
        self.parse(content)
    }

    /// Parse markup meant for the inner HTML of a `context` element, the way
    /// a browser's `innerHTML` setter does. The returned nodes are detached
    /// and ready to be appended.
    pub fn parse_fragment(&self, markup: &str, context: &str) -> Result<Vec<NodeRef>> {
        if markup.is_empty() {
            return Ok(Vec::new());
        }
        let context = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(context));
        let dom = parse_fragment(RcDom::default(), self.opts.clone(), context, Vec::new(), false)
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .map_err(|e| ParseError::Read(e.to_string()))?;

        // The fragment lands under a synthetic <html> element.
        let mut nodes = Vec::new();
        for holder in dom.document.children.borrow().iter() {
            for child in holder.children.borrow().iter() {
                if let Some(node) = convert_node(child)? {
                    nodes.push(node);
                }
            }
        }
        Ok(nodes)
    }

    fn parse_into_document(&self, content: &str) -> Result<Document> {
        let dom = parse_document(RcDom::default(), self.opts.clone())
            .from_utf8()
            .read_from(&mut content.as_bytes())
            .map_err(|e| ParseError::Read(e.to_string()))?;

        let document = Document::new();
        for child in dom.document.children.borrow().iter() {
            if let Some(node) = convert_node(child)? {
                document.root.append_child(&node)?;
            }
        }
        Ok(document)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_node(handle: &Handle) -> Result<Option<NodeRef>> {
    let node = match &handle.data {
        NodeData::Document => return Ok(None),
        NodeData::ProcessingInstruction { .. } => return Ok(None),
        NodeData::Doctype { name, .. } => {
            return Ok(Some(NodeRef::new(NodeType::Doctype(name.to_string()))));
        }
        NodeData::Text { contents } => {
            return Ok(Some(NodeRef::text(contents.borrow().to_string())));
        }
        NodeData::Comment { contents } => {
            return Ok(Some(NodeRef::new(NodeType::Comment(contents.to_string()))));
        }
        NodeData::Element { name, attrs, .. } => {
            let mut data = ElementData::new(name.local.to_string());
            for attr in attrs.borrow().iter() {
                data.set_attribute(attr.name.local.to_string(), attr.value.to_string());
            }
            NodeRef::new(NodeType::Element(data))
        }
    };

    for child in handle.children.borrow().iter() {
        if let Some(converted) = convert_node(child)? {
            node.append_child(&converted)?;
        }
    }
    Ok(Some(node))
}

/// Serialize a node and its subtree
pub fn outer_html(node: &NodeRef) -> String {
    let mut out = String::new();
    write_node(node, &mut out, false);
    out
}

/// Serialize only the children of a node
pub fn inner_html(node: &NodeRef) -> String {
    let raw = is_raw_text_parent(node);
    let mut out = String::new();
    for child in node.children() {
        write_node(&child, &mut out, raw);
    }
    out
}

/// Serialize a whole document, doctype included
pub fn document_html(document: &Document) -> String {
    inner_html(&document.root)
}

/// Replace the children of `node` with `markup` parsed in its context
pub fn set_inner_html(parser: &HtmlParser, node: &NodeRef, markup: &str) -> Result<()> {
    let context = node
        .tag_name()
        .unwrap_or_else(|| DEFAULT_FRAGMENT_CONTEXT.to_string());
    let nodes = parser.parse_fragment(markup, &context)?;
    node.replace_children(nodes)?;
    Ok(())
}

impl NodeRef {
    /// Serialized children of this node
    pub fn inner_html(&self) -> String {
        inner_html(self)
    }

    /// Serialized node, tags included
    pub fn outer_html(&self) -> String {
        outer_html(self)
    }
}

impl Document {
    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        document_html(self)
    }
}

fn is_raw_text_parent(node: &NodeRef) -> bool {
    node.tag_name()
        .is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag.as_str()))
}

fn write_node(node: &NodeRef, out: &mut String, raw_text: bool) {
    match &*node.node_type() {
        NodeType::Document => {
            for child in node.children() {
                write_node(&child, out, false);
            }
        }
        NodeType::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeType::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                escape_into(text, out, false);
            }
        }
        NodeType::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);
            for (name, value) in &data.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(value, out, true);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&data.tag_name.as_str());
            for child in node.children() {
                write_node(&child, out, raw);
            }
            out.push_str("</");
            out.push_str(&data.tag_name);
            out.push('>');
        }
    }
}

fn escape_into(text: &str, out: &mut String, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::BlogError;

    #[test]
    fn test_parse_empty_html_is_an_error() {
        let parser = HtmlParser::new();
        assert!(matches!(
            parser.parse("   \n"),
            Err(BlogError::Parse(ParseError::Empty))
        ));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let parser = HtmlParser::new();
        assert!(matches!(
            parser.parse_bytes(&[0x3c, 0xff, 0xfe]),
            Err(BlogError::Parse(ParseError::Encoding(_)))
        ));
    }

    #[test]
    fn test_parse_simple_html() {
        let parser = HtmlParser::new();
        let doc = parser.parse("<html><body>Hello</body></html>").unwrap();
        assert_eq!(doc.body().unwrap().text_content(), "Hello");
    }

    #[test]
    fn test_parse_with_attributes() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse(r#"<div id="main" class="container">Content</div>"#)
            .unwrap();
        let main = doc.get_element_by_id("main").unwrap();
        assert_eq!(main.attribute("class").as_deref(), Some("container"));
    }

    #[test]
    fn test_parse_nested_elements() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse(
                r#"
            <html>
                <head><title>Test</title></head>
                <body>
                    <div>
                        <p>Paragraph 1</p>
                        <p>Paragraph 2</p>
                    </div>
                </body>
            </html>
        "#,
            )
            .unwrap();
        assert_eq!(doc.title().as_deref(), Some("Test"));
        assert!(doc.body().unwrap().find_by_tag("p").is_some());
    }

    #[test]
    fn test_parse_malformed_html() {
        // html5ever should handle malformed HTML gracefully
        let parser = HtmlParser::new();
        let doc = parser.parse("<p>Unclosed paragraph<div>Another").unwrap();
        assert!(doc.body().unwrap().find_by_tag("div").is_some());
    }

    #[test]
    fn test_each_parse_is_independent() {
        let parser = HtmlParser::new();
        let a = parser.parse(r#"<div id="x"></div>"#).unwrap();
        let b = parser.parse(r#"<div id="x"></div>"#).unwrap();
        assert!(!a.get_element_by_id("x").unwrap().ptr_eq(&b.get_element_by_id("x").unwrap()));
    }

    #[test]
    fn test_fragment_keeps_inline_markup() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("a <em>b</em> c&hellip;", "p").unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| n.parent().is_none()));
        assert_eq!(nodes[1].tag_name().as_deref(), Some("em"));
        assert_eq!(nodes[2].text_content(), " c\u{2026}");
    }

    #[test]
    fn test_fragment_keeps_style_element() {
        let parser = HtmlParser::new();
        let nodes = parser
            .parse_fragment("<style>p{}</style>kept <b>x</b>", "p")
            .unwrap();
        let tags: Vec<_> = nodes.iter().map(NodeRef::tag_name).collect();
        assert_eq!(
            tags,
            vec![Some("style".to_string()), None, Some("b".to_string())]
        );
        assert_eq!(nodes[0].text_content(), "p{}");
        assert_eq!(nodes[1].text_content(), "kept ");
    }

    #[test]
    fn test_fragment_keeps_leading_whitespace() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("   leading spaces", "p").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "   leading spaces");
    }

    #[test]
    fn test_fragment_table_cells_in_row_context() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("<td>a</td><td>b</td>", "tr").unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.tag_name().as_deref() == Some("td")));
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse(r#"<!DOCTYPE html><html><head></head><body><p class="a">x &amp; y<br></p></body></html>"#)
            .unwrap();
        assert_eq!(
            document_html(&doc),
            r#"<!DOCTYPE html><html><head></head><body><p class="a">x &amp; y<br></p></body></html>"#
        );
    }

    #[test]
    fn test_script_text_is_not_escaped() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse("<html><head><script>if (a < b) {}</script></head><body></body></html>")
            .unwrap();
        let script = doc.root.find_by_tag("script").unwrap();
        assert_eq!(outer_html(&script), "<script>if (a < b) {}</script>");
    }

    #[test]
    fn test_set_inner_html() {
        let parser = HtmlParser::new();
        let target = NodeRef::element("p");
        target.append_child(&NodeRef::text("old")).unwrap();
        set_inner_html(&parser, &target, "<b>new</b>!").unwrap();
        assert_eq!(inner_html(&target), "<b>new</b>!");
    }

    #[test]
    fn test_set_inner_html_round_trips_style_and_whitespace() {
        let parser = HtmlParser::new();
        let target = NodeRef::element("p");
        set_inner_html(&parser, &target, "  <style>p{}</style>kept <b>x</b>").unwrap();
        assert_eq!(inner_html(&target), "  <style>p{}</style>kept <b>x</b>");
    }
}

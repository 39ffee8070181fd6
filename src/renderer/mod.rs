//! Document model for jubelogs
//!
//! Parses HTML into detached trees, moves nodes between trees and writes them
//! back out as markup.

mod dom;
pub mod html;

pub use dom::{Document, ElementData, NodeRef, NodeType};
pub use html::{HtmlParser, document_html, inner_html, outer_html, set_inner_html};

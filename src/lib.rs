//! # jubelogs - landing page composer and feed renderer
//!
//! Renders the landing page of the jubelogs static blog the way the browser
//! scripts do, on a small DOM of its own.
//!
//! ## Architecture
//!
//! - **renderer**: HTML parsing into detached trees, node moves, serialization
//! - **template**: layout composition (content element grafted into a shared shell)
//! - **feed**: post records, list rendering, splash selection
//! - **network**: layout loading over `http(s)` and `file:`
//! - **engine**: page model and the document-ready handlers
//! - **devtools**: the page console used as diagnostic channel
//! - **config**: site settings
//! - **utils**: truncation and shared error types

pub mod config;
pub mod devtools;
pub mod engine;
pub mod feed;
pub mod network;
pub mod renderer;
pub mod template;
pub mod utils;

// Re-export main types for convenience
pub use config::SiteConfig;
pub use engine::{BlogEngine, LoadReport, Page};
pub use feed::{Feed, Post, render_feed};
pub use template::{HostDocument, LayoutComposer};
pub use utils::error::{BlogError, Result};
pub use utils::{ELLIPSIS, truncate};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "jubelogs";

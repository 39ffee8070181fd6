//! Error types for jubelogs

use thiserror::Error;

/// Main error type for jubelogs operations
#[derive(Debug, Error)]
pub enum BlogError {
    /// Layout could not be retrieved
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    /// Markup could not be turned into a document
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// Content or slot element missing during composition
    #[error("composition error: {0}")]
    Composition(#[from] CompositionError),
    /// Missing or unusable site input
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Tree manipulation errors
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Network-specific errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed or resolved
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Scheme other than http, https or file
    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),
    /// Server answered with a non-2xx status
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    /// Connection, TLS or body read failure
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

/// Markup errors
#[derive(Debug, Error)]
pub enum ParseError {
    /// Body was empty or whitespace only
    #[error("document is empty")]
    Empty,
    /// Body was not valid UTF-8
    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),
    /// Tokenizer input could not be read
    #[error("failed to read markup: {0}")]
    Read(String),
}

/// Which side of a composition was missing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    /// Live document has no element with the content id
    #[error("live document has no element with id `{0}`")]
    MissingContent(String),
    /// Layout has no element with the slot id
    #[error("layout has no element with id `{0}`")]
    MissingSlot(String),
    /// Live document has no body to replace
    #[error("live document has no <body>")]
    MissingBody,
    /// Content element encloses the body and cannot be moved out of it
    #[error("element `{0}` contains the body it would replace")]
    ContentContainsBody(String),
    /// More than one element in the live document carries the content id
    #[error("live document has more than one element with id `{0}`")]
    DuplicateContent(String),
    /// More than one element in the layout carries the slot id
    #[error("layout has more than one element with id `{0}`")]
    DuplicateSlot(String),
    /// Layout parsed without a root element
    #[error("layout has no root element")]
    MissingRoot,
}

/// Site input errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `posts` absent or empty
    #[error("post feed is missing or empty")]
    EmptyPosts,
    /// `splashes` absent or empty
    #[error("splash pool is missing or empty")]
    EmptySplashes,
    /// Render target not present in the page
    #[error("page has no element with id `{0}`")]
    MissingTarget(String),
    /// Page handed to the engine before it finished parsing
    #[error("document is not ready")]
    NotReady,
    /// JSON could not be decoded
    #[error("invalid JSON in {source_name}: {reason}")]
    Json { source_name: String, reason: String },
}

/// Tree manipulation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Appending would make a node its own ancestor
    #[error("cannot insert a node into itself or its descendants")]
    Hierarchy,
    /// Operation requires a node that can hold children
    #[error("node of kind {0} cannot have children")]
    NotAContainer(&'static str),
    /// Document has no `<body>` to write into
    #[error("document has no <body>")]
    NoBody,
}

/// Convenience Result type for jubelogs operations
pub type Result<T> = std::result::Result<T, BlogError>;

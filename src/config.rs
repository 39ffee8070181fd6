//! Site configuration, stored as JSON

use crate::utils::Result;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Path of the shared layout fragment
pub const DEFAULT_LAYOUT_PATH: &str = "/layout.html";
/// Character budget for a rendered synopsis
pub const SYNOPSIS_WORD_LIMIT: usize = 500;
/// Date prefix used for posts without a date
pub const DATE_PLACEHOLDER: &str = "(sem data) - ";

/// Element ids and rendering knobs for a site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Layout fragment location, resolved against the page URL
    pub layout_path: String,
    /// Id of the page element that is moved into the layout
    pub content_id: String,
    /// Id of the layout element that receives the content
    pub slot_id: String,
    /// Id of the list that receives post entries
    pub blog_list_id: String,
    /// Id of the element that receives the splash
    pub surprise_id: String,
    /// Synopsis length limit, in characters
    pub synopsis_limit: usize,
    /// Cut synopses on whitespace
    pub word_boundary: bool,
    /// Date prefix for undated posts
    pub date_placeholder: String,
    /// When set, the composed `<title>` becomes "<site_name> - <page title>"
    pub site_name: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            layout_path: DEFAULT_LAYOUT_PATH.to_string(),
            content_id: "content".to_string(),
            slot_id: "main".to_string(),
            blog_list_id: "blog-list".to_string(),
            surprise_id: "surprise".to_string(),
            synopsis_limit: SYNOPSIS_WORD_LIMIT,
            word_boundary: true,
            date_placeholder: DATE_PLACEHOLDER.to_string(),
            site_name: Some("jubelogs".to_string()),
        }
    }
}

impl SiteConfig {
    /// Load config from `path`, or return defaults if the file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Parse config from JSON text; `source_name` only labels errors
    pub fn from_json(content: &str, source_name: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            ConfigError::Json {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

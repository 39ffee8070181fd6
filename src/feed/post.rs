//! Post records and the feed they arrive in

use crate::utils::Result;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One blog entry's metadata and summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub url: String,
    /// May contain inline markup
    pub synopsis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Post {
    /// Create an undated post
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        synopsis: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            synopsis: synopsis.into(),
            date: None,
        }
    }

    /// Attach a date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

#[derive(Deserialize)]
struct RawFeed {
    posts: Option<Vec<Post>>,
    splashes: Option<Vec<String>>,
}

/// Posts (oldest first) and the splash pool for one site
#[derive(Debug, Clone)]
pub struct Feed {
    posts: Vec<Post>,
    splashes: Vec<String>,
}

impl Feed {
    /// Build a feed, rejecting empty inputs
    pub fn new(posts: Vec<Post>, splashes: Vec<String>) -> Result<Self> {
        if posts.is_empty() {
            return Err(ConfigError::EmptyPosts.into());
        }
        if splashes.is_empty() {
            return Err(ConfigError::EmptySplashes.into());
        }
        Ok(Self { posts, splashes })
    }

    /// Parse `{"posts": [...], "splashes": [...]}`; `source_name` only labels errors
    pub fn from_json(content: &str, source_name: &str) -> Result<Self> {
        let raw: RawFeed = serde_json::from_str(content).map_err(|e| ConfigError::Json {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(
            raw.posts.unwrap_or_default(),
            raw.splashes.unwrap_or_default(),
        )
    }

    /// Load a feed file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let feed = Self::from_json(&content, &path.display().to_string())?;
        log::info!(
            "loaded {} posts and {} splashes from {}",
            feed.posts.len(),
            feed.splashes.len(),
            path.display()
        );
        Ok(feed)
    }

    /// Posts in chronological order, oldest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Splash pool
    pub fn splashes(&self) -> &[String] {
        &self.splashes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::BlogError;

    #[test]
    fn test_from_json() {
        let feed = Feed::from_json(
            r#"{
                "posts": [
                    {"title": "A", "url": "/a", "synopsis": "x", "date": "2021"},
                    {"title": "B", "url": "/b", "synopsis": "y"}
                ],
                "splashes": ["hi"]
            }"#,
            "inline",
        )
        .unwrap();
        assert_eq!(feed.posts()[0], Post::new("A", "/a", "x").with_date("2021"));
        assert_eq!(feed.posts()[1].date, None);
        assert_eq!(feed.splashes(), ["hi".to_string()]);
    }

    #[test]
    fn test_missing_posts_is_config_error() {
        let result = Feed::from_json(r#"{"splashes": ["hi"]}"#, "inline");
        assert!(matches!(result, Err(BlogError::Config(ConfigError::EmptyPosts))));
    }

    #[test]
    fn test_empty_splashes_is_config_error() {
        let result = Feed::new(vec![Post::new("A", "/a", "x")], Vec::new());
        assert!(matches!(result, Err(BlogError::Config(ConfigError::EmptySplashes))));
    }

    #[test]
    fn test_malformed_json() {
        let result = Feed::from_json(r#"{"posts": [{"title": 1}]}"#, "feed.json");
        assert!(matches!(result, Err(BlogError::Config(ConfigError::Json { .. }))));
    }
}

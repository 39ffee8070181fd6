//! Feed rendering
//!
//! Builds one list entry per post, newest first:
//!
//! ```html
//! <li>
//!   <h2 class="special-text">
//!     <span id="synopsis-date_0">(2021) - </span>
//!     <a id="synopsis-link_0" href="/a" style="color: white">A</a>
//!   </h2>
//!   <p id="synopsis-paragraph_0">x</p>
//! </li>
//! ```

use super::post::Post;
use crate::config::{DATE_PLACEHOLDER, SiteConfig};
use crate::renderer::{HtmlParser, NodeRef, set_inner_html};
use crate::utils::{Result, truncate_cow};

/// Renders post entries into a container element
#[derive(Clone)]
pub struct FeedRenderer {
    word_limit: usize,
    word_boundary: bool,
    date_placeholder: String,
    parser: HtmlParser,
}

impl FeedRenderer {
    /// Renderer with the default placeholder, cutting on word boundaries
    pub fn new(word_limit: usize) -> Self {
        Self {
            word_limit,
            word_boundary: true,
            date_placeholder: DATE_PLACEHOLDER.to_string(),
            parser: HtmlParser::new(),
        }
    }

    /// Renderer configured from site settings
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            word_limit: config.synopsis_limit,
            word_boundary: config.word_boundary,
            date_placeholder: config.date_placeholder.clone(),
            parser: HtmlParser::new(),
        }
    }

    /// Date prefix shown before the title
    pub fn date_prefix(&self, post: &Post) -> String {
        match &post.date {
            Some(date) => format!("({date}) - "),
            None => self.date_placeholder.clone(),
        }
    }

    /// Append one entry per post to `container`, newest first. `posts` is in
    /// chronological order and is not modified. Returns the number of entries.
    pub fn render(&self, posts: &[Post], container: &NodeRef) -> Result<usize> {
        for (index, post) in posts.iter().rev().enumerate() {
            let entry = self.build_entry(index, post)?;
            container.append_child(&entry)?;
        }
        log::debug!("rendered {} feed entries", posts.len());
        Ok(posts.len())
    }

    fn build_entry(&self, index: usize, post: &Post) -> Result<NodeRef> {
        let item = NodeRef::element("li");
        let header = NodeRef::element("h2");
        header.set_attribute("class", "special-text");

        let date = NodeRef::element("span");
        date.set_attribute("id", format!("synopsis-date_{index}"));
        date.set_text_content(self.date_prefix(post))?;

        let link = NodeRef::element("a");
        link.set_attribute("id", format!("synopsis-link_{index}"));
        link.set_attribute("href", post.url.as_str());
        link.set_attribute("style", "color: white");
        link.set_text_content(post.title.as_str())?;

        let synopsis = NodeRef::element("p");
        synopsis.set_attribute("id", format!("synopsis-paragraph_{index}"));
        let text = truncate_cow(&post.synopsis, self.word_limit, self.word_boundary);
        set_inner_html(&self.parser, &synopsis, &text)?;

        header.append_child(&date)?;
        header.append_child(&link)?;
        item.append_child(&header)?;
        item.append_child(&synopsis)?;
        Ok(item)
    }
}

/// Render `posts` into `container` with default settings
pub fn render_feed(posts: &[Post], container: &NodeRef, word_limit: usize) -> Result<()> {
    FeedRenderer::new(word_limit).render(posts, container)?;
    Ok(())
}

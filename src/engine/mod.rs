//! Page load orchestration
//!
//! Once a page signals it is ready, the engine runs both page scripts:
//! 1. Render the post feed into the blog list and pick a splash
//! 2. Compose the page into the shared layout
//!
//! The two never share data and a failure in one never stops the other.

mod page;

pub use page::{Page, ReadyState};

use crate::config::SiteConfig;
use crate::feed::{Feed, FeedRenderer, pick_splash, write_splash};
use crate::network::{Fetch, NetworkStack};
use crate::renderer::HtmlParser;
use crate::template::{HostDocument, LayoutComposer};
use crate::utils::Result;
use crate::utils::error::ConfigError;
use rand::Rng;

/// What a page load achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries appended to the blog list, when rendering succeeded
    pub entries: Option<usize>,
    /// Whether a splash was written
    pub splash: bool,
    /// Whether the layout replaced the body
    pub composed: bool,
}

/// Runs the landing page scripts against a page
pub struct BlogEngine<F = NetworkStack> {
    config: SiteConfig,
    renderer: FeedRenderer,
    composer: LayoutComposer,
    parser: HtmlParser,
    network: F,
}

impl BlogEngine<NetworkStack> {
    /// Create an engine with the real network stack
    pub fn new(config: SiteConfig) -> Self {
        Self::with_fetcher(config, NetworkStack::new())
    }
}

impl<F: Fetch> BlogEngine<F> {
    /// Create an engine that loads the layout through `network`
    pub fn with_fetcher(config: SiteConfig, network: F) -> Self {
        Self {
            renderer: FeedRenderer::from_config(&config),
            composer: LayoutComposer::from_config(&config),
            parser: HtmlParser::new(),
            config,
            network,
        }
    }

    /// Site settings in use
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Get a reference to the layout fetcher
    pub fn network(&self) -> &F {
        &self.network
    }

    /// Run the ready handlers. Only a page that is not ready is an error;
    /// component failures land on the page console.
    pub async fn on_document_ready<R>(
        &self,
        page: &mut Page,
        feed: &Feed,
        rng: &mut R,
    ) -> Result<LoadReport>
    where
        R: Rng,
    {
        if page.ready_state() != ReadyState::Complete {
            return Err(ConfigError::NotReady.into());
        }

        let entries = match self.render_feed(page, feed) {
            Ok(count) => Some(count),
            Err(e) => {
                page.console_mut()
                    .error(format!("Error rendering the post feed: {e}"));
                None
            }
        };

        let splash = match self.render_splash(page, feed, rng) {
            Ok(()) => true,
            Err(e) => {
                page.console_mut()
                    .error(format!("Error writing the splash: {e}"));
                false
            }
        };

        let composed = self.composer.compose(page, &self.network).await;

        log::info!(
            "page {} loaded: {} entries, splash {}, composed {}",
            page.url(),
            entries.unwrap_or(0),
            splash,
            composed
        );
        Ok(LoadReport {
            entries,
            splash,
            composed,
        })
    }

    fn render_feed(&self, page: &Page, feed: &Feed) -> Result<usize> {
        let container = page
            .element_by_id(&self.config.blog_list_id)
            .ok_or_else(|| ConfigError::MissingTarget(self.config.blog_list_id.clone()))?;
        self.renderer.render(feed.posts(), &container)
    }

    fn render_splash<R>(&self, page: &Page, feed: &Feed, rng: &mut R) -> Result<()>
    where
        R: Rng,
    {
        let target = page
            .element_by_id(&self.config.surprise_id)
            .ok_or_else(|| ConfigError::MissingTarget(self.config.surprise_id.clone()))?;
        let splash = pick_splash(feed.splashes(), rng)?;
        write_splash(&self.parser, &target, splash)
    }
}
